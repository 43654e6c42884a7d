//! Foreground activity watcher with graceful shutdown.
//!
//! Runs the activity monitor against the rdev input backend and prints each
//! Running / Idle transition with a timestamp. Shutdown is signal-driven:
//! SIGTERM/SIGINT on Unix, Ctrl+C on Windows.

use crate::libs::config::Config;
use crate::libs::listener::RdevBackend;
use crate::libs::messages::Message;
use crate::libs::monitor::ActivityMonitor;
use crate::{msg_info, msg_print};
#[cfg(windows)]
use crate::msg_error;
#[cfg(not(any(unix, windows)))]
use crate::msg_warning;
use anyhow::Result;
use chrono::Local;
use std::sync::Arc;

pub async fn cmd() -> Result<()> {
    let config = Config::read()?;
    let monitor_config = config.monitor.unwrap_or_default();
    monitor_config.validate()?;

    let backend = Arc::new(RdevBackend::new());
    let (monitor, mut states) = ActivityMonitor::new(&monitor_config, backend)?;
    monitor.start();

    msg_info!(Message::MonitorStarted {
        idle_timeout_ms: monitor_config.idle_timeout_ms
    });
    msg_print!(Message::WatcherStarting);

    // Set up a channel to handle shutdown signals
    let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel();

    #[cfg(unix)]
    {
        tokio::spawn(async move {
            use tokio::signal::unix::{signal, SignalKind};

            let mut sigterm = signal(SignalKind::terminate()).expect(&Message::FailedToCreateSigtermHandler.to_string());
            let mut sigint = signal(SignalKind::interrupt()).expect(&Message::FailedToCreateSigintHandler.to_string());

            tokio::select! {
                _ = sigterm.recv() => {
                    msg_info!(Message::WatcherReceivedSigterm);
                }
                _ = sigint.recv() => {
                    msg_info!(Message::WatcherReceivedSigint);
                }
            }

            let _ = shutdown_tx.send(());
        });
    }

    #[cfg(windows)]
    {
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    msg_info!(Message::WatcherReceivedCtrlC);
                }
                Err(e) => {
                    msg_error!(Message::WatcherCtrlCListenFailed(e.to_string()));
                }
            }

            let _ = shutdown_tx.send(());
        });
    }

    #[cfg(not(any(unix, windows)))]
    {
        // shutdown_tx stays alive here so the select below never resolves
        // on the signal arm; the watcher runs until killed.
        msg_warning!(Message::WatcherSignalHandlingNotSupported);
    }

    // Consume state transitions until a shutdown signal arrives.
    loop {
        tokio::select! {
            state = states.recv() => {
                match state {
                    Some(state) => {
                        let time = Local::now().format("%H:%M:%S").to_string();
                        msg_print!(Message::StateChanged(time, state.to_string()));
                    }
                    // Publisher dropped; nothing more will arrive.
                    None => break,
                }
            }
            _ = &mut shutdown_rx => {
                msg_info!(Message::MonitorShuttingDown);
                break;
            }
        }
    }

    drop(monitor);
    msg_info!(Message::MonitorExitedNormally);
    Ok(())
}
