//! Activity monitor orchestrator.
//!
//! [`ActivityMonitor`] wires the pieces together: raw codes arrive from the
//! tap callback, get classified against the configured [`ActivitySet`], and
//! on a match restart the inactivity watchdog and publish `Running`; when the
//! watchdog runs to completion the monitor publishes `Idle`. Suppression
//! scopes cut the flow off upstream of classification.

use crate::libs::activity::{ActivityCode, ActivitySet};
use crate::libs::config::MonitorConfig;
use crate::libs::messages::Message;
use crate::libs::state::{MonitorState, StatePublisher};
use crate::libs::tap::{ScopeGatedTap, ScopeGuard, TapBackend, TapCallback};
use crate::libs::watchdog::WatchdogTimer;
use crate::{msg_error, msg_warning};
use anyhow::Result;
use std::sync::{Arc, Weak};
use tokio::sync::mpsc::UnboundedReceiver;

/// Owns the watchdog timer, the scope-gated tap and the state publisher.
///
/// Construction validates the configuration and spawns the watchdog worker;
/// [`start`](ActivityMonitor::start) performs the initial tap installation.
/// The returned receiver delivers state transitions to the consumer in
/// publish order.
pub struct ActivityMonitor {
    set: ActivitySet,
    watchdog: WatchdogTimer,
    tap: Arc<ScopeGatedTap>,
    publisher: Arc<StatePublisher>,
}

impl ActivityMonitor {
    pub fn new(
        config: &MonitorConfig,
        backend: Arc<dyn TapBackend>,
    ) -> Result<(Arc<Self>, UnboundedReceiver<MonitorState>)> {
        let set = config.activity_set()?;

        let (publisher, receiver) = StatePublisher::new(MonitorState::Idle);
        let publisher = Arc::new(publisher);

        // Watchdog completion runs on the timer thread; the publisher
        // marshals the transition to the consumer.
        let idle_publisher = publisher.clone();
        let watchdog = WatchdogTimer::spawn(config.idle_timeout(), move || {
            idle_publisher.publish(MonitorState::Idle);
        })?;

        // The tap callback needs the monitor and the monitor owns the tap;
        // a weak self reference breaks the cycle. Events delivered while the
        // monitor is being torn down are dropped by the failed upgrade.
        let monitor = Arc::new_cyclic(|weak: &Weak<ActivityMonitor>| {
            let weak = weak.clone();
            let callback: TapCallback = Arc::new(move |code| {
                if let Some(monitor) = weak.upgrade() {
                    monitor.on_raw_event(code);
                }
            });
            ActivityMonitor {
                set,
                watchdog,
                tap: ScopeGatedTap::new(backend, callback),
                publisher,
            }
        });

        Ok((monitor, receiver))
    }

    /// Installs the tap and begins observing.
    ///
    /// A refused installation is reported and the monitor continues in
    /// degraded mode: it never observes activity and settles to Idle.
    pub fn start(&self) {
        if let Err(e) = self.tap.engage() {
            msg_error!(Message::TapUnavailable(e.to_string()));
            msg_warning!(Message::MonitorDegraded);
        }
    }

    /// Entry point for every observed event, on whatever thread the host
    /// delivers it. Total: never panics, never returns an error.
    pub fn on_raw_event(&self, code: ActivityCode) {
        if self.tap.is_suppressed() {
            return;
        }
        if !self.set.is_activity(code) {
            return;
        }
        self.watchdog.start_or_restart();
        if self.publisher.current() != MonitorState::Running {
            self.publisher.publish(MonitorState::Running);
        }
    }

    /// Opens a suppression scope; see [`ScopeGatedTap::open_scope`].
    pub fn open_scope(&self) -> ScopeGuard {
        self.tap.open_scope()
    }

    /// The most recently published state.
    pub fn state(&self) -> MonitorState {
        self.publisher.current()
    }

    pub fn is_suppressed(&self) -> bool {
        self.tap.is_suppressed()
    }

    /// True while the inactivity countdown is armed.
    pub fn timer_armed(&self) -> bool {
        self.watchdog.is_running()
    }

    /// True when the tap was refused and the monitor cannot observe input.
    pub fn is_degraded(&self) -> bool {
        self.tap.is_unavailable()
    }
}
