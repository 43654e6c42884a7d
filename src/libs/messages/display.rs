//! Display implementation for vigil application messages.
//!
//! All user-facing message text lives here, in one place, so the rest of the
//! code refers to messages by variant and never embeds literal strings. Texts
//! use sentence case, active voice, and include the relevant parameters.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleMonitor => "Monitor configuration".to_string(),
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptIdleTimeout => "Idle timeout in milliseconds".to_string(),
            Message::InvalidIdleTimeout => "Idle timeout must be greater than zero".to_string(),
            Message::EmptyActivitySet => "Activity set must contain at least one code".to_string(),

            // === MONITOR MESSAGES ===
            Message::MonitorStarted { idle_timeout_ms } => {
                format!("Monitor started (idle timeout: {} ms)", idle_timeout_ms)
            }
            Message::MonitorDegraded => "Monitor is running in degraded mode: no activity will be detected".to_string(),
            Message::MonitorShuttingDown => "Monitor shutting down...".to_string(),
            Message::MonitorExitedNormally => "Monitor exited normally".to_string(),
            Message::StateChanged(time, state) => format!("{} {}", time, state),

            // === TAP MESSAGES ===
            Message::TapInstalled => "Event tap installed".to_string(),
            Message::TapUninstalled => "Event tap uninstalled".to_string(),
            Message::TapUnavailable(reason) => format!("Event tap unavailable: {}", reason),
            Message::TapListenFailed(error) => format!("Input listener failed: {}. Retrying in 1 second...", error),
            Message::ScopeDoubleRelease => "Suppression scope released more than once; ignoring".to_string(),

            // === WATCHER MESSAGES ===
            Message::WatcherStarting => "Watching for user activity (Ctrl+C to stop)".to_string(),
            Message::WatcherReceivedSigterm => "Received SIGTERM, shutting down gracefully...".to_string(),
            Message::WatcherReceivedSigint => "Received SIGINT, shutting down gracefully...".to_string(),
            Message::WatcherReceivedCtrlC => "Received Ctrl+C, shutting down gracefully...".to_string(),
            Message::WatcherCtrlCListenFailed(error) => format!("Failed to listen for Ctrl+C: {}", error),
            Message::WatcherSignalHandlingNotSupported => "Signal handling not supported on this platform".to_string(),
            Message::FailedToCreateSigtermHandler => "Failed to create SIGTERM handler".to_string(),
            Message::FailedToCreateSigintHandler => "Failed to create SIGINT handler".to_string(),
        };
        write!(f, "{}", text)
    }
}
