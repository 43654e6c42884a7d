#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleMonitor,
    PromptSelectModules,
    PromptIdleTimeout,
    InvalidIdleTimeout,
    EmptyActivitySet,

    // === MONITOR MESSAGES ===
    MonitorStarted { idle_timeout_ms: u64 },
    MonitorDegraded,
    MonitorShuttingDown,
    MonitorExitedNormally,
    StateChanged(String, String), // time, state

    // === TAP MESSAGES ===
    TapInstalled,
    TapUninstalled,
    TapUnavailable(String),
    TapListenFailed(String),
    ScopeDoubleRelease,

    // === WATCHER MESSAGES ===
    WatcherStarting,
    WatcherReceivedSigterm,
    WatcherReceivedSigint,
    WatcherReceivedCtrlC,
    WatcherCtrlCListenFailed(String), // error
    WatcherSignalHandlingNotSupported,
    FailedToCreateSigtermHandler,
    FailedToCreateSigintHandler,
}
