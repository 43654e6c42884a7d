#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::time::{sleep, Duration};
    use vigil::libs::activity::ActivityCode;
    use vigil::libs::config::MonitorConfig;
    use vigil::libs::monitor::ActivityMonitor;
    use vigil::libs::state::MonitorState;
    use vigil::libs::tap::{TapBackend, TapCallback, TapError, TapHandle};

    /// Test double standing in for the host input tap: events are injected
    /// with `emit`, which goes through the installed callback exactly like a
    /// host delivery would.
    #[derive(Default)]
    struct MockBackend {
        refuse: AtomicBool,
        next_handle: AtomicU64,
        callback: Mutex<Option<TapCallback>>,
    }

    impl MockBackend {
        fn refusing() -> Self {
            let backend = Self::default();
            backend.refuse.store(true, Ordering::SeqCst);
            backend
        }

        /// Delivers one event to the installed callback, if any.
        fn emit(&self, code: ActivityCode) {
            let callback = self.callback.lock().unwrap().clone();
            if let Some(callback) = callback {
                callback(code);
            }
        }
    }

    impl TapBackend for MockBackend {
        fn install(&self, callback: TapCallback) -> Result<TapHandle, TapError> {
            if self.refuse.load(Ordering::SeqCst) {
                return Err(TapError::Unavailable("denied by host".to_string()));
            }
            *self.callback.lock().unwrap() = Some(callback);
            Ok(TapHandle(self.next_handle.fetch_add(1, Ordering::SeqCst) + 1))
        }

        fn uninstall(&self, _handle: TapHandle) {
            *self.callback.lock().unwrap() = None;
        }
    }

    fn test_config(idle_timeout_ms: u64) -> MonitorConfig {
        MonitorConfig {
            idle_timeout_ms,
            activity_codes: None,
        }
    }

    #[tokio::test]
    async fn test_activity_transitions_to_running() {
        let backend = Arc::new(MockBackend::default());
        let (monitor, _states) = ActivityMonitor::new(&test_config(5_000), backend.clone()).unwrap();
        monitor.start();

        assert_eq!(monitor.state(), MonitorState::Idle);
        backend.emit(ActivityCode::KeyDown);
        assert_eq!(monitor.state(), MonitorState::Running);
        assert!(monitor.timer_armed());
    }

    #[tokio::test]
    async fn test_non_member_codes_change_nothing() {
        let backend = Arc::new(MockBackend::default());
        let config = MonitorConfig {
            idle_timeout_ms: 5_000,
            activity_codes: Some(vec![ActivityCode::KeyDown]),
        };
        let (monitor, mut states) = ActivityMonitor::new(&config, backend.clone()).unwrap();
        monitor.start();

        backend.emit(ActivityCode::KeyUp);
        backend.emit(ActivityCode::Wheel);
        assert_eq!(monitor.state(), MonitorState::Idle);
        assert!(!monitor.timer_armed(), "non-members must not restart the timer");
        assert!(states.try_recv().is_err());

        // Pointer move stays activity even though the set omits it.
        backend.emit(ActivityCode::PointerMove);
        assert_eq!(monitor.state(), MonitorState::Running);
    }

    #[tokio::test]
    async fn test_idle_after_uninterrupted_interval() {
        let backend = Arc::new(MockBackend::default());
        let (monitor, mut states) = ActivityMonitor::new(&test_config(200), backend.clone()).unwrap();
        monitor.start();

        backend.emit(ActivityCode::KeyDown);
        assert_eq!(monitor.state(), MonitorState::Running);

        sleep(Duration::from_millis(600)).await;
        assert_eq!(monitor.state(), MonitorState::Idle);
        assert!(!monitor.timer_armed());

        // Exactly one transition each way, idempotent thereafter.
        assert_eq!(states.try_recv().unwrap(), MonitorState::Running);
        assert_eq!(states.try_recv().unwrap(), MonitorState::Idle);
        assert!(states.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_activity_burst_keeps_running() {
        let backend = Arc::new(MockBackend::default());
        let (monitor, mut states) = ActivityMonitor::new(&test_config(300), backend.clone()).unwrap();
        monitor.start();

        // Events spaced well inside the interval keep the state Running.
        for _ in 0..4 {
            backend.emit(ActivityCode::PointerMove);
            sleep(Duration::from_millis(100)).await;
            assert_eq!(monitor.state(), MonitorState::Running);
        }

        // Only after a full quiet interval does it fall back to Idle.
        sleep(Duration::from_millis(700)).await;
        assert_eq!(monitor.state(), MonitorState::Idle);

        assert_eq!(states.try_recv().unwrap(), MonitorState::Running);
        assert_eq!(states.try_recv().unwrap(), MonitorState::Idle);
        assert!(states.try_recv().is_err(), "burst must collapse into one Running");
    }

    #[tokio::test]
    async fn test_suppression_scope_blinds_the_monitor() {
        let backend = Arc::new(MockBackend::default());
        let (monitor, mut states) = ActivityMonitor::new(&test_config(5_000), backend.clone()).unwrap();
        monitor.start();

        let guard = monitor.open_scope();
        for _ in 0..10 {
            // The tap is down, so host deliveries go nowhere...
            backend.emit(ActivityCode::KeyDown);
            // ...and an event already in flight is dropped by the
            // suppression check.
            monitor.on_raw_event(ActivityCode::KeyDown);
        }
        assert_eq!(monitor.state(), MonitorState::Idle);
        assert!(!monitor.timer_armed(), "suppressed events must not restart the timer");
        assert!(states.try_recv().is_err());

        guard.release();
        backend.emit(ActivityCode::KeyDown);
        assert_eq!(monitor.state(), MonitorState::Running);
    }

    #[tokio::test]
    async fn test_nested_scopes_suppress_until_last_release() {
        let backend = Arc::new(MockBackend::default());
        let (monitor, _states) = ActivityMonitor::new(&test_config(5_000), backend.clone()).unwrap();
        monitor.start();

        let first = monitor.open_scope();
        let second = monitor.open_scope();

        first.release();
        assert!(monitor.is_suppressed());
        backend.emit(ActivityCode::KeyDown);
        monitor.on_raw_event(ActivityCode::KeyDown);
        assert_eq!(monitor.state(), MonitorState::Idle);

        second.release();
        assert!(!monitor.is_suppressed());
        backend.emit(ActivityCode::KeyDown);
        assert_eq!(monitor.state(), MonitorState::Running);
    }

    #[tokio::test]
    async fn test_refused_tap_degrades_to_idle() {
        let backend = Arc::new(MockBackend::refusing());
        let (monitor, mut states) = ActivityMonitor::new(&test_config(200), backend.clone()).unwrap();
        monitor.start();

        assert!(monitor.is_degraded());
        assert_eq!(monitor.state(), MonitorState::Idle);

        // Nothing is installed, so host-side events cannot arrive.
        backend.emit(ActivityCode::KeyDown);
        sleep(Duration::from_millis(400)).await;
        assert_eq!(monitor.state(), MonitorState::Idle);
        assert!(states.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_zero_timeout_fails_at_construction() {
        let backend = Arc::new(MockBackend::default());
        assert!(ActivityMonitor::new(&test_config(0), backend).is_err());
    }

    #[tokio::test]
    async fn test_empty_activity_set_fails_at_construction() {
        let backend = Arc::new(MockBackend::default());
        let config = MonitorConfig {
            idle_timeout_ms: 1_000,
            activity_codes: Some(vec![]),
        };
        assert!(ActivityMonitor::new(&config, backend).is_err());
    }
}
