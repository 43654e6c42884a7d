#[cfg(test)]
mod tests {
    use vigil::libs::state::{MonitorState, StatePublisher};

    #[test]
    fn test_initial_state_yields_no_notification() {
        let (publisher, mut states) = StatePublisher::new(MonitorState::Idle);
        assert_eq!(publisher.current(), MonitorState::Idle);
        assert!(states.try_recv().is_err());
    }

    #[test]
    fn test_duplicate_publish_notifies_once() {
        let (publisher, mut states) = StatePublisher::new(MonitorState::Idle);

        publisher.publish(MonitorState::Running);
        publisher.publish(MonitorState::Running);

        assert_eq!(states.try_recv().unwrap(), MonitorState::Running);
        assert!(states.try_recv().is_err(), "duplicate publish must not notify");
        assert_eq!(publisher.current(), MonitorState::Running);
    }

    #[test]
    fn test_notifications_preserve_publish_order() {
        let (publisher, mut states) = StatePublisher::new(MonitorState::Idle);

        publisher.publish(MonitorState::Running);
        publisher.publish(MonitorState::Idle);
        publisher.publish(MonitorState::Idle); // duplicate, dropped
        publisher.publish(MonitorState::Running);

        let mut seen = Vec::new();
        while let Ok(state) = states.try_recv() {
            seen.push(state);
        }
        assert_eq!(
            seen,
            vec![MonitorState::Running, MonitorState::Idle, MonitorState::Running]
        );
    }

    #[test]
    fn test_current_tracks_latest_publish_across_threads() {
        let (publisher, _states) = StatePublisher::new(MonitorState::Idle);
        let publisher = std::sync::Arc::new(publisher);

        let worker = {
            let publisher = publisher.clone();
            std::thread::spawn(move || publisher.publish(MonitorState::Running))
        };
        worker.join().unwrap();

        assert_eq!(publisher.current(), MonitorState::Running);
    }

    #[test]
    fn test_closed_receiver_is_tolerated() {
        let (publisher, states) = StatePublisher::new(MonitorState::Idle);
        drop(states);

        // Pollers keep working after the consumer goes away.
        publisher.publish(MonitorState::Running);
        assert_eq!(publisher.current(), MonitorState::Running);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(MonitorState::Running.to_string(), "Running");
        assert_eq!(MonitorState::Idle.to_string(), "Idle");
    }
}
