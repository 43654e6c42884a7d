//! Two-state monitor signal and its cross-thread publisher.
//!
//! [`StatePublisher`] owns the canonical [`MonitorState`] and marshals each
//! distinct value to a single consumer exactly once, in publish order. The
//! compare, the update and the channel send all happen under one short lock,
//! which is what makes the notification order match the publish order; the
//! send itself is an unbounded, non-blocking enqueue, so the critical section
//! stays bounded and never waits on the consumer.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// The published activity signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonitorState {
    Running,
    Idle,
}

impl fmt::Display for MonitorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorState::Running => write!(f, "Running"),
            MonitorState::Idle => write!(f, "Idle"),
        }
    }
}

/// Thread-safe holder of the canonical state plus a change channel.
///
/// Any thread may publish; the receiver side belongs to the designated
/// consumer (the UI-equivalent task). Polling [`current`] and draining the
/// channel observe the same total order of transitions.
///
/// [`current`]: StatePublisher::current
pub struct StatePublisher {
    current: Mutex<MonitorState>,
    notify: UnboundedSender<MonitorState>,
}

impl StatePublisher {
    /// Creates a publisher with its consumer-side receiver.
    pub fn new(initial: MonitorState) -> (Self, UnboundedReceiver<MonitorState>) {
        let (notify, receiver) = mpsc::unbounded_channel();
        (
            Self {
                current: Mutex::new(initial),
                notify,
            },
            receiver,
        )
    }

    /// Publishes a state, notifying the consumer once per distinct value.
    ///
    /// Publishing the value already held is a no-op: no notification is
    /// sent. A closed receiver is tolerated; the canonical value keeps
    /// updating for pollers.
    pub fn publish(&self, next: MonitorState) {
        let mut current = self.current.lock();
        if *current == next {
            return;
        }
        *current = next;
        let _ = self.notify.send(next);
    }

    /// The most recently published state.
    pub fn current(&self) -> MonitorState {
        *self.current.lock()
    }
}
