//! Restartable single-shot inactivity timer.
//!
//! [`WatchdogTimer`] arms a countdown on every [`start_or_restart`] call and
//! invokes its completion callback exactly once if the countdown is allowed
//! to run out. A dedicated worker thread sleeps on a condition variable until
//! the current deadline; restarts simply move the deadline forward and wake
//! the worker, so the last caller always wins regardless of which thread it
//! arrives on.
//!
//! [`start_or_restart`]: WatchdogTimer::start_or_restart

use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Shared state between the timer handle and its worker thread.
struct TimerState {
    /// Pending deadline; `None` while the timer is stopped.
    deadline: Option<Instant>,
    /// Set on drop to terminate the worker.
    shutdown: bool,
}

struct TimerShared {
    state: Mutex<TimerState>,
    wakeup: Condvar,
    interval: Duration,
}

/// A restartable, single-shot countdown timer.
///
/// The completion callback runs on the worker thread with no internal lock
/// held, so it may freely call back into the monitor.
pub struct WatchdogTimer {
    shared: Arc<TimerShared>,
    worker: Option<JoinHandle<()>>,
}

impl WatchdogTimer {
    /// Spawns the worker thread for a timer with the given interval.
    ///
    /// A zero interval is a misconfiguration and fails fast here; there is
    /// no runtime failure mode beyond that.
    pub fn spawn<F>(interval: Duration, on_elapsed: F) -> Result<Self>
    where
        F: Fn() + Send + 'static,
    {
        if interval.is_zero() {
            return Err(msg_error_anyhow!(Message::InvalidIdleTimeout));
        }

        let shared = Arc::new(TimerShared {
            state: Mutex::new(TimerState {
                deadline: None,
                shutdown: false,
            }),
            wakeup: Condvar::new(),
            interval,
        });

        let worker_shared = shared.clone();
        let worker = thread::Builder::new()
            .name("vigil-watchdog".into())
            .spawn(move || Self::run(worker_shared, on_elapsed))?;

        Ok(Self {
            shared,
            worker: Some(worker),
        })
    }

    /// (Re)arms the countdown for a full interval from now.
    ///
    /// Callable from any thread and safe against concurrent callers: each
    /// call captures a fresh deadline under the same lock the worker checks
    /// before firing, so a restart that races an about-to-fire expiry either
    /// cancels it or immediately rearms the timer.
    pub fn start_or_restart(&self) {
        let mut state = self.shared.state.lock();
        state.deadline = Some(Instant::now() + self.shared.interval);
        drop(state);
        self.shared.wakeup.notify_one();
    }

    /// True while a countdown is armed and has not yet elapsed.
    pub fn is_running(&self) -> bool {
        self.shared.state.lock().deadline.is_some()
    }

    /// The configured interval.
    pub fn interval(&self) -> Duration {
        self.shared.interval
    }

    /// Worker loop: wait for a deadline, sleep until it, fire if it is
    /// still the current one.
    fn run<F: Fn()>(shared: Arc<TimerShared>, on_elapsed: F) {
        let mut state = shared.state.lock();
        loop {
            if state.shutdown {
                break;
            }
            match state.deadline {
                // Stopped: nothing to do until the next restart.
                None => {
                    shared.wakeup.wait(&mut state);
                }
                Some(deadline) => {
                    if Instant::now() < deadline {
                        // Sleeps until the deadline or an earlier wakeup;
                        // the loop re-reads `deadline`, so a restart during
                        // the wait simply extends the sleep.
                        shared.wakeup.wait_until(&mut state, deadline);
                    } else {
                        // Edge-triggered: clear the deadline before firing
                        // so completion happens at most once per arming.
                        state.deadline = None;
                        drop(state);
                        on_elapsed();
                        state = shared.state.lock();
                    }
                }
            }
        }
    }
}

impl Drop for WatchdogTimer {
    fn drop(&mut self) {
        {
            let mut state = self.shared.state.lock();
            state.shutdown = true;
        }
        self.shared.wakeup.notify_one();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
