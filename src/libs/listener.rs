//! rdev-backed event tap.
//!
//! [`RdevBackend`] implements [`TapBackend`] on top of the rdev global input
//! listener. `rdev::listen` blocks its thread for the life of the process and
//! has no unhook, so the backend runs it on one dedicated thread, restarted
//! with a delay on error, and treats install/uninstall as attaching and
//! detaching the forwarding slot. Handles are epoch-numbered so a stale
//! uninstall can never detach a newer installation.

use crate::libs::activity::ActivityCode;
use crate::libs::messages::Message;
use crate::libs::tap::{TapBackend, TapCallback, TapError, TapHandle};
use crate::msg_warning;
use parking_lot::Mutex;
use rdev::{Event, EventType};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Listener state shared with the rdev thread.
struct ListenerShared {
    /// Active forwarding slot: installation epoch plus callback.
    slot: Mutex<Option<(u64, TapCallback)>>,
    next_epoch: AtomicU64,
    /// Whether the listener thread has been spawned.
    started: Mutex<bool>,
}

/// Global input listener backend built on rdev.
pub struct RdevBackend {
    shared: Arc<ListenerShared>,
}

impl RdevBackend {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(ListenerShared {
                slot: Mutex::new(None),
                next_epoch: AtomicU64::new(1),
                started: Mutex::new(false),
            }),
        }
    }

    /// Spawns the listener thread on first install.
    fn ensure_listener(&self) -> Result<(), TapError> {
        let mut started = self.shared.started.lock();
        if *started {
            return Ok(());
        }

        let shared = self.shared.clone();
        thread::Builder::new()
            .name("vigil-listener".into())
            .spawn(move || loop {
                let forward_shared = shared.clone();
                if let Err(e) = rdev::listen(move |event: Event| {
                    forward(&forward_shared, &event);
                }) {
                    msg_warning!(Message::TapListenFailed(format!("{:?}", e)));
                    thread::sleep(Duration::from_secs(1));
                } else {
                    // listen() is not expected to return without error; if
                    // it ever does, stop instead of spinning.
                    break;
                }
            })
            .map_err(|e| TapError::Unavailable(e.to_string()))?;

        *started = true;
        Ok(())
    }
}

impl Default for RdevBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TapBackend for RdevBackend {
    fn install(&self, callback: TapCallback) -> Result<TapHandle, TapError> {
        self.ensure_listener()?;
        let epoch = self.shared.next_epoch.fetch_add(1, Ordering::Relaxed);
        *self.shared.slot.lock() = Some((epoch, callback));
        Ok(TapHandle(epoch))
    }

    fn uninstall(&self, handle: TapHandle) {
        let mut slot = self.shared.slot.lock();
        // Only detach the matching epoch; uninstalling a stale or already
        // released handle is a no-op.
        if matches!(*slot, Some((epoch, _)) if epoch == handle.0) {
            *slot = None;
        }
    }
}

/// Decodes a native rdev event into an activity code.
fn decode(event_type: &EventType) -> ActivityCode {
    match event_type {
        EventType::MouseMove { .. } => ActivityCode::PointerMove,
        EventType::ButtonPress(_) => ActivityCode::ButtonDown,
        EventType::ButtonRelease(_) => ActivityCode::ButtonUp,
        EventType::KeyPress(_) => ActivityCode::KeyDown,
        EventType::KeyRelease(_) => ActivityCode::KeyUp,
        EventType::Wheel { .. } => ActivityCode::Wheel,
    }
}

/// Forwards one event to the installed callback, if any.
///
/// The slot lock is only held long enough to clone the callback; the
/// callback itself runs unlocked on the listener thread.
fn forward(shared: &ListenerShared, event: &Event) {
    let code = decode(&event.event_type);
    let callback = {
        let slot = shared.slot.lock();
        slot.as_ref().map(|(_, cb)| cb.clone())
    };
    if let Some(callback) = callback {
        callback(code);
    }
}
