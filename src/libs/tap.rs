//! Scope-gated management of the host event tap.
//!
//! The tap is the privileged, host-provided mechanism that observes input
//! events outside normal dispatch. [`ScopeGatedTap`] keys the tap's installed
//! state to a reference count of open suppression scopes: the tap feeds the
//! monitor while no scope is open, and the first opened scope takes it down
//! until the last scope is released. Callers hold a [`ScopeGuard`] across any
//! action that would generate synthetic activity (a self-triggered dialog,
//! including its teardown) so that none of it reaches the classifier.
//!
//! Install and uninstall talk to the host through the [`TapBackend`] trait
//! and happen exactly at the 0↔1 transitions of the scope count. No internal
//! lock is held across a backend call; the host may re-enter freely.

use crate::libs::activity::ActivityCode;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_warning};
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;

/// Callback invoked by the host for every observed event, on whatever
/// thread the host delivers it.
pub type TapCallback = Arc<dyn Fn(ActivityCode) + Send + Sync>;

/// Opaque token identifying one successful tap installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapHandle(pub u64);

/// Errors surfaced by the tap layer.
#[derive(Debug, Error)]
pub enum TapError {
    /// The host refused or failed tap installation. Non-fatal: the monitor
    /// degrades to never detecting activity.
    #[error("event tap unavailable: {0}")]
    Unavailable(String),
}

/// Host-side tap registration interface.
///
/// Implementations must make both calls idempotent: installing while already
/// installed, or uninstalling an already-released handle, is a safe no-op.
pub trait TapBackend: Send + Sync {
    /// Registers `callback` with the host and returns the handle needed to
    /// later uninstall it.
    fn install(&self, callback: TapCallback) -> Result<TapHandle, TapError>;

    /// Deregisters a previously installed callback.
    fn uninstall(&self, handle: TapHandle);
}

/// Shared mutable state: the scope count and the installed handle live under
/// one lock, per the single-guard policy for this component.
struct GateState {
    open_scopes: usize,
    handle: Option<TapHandle>,
    /// Set after the backend refuses installation; suppresses reinstall
    /// attempts on later 1→0 transitions.
    unavailable: bool,
}

/// Installs and uninstalls the event tap based on a reference count of open
/// suppression scopes.
pub struct ScopeGatedTap {
    backend: Arc<dyn TapBackend>,
    callback: TapCallback,
    state: Mutex<GateState>,
}

impl ScopeGatedTap {
    pub fn new(backend: Arc<dyn TapBackend>, callback: TapCallback) -> Arc<Self> {
        Arc::new(Self {
            backend,
            callback,
            state: Mutex::new(GateState {
                open_scopes: 0,
                handle: None,
                unavailable: false,
            }),
        })
    }

    /// Performs the initial installation.
    ///
    /// On failure the tap is marked unavailable and the error is returned to
    /// the orchestrator, which reports it and continues in degraded mode.
    pub fn engage(&self) -> Result<(), TapError> {
        match self.try_install() {
            Ok(()) => Ok(()),
            Err(e) => {
                self.state.lock().unavailable = true;
                Err(e)
            }
        }
    }

    /// Opens a suppression scope.
    ///
    /// While the returned guard (or any other) is alive, no activity event
    /// reaches the classifier. The guard must stay alive across every exit
    /// path of the suppressed action, including the teardown of anything the
    /// action put on screen; a dialog's close is itself an input event.
    pub fn open_scope(self: &Arc<Self>) -> ScopeGuard {
        let mut state = self.state.lock();
        state.open_scopes += 1;
        let uninstall = if state.open_scopes == 1 {
            state.handle.take()
        } else {
            None
        };
        drop(state);

        if let Some(handle) = uninstall {
            self.backend.uninstall(handle);
            msg_debug!(Message::TapUninstalled);
        }

        ScopeGuard {
            tap: Arc::clone(self),
            released: false,
        }
    }

    /// True iff at least one suppression scope is open.
    ///
    /// The orchestrator checks this per incoming event, which covers events
    /// already in flight when the tap was taken down.
    pub fn is_suppressed(&self) -> bool {
        self.state.lock().open_scopes > 0
    }

    /// True while a backend installation is live. Exposed for status
    /// reporting and tests.
    pub fn is_installed(&self) -> bool {
        self.state.lock().handle.is_some()
    }

    /// True after the backend refused installation.
    pub fn is_unavailable(&self) -> bool {
        self.state.lock().unavailable
    }

    /// Decrements the scope count; reinstalls the tap on the 1→0 transition.
    fn release_scope(&self) {
        let mut state = self.state.lock();
        if state.open_scopes == 0 {
            // Misuse: more releases than opens. Report and leave the count
            // untouched rather than underflowing or double-uninstalling.
            drop(state);
            msg_warning!(Message::ScopeDoubleRelease);
            return;
        }
        state.open_scopes -= 1;
        let reinstall = state.open_scopes == 0 && state.handle.is_none() && !state.unavailable;
        drop(state);

        if reinstall {
            // Already-reported unavailability aside, a failure here flips
            // the tap into degraded mode exactly like a failed engage().
            if let Err(e) = self.try_install() {
                self.state.lock().unavailable = true;
                msg_warning!(Message::TapUnavailable(e.to_string()));
            }
        }
    }

    /// Installs the backend tap if no scope is open, without holding the
    /// state lock across the backend call.
    fn try_install(&self) -> Result<(), TapError> {
        {
            let state = self.state.lock();
            if state.open_scopes > 0 || state.handle.is_some() {
                return Ok(());
            }
        }

        let handle = self.backend.install(self.callback.clone())?;

        let mut state = self.state.lock();
        if state.open_scopes == 0 && state.handle.is_none() {
            state.handle = Some(handle);
            drop(state);
            msg_debug!(Message::TapInstalled);
        } else {
            // A scope opened (or another install won) while the backend call
            // was in flight; roll this installation back.
            drop(state);
            self.backend.uninstall(handle);
        }
        Ok(())
    }
}

/// A caller-held lease that disables activity detection for its lifetime.
///
/// Releasing happens automatically on drop, so the scope is closed on every
/// exit path; [`release`](ScopeGuard::release) exists for call sites that
/// want the close to be visible in the control flow.
pub struct ScopeGuard {
    tap: Arc<ScopeGatedTap>,
    released: bool,
}

impl ScopeGuard {
    /// Explicitly releases the scope.
    pub fn release(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if !self.released {
            self.released = true;
            self.tap.release_scope();
        }
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        self.release_once();
    }
}
