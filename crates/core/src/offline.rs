//! Offline-degradation controller
//!
//! Process-wide switch between live LMS calls and the simulated dataset.
//! Injected explicitly into every component that needs it so tests can
//! control it deterministically; there is no ambient global.
//!
//! Transition rules:
//! - Any network-class or malformed-response failure flips `Offline`.
//! - An operator action or a clean read success flips `Online`. Implicit
//!   recovery is opportunistic; callers must not assume it happens on every
//!   tick.

use std::sync::RwLock;

use edulink_domain::EdulinkError;
use tracing::{info, warn};

/// Current mode of the integration layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfflineState {
    Online,
    Offline { reason: String },
}

/// Shared flag read by many callers and written by few. Writes are
/// last-writer-wins; two near-simultaneous failure detections set the same
/// logical state.
#[derive(Debug)]
pub struct OfflineController {
    state: RwLock<OfflineState>,
}

impl OfflineController {
    /// Start online; offline mode is only ever entered on observed failure.
    pub fn new() -> Self {
        Self { state: RwLock::new(OfflineState::Online) }
    }

    pub fn is_offline(&self) -> bool {
        matches!(*self.read(), OfflineState::Offline { .. })
    }

    /// The reason the system went offline, if it is offline.
    pub fn reason(&self) -> Option<String> {
        match &*self.read() {
            OfflineState::Offline { reason } => Some(reason.clone()),
            OfflineState::Online => None,
        }
    }

    pub fn snapshot(&self) -> OfflineState {
        self.read().clone()
    }

    /// Flip into degraded mode. Idempotent for observability purposes, but a
    /// repeated call still refreshes the reason.
    pub fn set_offline(&self, reason: impl Into<String>) {
        let reason = reason.into();
        let mut state = self.write();
        if !matches!(*state, OfflineState::Offline { .. }) {
            warn!(reason, "entering offline mode, serving simulated data");
        }
        *state = OfflineState::Offline { reason };
    }

    /// Flip back to live mode (operator action or opportunistic recovery).
    pub fn set_online(&self) {
        let mut state = self.write();
        if matches!(*state, OfflineState::Offline { .. }) {
            info!("leaving offline mode, live LMS calls resume");
        }
        *state = OfflineState::Online;
    }

    /// Observe a failed LMS call. Only network/malformed classes qualify;
    /// auth failures are surfaced to the caller instead of degrading.
    pub fn record_failure(&self, error: &EdulinkError) {
        if error.triggers_offline() {
            self.set_offline(error.to_string());
        }
    }

    /// Observe a cleanly classified success on a read-family call.
    pub fn record_success(&self) {
        self.set_online();
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, OfflineState> {
        // A poisoned lock means a writer panicked mid-store of a plain enum;
        // the value itself is still coherent.
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, OfflineState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for OfflineController {
    fn default() -> Self {
        Self::new()
    }
}
