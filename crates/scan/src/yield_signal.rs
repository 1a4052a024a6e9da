//! Cooperative yield signal
//!
//! The host raises a yield when it wants a scan to stop early; the scan
//! records where it stopped so the host can rebuild it from that key. Every
//! clone shares the same flag and position.

use parking_lot::Mutex;
use quarry_core::Key;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared yield flag plus the key the scan yielded at
#[derive(Debug, Clone, Default)]
pub struct YieldSignal {
    yielded: Arc<AtomicBool>,
    position: Arc<Mutex<Option<Key>>>,
}

impl YieldSignal {
    /// New signal, not yet raised
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the signal, recording the resume position
    pub fn yield_at(&self, key: Key) {
        *self.position.lock() = Some(key);
        self.yielded.store(true, Ordering::Release);
    }

    /// Whether the signal has been raised
    pub fn has_yielded(&self) -> bool {
        self.yielded.load(Ordering::Acquire)
    }

    /// Take the recorded position and lower the signal
    pub fn position_and_reset(&self) -> Option<Key> {
        let position = self.position.lock().take();
        self.yielded.store(false, Ordering::Release);
        position
    }
}
