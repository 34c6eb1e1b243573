//! Busy indicator for external calls
//!
//! A [`BusyGuard`] raises the flag when created and lowers it when dropped, so
//! the flag comes back down on success, on error, and if the future awaiting
//! the call is dropped. A callback that never returns leaves the flag raised.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared, cloneable busy flag the UI polls to disable re-entrant triggers
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Raise the flag until the returned guard is dropped
    pub fn enter(&self) -> BusyGuard {
        self.0.store(true, Ordering::SeqCst);
        BusyGuard(self.clone())
    }
}

/// Lowers the busy flag on drop
#[derive(Debug)]
#[must_use = "the busy flag drops back to false as soon as the guard is dropped"]
pub struct BusyGuard(BusyFlag);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0 .0.store(false, Ordering::SeqCst);
    }
}
