//! Shared helpers for unit tests.

use core::sync::atomic::{AtomicUsize, Ordering};

use enough::{Stop, StopReason};

/// Lets `n` checks pass, then reports cancellation on every later check.
pub(crate) struct CancelAfter(AtomicUsize);

impl CancelAfter {
    pub(crate) fn new(n: usize) -> Self {
        Self(AtomicUsize::new(n))
    }
}

impl Stop for CancelAfter {
    fn check(&self) -> Result<(), StopReason> {
        let left = self.0.load(Ordering::Relaxed);
        if left == 0 {
            return Err(StopReason::Cancelled);
        }
        self.0.store(left - 1, Ordering::Relaxed);
        Ok(())
    }
}
