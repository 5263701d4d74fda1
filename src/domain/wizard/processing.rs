//! Busy flag guarding against overlapping step transitions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared "a step action is in flight" flag.
///
/// Clones observe the same flag. Requests made while it is set are dropped
/// by the caller, not queued.
#[derive(Debug, Clone, Default)]
pub struct ProcessingFlag(Arc<AtomicBool>);

impl ProcessingFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Sets the flag if it was clear. The returned guard clears it on drop,
    /// so every exit path releases it.
    pub fn try_acquire(&self) -> Option<ProcessingGuard> {
        self.0
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| ProcessingGuard(self.0.clone()))
    }
}

/// Clears the processing flag when dropped.
#[derive(Debug)]
pub struct ProcessingGuard(Arc<AtomicBool>);

impl Drop for ProcessingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_while_held() {
        let flag = ProcessingFlag::new();
        let guard = flag.try_acquire();
        assert!(guard.is_some());
        assert!(flag.is_set());
        assert!(flag.clone().try_acquire().is_none());
    }

    #[test]
    fn dropping_guard_releases() {
        let flag = ProcessingFlag::new();
        {
            let _guard = flag.try_acquire().unwrap();
        }
        assert!(!flag.is_set());
        assert!(flag.try_acquire().is_some());
    }
}
