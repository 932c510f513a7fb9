use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Progress tracking and cancellation for a Monte Carlo simulation.
///
/// Clones share the same counters, so a UI thread can poll one clone while the
/// simulation updates another.
#[derive(Debug, Clone, Default)]
pub struct MonteCarloProgress {
    /// Completed runs counter
    completed: Arc<AtomicUsize>,
    /// Cancellation flag
    cancelled: Arc<AtomicBool>,
}

impl MonteCarloProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of runs completed so far
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    pub fn increment(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.completed.store(0, Ordering::Relaxed);
        self.cancelled.store(false, Ordering::Relaxed);
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let progress = MonteCarloProgress::new();
        let observer = progress.clone();

        progress.increment();
        progress.increment();
        assert_eq!(observer.completed(), 2);

        observer.cancel();
        assert!(progress.is_cancelled());

        progress.reset();
        assert_eq!(observer.completed(), 0);
        assert!(!observer.is_cancelled());
    }
}
