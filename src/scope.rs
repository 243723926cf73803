use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Liveness flag of a mounted view.
///
/// Async work started by a view checks the scope before writing results
/// back; anything that completes after [`ViewScope::unmount`] is dropped.
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    unmounted: Arc<AtomicBool>,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unmount(&self) {
        self.unmounted.store(true, Ordering::Release);
    }

    pub fn is_mounted(&self) -> bool {
        !self.unmounted.load(Ordering::Acquire)
    }

    /// `Some(value)` while the view is mounted.
    pub fn keep<T>(&self, value: T) -> Option<T> {
        self.is_mounted().then_some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_late_results_are_discarded() {
        let scope = ViewScope::new();
        let teardown = scope.clone();

        assert_eq!(scope.keep(1), Some(1));
        teardown.unmount();
        assert!(!scope.is_mounted());
        assert_eq!(scope.keep(2), None);
    }
}
