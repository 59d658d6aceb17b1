//! Termination conditions for bulk regeneration.
//!
//! Checked before each record; a record that has started is always finished.

use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Trait for determining when to stop a batch early.
pub trait Termination: Send + Debug {
    /// Returns true if the batch should stop before the next record.
    fn is_terminated(&self) -> bool;
}

/// Never stops a batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverTerminate;

impl Termination for NeverTerminate {
    fn is_terminated(&self) -> bool {
        false
    }
}

/// Terminates when an external flag is set.
///
/// Allows external code (a cancel button, another thread) to request
/// termination by setting a shared `AtomicBool`.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use ranklevel_engine::{ExternalTermination, Termination};
///
/// let flag = Arc::new(AtomicBool::new(false));
/// let term = ExternalTermination::new(flag.clone());
/// assert!(!term.is_terminated());
///
/// flag.store(true, Ordering::SeqCst);
/// assert!(term.is_terminated());
/// ```
#[derive(Debug, Clone)]
pub struct ExternalTermination {
    flag: Arc<AtomicBool>,
}

impl ExternalTermination {
    /// Creates a termination that checks the given flag.
    pub fn new(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }

    /// Sets the flag.
    pub fn request(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }
}

impl Termination for ExternalTermination {
    fn is_terminated(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_terminate() {
        assert!(!NeverTerminate.is_terminated());
    }

    #[test]
    fn test_external_termination_request() {
        let flag = Arc::new(AtomicBool::new(false));
        let term = ExternalTermination::new(flag.clone());
        let clone = term.clone();

        assert!(!term.is_terminated());
        clone.request();
        assert!(term.is_terminated());
        assert!(flag.load(Ordering::SeqCst));
    }
}
