//! Progress and undo host services.

/// Host progress UI.
///
/// Called synchronously between records; `cancel_requested` is polled before
/// each record so a cancel button can stop a batch cooperatively.
pub trait ProgressReporter {
    /// Starts a progress display for `total` items.
    fn start(&mut self, total: usize);

    /// Reports that item `index` (0-based) is about to be processed.
    fn update(&mut self, index: usize, label: &str);

    /// Marks progress complete.
    fn finish(&mut self);

    /// Whether the user asked to stop.
    fn cancel_requested(&self) -> bool {
        false
    }
}

/// Host undo stack.
pub trait UndoJournal {
    /// Opens an undo group; every change until the matching end forms one step.
    fn begin_undo_group(&mut self, label: &str);

    /// Closes the undo group opened with the same label.
    fn end_undo_group(&mut self, label: &str);
}

/// A progress reporter that displays nothing and never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn start(&mut self, _total: usize) {}

    fn update(&mut self, _index: usize, _label: &str) {}

    fn finish(&mut self) {}
}
