//! Recording progress and undo hosts.

use ranklevel_core::{ProgressReporter, UndoJournal};

/// One progress call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgressEvent {
    Start(usize),
    Update(usize, String),
    Finish,
}

/// Progress reporter that records every call.
///
/// # Example
///
/// ```
/// use ranklevel_core::ProgressReporter;
/// use ranklevel_test::{ProgressEvent, RecordingProgress};
///
/// let mut progress = RecordingProgress::cancel_after(1);
/// progress.start(2);
/// assert!(!progress.cancel_requested());
/// progress.update(0, "working");
/// assert!(progress.cancel_requested());
/// assert_eq!(progress.events()[0], ProgressEvent::Start(2));
/// ```
#[derive(Clone, Debug, Default)]
pub struct RecordingProgress {
    events: Vec<ProgressEvent>,
    cancel_after: Option<usize>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation once `updates` update calls have been seen.
    pub fn cancel_after(updates: usize) -> Self {
        Self {
            events: Vec::new(),
            cancel_after: Some(updates),
        }
    }

    pub fn events(&self) -> &[ProgressEvent] {
        &self.events
    }

    /// Indices passed to `update`, in call order.
    pub fn indices(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::Update(index, _) => Some(*index),
                _ => None,
            })
            .collect()
    }

    fn update_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Update(..)))
            .count()
    }
}

impl ProgressReporter for RecordingProgress {
    fn start(&mut self, total: usize) {
        self.events.push(ProgressEvent::Start(total));
    }

    fn update(&mut self, index: usize, label: &str) {
        self.events
            .push(ProgressEvent::Update(index, label.to_string()));
    }

    fn finish(&mut self) {
        self.events.push(ProgressEvent::Finish);
    }

    fn cancel_requested(&self) -> bool {
        self.cancel_after
            .is_some_and(|limit| self.update_count() >= limit)
    }
}

/// One undo call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UndoEvent {
    Begin(String),
    End(String),
}

/// Undo journal that records every call.
#[derive(Clone, Debug, Default)]
pub struct RecordingUndo {
    events: Vec<UndoEvent>,
}

impl RecordingUndo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[UndoEvent] {
        &self.events
    }
}

impl UndoJournal for RecordingUndo {
    fn begin_undo_group(&mut self, label: &str) {
        self.events.push(UndoEvent::Begin(label.to_string()));
    }

    fn end_undo_group(&mut self, label: &str) {
        self.events.push(UndoEvent::End(label.to_string()));
    }
}
