//! In-memory record store.

use std::collections::BTreeMap;

use ranklevel_core::{RecordAccessError, RecordStore};

use crate::record::Note;

/// Notes keyed by numeric id.
///
/// Records every `refresh_derived` call so tests can check completion.
#[derive(Clone, Debug, Default)]
pub struct NoteStore {
    notes: BTreeMap<u64, Note>,
    refreshed: Vec<Vec<u64>>,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_note(mut self, id: u64, note: Note) -> Self {
        self.notes.insert(id, note);
        self
    }

    pub fn note(&self, id: u64) -> Option<&Note> {
        self.notes.get(&id)
    }

    /// Ids passed to each `refresh_derived` call, in call order.
    pub fn refreshed(&self) -> &[Vec<u64>] {
        &self.refreshed
    }
}

impl RecordStore for NoteStore {
    type Id = u64;
    type Record = Note;

    fn record_mut(&mut self, id: &u64) -> Result<&mut Note, RecordAccessError> {
        self.notes
            .get_mut(id)
            .ok_or_else(|| RecordAccessError::RecordNotFound(id.to_string()))
    }

    fn refresh_derived(&mut self, ids: &[u64]) {
        self.refreshed.push(ids.to_vec());
    }
}
