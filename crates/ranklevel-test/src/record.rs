//! In-memory note record.
//!
//! # Example
//!
//! ```
//! use ranklevel_core::Record;
//! use ranklevel_test::Note;
//!
//! let note = Note::new()
//!     .with_field("Expression", "一二")
//!     .with_field("Heisig Level", "")
//!     .with_tag("heisig_levels");
//! assert!(note.has_tag("heisig_levels"));
//! assert_eq!(note.get("Expression"), Some("一二"));
//! ```

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use ranklevel_core::{Record, RecordAccessError};

/// A record with string fields and tags.
///
/// Fields can be marked unreadable or locked to simulate a record in an
/// inconsistent state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Note {
    fields: BTreeMap<String, String>,
    tags: Vec<String>,
    unreadable: BTreeSet<String>,
    locked: BTreeSet<String>,
    writes: usize,
}

impl Note {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a field.
    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    /// Makes reads of `name` fail with [`RecordAccessError::Inconsistent`].
    pub fn with_unreadable_field(mut self, name: &str) -> Self {
        self.unreadable.insert(name.to_string());
        self
    }

    /// Makes writes to `name` fail with [`RecordAccessError::Inconsistent`].
    pub fn with_locked_field(mut self, name: &str) -> Self {
        self.locked.insert(name.to_string());
        self
    }

    /// Raw field value, bypassing failure injection.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Number of successful `set_field` calls.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl Record for Note {
    fn field(&self, name: &str) -> Result<Cow<'_, str>, RecordAccessError> {
        if self.unreadable.contains(name) {
            return Err(RecordAccessError::Inconsistent(format!("field {name} is unreadable")));
        }
        self.fields
            .get(name)
            .map(|v| Cow::Borrowed(v.as_str()))
            .ok_or_else(|| RecordAccessError::FieldNotFound(name.to_string()))
    }

    fn set_field(&mut self, name: &str, value: String) -> Result<(), RecordAccessError> {
        if self.locked.contains(name) {
            return Err(RecordAccessError::Inconsistent(format!("field {name} is locked")));
        }
        match self.fields.get_mut(name) {
            Some(slot) => {
                *slot = value;
                self.writes += 1;
                Ok(())
            }
            None => Err(RecordAccessError::FieldNotFound(name.to_string())),
        }
    }

    fn tags(&self) -> Vec<String> {
        self.tags.clone()
    }
}
