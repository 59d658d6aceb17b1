//! Record and record store traits.

use std::borrow::Cow;
use std::fmt::{Debug, Display};

use crate::error::RecordAccessError;

/// A host-owned record with named string fields and a set of tags.
///
/// Implementations report an absent field as
/// [`RecordAccessError::FieldNotFound`] so callers can tell "no such field"
/// apart from a record that cannot be read at all.
///
/// # Example
///
/// ```
/// use std::borrow::Cow;
/// use std::collections::HashMap;
/// use ranklevel_core::{Record, RecordAccessError};
///
/// struct Note {
///     fields: HashMap<String, String>,
///     tags: Vec<String>,
/// }
///
/// impl Record for Note {
///     fn field(&self, name: &str) -> Result<Cow<'_, str>, RecordAccessError> {
///         self.fields
///             .get(name)
///             .map(|v| Cow::Borrowed(v.as_str()))
///             .ok_or_else(|| RecordAccessError::FieldNotFound(name.to_string()))
///     }
///
///     fn set_field(&mut self, name: &str, value: String) -> Result<(), RecordAccessError> {
///         match self.fields.get_mut(name) {
///             Some(slot) => {
///                 *slot = value;
///                 Ok(())
///             }
///             None => Err(RecordAccessError::FieldNotFound(name.to_string())),
///         }
///     }
///
///     fn tags(&self) -> Vec<String> {
///         self.tags.clone()
///     }
/// }
///
/// let note = Note {
///     fields: HashMap::from([("Expression".to_string(), "一二".to_string())]),
///     tags: vec!["Heisig_Levels".to_string()],
/// };
/// assert!(note.has_tag("heisig_levels"));
/// assert_eq!(note.field("Expression").unwrap(), "一二");
/// ```
pub trait Record {
    /// Returns the current value of a field.
    fn field(&self, name: &str) -> Result<Cow<'_, str>, RecordAccessError>;

    /// Replaces the value of an existing field.
    ///
    /// Must not persist the record; flushing is the host's job.
    fn set_field(&mut self, name: &str, value: String) -> Result<(), RecordAccessError>;

    /// Returns the record's tags.
    fn tags(&self) -> Vec<String>;

    /// Whether the record carries `tag` (case-insensitive).
    fn has_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| tag_matches(t, tag))
    }
}

/// Resolves record identifiers to mutable records for bulk processing.
pub trait RecordStore {
    /// Host record identifier.
    type Id: Clone + Debug + Display;

    /// The record type handed out by this store.
    type Record: Record;

    /// Resolves one record.
    ///
    /// Returns [`RecordAccessError::RecordNotFound`] for unknown identifiers.
    fn record_mut(&mut self, id: &Self::Id) -> Result<&mut Self::Record, RecordAccessError>;

    /// Recomputes any cached aggregate or query state derived from the given
    /// records after their fields changed.
    fn refresh_derived(&mut self, ids: &[Self::Id]);
}

/// Case-insensitive tag comparison.
pub fn tag_matches(candidate: &str, tag: &str) -> bool {
    candidate == tag || candidate.to_lowercase() == tag.to_lowercase()
}
