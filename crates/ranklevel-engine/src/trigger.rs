//! Edit-triggered level computation.
//!
//! When the host editor reports that a field lost focus, the trigger fills the
//! paired destination field with the level of the new source text, but only
//! when the destination is still empty. Existing values, possibly curated by
//! hand, are never overwritten here; use the bulk regenerator for that.

use std::fmt;
use std::sync::Arc;

use ranklevel_config::{FieldPair, LevelConfig};
use ranklevel_core::{LevelCalculator, Rank, Record, RecordAccessError, Result, SharedRankTable};
use tracing::{debug, trace, warn};

/// Result of one trigger invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The destination field was written.
    Written { destination: String, level: Rank },
    /// Nothing was changed.
    Skipped(SkipReason),
}

impl TriggerOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }
}

/// Why a trigger invocation left the record unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The field is not a configured source field.
    NotSourceField,
    /// The record does not carry the marker tag.
    Untagged,
    /// The source field could not be read.
    SourceUnreadable,
    /// The source field is empty or whitespace.
    BlankSource,
    /// The destination field already holds a value.
    DestinationPopulated,
    /// The record has no destination field.
    DestinationMissing,
    /// The destination field could not be read; treated as populated.
    DestinationUnreadable,
    /// Writing the destination field failed; the record keeps its value.
    DestinationUnwritable,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotSourceField => "not_source_field",
            Self::Untagged => "untagged",
            Self::SourceUnreadable => "source_unreadable",
            Self::BlankSource => "blank_source",
            Self::DestinationPopulated => "destination_populated",
            Self::DestinationMissing => "destination_missing",
            Self::DestinationUnreadable => "destination_unreadable",
            Self::DestinationUnwritable => "destination_unwritable",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fills empty destination fields when a source field is edited.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use ranklevel_config::LevelConfig;
/// use ranklevel_core::{RankTable, SharedRankTable};
/// use ranklevel_engine::{EditTrigger, TriggerOutcome};
/// use ranklevel_test::Note;
///
/// let table = Arc::new(SharedRankTable::preloaded(RankTable::from_sequence(["一", "二"])));
/// let trigger = EditTrigger::from_config(table, &LevelConfig::default());
///
/// let mut note = Note::new()
///     .with_field("Expression", "一二")
///     .with_field("Heisig Level", "")
///     .with_tag("heisig_levels");
///
/// let outcome = trigger.on_focus_lost(&mut note, "Expression").unwrap();
/// assert!(outcome.is_written());
/// assert_eq!(note.get("Heisig Level"), Some("2"));
/// ```
#[derive(Debug, Clone)]
pub struct EditTrigger {
    table: Arc<SharedRankTable>,
    marker_tag: String,
    fields: Vec<FieldPair>,
}

impl EditTrigger {
    pub fn new(
        table: Arc<SharedRankTable>,
        marker_tag: impl Into<String>,
        fields: Vec<FieldPair>,
    ) -> Self {
        Self {
            table,
            marker_tag: marker_tag.into(),
            fields,
        }
    }

    /// Creates a trigger using the marker tag and field pairs of `config`.
    pub fn from_config(table: Arc<SharedRankTable>, config: &LevelConfig) -> Self {
        Self::new(table, config.marker_tag.clone(), config.fields.clone())
    }

    pub fn marker_tag(&self) -> &str {
        &self.marker_tag
    }

    /// Handles a field-lost-focus event for `field` on `record`.
    ///
    /// Mutates at most the one destination field paired with `field`; never
    /// persists the record.
    ///
    /// # Errors
    ///
    /// Returns [`ranklevel_core::RankLevelError::Configuration`] if the rank
    /// table cannot be loaded. Guard conditions and record access failures,
    /// including a failed destination write, are reported as
    /// [`TriggerOutcome::Skipped`], never as errors.
    pub fn on_focus_lost<R>(&self, record: &mut R, field: &str) -> Result<TriggerOutcome>
    where
        R: Record + ?Sized,
    {
        let Some(pair) = self.fields.iter().find(|pair| pair.source == field) else {
            return Ok(self.skip(field, SkipReason::NotSourceField));
        };
        if !record.has_tag(&self.marker_tag) {
            return Ok(self.skip(field, SkipReason::Untagged));
        }

        let value = match record.field(&pair.source) {
            Ok(value) => value,
            Err(err) => {
                debug!(
                    event = "source_unreadable",
                    field = %pair.source,
                    error = %err,
                );
                return Ok(self.skip(field, SkipReason::SourceUnreadable));
            }
        };
        if value.trim().is_empty() {
            return Ok(self.skip(field, SkipReason::BlankSource));
        }

        match record.field(&pair.destination) {
            Ok(current) if !current.is_empty() => {
                return Ok(self.skip(field, SkipReason::DestinationPopulated));
            }
            Ok(_) => {}
            Err(RecordAccessError::FieldNotFound(_)) => {
                return Ok(self.skip(field, SkipReason::DestinationMissing));
            }
            Err(err) => {
                warn!(
                    event = "destination_unreadable",
                    field = %pair.destination,
                    error = %err,
                );
                return Ok(self.skip(field, SkipReason::DestinationUnreadable));
            }
        }

        let table = self.table.get()?;
        let level = LevelCalculator::new(table).level_of(&value);

        if let Err(err) = record.set_field(&pair.destination, level.to_string()) {
            warn!(
                event = "destination_unwritable",
                field = %pair.destination,
                error = %err,
            );
            return Ok(self.skip(field, SkipReason::DestinationUnwritable));
        }
        debug!(
            event = "trigger_written",
            source = %pair.source,
            destination = %pair.destination,
            level = level,
        );
        Ok(TriggerOutcome::Written {
            destination: pair.destination.clone(),
            level,
        })
    }

    fn skip(&self, field: &str, reason: SkipReason) -> TriggerOutcome {
        trace!(event = "trigger_skipped", field = %field, reason = %reason);
        TriggerOutcome::Skipped(reason)
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
