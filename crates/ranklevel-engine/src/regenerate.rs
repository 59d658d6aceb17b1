//! Bulk level regeneration.
//!
//! Recomputes every configured destination field for a batch of records,
//! overwriting existing values. Used for an explicit, user-requested full
//! recompute; there is no tag or emptiness gating.

use std::sync::Arc;
use std::time::{Duration, Instant};

use ranklevel_config::{FieldPair, LevelConfig};
use ranklevel_core::{
    LevelCalculator, ProgressReporter, Record, RecordAccessError, RecordStore, Result,
    SharedRankTable, UndoJournal,
};
use tracing::{info, warn};

use crate::termination::Termination;

/// Outcome of one bulk regeneration.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport<Id> {
    /// Number of ids in the batch.
    pub total: usize,
    /// Number of ids that were attempted (less than `total` when cancelled).
    pub processed: usize,
    /// Records whose destination fields were all rewritten.
    pub updated: Vec<Id>,
    /// Records skipped because of an access error.
    pub failed: Vec<(Id, RecordAccessError)>,
    /// Whether the batch stopped early.
    pub cancelled: bool,
    pub elapsed: Duration,
}

impl<Id> BatchReport<Id> {
    fn new(total: usize) -> Self {
        Self {
            total,
            processed: 0,
            updated: Vec::new(),
            failed: Vec::new(),
            cancelled: false,
            elapsed: Duration::ZERO,
        }
    }

    /// True if every record was processed without error.
    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.failed.is_empty() && self.processed == self.total
    }
}

/// Rewrites destination fields for a batch of records.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use ranklevel_config::LevelConfig;
/// use ranklevel_core::{RankTable, SharedRankTable, SilentProgress};
/// use ranklevel_engine::{BulkRegenerator, NeverTerminate};
/// use ranklevel_test::{Note, NoteStore};
///
/// let table = Arc::new(SharedRankTable::preloaded(RankTable::from_sequence(["一", "二", "三"])));
/// let regenerator = BulkRegenerator::from_config(table, &LevelConfig::default());
///
/// let mut store = NoteStore::new().with_note(
///     1,
///     Note::new().with_field("Expression", "三").with_field("Heisig Level", "1"),
/// );
/// let report = regenerator
///     .regenerate(&mut store, &[1], &mut SilentProgress, &NeverTerminate)
///     .unwrap();
///
/// assert!(report.is_complete());
/// assert_eq!(store.note(1).unwrap().get("Heisig Level"), Some("3"));
/// ```
#[derive(Debug, Clone)]
pub struct BulkRegenerator {
    table: Arc<SharedRankTable>,
    fields: Vec<FieldPair>,
    progress_label: String,
}

impl BulkRegenerator {
    pub fn new(table: Arc<SharedRankTable>, fields: Vec<FieldPair>) -> Self {
        Self {
            table,
            fields,
            progress_label: String::from("Generating levels..."),
        }
    }

    /// Creates a regenerator using the field pairs and progress label of `config`.
    pub fn from_config(table: Arc<SharedRankTable>, config: &LevelConfig) -> Self {
        Self::new(table, config.fields.clone()).with_progress_label(config.labels.progress.clone())
    }

    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = label.into();
        self
    }

    /// Regenerates all records in `ids`, in order.
    ///
    /// Progress is updated with indices `0..ids.len()` before each record.
    /// Records that cannot be resolved or written are recorded in
    /// [`BatchReport::failed`] and the batch continues. On completion (or
    /// early termination) the store refreshes derived state for every
    /// attempted record and progress is finished.
    ///
    /// # Errors
    ///
    /// Returns [`ranklevel_core::RankLevelError::Configuration`] if the rank
    /// table cannot be loaded; no record is touched and progress is not started.
    pub fn regenerate<S, P, T>(
        &self,
        store: &mut S,
        ids: &[S::Id],
        progress: &mut P,
        termination: &T,
    ) -> Result<BatchReport<S::Id>>
    where
        S: RecordStore + ?Sized,
        P: ProgressReporter + ?Sized,
        T: Termination + ?Sized,
    {
        let table = self.table.get()?;
        let calculator = LevelCalculator::new(table);
        let start = Instant::now();
        let mut report = BatchReport::new(ids.len());

        info!(event = "regenerate_start", records = ids.len());
        progress.start(ids.len());

        for (index, id) in ids.iter().enumerate() {
            if termination.is_terminated() || progress.cancel_requested() {
                report.cancelled = true;
                info!(
                    event = "regenerate_cancelled",
                    processed = index,
                    records = ids.len(),
                );
                break;
            }

            progress.update(index, &self.progress_label);
            report.processed += 1;

            let result = store
                .record_mut(id)
                .and_then(|record| self.regenerate_record(&calculator, record));
            match result {
                Ok(()) => report.updated.push(id.clone()),
                Err(err) => {
                    warn!(event = "record_failed", id = %id, error = %err);
                    report.failed.push((id.clone(), err));
                }
            }
        }

        store.refresh_derived(&ids[..report.processed]);
        progress.finish();
        report.elapsed = start.elapsed();

        info!(
            event = "regenerate_end",
            records = report.total,
            processed = report.processed,
            updated = report.updated.len(),
            failed = report.failed.len(),
            cancelled = report.cancelled,
            duration_ms = report.elapsed.as_millis() as u64,
        );
        Ok(report)
    }

    /// Runs [`regenerate`](Self::regenerate) inside one undo group.
    ///
    /// The group is opened only once the rank table is available and is
    /// always closed, so the whole batch undoes as a single step.
    pub fn regenerate_in_undo_group<S, P, U, T>(
        &self,
        store: &mut S,
        ids: &[S::Id],
        progress: &mut P,
        undo: &mut U,
        label: &str,
        termination: &T,
    ) -> Result<BatchReport<S::Id>>
    where
        S: RecordStore + ?Sized,
        P: ProgressReporter + ?Sized,
        U: UndoJournal + ?Sized,
        T: Termination + ?Sized,
    {
        self.table.get()?;

        undo.begin_undo_group(label);
        let result = self.regenerate(store, ids, progress, termination);
        undo.end_undo_group(label);
        result
    }

    fn regenerate_record<R>(
        &self,
        calculator: &LevelCalculator<'_>,
        record: &mut R,
    ) -> std::result::Result<(), RecordAccessError>
    where
        R: Record + ?Sized,
    {
        for pair in &self.fields {
            let level = calculator.level_of(&record.field(&pair.source)?);
            record.set_field(&pair.destination, level.to_string())?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "regenerate_tests.rs"]
mod tests;
