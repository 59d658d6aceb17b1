//! Build-once rank table handle.

#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};

use tracing::debug;

use super::source::ReferenceSource;
use super::table::RankTable;
use crate::error::ConfigurationError;

/// A rank table that is loaded on first use and then shared read-only.
///
/// Only one caller performs the load; concurrent callers block until it
/// finishes and then see the same table. A failed load is not cached, so a
/// later call retries after the reference file has been fixed.
///
/// # Example
///
/// ```
/// use ranklevel_core::{RankTable, SharedRankTable};
///
/// let shared = SharedRankTable::preloaded(RankTable::from_sequence(["一", "二"]));
/// assert!(shared.is_built());
/// assert_eq!(shared.get().unwrap().rank_of('二'), 2);
/// ```
#[derive(Debug)]
pub struct SharedRankTable {
    source: Option<ReferenceSource>,
    table: OnceLock<RankTable>,
    build_lock: Mutex<()>,
    #[cfg(test)]
    loads: AtomicUsize,
}

impl SharedRankTable {
    /// Creates a handle that loads `source` on first access.
    pub fn new(source: ReferenceSource) -> Self {
        Self {
            source: Some(source),
            table: OnceLock::new(),
            build_lock: Mutex::new(()),
            #[cfg(test)]
            loads: AtomicUsize::new(0),
        }
    }

    /// Creates a handle around an already built table.
    pub fn preloaded(table: RankTable) -> Self {
        Self {
            source: None,
            table: OnceLock::from(table),
            build_lock: Mutex::new(()),
            #[cfg(test)]
            loads: AtomicUsize::new(0),
        }
    }

    /// Returns the table, loading it if this is the first access.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if the reference file cannot be loaded.
    pub fn get(&self) -> Result<&RankTable, ConfigurationError> {
        if let Some(table) = self.table.get() {
            return Ok(table);
        }

        let _guard = self
            .build_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(table) = self.table.get() {
            return Ok(table);
        }

        // preloaded handles always hold a table, so a source is present here
        let Some(source) = self.source.as_ref() else {
            unreachable!("preloaded rank table handle without a table");
        };
        debug!(event = "rank_table_loading", path = %source.path().display());
        #[cfg(test)]
        self.loads.fetch_add(1, Ordering::SeqCst);
        let table = RankTable::load(source)?;
        Ok(self.table.get_or_init(|| table))
    }

    /// Whether the table has been loaded.
    pub fn is_built(&self) -> bool {
        self.table.get().is_some()
    }

    /// Number of load attempts made so far.
    #[cfg(test)]
    pub(crate) fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// The reference source, if this handle loads lazily.
    pub fn source(&self) -> Option<&ReferenceSource> {
        self.source.as_ref()
    }
}
