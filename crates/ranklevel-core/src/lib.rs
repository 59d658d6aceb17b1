//! ranklevel Core - rank tables and level calculation
//!
//! This crate provides the fundamental pieces of ranklevel:
//! - Rank tables built from an ordered reference vocabulary
//! - Level calculation (maximum rank over a text's characters)
//! - Host-facing traits for records, progress and undo
//! - Error types

pub mod domain;
pub mod error;
pub mod level;
pub mod rank;

pub use domain::{tag_matches, ProgressReporter, Record, RecordStore, SilentProgress, UndoJournal};
pub use error::{ConfigurationError, RankLevelError, RecordAccessError, Result};
pub use level::LevelCalculator;
pub use rank::{
    Rank, RankEntry, RankTable, ReferenceSource, SharedRankTable, DEFAULT_DELIMITER,
    DEFAULT_SEED,
};
