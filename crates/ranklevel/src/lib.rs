//! ranklevel - derived difficulty levels from an ordered character vocabulary
//!
//! The level of a text is the highest rank among its characters in a
//! reference ordering (for example the Heisig kanji order). `LevelPlugin`
//! keeps a destination field filled with that level as records are edited,
//! and regenerates it in bulk on demand.
//!
//! # Example
//!
//! ```rust
//! use ranklevel::prelude::*;
//!
//! let table = RankTable::from_sequence(["一", "二", "三"]);
//! let calculator = LevelCalculator::new(&table);
//! assert_eq!(calculator.level_of("二十"), 2);
//! ```

// Core types
pub use ranklevel_core::{
    tag_matches, ConfigurationError, LevelCalculator, ProgressReporter, Rank, RankEntry,
    RankLevelError, RankTable, Record, RecordAccessError, RecordStore, ReferenceSource,
    SharedRankTable, SilentProgress, UndoJournal,
};

// Configuration
pub use ranklevel_config::{ConfigError, FieldPair, LabelConfig, LevelConfig, ReferenceConfig};

// Recomputation policies
pub use ranklevel_engine::{
    BatchReport, BulkRegenerator, EditTrigger, ExternalTermination, NeverTerminate, SkipReason,
    Termination, TriggerOutcome,
};

mod plugin;
pub use plugin::{BatchCommand, BatchRequest, EditorHooks, FocusLostHook, LevelPlugin, PluginError};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{
        BatchRequest, EditorHooks, LevelCalculator, LevelConfig, LevelPlugin, ProgressReporter,
        RankTable, Record, RecordStore, TriggerOutcome, UndoJournal,
    };
}
