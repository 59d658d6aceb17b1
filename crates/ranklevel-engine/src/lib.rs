//! ranklevel Engine
//!
//! This crate keeps derived level fields up to date:
//! - `EditTrigger`: recomputes one record when a source field loses focus
//! - `BulkRegenerator`: recomputes a batch of records on demand
//! - Termination conditions for cooperative cancellation of a batch

pub mod regenerate;
pub mod termination;
pub mod trigger;

pub use regenerate::{BatchReport, BulkRegenerator};
pub use termination::{ExternalTermination, NeverTerminate, Termination};
pub use trigger::{EditTrigger, SkipReason, TriggerOutcome};
