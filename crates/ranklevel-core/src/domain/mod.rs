//! Host-facing domain traits.
//!
//! The host application owns record storage, progress rendering and the undo
//! stack. These traits are the only surface the level computation touches:
//! - `Record`: one record with named string fields and a tag set
//! - `RecordStore`: resolves record identifiers during bulk regeneration
//! - `ProgressReporter`: progress UI with an optional cancel signal
//! - `UndoJournal`: groups a batch of writes into one undo step

mod host;
mod record;


pub use host::{ProgressReporter, SilentProgress, UndoJournal};
pub use record::{tag_matches, Record, RecordStore};
