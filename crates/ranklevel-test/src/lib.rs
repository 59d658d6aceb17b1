//! Shared test fixtures for ranklevel crates.
//!
//! This crate provides in-memory host implementations and reference files.
//! It depends only on `ranklevel-core` so every other crate can use it as a
//! dev-dependency.
//!
//! - [`record`] - In-memory note record with failure injection
//! - [`store`] - In-memory record store
//! - [`host`] - Recording progress and undo hosts
//! - [`reference`] - Reference files on disk
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! ranklevel-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use ranklevel_test::{Note, NoteStore, RecordingProgress, ReferenceFixture};
//! ```

pub mod host;
pub mod record;
pub mod reference;
pub mod store;

pub use host::{ProgressEvent, RecordingProgress, RecordingUndo, UndoEvent};
pub use record::Note;
pub use reference::{numeral_table, ReferenceFixture, NUMERALS};
pub use store::NoteStore;
