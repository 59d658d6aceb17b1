//! Rank tables built from an ordered reference vocabulary.
//!
//! A reference file lists one character per row; a character's rank is its
//! 1-based row position. Characters that are not listed have rank 0.
//!
//! # Architecture
//!
//! - [`ReferenceSource`]: where the file lives and how to read it
//! - [`RankTable`]: the immutable character → rank mapping
//! - [`SharedRankTable`]: build-once handle, loads the table on first use

mod reader;
mod shared;
mod source;
mod table;


pub use shared::SharedRankTable;
pub use source::{ReferenceSource, DEFAULT_DELIMITER, DEFAULT_SEED};
pub use table::{Rank, RankEntry, RankTable};
