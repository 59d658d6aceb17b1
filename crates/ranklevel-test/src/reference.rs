//! Reference file fixtures.
//!
//! # Example
//!
//! ```
//! use ranklevel_core::RankTable;
//! use ranklevel_test::ReferenceFixture;
//!
//! // the first numeral is omitted, as in the published reference file
//! let fixture = ReferenceFixture::numerals();
//! let table = RankTable::load(&fixture.source()).unwrap();
//! assert_eq!(table.rank_of('一'), 1);
//! assert_eq!(table.rank_of('十'), 10);
//! ```

use std::path::{Path, PathBuf};

use ranklevel_core::{RankTable, ReferenceSource};
use tempfile::TempDir;

/// The first ten entries of the reference vocabulary.
pub const NUMERALS: [&str; 10] = ["一", "二", "三", "四", "五", "六", "七", "八", "九", "十"];

/// A rank table over [`NUMERALS`], built without seeding.
pub fn numeral_table() -> RankTable {
    RankTable::from_sequence(NUMERALS)
}

/// A reference file in a temporary `plugins` directory.
#[derive(Debug)]
pub struct ReferenceFixture {
    dir: TempDir,
    path: PathBuf,
}

impl ReferenceFixture {
    /// Writes `rows` (one per line) to `plugins/heisig_levels.csv`.
    pub fn with_rows(rows: &[&str]) -> Self {
        Self::with_contents(&rows.join("\n"))
    }

    /// Writes raw file contents to `plugins/heisig_levels.csv`.
    pub fn with_contents(contents: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let plugins = dir.path().join("plugins");
        std::fs::create_dir_all(&plugins).expect("create plugins dir");
        let path = plugins.join("heisig_levels.csv");
        std::fs::write(&path, contents).expect("write reference file");
        Self { dir, path }
    }

    /// [`NUMERALS`] without the first entry, like the published file.
    pub fn numerals() -> Self {
        Self::with_rows(&NUMERALS[1..])
    }

    /// A config directory whose `plugins` folder has no reference file.
    pub fn missing() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("plugins").join("heisig_levels.csv");
        Self { dir, path }
    }

    /// The host configuration directory (parent of `plugins`).
    pub fn config_dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A source with the default delimiter and seed.
    pub fn source(&self) -> ReferenceSource {
        ReferenceSource::new(&self.path)
    }
}
