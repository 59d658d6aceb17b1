//! Reference source settings.

use std::path::{Path, PathBuf};

/// Conventional first entry of the reference vocabulary.
///
/// The upstream extraction tool drops the first row of the reference file,
/// so this entry is re-inserted at rank 1 unless seeding is disabled.
pub const DEFAULT_SEED: char = '一';

/// Default column delimiter of the reference file.
pub const DEFAULT_DELIMITER: char = ',';

/// Location and format of a reference file.
///
/// # Example
///
/// ```
/// use ranklevel_core::ReferenceSource;
///
/// let source = ReferenceSource::new("plugins/heisig_levels.csv")
///     .with_delimiter('\t')
///     .without_seed();
/// assert_eq!(source.delimiter(), '\t');
/// assert!(source.seed().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSource {
    path: PathBuf,
    delimiter: char,
    seed: Vec<char>,
}

impl ReferenceSource {
    /// Creates a source with the default delimiter and seed.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: DEFAULT_DELIMITER,
            seed: vec![DEFAULT_SEED],
        }
    }

    /// Sets the column delimiter.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Replaces the seed entries inserted ahead of the file rows.
    pub fn with_seed(mut self, seed: impl IntoIterator<Item = char>) -> Self {
        self.seed = seed.into_iter().collect();
        self
    }

    /// Reads the file verbatim, without seed entries.
    pub fn without_seed(mut self) -> Self {
        self.seed.clear();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn seed(&self) -> &[char] {
        &self.seed
    }
}
