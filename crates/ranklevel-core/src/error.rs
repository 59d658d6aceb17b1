//! Error types for ranklevel

use std::path::PathBuf;

use thiserror::Error;

/// The reference source could not produce a usable rank table.
///
/// Fatal for any level computation. Surfaced to the user instead of falling
/// back to an empty table (which would silently rank everything as 0).
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The reference file does not exist at the configured location.
    #[error("reference file not found: expected {}", path.display())]
    Missing { path: PathBuf },

    /// The reference file exists but could not be read.
    #[error("reference file {} is unreadable: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row of the reference file is not valid UTF-8.
    #[error("reference file {} is not valid UTF-8 (line {line})", path.display())]
    InvalidEncoding { path: PathBuf, line: usize },

    /// The reference file contains no ranked rows.
    #[error("reference file {} contains no ranked characters", path.display())]
    Empty { path: PathBuf },
}

/// A record or field was unavailable while processing.
///
/// Recovered locally: the record (or trigger invocation) is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordAccessError {
    /// The host could not resolve a record identifier.
    #[error("record not found: {0}")]
    RecordNotFound(String),

    /// The record has no field with the given name.
    #[error("field not found: {0}")]
    FieldNotFound(String),

    /// The record exists but is in a state that cannot be read or written.
    #[error("record is inconsistent: {0}")]
    Inconsistent(String),
}

/// Main error type for ranklevel operations
#[derive(Debug, Error)]
pub enum RankLevelError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    RecordAccess(#[from] RecordAccessError),
}

/// Result type alias for ranklevel operations
pub type Result<T> = std::result::Result<T, RankLevelError>;
