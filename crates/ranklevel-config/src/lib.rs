//! Configuration system for ranklevel.
//!
//! Load the marker tag, the source/destination field pairs and the
//! reference file settings from TOML or YAML instead of hardcoding them.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use ranklevel_config::LevelConfig;
//!
//! let config = LevelConfig::from_toml_str(r#"
//!     marker_tag = "kanji_levels"
//!
//!     [[fields]]
//!     source = "Word"
//!     destination = "Level"
//!
//!     [reference]
//!     file_name = "rtk_order.csv"
//!     seed = []
//! "#).unwrap();
//!
//! assert_eq!(config.marker_tag, "kanji_levels");
//! assert_eq!(config.destination_for("Word"), Some("Level"));
//! assert!(config.reference.seed.is_empty());
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use ranklevel_config::LevelConfig;
//!
//! let config = LevelConfig::load("ranklevel.toml").unwrap_or_default();
//! assert_eq!(config.marker_tag, "heisig_levels");
//! ```

use std::path::{Path, PathBuf};

use ranklevel_core::ReferenceSource;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Marker tag that opts a record into level computation.
pub const DEFAULT_MARKER_TAG: &str = "heisig_levels";

/// Default source field.
pub const DEFAULT_SOURCE_FIELD: &str = "Expression";

/// Default destination field.
pub const DEFAULT_DESTINATION_FIELD: &str = "Heisig Level";

/// Default reference file name inside the data directory.
pub const DEFAULT_REFERENCE_FILE: &str = "heisig_levels.csv";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct LevelConfig {
    /// Tag a record must carry for edit-triggered computation.
    pub marker_tag: String,

    /// Source/destination field pairs, processed in order.
    pub fields: Vec<FieldPair>,

    /// Reference file settings.
    pub reference: ReferenceConfig,

    /// User-visible labels.
    pub labels: LabelConfig,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            marker_tag: DEFAULT_MARKER_TAG.to_string(),
            fields: vec![FieldPair::new(DEFAULT_SOURCE_FIELD, DEFAULT_DESTINATION_FIELD)],
            reference: ReferenceConfig::default(),
            labels: LabelConfig::default(),
        }
    }
}

impl LevelConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_toml_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the marker tag.
    pub fn with_marker_tag(mut self, tag: impl Into<String>) -> Self {
        self.marker_tag = tag.into();
        self
    }

    /// Replaces the field pairs with a single pair.
    pub fn with_fields(
        mut self,
        source: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        self.fields = vec![FieldPair::new(source, destination)];
        self
    }

    /// Adds a field pair.
    pub fn with_field_pair(
        mut self,
        source: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        self.fields.push(FieldPair::new(source, destination));
        self
    }

    /// Sets an explicit reference file path.
    pub fn with_reference_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.reference.path = Some(path.into());
        self
    }

    /// Uses the `plugins` directory under the host's configuration directory.
    pub fn with_config_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.reference.data_dir = dir.as_ref().join("plugins");
        self
    }

    /// Sets the seed entries inserted ahead of the reference rows.
    pub fn with_seed<I, T>(mut self, seed: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.reference.seed = seed.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the destination field paired with `source`.
    pub fn destination_for(&self, source: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|pair| pair.source == source)
            .map(|pair| pair.destination.as_str())
    }

    /// Whether `field` is a configured source field.
    pub fn is_source_field(&self, field: &str) -> bool {
        self.destination_for(field).is_some()
    }

    /// Builds the reference source for the rank table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the delimiter or a seed entry is
    /// not exactly one character.
    pub fn reference_source(&self) -> Result<ReferenceSource, ConfigError> {
        let delimiter = single_char(&self.reference.delimiter).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "reference delimiter must be one character, got {:?}",
                self.reference.delimiter
            ))
        })?;
        let seed = self
            .reference
            .seed
            .iter()
            .map(|entry| {
                single_char(entry).ok_or_else(|| {
                    ConfigError::Invalid(format!(
                        "seed entries must be one character, got {entry:?}"
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ReferenceSource::new(self.reference.resolved_path())
            .with_delimiter(delimiter)
            .with_seed(seed))
    }

    /// Checks the configuration for values that cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.marker_tag.trim().is_empty() {
            return Err(ConfigError::Invalid("marker_tag must not be empty".into()));
        }
        if self.fields.is_empty() {
            return Err(ConfigError::Invalid("at least one field pair is required".into()));
        }
        for (i, pair) in self.fields.iter().enumerate() {
            if pair.source.is_empty() || pair.destination.is_empty() {
                return Err(ConfigError::Invalid(format!("field pair {i} has an empty field name")));
            }
            if pair.source == pair.destination {
                return Err(ConfigError::Invalid(format!(
                    "field pair {i} writes into its own source field {:?}",
                    pair.source
                )));
            }
            if self.fields[..i].iter().any(|p| p.source == pair.source) {
                return Err(ConfigError::Invalid(format!(
                    "source field {:?} is configured twice",
                    pair.source
                )));
            }
        }
        self.reference_source()?;
        Ok(())
    }
}

/// One source → destination field mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FieldPair {
    /// Human-edited input field.
    pub source: String,
    /// Derived output field.
    pub destination: String,
}

impl FieldPair {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// Reference file configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct ReferenceConfig {
    /// Explicit file path; overrides `data_dir` and `file_name`.
    pub path: Option<PathBuf>,

    /// Directory holding plugin data files.
    pub data_dir: PathBuf,

    /// File name inside `data_dir`.
    pub file_name: String,

    /// Column delimiter (one character).
    pub delimiter: String,

    /// Entries inserted at ranks 1.. ahead of the file rows.
    pub seed: Vec<String>,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            path: None,
            data_dir: PathBuf::from("plugins"),
            file_name: DEFAULT_REFERENCE_FILE.to_string(),
            delimiter: ranklevel_core::DEFAULT_DELIMITER.to_string(),
            seed: vec![ranklevel_core::DEFAULT_SEED.to_string()],
        }
    }
}

impl ReferenceConfig {
    /// The file the rank table is loaded from.
    pub fn resolved_path(&self) -> PathBuf {
        match &self.path {
            Some(path) => path.clone(),
            None => self.data_dir.join(&self.file_name),
        }
    }
}

/// User-visible labels.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct LabelConfig {
    /// Progress label shown while regenerating.
    pub progress: String,

    /// Batch command label, also used for the undo group.
    pub command: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            progress: "Generating Heisig levels...".to_string(),
            command: "Regenerate Heisig Levels".to_string(),
        }
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
