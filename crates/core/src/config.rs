//! Query configuration via `quarry.toml`
//!
//! A single config file carries the knobs the scan and intersection layers
//! need at setup time. Every value is validated when the file is loaded, so
//! a bad return type or separator fails before any scan starts.

use crate::error::{Error, Result};
use crate::uid::{UidScheme, DEFAULT_SEPARATOR};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "quarry.toml";

/// How the trailing statistics document is serialized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SerializationFormat {
    /// Compact binary (MessagePack)
    CompactBinary,
    /// Framework-native binary (bincode)
    Native,
    /// Human-readable debug text (JSON)
    DebugText,
}

impl SerializationFormat {
    /// Canonical config name
    pub fn as_str(&self) -> &'static str {
        match self {
            SerializationFormat::CompactBinary => "kryo",
            SerializationFormat::Native => "writable",
            SerializationFormat::DebugText => "tostring",
        }
    }
}

impl FromStr for SerializationFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "kryo" | "compact" => Ok(SerializationFormat::CompactBinary),
            "writable" | "native" => Ok(SerializationFormat::Native),
            "tostring" | "debug" => Ok(SerializationFormat::DebugText),
            other => Err(Error::config(format!(
                "Unknown return type '{}'. Expected \"kryo\", \"writable\" or \"tostring\".",
                other
            ))),
        }
    }
}

impl fmt::Display for SerializationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which identifier survives when hierarchical candidates collide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReducePolicy {
    /// The deepest identifier of an ancestor chain survives
    #[default]
    KeepDeepest,
    /// The first-seen ancestor survives and later descendants are rejected
    KeepAncestor,
}

impl FromStr for ReducePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "deepest" => Ok(ReducePolicy::KeepDeepest),
            "ancestor" => Ok(ReducePolicy::KeepAncestor),
            other => Err(Error::config(format!(
                "Invalid reduce policy '{}'. Expected \"deepest\" or \"ancestor\".",
                other
            ))),
        }
    }
}

/// Query configuration loaded from `quarry.toml`.
///
/// # Example
///
/// ```toml
/// return_type = "kryo"
/// reduced_response = false
/// compress_results = false
/// batch_size = 1000
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Record identifier path separator (exactly one character)
    #[serde(default = "default_separator")]
    pub uid_separator: String,
    /// Trailing statistics serialization: "kryo", "writable" or "tostring"
    #[serde(default = "default_return_type")]
    pub return_type: String,
    /// Drop per-stage timings from the statistics document
    #[serde(default)]
    pub reduced_response: bool,
    /// Compress compact-binary statistics documents
    #[serde(default)]
    pub compress_results: bool,
    /// Entries read per seek before the scan session re-seeks
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Reduce policy for hierarchical intersection: "deepest" or "ancestor"
    #[serde(default = "default_reduce_policy")]
    pub reduce_policy: String,
    /// Directory holding per-table type metadata files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_dir: Option<PathBuf>,
    /// Poll interval of the metadata refresher in milliseconds
    #[serde(default = "default_metadata_refresh_ms")]
    pub metadata_refresh_ms: u64,
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

fn default_return_type() -> String {
    "kryo".to_string()
}

fn default_batch_size() -> usize {
    1000
}

fn default_reduce_policy() -> String {
    "deepest".to_string()
}

fn default_metadata_refresh_ms() -> u64 {
    30_000
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            uid_separator: default_separator(),
            return_type: default_return_type(),
            reduced_response: false,
            compress_results: false,
            batch_size: default_batch_size(),
            reduce_policy: default_reduce_policy(),
            metadata_dir: None,
            metadata_refresh_ms: default_metadata_refresh_ms(),
        }
    }
}

impl QueryConfig {
    /// Validate every field that is parsed lazily elsewhere.
    pub fn validate(&self) -> Result<()> {
        self.separator()?;
        self.serialization_format()?;
        self.reduce_policy()?;
        if self.batch_size == 0 {
            return Err(Error::config("batch_size must be at least 1"));
        }
        Ok(())
    }

    /// The identifier separator as a single character.
    pub fn separator(&self) -> Result<char> {
        let mut chars = self.uid_separator.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(Error::config(format!(
                "uid_separator must be exactly one character, got {:?}",
                self.uid_separator
            ))),
        }
    }

    /// The identifier scheme built from the configured separator.
    pub fn uid_scheme(&self) -> Result<UidScheme> {
        self.separator().map(UidScheme::new)
    }

    /// Parse the return type.
    pub fn serialization_format(&self) -> Result<SerializationFormat> {
        self.return_type.parse()
    }

    /// Parse the reduce policy.
    pub fn reduce_policy(&self) -> Result<ReducePolicy> {
        self.reduce_policy.parse()
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Quarry query configuration
#
# Trailing statistics serialization: "kryo" (default), "writable" or "tostring"
return_type = "kryo"

# Drop per-stage timings from the statistics document
reduced_response = false

# Compress compact-binary statistics documents
compress_results = false

# Entries read per seek before re-seeking
batch_size = 1000

# Hierarchical reduce policy: "deepest" (default) or "ancestor"
reduce_policy = "deepest"

# Type metadata refresh interval in milliseconds
metadata_refresh_ms = 30000

# metadata_dir = "/var/lib/quarry/metadata"
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: QueryConfig = toml::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
