//! Metadata loading
//!
//! Each metadata table has one file, `<root>/<table>/typeMetadata`, holding
//! the bincode-encoded [`AuthorizedMetadata`] for that table. The file's
//! modification time is its version.

use crate::type_metadata::AuthorizedMetadata;
use quarry_core::{Error, QueryConfig, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// File name of a table's metadata within its directory
pub const METADATA_FILE_NAME: &str = "typeMetadata";

/// Source of per-table type metadata
pub trait MetadataLoader: Send + Sync {
    /// Load all metadata for `table`
    fn load(&self, table: &str) -> Result<AuthorizedMetadata>;

    /// Current version of `table`'s metadata, `None` if it does not exist
    fn version(&self, table: &str) -> Result<Option<SystemTime>>;
}

/// Loads metadata from files under a root directory
#[derive(Debug, Clone)]
pub struct FileMetadataLoader {
    root: PathBuf,
}

impl FileMetadataLoader {
    /// Loader rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Loader rooted at the configured `metadata_dir`
    pub fn from_config(config: &QueryConfig) -> Result<Self> {
        config
            .metadata_dir
            .as_ref()
            .map(|dir| Self::new(dir.clone()))
            .ok_or_else(|| Error::config("metadata_dir is not set"))
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `table`'s metadata file
    pub fn path_for(&self, table: &str) -> PathBuf {
        self.root.join(table).join(METADATA_FILE_NAME)
    }

    /// Write `metadata` as `table`'s metadata file
    pub fn store(&self, table: &str, metadata: &AuthorizedMetadata) -> Result<()> {
        let path = self.path_for(table);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let bytes = bincode::serialize(metadata)?;
        fs::write(&path, bytes)?;
        debug!(target: "quarry::metadata", table, path = %path.display(), "stored type metadata");
        Ok(())
    }
}

impl MetadataLoader for FileMetadataLoader {
    fn load(&self, table: &str) -> Result<AuthorizedMetadata> {
        let path = self.path_for(table);
        let bytes = fs::read(&path)?;
        bincode::deserialize(&bytes).map_err(|e| {
            Error::metadata(format!("corrupt metadata file {}: {}", path.display(), e))
        })
    }

    fn version(&self, table: &str) -> Result<Option<SystemTime>> {
        match fs::metadata(self.path_for(table)) {
            Ok(meta) => Ok(Some(meta.modified()?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
