//! Type metadata cache
//!
//! Tables are loaded on first use and kept until evicted or refreshed. A
//! failed load never fails the caller: it is logged and an empty
//! [`TypeMetadata`] is returned, and the next `get` tries again.

use crate::loader::MetadataLoader;
use crate::type_metadata::{AuthorizedMetadata, TypeMetadata};
use parking_lot::RwLock;
use quarry_core::Result;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, trace, warn};

#[derive(Debug, Clone)]
struct CachedTable {
    metadata: Arc<AuthorizedMetadata>,
    version: Option<SystemTime>,
}

/// Per-table cache of authorized type metadata
pub struct TypeMetadataCache {
    loader: Arc<dyn MetadataLoader>,
    tables: RwLock<HashMap<String, CachedTable>>,
}

impl TypeMetadataCache {
    /// Cache backed by `loader`
    pub fn new(loader: Arc<dyn MetadataLoader>) -> Self {
        Self {
            loader,
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// Metadata of `table` visible under exactly `auths`
    ///
    /// Returns empty metadata if the table cannot be loaded or has no entry
    /// for that authorization set.
    pub fn get(&self, table: &str, auths: &BTreeSet<String>) -> TypeMetadata {
        let metadata = match self.table(table) {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!(target: "quarry::metadata", table, error = %e, "could not load type metadata");
                return TypeMetadata::new();
            }
        };
        metadata.get(auths).cloned().unwrap_or_default()
    }

    /// Everything cached for `table`, loading it on a miss
    pub fn table(&self, table: &str) -> Result<Arc<AuthorizedMetadata>> {
        if let Some(cached) = self.tables.read().get(table) {
            trace!(target: "quarry::metadata", table, "cache hit");
            return Ok(Arc::clone(&cached.metadata));
        }
        self.refresh(table)
    }

    /// Reload `table` from the loader, replacing any cached copy
    pub fn refresh(&self, table: &str) -> Result<Arc<AuthorizedMetadata>> {
        let version = self.loader.version(table)?;
        let metadata = Arc::new(self.loader.load(table)?);
        debug!(
            target: "quarry::metadata",
            table,
            auth_sets = metadata.len(),
            "loaded type metadata"
        );
        self.tables.write().insert(
            table.to_string(),
            CachedTable {
                metadata: Arc::clone(&metadata),
                version,
            },
        );
        Ok(metadata)
    }

    /// Reload every cached table whose version changed; returns how many
    /// were reloaded. Tables that fail to reload keep their cached copy.
    pub fn refresh_changed(&self) -> usize {
        let cached: Vec<(String, Option<SystemTime>)> = self
            .tables
            .read()
            .iter()
            .map(|(name, t)| (name.clone(), t.version))
            .collect();

        let mut reloaded = 0;
        for (table, version) in cached {
            match self.loader.version(&table) {
                Ok(current) if current == version => {}
                Ok(_) => match self.refresh(&table) {
                    Ok(_) => reloaded += 1,
                    Err(e) => {
                        warn!(target: "quarry::metadata", table = %table, error = %e, "refresh failed");
                    }
                },
                Err(e) => {
                    warn!(target: "quarry::metadata", table = %table, error = %e, "version check failed");
                }
            }
        }
        reloaded
    }

    /// Drop `table` from the cache; returns whether it was cached
    pub fn evict(&self, table: &str) -> bool {
        self.tables.write().remove(table).is_some()
    }

    /// Drop every cached table
    pub fn invalidate_all(&self) {
        self.tables.write().clear();
    }

    /// Names of cached tables, sorted
    pub fn cached_tables(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.read().keys().cloned().collect();
        names.sort();
        names
    }
}
