//! Field type metadata
//!
//! Records, per field, which datatypes carry it and which normalizer types
//! its values were indexed with.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// field → datatype → type names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMetadata {
    fields: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
}

/// Metadata visible under each authorization set
pub type AuthorizedMetadata = BTreeMap<BTreeSet<String>, TypeMetadata>;

impl TypeMetadata {
    /// Empty metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `field` in `datatype` is typed `type_name`
    pub fn put(
        &mut self,
        field: impl Into<String>,
        datatype: impl Into<String>,
        type_name: impl Into<String>,
    ) {
        self.fields
            .entry(field.into())
            .or_default()
            .entry(datatype.into())
            .or_default()
            .insert(type_name.into());
    }

    /// Every type name of `field`, across datatypes
    pub fn types_for(&self, field: &str) -> BTreeSet<&str> {
        self.fields
            .get(field)
            .into_iter()
            .flat_map(|by_datatype| by_datatype.values())
            .flat_map(|types| types.iter().map(String::as_str))
            .collect()
    }

    /// Type names of `field` within one datatype
    pub fn types_in(&self, field: &str, datatype: &str) -> Option<&BTreeSet<String>> {
        self.fields.get(field)?.get(datatype)
    }

    /// Datatypes that carry `field`
    pub fn datatypes_for(&self, field: &str) -> Vec<&str> {
        self.fields
            .get(field)
            .map(|by_datatype| by_datatype.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Known field names, sorted
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Fold `other` into this metadata
    pub fn merge(&mut self, other: &TypeMetadata) {
        for (field, by_datatype) in &other.fields {
            for (datatype, types) in by_datatype {
                for type_name in types {
                    self.put(field.clone(), datatype.clone(), type_name.clone());
                }
            }
        }
    }

    /// True if nothing is recorded
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
