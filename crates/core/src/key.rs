//! Composite keys for the sorted index
//!
//! Every entry in the underlying store is addressed by a five-part key:
//! `row`, `family`, `qualifier`, `visibility` and `timestamp`. In the field
//! index the first three are (term, field name, shard locator); in the
//! document table they are (shard, datatype + uid, attribute).
//!
//! ## Ordering
//!
//! Keys sort by row, family, qualifier and visibility ascending, then by
//! timestamp descending so the newest version of a cell comes first. A key
//! built from fewer components carries empty bytes and `u64::MAX` as its
//! timestamp, which places it before every fuller key sharing its prefix.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Prefix depth used when comparing keys or computing a following key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PartialKey {
    /// Row only
    Row,
    /// Row and family
    RowFamily,
    /// Row, family and qualifier
    RowFamilyQualifier,
    /// Row, family, qualifier and visibility
    RowFamilyQualifierVisibility,
    /// Every component including the timestamp
    RowFamilyQualifierVisibilityTime,
}

/// Composite sorted-index key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    /// Primary component (term in the field index, shard in the document table)
    pub row: Vec<u8>,
    /// Secondary component (field name, or datatype + uid)
    pub family: Vec<u8>,
    /// Tertiary component (shard locator, or attribute)
    pub qualifier: Vec<u8>,
    /// Visibility expression
    pub visibility: Vec<u8>,
    /// Version timestamp, newest first
    pub timestamp: u64,
}

impl Key {
    /// Create a key from all five components
    pub fn new(
        row: impl AsRef<[u8]>,
        family: impl AsRef<[u8]>,
        qualifier: impl AsRef<[u8]>,
        visibility: impl AsRef<[u8]>,
        timestamp: u64,
    ) -> Self {
        Self {
            row: row.as_ref().to_vec(),
            family: family.as_ref().to_vec(),
            qualifier: qualifier.as_ref().to_vec(),
            visibility: visibility.as_ref().to_vec(),
            timestamp,
        }
    }

    /// Key addressing the start of a row
    pub fn from_row(row: impl AsRef<[u8]>) -> Self {
        Self::new(row, b"", b"", b"", u64::MAX)
    }

    /// Key addressing the start of a (row, family) column
    pub fn from_row_family(row: impl AsRef<[u8]>, family: impl AsRef<[u8]>) -> Self {
        Self::new(row, family, b"", b"", u64::MAX)
    }

    /// Key addressing the start of a (row, family, qualifier) cell
    pub fn from_row_family_qualifier(
        row: impl AsRef<[u8]>,
        family: impl AsRef<[u8]>,
        qualifier: impl AsRef<[u8]>,
    ) -> Self {
        Self::new(row, family, qualifier, b"", u64::MAX)
    }

    /// Builder: replace the timestamp
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Builder: replace the visibility
    pub fn with_visibility(mut self, visibility: impl AsRef<[u8]>) -> Self {
        self.visibility = visibility.as_ref().to_vec();
        self
    }

    /// Smallest key that sorts after every key sharing this key's prefix
    /// up to `part`.
    pub fn following_key(&self, part: PartialKey) -> Key {
        match part {
            PartialKey::Row => Key::from_row(followed(&self.row)),
            PartialKey::RowFamily => Key::from_row_family(&self.row, followed(&self.family)),
            PartialKey::RowFamilyQualifier => {
                Key::from_row_family_qualifier(&self.row, &self.family, followed(&self.qualifier))
            }
            PartialKey::RowFamilyQualifierVisibility => Key::new(
                &self.row,
                &self.family,
                &self.qualifier,
                followed(&self.visibility),
                u64::MAX,
            ),
            PartialKey::RowFamilyQualifierVisibilityTime => {
                if self.timestamp == 0 {
                    Key::new(
                        &self.row,
                        &self.family,
                        &self.qualifier,
                        followed(&self.visibility),
                        u64::MAX,
                    )
                } else {
                    self.clone().with_timestamp(self.timestamp - 1)
                }
            }
        }
    }

    /// Compare two keys only up to `part`
    pub fn equals_prefix(&self, other: &Key, part: PartialKey) -> bool {
        let row = self.row == other.row;
        match part {
            PartialKey::Row => row,
            PartialKey::RowFamily => row && self.family == other.family,
            PartialKey::RowFamilyQualifier => {
                row && self.family == other.family && self.qualifier == other.qualifier
            }
            PartialKey::RowFamilyQualifierVisibility => {
                row && self.family == other.family
                    && self.qualifier == other.qualifier
                    && self.visibility == other.visibility
            }
            PartialKey::RowFamilyQualifierVisibilityTime => self == other,
        }
    }
}

fn followed(bytes: &[u8]) -> Vec<u8> {
    let mut next = Vec::with_capacity(bytes.len() + 1);
    next.extend_from_slice(bytes);
    next.push(0);
    next
}

/// Ordering implementation for BTreeMap
///
/// Keys are ordered by: row → family → qualifier → visibility → timestamp (descending)
impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row
            .cmp(&other.row)
            .then_with(|| self.family.cmp(&other.family))
            .then_with(|| self.qualifier.cmp(&other.qualifier))
            .then_with(|| self.visibility.cmp(&other.visibility))
            .then_with(|| other.timestamp.cmp(&self.timestamp))
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}:{} [{}] {}",
            printable(&self.row),
            printable(&self.family),
            printable(&self.qualifier),
            printable(&self.visibility),
            self.timestamp
        )
    }
}

fn printable(bytes: &[u8]) -> String {
    bytes.escape_ascii().to_string()
}
