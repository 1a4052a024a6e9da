//! Hierarchical record identifiers
//!
//! A record identifier is a root id followed by zero or more path segments,
//! each introduced by a reserved separator that cannot appear inside an id.
//! `R1`, `R1<sep>A` and `R1<sep>A<sep>2` form one ancestor chain under the
//! root `R1`.
//!
//! Every function here is total: an identifier without recognizable
//! structure is treated as its own root and never produces an error.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Separator used when none is configured
pub const DEFAULT_SEPARATOR: char = '\0';

/// Immutable record identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap an identifier string
    pub fn new(id: impl Into<String>) -> Self {
        RecordId(id.into())
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the underlying string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.replace(DEFAULT_SEPARATOR, "\\0"))
    }
}

impl Borrow<str> for RecordId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        RecordId(id)
    }
}

/// Identifier layout: which character separates path segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UidScheme {
    separator: char,
}

impl Default for UidScheme {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
        }
    }
}

impl UidScheme {
    /// Scheme with an explicit separator
    pub fn new(separator: char) -> Self {
        Self { separator }
    }

    /// The configured separator
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Root of `id`: the identifier with every trailing `separator + segment`
    /// group stripped.
    ///
    /// An id that starts with the separator has no parseable root and is
    /// returned unchanged.
    pub fn root_of<'a>(&self, id: &'a str) -> &'a str {
        match id.find(self.separator) {
            Some(0) | None => id,
            Some(pos) => &id[..pos],
        }
    }

    /// Parent of `id`, or `None` when `id` is already a root
    pub fn parent_of<'a>(&self, id: &'a str) -> Option<&'a str> {
        let root = self.root_of(id);
        if root.len() == id.len() {
            return None;
        }
        id.rfind(self.separator).map(|pos| &id[..pos])
    }

    /// Number of path segments below the root
    pub fn depth(&self, id: &str) -> usize {
        let root = self.root_of(id);
        id[root.len()..].matches(self.separator).count()
    }

    /// True iff `id == ancestor` or `id` begins with `ancestor + separator`
    pub fn is_descendant(&self, id: &str, ancestor: &str) -> bool {
        id == ancestor || self.is_strict_descendant(id, ancestor)
    }

    /// True iff `id` begins with `ancestor + separator`
    pub fn is_strict_descendant(&self, id: &str, ancestor: &str) -> bool {
        id.len() > ancestor.len()
            && id.starts_with(ancestor)
            && id[ancestor.len()..].starts_with(self.separator)
    }

    /// Append a child segment to `id`
    pub fn child(&self, id: &str, segment: &str) -> RecordId {
        let mut child = String::with_capacity(id.len() + segment.len() + 1);
        child.push_str(id);
        child.push(self.separator);
        child.push_str(segment);
        RecordId(child)
    }
}

/// Root of `id` under the default scheme
pub fn root_of(id: &str) -> &str {
    UidScheme::default().root_of(id)
}

/// Descendant test under the default scheme
pub fn is_descendant(id: &str, ancestor: &str) -> bool {
    UidScheme::default().is_descendant(id, ancestor)
}
