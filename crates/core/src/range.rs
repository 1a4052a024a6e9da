//! Key ranges
//!
//! A `Range` is a pair of optional bounds over [`Key`] with independent
//! inclusivity. An absent bound is unbounded on that side.

use crate::key::{Key, PartialKey};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scan range over composite keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    /// Lower bound, `None` for unbounded
    pub start: Option<Key>,
    /// Whether `start` itself is part of the range
    pub start_inclusive: bool,
    /// Upper bound, `None` for unbounded
    pub end: Option<Key>,
    /// Whether `end` itself is part of the range
    pub end_inclusive: bool,
}

impl Range {
    /// Create a range from explicit bounds
    pub fn new(
        start: Option<Key>,
        start_inclusive: bool,
        end: Option<Key>,
        end_inclusive: bool,
    ) -> Self {
        Self {
            start,
            start_inclusive,
            end,
            end_inclusive,
        }
    }

    /// Range covering every key
    pub fn all() -> Self {
        Self::new(None, true, None, true)
    }

    /// Range covering every key of a single row
    pub fn exact_row(row: impl AsRef<[u8]>) -> Self {
        let start = Key::from_row(row);
        let end = start.following_key(PartialKey::Row);
        Self::new(Some(start), true, Some(end), false)
    }

    /// Range from `start` (inclusive) to `end` (inclusive)
    pub fn closed(start: Key, end: Key) -> Self {
        Self::new(Some(start), true, Some(end), true)
    }

    /// True if `key` sorts before the lower bound
    pub fn before_start(&self, key: &Key) -> bool {
        match &self.start {
            None => false,
            Some(start) if self.start_inclusive => key < start,
            Some(start) => key <= start,
        }
    }

    /// True if `key` sorts after the upper bound
    pub fn after_end(&self, key: &Key) -> bool {
        match &self.end {
            None => false,
            Some(end) if self.end_inclusive => key > end,
            Some(end) => key >= end,
        }
    }

    /// True if `key` falls inside the range
    pub fn contains(&self, key: &Key) -> bool {
        !self.before_start(key) && !self.after_end(key)
    }

    /// True if no key can fall inside the range
    pub fn is_empty(&self) -> bool {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) => {
                start > end || (start == end && !(self.start_inclusive && self.end_inclusive))
            }
            _ => false,
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.start_inclusive { '[' } else { '(' };
        let close = if self.end_inclusive { ']' } else { ')' };
        match &self.start {
            Some(start) => write!(f, "{}{}", open, start)?,
            None => write!(f, "(-inf")?,
        }
        match &self.end {
            Some(end) => write!(f, ",{}{}", end, close),
            None => write!(f, ",+inf)"),
        }
    }
}
