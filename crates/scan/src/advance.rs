//! Range advancement
//!
//! After a batch of results a scan is re-seeked from a new range computed
//! from the last key it returned. The advancer decides how far to skip.

use quarry_core::{Key, Range};

/// Appended to a field name to build a key after every entry of that field
/// and before the next field: a NUL, then the largest byte.
pub const HIGH_SENTINEL: [u8; 2] = [0x00, 0xFF];

/// Computes the next scan range from the last returned key
pub trait RangeAdvancer: Send + Sync {
    /// New range continuing `previous` after `last_key`
    ///
    /// The upper bound and its inclusivity are always preserved.
    fn next_range(&self, last_key: &Key, previous: &Range) -> Range;
}

/// Resume strictly after the last key
#[derive(Debug, Clone, Copy, Default)]
pub struct ResumeAfterKey;

impl RangeAdvancer for ResumeAfterKey {
    fn next_range(&self, last_key: &Key, previous: &Range) -> Range {
        Range::new(
            Some(last_key.clone()),
            false,
            previous.end.clone(),
            previous.end_inclusive,
        )
    }
}

/// Skip every remaining entry of the last key's (row, field) pair
///
/// Used to list each field a term appears in once, without visiting every
/// shard entry under that field.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldAdvancer;

impl RangeAdvancer for FieldAdvancer {
    fn next_range(&self, last_key: &Key, previous: &Range) -> Range {
        let mut family = Vec::with_capacity(last_key.family.len() + HIGH_SENTINEL.len());
        family.extend_from_slice(&last_key.family);
        family.extend_from_slice(&HIGH_SENTINEL);
        Range::new(
            Some(Key::from_row_family(&last_key.row, family)),
            true,
            previous.end.clone(),
            previous.end_inclusive,
        )
    }
}
