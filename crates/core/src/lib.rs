//! Core types for Quarry
//!
//! This crate defines the foundational types used throughout the system:
//! - Key: five-part composite key with sorted-store ordering
//! - Range: key range with independent bound inclusivity
//! - RecordId / UidScheme: hierarchical record identifiers (root + path)
//! - QueryConfig: `quarry.toml` configuration
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod key;
pub mod range;
pub mod uid;

pub use config::{QueryConfig, ReducePolicy, SerializationFormat, CONFIG_FILE_NAME};
pub use error::{Error, Result};
pub use key::{Key, PartialKey};
pub use range::Range;
pub use uid::{is_descendant, root_of, RecordId, UidScheme, DEFAULT_SEPARATOR};

/// A sorted-store entry: key plus opaque value bytes
pub type Entry = (Key, Vec<u8>);
