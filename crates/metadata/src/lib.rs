//! Type metadata for Quarry
//!
//! This crate provides:
//! - `TypeMetadata`: field → datatype → type names, per authorization set
//! - `MetadataLoader` trait and the file-backed `FileMetadataLoader`
//! - `TypeMetadataCache`: explicit, shareable per-table cache
//! - `MetadataRefresher`: background thread reloading changed tables

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod loader;
pub mod refresher;
pub mod type_metadata;

pub use cache::TypeMetadataCache;
pub use loader::{FileMetadataLoader, MetadataLoader, METADATA_FILE_NAME};
pub use refresher::MetadataRefresher;
pub use type_metadata::{AuthorizedMetadata, TypeMetadata};
