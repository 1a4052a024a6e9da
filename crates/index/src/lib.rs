//! Index matching for Quarry
//!
//! This crate provides:
//! - `IndexMatch` / `MatchSet`: record identifiers with the expression nodes
//!   that matched them
//! - `Intersector` trait with equality and ancestor-aware strategies
//! - `TermLookup` and `evaluate` for answering expressions from a term index
//!
//! # Usage
//!
//! ```ignore
//! use quarry_index::{evaluate, AncestorIntersector, MemoryTermIndex};
//!
//! let matches = evaluate(&arena, root, &index, &AncestorIntersector::default());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod index_match;
pub mod intersect;
pub mod lookup;

pub use index_match::{insert_merging, union_matches, IndexMatch, MatchSet, MatchType};
pub use intersect::{intersector_for, AncestorIntersector, EqualityIntersector, Intersector};
pub use lookup::{evaluate, MemoryTermIndex, TermLookup};
pub use quarry_core::ReducePolicy;
