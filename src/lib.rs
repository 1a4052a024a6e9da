//! Quarry - hierarchical index-match intersection and resumable scans
//!
//! Quarry answers boolean queries over a sorted, security-labelled key-value
//! index whose records form parent/child hierarchies.
//!
//! # Quick Start
//!
//! ```ignore
//! use quarry::{ExprArena, MemoryTermIndex, QueryConfig, QueryEngine};
//!
//! let engine = QueryEngine::new(QueryConfig::default())?;
//!
//! let mut arena = ExprArena::new();
//! let a = arena.eq_term("COLOR", "red");
//! let b = arena.eq_term("SIZE", "big");
//! let root = arena.and(&[a, b]);
//!
//! let matches = engine.evaluate(&arena, root, &index);
//! ```
//!
//! # Architecture
//!
//! - `quarry_core`: keys, ranges, identifiers, config and errors
//! - `quarry_expr`: the expression arena
//! - `quarry_index`: index matches and intersection strategies
//! - `quarry_scan`: sessions, range advancement and the trailing statistics entry
//! - `quarry_metadata`: type metadata cache and refresher

pub mod engine;

pub use engine::QueryEngine;

pub use quarry_core::{
    is_descendant, root_of, Entry, Error, Key, PartialKey, QueryConfig, Range, RecordId,
    ReducePolicy, Result, SerializationFormat, UidScheme, CONFIG_FILE_NAME,
};
pub use quarry_expr::{ExprArena, NodeId, NodeKind, Number};
pub use quarry_index::{
    evaluate, union_matches, AncestorIntersector, EqualityIntersector, IndexMatch, Intersector,
    MatchSet, MatchType, MemoryTermIndex, TermLookup,
};
pub use quarry_metadata::{
    AuthorizedMetadata, FileMetadataLoader, MetadataLoader, MetadataRefresher, TypeMetadata,
    TypeMetadataCache,
};
pub use quarry_scan::{
    is_trailing_entry, DocumentSerializer, FieldAdvancer, FinalDocumentIterator, MemorySource,
    QuerySpan, RangeAdvancer, ResumeAfterKey, ScanSession, ScanState, SortedSource,
    SpanCollector, StatsCollector, StatsDocument, YieldSignal, HIGH_SENTINEL, MARKER,
};
