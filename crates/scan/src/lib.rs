//! Scans for Quarry
//!
//! This crate provides:
//! - `SortedSource` trait and the in-memory `MemorySource`
//! - `RangeAdvancer` with key-resume and field-skip strategies
//! - `ScanSession` for batched, re-seeking scans over a range queue
//! - `QuerySpan` / `SpanCollector` scan statistics
//! - `DocumentSerializer` for the statistics document wire formats
//! - `FinalDocumentIterator`, which appends one trailing statistics entry
//!   and survives teardown/rebuild and host yields

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod advance;
pub mod serialize;
pub mod session;
pub mod source;
pub mod stats;
pub mod trailing;
pub mod yield_signal;

pub use advance::{FieldAdvancer, RangeAdvancer, ResumeAfterKey, HIGH_SENTINEL};
pub use serialize::DocumentSerializer;
pub use session::ScanSession;
pub use source::{MemorySource, SortedSource};
pub use stats::{QuerySpan, SpanCollector, StatsCollector, StatsDocument};
pub use trailing::{is_trailing_entry, FinalDocumentIterator, ScanState, MARKER};
pub use yield_signal::YieldSignal;
