//! Scan statistics
//!
//! A [`QuerySpan`] counts the work one scan did against the store. Spans
//! from finished sub-scans are handed to a [`SpanCollector`], which merges
//! them into the [`StatsDocument`] returned as a scan's trailing entry.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Counters for one scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySpan {
    /// Sources opened
    pub source_count: u64,
    /// Seeks issued
    pub seek_count: u64,
    /// Entries pulled
    pub next_count: u64,
    /// Yields observed
    pub yield_count: u64,
    /// Elapsed microseconds per named stage
    pub stage_timings: BTreeMap<String, u64>,
}

impl QuerySpan {
    /// Empty span
    pub fn new() -> Self {
        Self::default()
    }

    /// Count an opened source
    pub fn add_source(&mut self) {
        self.source_count += 1;
    }

    /// Count a seek
    pub fn seek(&mut self) {
        self.seek_count += 1;
    }

    /// Count a pulled entry
    pub fn next(&mut self) {
        self.next_count += 1;
    }

    /// Count a yield
    pub fn yielded(&mut self) {
        self.yield_count += 1;
    }

    /// Add elapsed time to `stage`
    pub fn add_stage_timing(&mut self, stage: impl Into<String>, elapsed: Duration) {
        *self.stage_timings.entry(stage.into()).or_insert(0) += elapsed.as_micros() as u64;
    }

    /// True if anything was recorded
    pub fn has_entries(&self) -> bool {
        self.source_count > 0
            || self.seek_count > 0
            || self.next_count > 0
            || self.yield_count > 0
            || !self.stage_timings.is_empty()
    }

    /// Add `other`'s counters into this span
    pub fn merge(&mut self, other: &QuerySpan) {
        self.source_count += other.source_count;
        self.seek_count += other.seek_count;
        self.next_count += other.next_count;
        self.yield_count += other.yield_count;
        for (stage, micros) in &other.stage_timings {
            *self.stage_timings.entry(stage.clone()).or_insert(0) += micros;
        }
    }

    /// Zero every counter
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Document form of this span
    pub fn to_document(&self) -> StatsDocument {
        StatsDocument {
            source_count: self.source_count,
            seek_count: self.seek_count,
            next_count: self.next_count,
            yield_count: self.yield_count,
            stage_timings: if self.stage_timings.is_empty() {
                None
            } else {
                Some(self.stage_timings.clone())
            },
        }
    }
}

/// Aggregated statistics carried by the trailing entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsDocument {
    /// Sources opened
    pub source_count: u64,
    /// Seeks issued
    pub seek_count: u64,
    /// Entries pulled
    pub next_count: u64,
    /// Yields observed
    pub yield_count: u64,
    /// Elapsed microseconds per stage, absent in reduced responses
    pub stage_timings: Option<BTreeMap<String, u64>>,
}

impl StatsDocument {
    /// Copy without stage timings
    pub fn reduced(&self) -> StatsDocument {
        StatsDocument {
            stage_timings: None,
            ..self.clone()
        }
    }
}

/// Source of the statistics a scan reports when it finishes
pub trait StatsCollector: Send + Sync {
    /// Whether there is anything to report
    fn has_entries(&self) -> bool;

    /// Everything recorded so far, merged; `None` if nothing was recorded
    fn combined_snapshot(&self) -> Option<StatsDocument>;
}

/// Collects spans from sub-scans plus the span of the current scan
#[derive(Debug, Default)]
pub struct SpanCollector {
    finished: Mutex<Vec<QuerySpan>>,
    local: Mutex<QuerySpan>,
}

impl SpanCollector {
    /// Empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand over the span of a finished sub-scan
    pub fn add_span(&self, span: QuerySpan) {
        if span.has_entries() {
            self.finished.lock().push(span);
        }
    }

    /// Update the current scan's span
    pub fn record<F: FnOnce(&mut QuerySpan)>(&self, f: F) {
        f(&mut self.local.lock());
    }

    /// All spans merged into one
    pub fn combined_span(&self) -> QuerySpan {
        let mut combined = self.local.lock().clone();
        for span in self.finished.lock().iter() {
            combined.merge(span);
        }
        combined
    }

    /// Drop everything recorded
    pub fn reset(&self) {
        self.finished.lock().clear();
        self.local.lock().reset();
    }
}

impl StatsCollector for SpanCollector {
    fn has_entries(&self) -> bool {
        self.local.lock().has_entries() || !self.finished.lock().is_empty()
    }

    fn combined_snapshot(&self) -> Option<StatsDocument> {
        let combined = self.combined_span();
        combined.has_entries().then(|| combined.to_document())
    }
}
