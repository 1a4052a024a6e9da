//! Batched scan sessions
//!
//! A [`ScanSession`] walks a queue of ranges over a [`SortedSource`]. After
//! `batch_size` entries from one seek it asks its [`RangeAdvancer`] for the
//! next range and re-seeks, which is how the field advancer skips to the
//! next field instead of reading every entry of the current one.

use crate::advance::{RangeAdvancer, ResumeAfterKey};
use crate::source::SortedSource;
use crate::stats::SpanCollector;
use quarry_core::{Entry, Key, QueryConfig, Range, Result};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, trace};

/// Pull-based scan over a queue of ranges
pub struct ScanSession<S: SortedSource, A: RangeAdvancer = ResumeAfterKey> {
    source: S,
    advancer: A,
    ranges: VecDeque<Range>,
    current: Option<Range>,
    last_key: Option<Key>,
    batch_size: usize,
    in_batch: usize,
    collector: Option<Arc<SpanCollector>>,
    yielded: bool,
    failed: bool,
}

impl<S: SortedSource> ScanSession<S, ResumeAfterKey> {
    /// Session resuming strictly after the last key on every re-seek
    pub fn new(source: S, ranges: impl IntoIterator<Item = Range>) -> Self {
        Self::with_advancer(source, ResumeAfterKey, ranges)
    }
}

impl<S: SortedSource, A: RangeAdvancer> ScanSession<S, A> {
    /// Session with an explicit advancer
    pub fn with_advancer(source: S, advancer: A, ranges: impl IntoIterator<Item = Range>) -> Self {
        Self {
            source,
            advancer,
            ranges: ranges.into_iter().collect(),
            current: None,
            last_key: None,
            batch_size: 1000,
            in_batch: 0,
            collector: None,
            yielded: false,
            failed: false,
        }
    }

    /// Entries read per seek; zero is treated as one
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Take the batch size from config
    pub fn with_config(self, config: &QueryConfig) -> Self {
        self.with_batch_size(config.batch_size)
    }

    /// Record seeks and pulled entries into `collector`
    pub fn with_collector(mut self, collector: Arc<SpanCollector>) -> Self {
        collector.record(|span| span.add_source());
        self.collector = Some(collector);
        self
    }

    /// Whether the session stopped because the source yielded
    pub fn has_yielded(&self) -> bool {
        self.yielded
    }

    /// Last key returned
    pub fn last_key(&self) -> Option<&Key> {
        self.last_key.as_ref()
    }

    /// Ranges not yet started
    pub fn remaining_ranges(&self) -> usize {
        self.ranges.len()
    }

    /// Give the source back, e.g. to rebuild after a yield
    pub fn into_source(self) -> S {
        self.source
    }

    fn seek(&mut self, range: Range) -> Result<()> {
        self.source.seek(&range)?;
        if let Some(collector) = &self.collector {
            collector.record(|span| span.seek());
        }
        self.in_batch = 0;
        self.current = Some(range);
        Ok(())
    }

    fn step(&mut self) -> Result<Option<Entry>> {
        loop {
            let Some(current) = &self.current else {
                let Some(range) = self.ranges.pop_front() else {
                    return Ok(None);
                };
                trace!(target: "quarry::scan", range = %range, "starting range");
                self.last_key = None;
                self.seek(range)?;
                continue;
            };

            if self.in_batch >= self.batch_size {
                if let Some(last) = &self.last_key {
                    let next = self.advancer.next_range(last, current);
                    trace!(target: "quarry::scan", last = %last, range = %next, "advanced range");
                    if next.is_empty() {
                        self.current = None;
                        continue;
                    }
                    self.seek(next)?;
                }
            }

            if !self.source.has_next() {
                if self.source.has_yielded() {
                    self.yielded = true;
                    if let Some(collector) = &self.collector {
                        collector.record(|span| span.yielded());
                    }
                    debug!(target: "quarry::scan", last = ?self.last_key.as_ref().map(|k| k.to_string()), "source yielded");
                    return Ok(None);
                }
                self.current = None;
                continue;
            }

            match self.source.next_entry()? {
                Some(entry) => {
                    self.in_batch += 1;
                    self.last_key = Some(entry.0.clone());
                    if let Some(collector) = &self.collector {
                        collector.record(|span| span.next());
                    }
                    return Ok(Some(entry));
                }
                None => self.current = None,
            }
        }
    }
}

impl<S: SortedSource, A: RangeAdvancer> Iterator for ScanSession<S, A> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Result<Entry>> {
        if self.yielded || self.failed {
            return None;
        }
        match self.step() {
            Ok(entry) => entry.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
