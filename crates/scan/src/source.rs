//! Sorted entry sources
//!
//! A [`SortedSource`] is the seekable, pull-based view of the sorted store
//! that scans run over. [`MemorySource`] is an in-memory implementation over
//! a shared `BTreeMap`, able to simulate a host yield after a fixed number
//! of entries.

use crate::yield_signal::YieldSignal;
use quarry_core::{Entry, Error, Key, Range, Result};
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

/// Seekable sorted entry source
pub trait SortedSource {
    /// Position the source at the start of `range`
    fn seek(&mut self, range: &Range) -> Result<()>;

    /// Whether another entry is available without yielding
    fn has_next(&self) -> bool;

    /// Next entry in key order, `None` once the range is exhausted
    fn next_entry(&mut self) -> Result<Option<Entry>>;

    /// Whether the host asked this scan to yield
    fn has_yielded(&self) -> bool;
}

/// In-memory sorted source
#[derive(Debug, Clone)]
pub struct MemorySource {
    data: Arc<BTreeMap<Key, Vec<u8>>>,
    range: Option<Range>,
    pending: Option<Entry>,
    last: Option<Key>,
    returned: usize,
    yield_after: Option<usize>,
    signal: YieldSignal,
}

impl MemorySource {
    /// Source over `data`
    pub fn new(data: BTreeMap<Key, Vec<u8>>) -> Self {
        Self {
            data: Arc::new(data),
            range: None,
            pending: None,
            last: None,
            returned: 0,
            yield_after: None,
            signal: YieldSignal::new(),
        }
    }

    /// Source over an arbitrary set of entries
    pub fn from_entries(entries: impl IntoIterator<Item = Entry>) -> Self {
        Self::new(entries.into_iter().collect())
    }

    /// Yield once `n` entries have been returned since the last seek and more
    /// remain. The signal is raised on the next request, positioned at the
    /// last returned key; `n = 0` never yields.
    pub fn with_yield_after(mut self, n: usize) -> Self {
        self.yield_after = Some(n);
        self
    }

    /// Share an externally owned yield signal
    pub fn with_signal(mut self, signal: YieldSignal) -> Self {
        self.signal = signal;
        self
    }

    /// Handle on this source's yield signal
    pub fn signal(&self) -> YieldSignal {
        self.signal.clone()
    }

    /// A fresh, unseeked source over the same data, as a host would build
    /// after tearing a scan down. The yield trigger is not carried over.
    pub fn reopen(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            range: None,
            pending: None,
            last: None,
            returned: 0,
            yield_after: None,
            signal: YieldSignal::new(),
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn first_from(&self, lower: Bound<&Key>) -> Option<Entry> {
        let range = self.range.as_ref()?;
        self.data
            .range((lower, Bound::Unbounded))
            .next()
            .filter(|(key, _)| !range.after_end(key))
            .map(|(key, value)| (key.clone(), value.clone()))
    }

    /// Raise the signal if the yield point has been reached
    fn yield_due(&self) -> bool {
        if self.signal.has_yielded() {
            return true;
        }
        match &self.last {
            Some(last) if self.yield_after == Some(self.returned) && self.pending.is_some() => {
                self.signal.yield_at(last.clone());
                true
            }
            _ => false,
        }
    }
}

impl SortedSource for MemorySource {
    fn seek(&mut self, range: &Range) -> Result<()> {
        self.range = Some(range.clone());
        self.returned = 0;
        self.last = None;
        self.pending = if range.is_empty() {
            None
        } else {
            let lower = match &range.start {
                None => Bound::Unbounded,
                Some(start) if range.start_inclusive => Bound::Included(start),
                Some(start) => Bound::Excluded(start),
            };
            self.first_from(lower)
        };
        Ok(())
    }

    fn has_next(&self) -> bool {
        !self.yield_due() && self.pending.is_some()
    }

    fn next_entry(&mut self) -> Result<Option<Entry>> {
        if self.range.is_none() {
            return Err(Error::storage("next_entry called before seek"));
        }
        if self.yield_due() {
            return Ok(None);
        }
        let Some(entry) = self.pending.take() else {
            return Ok(None);
        };
        self.pending = self.first_from(Bound::Excluded(&entry.0));
        self.returned += 1;
        self.last = Some(entry.0.clone());
        Ok(Some(entry))
    }

    fn has_yielded(&self) -> bool {
        self.signal.has_yielded()
    }
}

impl Iterator for MemorySource {
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        if !self.has_next() {
            return None;
        }
        self.next_entry().ok().flatten()
    }
}
