//! Trailing statistics document
//!
//! [`FinalDocumentIterator`] wraps a scan's result entries and, once they
//! run out, appends one synthetic entry carrying the scan's statistics. The
//! synthetic key has [`MARKER`] appended to its qualifier so that a scan
//! rebuilt from that key knows the statistics were already delivered.
//!
//! ```text
//! Streaming ──(source empty)──▶ DrainingTrailing ──(entry taken / nothing to report)──▶ Exhausted
//! ```
//!
//! A yield observed in any state ends the scan immediately and no trailing
//! entry is produced for this instance.

use crate::serialize::DocumentSerializer;
use crate::stats::StatsCollector;
use crate::yield_signal::YieldSignal;
use quarry_core::{Entry, Key, PartialKey, Range, Result};
use std::sync::Arc;
use tracing::debug;

/// Appended to the qualifier of the trailing entry's key
pub const MARKER: &str = "\u{2735}FinalDocument\u{2735}";

/// Where a [`FinalDocumentIterator`] is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Passing through result entries
    Streaming,
    /// Results done, trailing entry not yet taken
    DrainingTrailing,
    /// Nothing more will be produced
    Exhausted,
}

/// True if `key` belongs to a trailing statistics entry
pub fn is_trailing_entry(key: &Key) -> bool {
    key.qualifier.ends_with(MARKER.as_bytes())
}

/// Result iterator that finishes with one statistics entry
pub struct FinalDocumentIterator<I: Iterator<Item = Entry>> {
    source: I,
    lookahead: Option<Entry>,
    seek_range: Range,
    collector: Arc<dyn StatsCollector>,
    serializer: DocumentSerializer,
    signal: Option<YieldSignal>,
    state: ScanState,
    cursor: Option<Key>,
    trailing: Option<Result<Entry>>,
    yielded: bool,
}

impl<I: Iterator<Item = Entry>> FinalDocumentIterator<I> {
    /// Wrap `source`, which was seeked to `seek_range`.
    ///
    /// A seek range with an exclusive start on a marker key means the scan
    /// is being rebuilt right after its trailing entry went out, so the
    /// iterator starts exhausted.
    pub fn new(
        source: I,
        seek_range: &Range,
        collector: Arc<dyn StatsCollector>,
        serializer: DocumentSerializer,
    ) -> Self {
        let rebuilt = Self::trailing_already_returned(seek_range);
        if rebuilt {
            debug!(
                target: "quarry::scan",
                range = %seek_range,
                "rebuilt after trailing entry; starting exhausted"
            );
        }
        Self {
            source,
            lookahead: None,
            seek_range: seek_range.clone(),
            collector,
            serializer,
            signal: None,
            state: if rebuilt {
                ScanState::Exhausted
            } else {
                ScanState::Streaming
            },
            cursor: None,
            trailing: None,
            yielded: false,
        }
    }

    /// Observe `signal` for host yields
    pub fn with_yield_signal(mut self, signal: YieldSignal) -> Self {
        self.signal = Some(signal);
        self
    }

    /// Current state
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Whether a yield stopped this iterator
    pub fn has_yielded(&self) -> bool {
        self.yielded
    }

    fn trailing_already_returned(range: &Range) -> bool {
        match &range.start {
            Some(start) if !range.start_inclusive => is_trailing_entry(start),
            _ => false,
        }
    }

    fn check_yield(&mut self) -> bool {
        if !self.yielded && self.signal.as_ref().is_some_and(|s| s.has_yielded()) {
            debug!(target: "quarry::scan", state = ?self.state, "yield observed");
            self.yielded = true;
        }
        self.yielded
    }

    /// Enter draining: ask the collector once, build the trailing entry or
    /// finish.
    fn begin_draining(&mut self) {
        self.state = ScanState::DrainingTrailing;
        if !self.collector.has_entries() {
            self.state = ScanState::Exhausted;
            return;
        }
        match self.collector.combined_snapshot() {
            Some(doc) => {
                let key = self.trailing_key();
                self.trailing = Some(self.serializer.serialize(&doc).map(|value| (key, value)));
            }
            None => self.state = ScanState::Exhausted,
        }
    }

    /// Key of the trailing entry: the last returned key, or the start of the
    /// seek range (its successor when the start is exclusive), with the
    /// marker appended to the qualifier.
    fn trailing_key(&self) -> Key {
        let mut key = match (&self.cursor, &self.seek_range.start) {
            (Some(last), _) => last.clone(),
            (None, Some(start)) if self.seek_range.start_inclusive => start.clone(),
            (None, Some(start)) => start.following_key(PartialKey::RowFamilyQualifierVisibilityTime),
            (None, None) => Key::from_row(""),
        };
        key.qualifier.extend_from_slice(MARKER.as_bytes());
        key
    }

    /// Whether another entry is available
    ///
    /// False as soon as a yield is raised, even if an entry was already
    /// pulled from the source; that entry is discarded and the host resumes
    /// from the last key actually returned.
    pub fn has_next(&mut self) -> bool {
        match self.state {
            ScanState::Streaming => {
                if self.check_yield() {
                    self.lookahead = None;
                    return false;
                }
                if self.lookahead.is_some() {
                    return true;
                }
                self.lookahead = self.source.next();
                if self.lookahead.is_some() {
                    return true;
                }
                // the source may have stopped because of a yield
                if self.check_yield() {
                    return false;
                }
                self.begin_draining();
                self.trailing.is_some()
            }
            ScanState::DrainingTrailing => !self.check_yield() && self.trailing.is_some(),
            ScanState::Exhausted => false,
        }
    }

    /// Next entry; `Ok(None)` once a yield has been observed.
    ///
    /// # Panics
    ///
    /// Panics if called after the iterator is exhausted.
    pub fn next_entry(&mut self) -> Result<Option<Entry>> {
        if !self.has_next() {
            if self.yielded {
                return Ok(None);
            }
            panic!("next_entry called on an exhausted FinalDocumentIterator");
        }
        match self.state {
            ScanState::Streaming => {
                let entry = self.lookahead.take();
                if let Some((key, _)) = &entry {
                    self.cursor = Some(key.clone());
                }
                Ok(entry)
            }
            ScanState::DrainingTrailing => {
                self.state = ScanState::Exhausted;
                let entry = self.trailing.take().transpose()?;
                if let Some((key, _)) = &entry {
                    debug!(target: "quarry::scan", key = %key, "emitting trailing statistics entry");
                }
                Ok(entry)
            }
            ScanState::Exhausted => unreachable!("has_next is false when exhausted"),
        }
    }
}

impl<I: Iterator<Item = Entry>> Iterator for FinalDocumentIterator<I> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Result<Entry>> {
        if !self.has_next() {
            return None;
        }
        self.next_entry().transpose()
    }
}
