//! Shared helpers for the scan suite

#![allow(dead_code)]

pub use quarry::{
    is_trailing_entry, DocumentSerializer, Entry, FieldAdvancer, FinalDocumentIterator, Key,
    MemorySource, QuerySpan, Range, ScanSession, ScanState, SerializationFormat, SortedSource,
    SpanCollector, StatsCollector, StatsDocument, YieldSignal, MARKER,
};
pub use std::sync::Arc;

/// Field index: term → field → shard entries
pub fn field_index(terms: &[(&str, &str, usize)]) -> MemorySource {
    let mut entries = Vec::new();
    for (term, field, shards) in terms {
        for shard in 0..*shards {
            entries.push((
                Key::from_row_family_qualifier(term, field, format!("2024010{}_0", shard)),
                Vec::new(),
            ));
        }
    }
    MemorySource::from_entries(entries)
}

/// Document rows `d0..dn` with one entry each
pub fn documents(n: usize) -> MemorySource {
    MemorySource::from_entries(
        (0..n).map(|i| (Key::from_row_family_qualifier(format!("d{}", i), "doc", "x"), vec![1])),
    )
}

/// Collector holding some recorded work
pub fn busy_collector() -> Arc<SpanCollector> {
    let collector = Arc::new(SpanCollector::new());
    collector.record(|span| {
        span.add_source();
        span.seek();
    });
    collector
}

pub fn serializer(format: SerializationFormat) -> DocumentSerializer {
    DocumentSerializer::new(format, false, false)
}

/// Seek `source` to `range` and wrap it
pub fn final_iter(
    mut source: MemorySource,
    range: &Range,
    collector: Arc<SpanCollector>,
) -> FinalDocumentIterator<MemorySource> {
    source.seek(range).unwrap();
    let signal = source.signal();
    FinalDocumentIterator::new(source, range, collector, serializer(SerializationFormat::CompactBinary))
        .with_yield_signal(signal)
}

pub fn family(key: &Key) -> String {
    String::from_utf8(key.family.clone()).unwrap()
}
