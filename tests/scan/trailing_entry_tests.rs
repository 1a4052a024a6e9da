//! Trailing statistics entry: exactly-once delivery, rebuild recovery and
//! yield suppression

use crate::test_utils::*;

fn drain(it: &mut FinalDocumentIterator<MemorySource>) -> Vec<Entry> {
    it.by_ref().map(|r| r.unwrap()).collect()
}

#[test]
fn full_drain_produces_exactly_one_trailing_entry() {
    let mut it = final_iter(documents(5), &Range::all(), busy_collector());
    let out = drain(&mut it);
    assert_eq!(out.len(), 6);
    assert_eq!(out.iter().filter(|(k, _)| is_trailing_entry(k)).count(), 1);
    assert!(is_trailing_entry(&out[5].0));
    assert_eq!(it.state(), ScanState::Exhausted);
    assert!(!it.has_next());
}

#[test]
fn rebuild_from_trailing_key_does_not_repeat_it() {
    let source = documents(3);
    let mut it = final_iter(source.reopen(), &Range::all(), busy_collector());
    let out = drain(&mut it);
    let trailing_key = out.last().unwrap().0.clone();
    assert!(is_trailing_entry(&trailing_key));

    // host tears down and rebuilds, resuming strictly after the last key it saw
    let rebuilt = Range::new(Some(trailing_key), false, None, true);
    let mut it = final_iter(source.reopen(), &rebuilt, busy_collector());
    assert_eq!(it.state(), ScanState::Exhausted);
    assert!(drain(&mut it).is_empty());
}

#[test]
fn rebuild_from_ordinary_key_still_reports() {
    let source = documents(3);
    let resume = Key::from_row_family_qualifier("d0", "doc", "x");
    let range = Range::new(Some(resume), false, None, true);
    let mut it = final_iter(source, &range, busy_collector());
    let out = drain(&mut it);
    assert_eq!(out.len(), 3);
    assert!(is_trailing_entry(&out[2].0));
}

#[test]
fn empty_scan_keys_trailing_entry_after_exclusive_start() {
    let start = Key::from_row_family_qualifier("k", "doc", "x").with_timestamp(100);
    let range = Range::new(Some(start.clone()), false, Some(Key::from_row("k0")), true);
    let mut it = final_iter(documents(0), &range, busy_collector());

    assert!(it.has_next());
    let (key, value) = it.next_entry().unwrap().unwrap();
    let mut expected = start.following_key(quarry::PartialKey::RowFamilyQualifierVisibilityTime);
    expected.qualifier.extend_from_slice(MARKER.as_bytes());
    assert_eq!(key, expected);
    assert!(!value.is_empty());
    assert!(!it.has_next());
}

#[test]
fn yield_suppresses_trailing_entry() {
    let mut it = final_iter(documents(10).with_yield_after(4), &Range::all(), busy_collector());
    let out = drain(&mut it);
    assert_eq!(out.len(), 4);
    assert!(out.iter().all(|(k, _)| !is_trailing_entry(k)));
    assert!(it.has_yielded());
    assert!(!it.has_next());
}

#[test]
fn yield_with_pending_statistics_still_suppresses() {
    let collector = busy_collector();
    collector.add_span({
        let mut span = QuerySpan::new();
        span.next();
        span
    });
    let mut it = final_iter(documents(2).with_yield_after(1), &Range::all(), collector);
    let out = drain(&mut it);
    assert_eq!(out.len(), 1);
    assert_eq!(it.next_entry().unwrap(), None);
}

#[test]
fn host_yield_after_lookahead_loses_nothing_on_resume() {
    let data = documents(5);
    let mut source = data.reopen();
    source.seek(&Range::all()).unwrap();
    let signal = YieldSignal::new();
    let mut it = FinalDocumentIterator::new(
        source,
        &Range::all(),
        busy_collector(),
        serializer(SerializationFormat::CompactBinary),
    )
    .with_yield_signal(signal.clone());

    let (first, _) = it.next_entry().unwrap().unwrap();
    assert!(it.has_next());
    signal.yield_at(first.clone());
    assert!(!it.has_next());
    assert_eq!(it.next_entry().unwrap(), None);

    // rebuild from the yield position
    let position = signal.position_and_reset().unwrap();
    assert_eq!(position, first);
    let resume = Range::new(Some(position), false, None, true);
    let mut rebuilt = final_iter(data.reopen(), &resume, busy_collector());
    let rest = drain(&mut rebuilt);

    let rows: Vec<Vec<u8>> = std::iter::once(first.row)
        .chain(rest.iter().filter(|(k, _)| !is_trailing_entry(k)).map(|(k, _)| k.row.clone()))
        .collect();
    let expected: Vec<Vec<u8>> = (0..5).map(|i| format!("d{}", i).into_bytes()).collect();
    assert_eq!(rows, expected);
    assert_eq!(rest.iter().filter(|(k, _)| is_trailing_entry(k)).count(), 1);
}

#[test]
fn no_statistics_means_no_trailing_entry() {
    let mut it = final_iter(documents(2), &Range::all(), Arc::new(SpanCollector::new()));
    assert_eq!(drain(&mut it).len(), 2);
}

#[test]
fn trailing_value_decodes_in_every_format() {
    for format in [
        SerializationFormat::CompactBinary,
        SerializationFormat::Native,
        SerializationFormat::DebugText,
    ] {
        for compressed in [false, true] {
            let ser = DocumentSerializer::new(format, false, compressed);
            let collector = busy_collector();
            let mut source = documents(1);
            source.seek(&Range::all()).unwrap();
            let out: Vec<Entry> =
                FinalDocumentIterator::new(source, &Range::all(), collector.clone(), ser)
                    .map(|r| r.unwrap())
                    .collect();
            let doc: StatsDocument = ser.deserialize(&out[1].1).unwrap();
            assert_eq!(Some(doc), collector.combined_snapshot());
        }
    }
}

#[test]
fn session_statistics_flow_into_trailing_entry() {
    let collector = Arc::new(SpanCollector::new());
    let session = ScanSession::new(documents(4), [Range::all()])
        .with_batch_size(2)
        .with_collector(Arc::clone(&collector));
    let results: Vec<Entry> = session.map(|r| r.unwrap()).collect();
    assert_eq!(results.len(), 4);

    let ser = serializer(SerializationFormat::DebugText);
    let out: Vec<Entry> = FinalDocumentIterator::new(results.into_iter(), &Range::all(), collector, ser)
        .map(|r| r.unwrap())
        .collect();
    let doc = ser.deserialize(&out[4].1).unwrap();
    assert_eq!(doc.next_count, 4);
    // initial seek, one re-seek per full batch
    assert_eq!(doc.seek_count, 3);
}
