//! Range advancement through scan sessions

use crate::test_utils::*;
use quarry::{RangeAdvancer, HIGH_SENTINEL};

#[test]
fn field_advance_keeps_upper_bound() {
    let previous = Range::new(Some(Key::from_row("a")), true, Some(Key::from_row("zzz")), true);
    let next = FieldAdvancer.next_range(&Key::from_row_family("bar", "FOO"), &previous);

    let mut expected_family = b"FOO".to_vec();
    expected_family.extend_from_slice(&HIGH_SENTINEL);
    assert_eq!(next.start, Some(Key::from_row_family("bar", expected_family)));
    assert!(next.start_inclusive);
    assert_eq!(next.end, Some(Key::from_row("zzz")));
    assert!(next.end_inclusive);
}

#[test]
fn field_expansion_lists_each_field_once() {
    let source = field_index(&[("bar", "FOO", 4), ("bar", "FOOBAR", 2), ("bar", "ZED", 3)]);
    let fields: Vec<String> = ScanSession::with_advancer(source, FieldAdvancer, [Range::exact_row("bar")])
        .with_batch_size(1)
        .map(|r| family(&r.unwrap().0))
        .collect();
    assert_eq!(fields, vec!["FOO", "FOOBAR", "ZED"]);
}

#[test]
fn larger_batches_return_more_per_field() {
    let source = field_index(&[("bar", "FOO", 4), ("bar", "ZED", 3)]);
    let fields: Vec<String> = ScanSession::with_advancer(source, FieldAdvancer, [Range::all()])
        .with_batch_size(2)
        .map(|r| family(&r.unwrap().0))
        .collect();
    assert_eq!(fields, vec!["FOO", "FOO", "ZED", "ZED"]);
}

#[test]
fn advancing_past_the_end_stops_the_range() {
    let source = field_index(&[("bar", "FOO", 3), ("baz", "FOO", 2)]);
    let range = Range::new(
        Some(Key::from_row("bar")),
        true,
        Some(Key::from_row_family_qualifier("bar", "FOO", "20240101_0")),
        true,
    );
    let count = ScanSession::with_advancer(source, FieldAdvancer, [range])
        .with_batch_size(1)
        .count();
    assert_eq!(count, 1);
}
