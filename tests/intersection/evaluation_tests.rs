//! Whole-expression evaluation through the engine

use crate::test_utils::*;
use quarry::{QueryConfig, QueryEngine};

fn engine() -> QueryEngine {
    QueryEngine::new(QueryConfig {
        uid_separator: "#".to_string(),
        ..QueryConfig::default()
    })
    .unwrap()
}

fn index() -> MemoryTermIndex {
    let mut index = MemoryTermIndex::new();
    index.insert("GENRE", "jazz", "album1");
    index.insert("GENRE", "jazz", "album2");
    index.insert("ARTIST", "monk", "album1#track3");
    index.insert("ARTIST", "monk", "album3#track1");
    index.insert("YEAR", "1957", "album1#track3");
    index.insert("YEAR", "1957", "album2");
    index
}

#[test]
fn and_descends_into_children() {
    let mut arena = ExprArena::new();
    let genre = arena.eq_term("GENRE", "jazz");
    let artist = arena.eq_term("ARTIST", "monk");
    let root = arena.and(&[genre, artist]);
    let root = arena.script(root);

    let result = engine().evaluate(&arena, root, &index()).unwrap();
    assert_eq!(ids(&result), vec!["album1#track3"]);
}

#[test]
fn nested_or_under_and() {
    let mut arena = ExprArena::new();
    let genre = arena.eq_term("GENRE", "jazz");
    let artist = arena.eq_term("ARTIST", "monk");
    let year = arena.eq_term("YEAR", "1957");
    let either = arena.or(&[artist, year]);
    let either = arena.wrap(either);
    let root = arena.and(&[genre, either]);

    let result = engine().evaluate(&arena, root, &index()).unwrap();
    assert_eq!(ids(&result), vec!["album1#track3", "album2"]);
}

#[test]
fn three_way_and_keeps_deepest() {
    let mut arena = ExprArena::new();
    let genre = arena.eq_term("GENRE", "jazz");
    let artist = arena.eq_term("ARTIST", "monk");
    let year = arena.eq_term("YEAR", "1957");
    let root = arena.and(&[genre, artist, year]);

    let result = engine().evaluate(&arena, root, &index()).unwrap();
    assert_eq!(ids(&result), vec!["album1#track3"]);
    let m = result.iter().next().unwrap();
    assert_eq!(m.nodes().len(), 3);
}

#[test]
fn negated_term_is_delayed() {
    let mut arena = ExprArena::new();
    let genre = arena.eq_term("GENRE", "jazz");
    let year = arena.eq_term("YEAR", "1957");
    let not = arena.negate(year);
    let root = arena.and(&[genre, not]);

    let result = engine().evaluate(&arena, root, &index()).unwrap();
    assert_eq!(ids(&result), vec!["album1", "album2"]);
    assert!(result.iter().all(|m| m.nodes().contains(&not)));
}
