//! Worked intersection scenarios

use crate::test_utils::*;

#[test]
fn parent_on_left_child_on_right() {
    let n = nodes(2);
    let result = deepest().intersect(&matches(&["R1"], n[0]), &matches(&["R1#A"], n[1]), &[]);

    assert_eq!(ids(&result), vec!["R1#A"]);
    let m = result.iter().next().unwrap();
    assert!(m.nodes().contains(&n[0]) && m.nodes().contains(&n[1]));
    assert_eq!(m.match_type(), MatchType::And);
}

#[test]
fn child_on_left_parent_on_right() {
    let n = nodes(2);
    let result = deepest().intersect(&matches(&["R1#A"], n[0]), &matches(&["R1"], n[1]), &[]);
    assert_eq!(ids(&result), vec!["R1#A"]);
}

#[test]
fn unrelated_roots_produce_nothing() {
    let n = nodes(2);
    let result = deepest().intersect(&matches(&["R1"], n[0]), &matches(&["R2"], n[1]), &[]);
    assert!(result.is_empty());
}

#[test]
fn ancestor_arriving_after_descendant_is_rejected() {
    let n = nodes(2);
    let ix = deepest();
    let mut result = MatchSet::new();
    ix.reduce(&mut result, IndexMatch::new("R1#A", [n[0]], MatchType::And));
    ix.reduce(&mut result, IndexMatch::new("R1", [n[1]], MatchType::And));
    assert_eq!(ids(&result), vec!["R1#A"]);
}

#[test]
fn root_with_many_children() {
    let n = nodes(2);
    let left = matches(&["R1"], n[0]);
    let right = matches(&["R1#A", "R1#B", "R1#B#C"], n[1]);
    let result = deepest().intersect(&left, &right, &[]);
    assert_eq!(ids(&result), vec!["R1#A", "R1#B#C"]);
}

#[test]
fn shallowest_policy_keeps_ancestor() {
    let n = nodes(2);
    let ix = shallowest();
    let mut result = MatchSet::new();
    ix.reduce(&mut result, IndexMatch::new("R1#A", [n[0]], MatchType::And));
    ix.reduce(&mut result, IndexMatch::new("R1", [n[1]], MatchType::And));
    assert_eq!(ids(&result), vec!["R1"]);
}

#[test]
fn malformed_identifiers_are_their_own_root() {
    let n = nodes(2);
    let left = matches(&["#odd", "R1"], n[0]);
    let right = matches(&["#odd", "R1#A"], n[1]);
    let result = deepest().intersect(&left, &right, &[]);
    assert_eq!(ids(&result), vec!["#odd", "R1#A"]);
}

#[test]
fn flat_intersection_ignores_hierarchy() {
    let n = nodes(2);
    let result =
        EqualityIntersector.intersect(&matches(&["R1", "R2"], n[0]), &matches(&["R1#A", "R2"], n[1]), &[]);
    assert_eq!(ids(&result), vec!["R2"]);
}

#[test]
fn carried_nodes_ride_on_every_match() {
    let n = nodes(3);
    let result = deepest().intersect(
        &matches(&["R1", "R2#X"], n[0]),
        &matches(&["R1#A", "R2"], n[1]),
        &[n[2]],
    );
    assert_eq!(ids(&result), vec!["R1#A", "R2#X"]);
    assert!(result.iter().all(|m| m.nodes().contains(&n[2])));
}
