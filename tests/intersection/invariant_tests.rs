//! Property tests for hierarchical intersection

use crate::test_utils::*;
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Identifiers like `R2`, `R0#B`, `R3#A#C`
fn identifier() -> impl Strategy<Value = String> {
    (0..4u8, prop::collection::vec(0..3u8, 0..3)).prop_map(|(root, path)| {
        let mut id = format!("R{}", root);
        for seg in path {
            id.push('#');
            id.push((b'A' + seg) as char);
        }
        id
    })
}

fn match_set(node: NodeId) -> impl Strategy<Value = MatchSet> {
    prop::collection::vec(identifier(), 0..8).prop_map(move |ids| {
        ids.into_iter()
            .map(|id| IndexMatch::single(id, node))
            .collect()
    })
}

fn roots(set: &MatchSet) -> BTreeSet<String> {
    let scheme = scheme();
    set.iter()
        .map(|m| scheme.root_of(m.id().as_str()).to_string())
        .collect()
}

fn operands() -> impl Strategy<Value = (MatchSet, MatchSet)> {
    let n = nodes(2);
    (match_set(n[0]), match_set(n[1]))
}

proptest! {
    #[test]
    fn invariant_result_is_antichain((left, right) in operands()) {
        for ix in [deepest(), shallowest()] {
            let result = ix.intersect(&left, &right, &[]);
            prop_assert!(is_antichain(&result, &scheme()), "not an antichain: {:?}", ids(&result));
        }
    }

    #[test]
    fn invariant_one_sided_roots_contribute_nothing((left, right) in operands()) {
        let result = deepest().intersect(&left, &right, &[]);
        let both: BTreeSet<String> = roots(&left).intersection(&roots(&right)).cloned().collect();
        prop_assert!(roots(&result).is_subset(&both));
    }

    #[test]
    fn invariant_results_come_from_inputs((left, right) in operands()) {
        let result = deepest().intersect(&left, &right, &[]);
        for m in &result {
            prop_assert!(left.contains(m) || right.contains(m));
            prop_assert_eq!(m.match_type(), MatchType::And);
        }
    }

    #[test]
    fn invariant_self_intersection_is_idempotent((left, right) in operands()) {
        for ix in [deepest(), shallowest()] {
            let result = ix.intersect(&left, &right, &[]);
            let again = ix.intersect(&result, &result, &[]);
            prop_assert_eq!(ids(&again), ids(&result));

            let mut refolded = MatchSet::new();
            for m in result.iter().cloned() {
                ix.reduce(&mut refolded, m);
            }
            prop_assert_eq!(ids(&refolded), ids(&result));
        }
    }

    #[test]
    fn invariant_empty_operand_gives_empty_result((left, _right) in operands()) {
        prop_assert!(deepest().intersect(&left, &MatchSet::new(), &[]).is_empty());
        prop_assert!(deepest().intersect(&MatchSet::new(), &left, &[]).is_empty());
    }
}
