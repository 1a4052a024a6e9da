use super::Intersector;
use crate::index_match::{insert_merging, IndexMatch, MatchSet, MatchType};
use quarry_expr::NodeId;

/// Combines matches only when identifiers are exactly equal
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualityIntersector;

impl Intersector for EqualityIntersector {
    fn intersect(&self, left: &MatchSet, right: &MatchSet, carried: &[NodeId]) -> MatchSet {
        let mut result = MatchSet::new();
        for a in left {
            if let Some(b) = right.get(a) {
                let nodes = a
                    .nodes()
                    .iter()
                    .chain(b.nodes().iter())
                    .chain(carried.iter())
                    .copied();
                insert_merging(
                    &mut result,
                    IndexMatch::new(a.id().clone(), nodes, MatchType::And),
                );
            }
        }
        result
    }

    fn name(&self) -> &'static str {
        "equality"
    }
}
