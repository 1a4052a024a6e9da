//! Shared helpers for the intersection suite

#![allow(dead_code)]

pub use quarry::{
    AncestorIntersector, EqualityIntersector, ExprArena, IndexMatch, Intersector, MatchSet,
    MatchType, MemoryTermIndex, NodeId, ReducePolicy, UidScheme,
};

/// Scheme used throughout: `#` keeps identifiers readable in failures
pub fn scheme() -> UidScheme {
    UidScheme::new('#')
}

/// Ancestor intersector keeping the deepest identifier
pub fn deepest() -> AncestorIntersector {
    AncestorIntersector::new(scheme())
}

/// Ancestor intersector keeping the shallowest identifier
pub fn shallowest() -> AncestorIntersector {
    AncestorIntersector::with_policy(scheme(), ReducePolicy::KeepAncestor)
}

/// `n` distinct expression nodes
pub fn nodes(n: usize) -> Vec<NodeId> {
    let mut arena = ExprArena::new();
    (0..n)
        .map(|i| arena.eq_term(format!("FIELD{}", i), "value"))
        .collect()
}

/// Match set of single-node matches
pub fn matches(ids: &[&str], node: NodeId) -> MatchSet {
    ids.iter().map(|id| IndexMatch::single(*id, node)).collect()
}

/// Identifiers of a match set, in order
pub fn ids(set: &MatchSet) -> Vec<String> {
    set.iter().map(|m| m.id().as_str().to_string()).collect()
}

/// True if no identifier in `set` is a strict ancestor of another
pub fn is_antichain(set: &MatchSet, scheme: &UidScheme) -> bool {
    set.iter().all(|a| {
        set.iter()
            .all(|b| a == b || !scheme.is_descendant(a.id().as_str(), b.id().as_str()))
    })
}
