//! Expression evaluation against a term index
//!
//! Equality terms are resolved through a [`TermLookup`]; junctions combine
//! child results with an [`Intersector`] (AND) or a union (OR). Terms the
//! index cannot answer are delayed: under an AND their nodes ride along on
//! every surviving match so a later stage can verify them against the
//! fetched record.

use crate::index_match::{union_matches, IndexMatch, MatchSet, MatchType};
use crate::intersect::Intersector;
use quarry_core::RecordId;
use quarry_expr::{ExprArena, NodeId, NodeKind};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

/// Source of record identifiers for `field == value` terms
pub trait TermLookup {
    /// Identifiers of records holding `value` in `field`
    fn lookup(&self, field: &str, value: &str) -> Vec<RecordId>;
}

/// In-memory term index, keyed by field and value
#[derive(Debug, Default, Clone)]
pub struct MemoryTermIndex {
    terms: FxHashMap<(String, String), Vec<RecordId>>,
}

impl MemoryTermIndex {
    /// Empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `id` holds `value` in `field`
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        value: impl Into<String>,
        id: impl Into<RecordId>,
    ) {
        let ids = self.terms.entry((field.into(), value.into())).or_default();
        let id = id.into();
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    /// Number of distinct field/value terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True if nothing has been indexed
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl TermLookup for MemoryTermIndex {
    fn lookup(&self, field: &str, value: &str) -> Vec<RecordId> {
        self.terms
            .get(&(field.to_string(), value.to_string()))
            .cloned()
            .unwrap_or_default()
    }
}

/// Evaluate the subtree at `root`.
///
/// Returns `None` when the index cannot answer the subtree at all (for
/// example a negation, a range comparison, or an OR with an unanswerable
/// branch). An empty set means the index answered and nothing matched.
pub fn evaluate(
    arena: &ExprArena,
    root: NodeId,
    lookup: &dyn TermLookup,
    intersector: &dyn Intersector,
) -> Option<MatchSet> {
    let result = eval_node(arena, root, lookup, intersector);
    debug!(
        target: "quarry::index",
        root = %root,
        intersector = intersector.name(),
        matches = result.as_ref().map(|r| r.len()),
        "evaluated expression"
    );
    result
}

fn eval_node(
    arena: &ExprArena,
    id: NodeId,
    lookup: &dyn TermLookup,
    intersector: &dyn Intersector,
) -> Option<MatchSet> {
    match arena.kind(id) {
        NodeKind::Eq => {
            let (field, value) = arena.field_and_value(id)?;
            let matches: MatchSet = lookup
                .lookup(field, &value)
                .into_iter()
                .map(|rid| IndexMatch::single(rid, id))
                .collect();
            trace!(target: "quarry::index", field, value = %value, matches = matches.len(), "term lookup");
            Some(matches)
        }
        NodeKind::Script | NodeKind::Reference | NodeKind::ReferenceExpression => {
            match arena.children(id) {
                [only] => eval_node(arena, *only, lookup, intersector),
                _ => None,
            }
        }
        NodeKind::And => eval_and(arena, id, lookup, intersector),
        NodeKind::Or => {
            let mut acc: Option<MatchSet> = None;
            for &child in arena.children(id) {
                let next = eval_node(arena, child, lookup, intersector)?;
                acc = Some(match acc {
                    Some(prev) => union_matches(&prev, &next),
                    None => next,
                });
            }
            acc
        }
        _ => None,
    }
}

fn eval_and(
    arena: &ExprArena,
    id: NodeId,
    lookup: &dyn TermLookup,
    intersector: &dyn Intersector,
) -> Option<MatchSet> {
    let mut resolved: Vec<MatchSet> = Vec::new();
    let mut delayed: Vec<NodeId> = Vec::new();
    for &child in arena.children(id) {
        match eval_node(arena, child, lookup, intersector) {
            Some(set) => resolved.push(set),
            None => delayed.push(child),
        }
    }

    let mut sets = resolved.into_iter();
    let first = sets.next()?;
    let rest: Vec<MatchSet> = sets.collect();

    if rest.is_empty() {
        return Some(
            first
                .into_iter()
                .map(|m| {
                    let nodes = m.nodes().iter().chain(delayed.iter()).copied();
                    IndexMatch::new(m.id().clone(), nodes, MatchType::And)
                })
                .collect(),
        );
    }

    let last = rest.len() - 1;
    let mut acc = first;
    for (i, next) in rest.iter().enumerate() {
        let carried: &[NodeId] = if i == last { &delayed } else { &[] };
        acc = intersector.intersect(&acc, next, carried);
    }
    Some(acc)
}
