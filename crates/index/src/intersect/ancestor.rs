use super::Intersector;
use crate::index_match::{insert_merging, IndexMatch, MatchSet, MatchType};
use quarry_core::{RecordId, ReducePolicy, UidScheme};
use quarry_expr::NodeId;
use rustc_hash::FxHashMap;
use tracing::trace;

/// Matches from both operands that share one root
#[derive(Default)]
struct RootGroup<'a> {
    left: Vec<&'a IndexMatch>,
    right: Vec<&'a IndexMatch>,
}

/// Combines matches whose identifiers lie on one ancestor chain
///
/// Pairs under a common root resolve to the deeper identifier; unrelated
/// cousins produce nothing. The result is reduced so that no identifier in
/// it is an ancestor of another.
#[derive(Debug, Clone, Default)]
pub struct AncestorIntersector {
    scheme: UidScheme,
    policy: ReducePolicy,
}

impl AncestorIntersector {
    /// Intersector keeping the deepest identifier of each chain
    pub fn new(scheme: UidScheme) -> Self {
        Self::with_policy(scheme, ReducePolicy::default())
    }

    /// Intersector with an explicit reduce policy
    pub fn with_policy(scheme: UidScheme, policy: ReducePolicy) -> Self {
        Self { scheme, policy }
    }

    /// The identifier scheme in use
    pub fn scheme(&self) -> &UidScheme {
        &self.scheme
    }

    /// The reduce policy in use
    pub fn policy(&self) -> ReducePolicy {
        self.policy
    }

    /// Group both operands by root, keeping first-seen root order.
    fn group<'a>(&self, left: &'a MatchSet, right: &'a MatchSet) -> Vec<RootGroup<'a>> {
        let mut slots: FxHashMap<&'a str, usize> = FxHashMap::default();
        let mut groups: Vec<RootGroup<'a>> = Vec::new();

        let mut slot_for = |id: &'a str, groups: &mut Vec<RootGroup<'a>>| -> usize {
            let root = self.scheme.root_of(id);
            *slots.entry(root).or_insert_with(|| {
                groups.push(RootGroup::default());
                groups.len() - 1
            })
        };

        for m in left {
            let slot = slot_for(m.id().as_str(), &mut groups);
            groups[slot].left.push(m);
        }
        for m in right {
            let slot = slot_for(m.id().as_str(), &mut groups);
            groups[slot].right.push(m);
        }
        groups
    }

    /// The deeper of two related identifiers, or `None` for cousins
    fn resolve<'a>(&self, a: &'a IndexMatch, b: &'a IndexMatch) -> Option<&'a RecordId> {
        if self.scheme.is_descendant(a.id().as_str(), b.id().as_str()) {
            Some(a.id())
        } else if self.scheme.is_descendant(b.id().as_str(), a.id().as_str()) {
            Some(b.id())
        } else {
            None
        }
    }

    /// Whether an existing match keeps `candidate` out of the set
    fn blocks(&self, existing: &str, candidate: &str) -> bool {
        match self.policy {
            ReducePolicy::KeepDeepest => self.scheme.is_strict_descendant(existing, candidate),
            ReducePolicy::KeepAncestor => self.scheme.is_strict_descendant(candidate, existing),
        }
    }

    /// Whether an inserted `candidate` evicts an existing match
    fn supersedes(&self, candidate: &str, existing: &str) -> bool {
        self.blocks(candidate, existing)
    }

    /// Fold `candidate` into `result`, keeping the set an antichain.
    ///
    /// A candidate whose identifier is already present merges its nodes into
    /// the existing match. Otherwise the policy decides which end of an
    /// ancestor chain survives: the match already in the set wins any
    /// conflict, and matches the candidate supersedes are evicted.
    pub fn reduce(&self, result: &mut MatchSet, candidate: IndexMatch) {
        if result.contains(&candidate) {
            insert_merging(result, candidate);
            return;
        }

        let id = candidate.id().as_str();
        if let Some(blocker) = result
            .iter()
            .find(|m| self.blocks(m.id().as_str(), id))
        {
            trace!(
                target: "quarry::index",
                candidate = %candidate.id(),
                kept = %blocker.id(),
                "reduce: candidate conflicts with existing match"
            );
            return;
        }

        let before = result.len();
        result.retain(|m| !self.supersedes(id, m.id().as_str()));
        let evicted = before - result.len();
        if evicted > 0 {
            trace!(
                target: "quarry::index",
                candidate = %candidate.id(),
                evicted,
                "reduce: candidate supersedes existing matches"
            );
        }
        result.insert(candidate);
    }
}

impl Intersector for AncestorIntersector {
    fn intersect(&self, left: &MatchSet, right: &MatchSet, carried: &[NodeId]) -> MatchSet {
        let mut result = MatchSet::new();
        if left.is_empty() || right.is_empty() {
            return result;
        }

        let groups = self.group(left, right);
        for group in groups
            .iter()
            .filter(|g| !g.left.is_empty() && !g.right.is_empty())
        {
            for a in &group.left {
                for b in &group.right {
                    let Some(id) = self.resolve(a, b) else {
                        continue;
                    };
                    let nodes = a
                        .nodes()
                        .iter()
                        .chain(b.nodes().iter())
                        .chain(carried.iter())
                        .copied();
                    self.reduce(&mut result, IndexMatch::new(id.clone(), nodes, MatchType::And));
                }
            }
        }

        trace!(
            target: "quarry::index",
            left = left.len(),
            right = right.len(),
            roots = groups.len(),
            result = result.len(),
            "ancestor intersection"
        );
        result
    }

    fn name(&self) -> &'static str {
        "ancestor"
    }
}
