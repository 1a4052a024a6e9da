//! Index matches
//!
//! An `IndexMatch` pairs a record identifier with the expression nodes that
//! produced evidence for it. Identity is the identifier alone: two matches
//! for the same record are the same match, and combining them merges their
//! node sets.

use quarry_core::RecordId;
use quarry_expr::NodeId;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

/// How the evidence behind a match was combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchType {
    /// Every contributing node must hold
    And,
    /// Any contributing node suffices
    #[default]
    Or,
}

/// A record identifier plus the nodes it satisfied
#[derive(Debug, Clone)]
pub struct IndexMatch {
    id: RecordId,
    nodes: BTreeSet<NodeId>,
    match_type: MatchType,
}

/// Set of matches, unique and ordered by identifier
pub type MatchSet = BTreeSet<IndexMatch>;

impl IndexMatch {
    /// Create a match from an identifier, its nodes and a combinator
    pub fn new(
        id: impl Into<RecordId>,
        nodes: impl IntoIterator<Item = NodeId>,
        match_type: MatchType,
    ) -> Self {
        Self {
            id: id.into(),
            nodes: nodes.into_iter().collect(),
            match_type,
        }
    }

    /// Match produced by a single term
    pub fn single(id: impl Into<RecordId>, node: NodeId) -> Self {
        Self::new(id, [node], MatchType::Or)
    }

    /// The record identifier
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Nodes that contributed evidence
    pub fn nodes(&self) -> &BTreeSet<NodeId> {
        &self.nodes
    }

    /// The combinator
    pub fn match_type(&self) -> MatchType {
        self.match_type
    }

    /// Add one contributing node
    pub fn add_node(&mut self, node: NodeId) {
        self.nodes.insert(node);
    }

    /// Fold `other`'s nodes into this match
    pub fn merge(&mut self, other: &IndexMatch) {
        self.nodes.extend(other.nodes.iter().copied());
    }
}

impl PartialEq for IndexMatch {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for IndexMatch {}

impl Hash for IndexMatch {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Ord for IndexMatch {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl PartialOrd for IndexMatch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Insert `m`, merging node sets when its identifier is already present
pub fn insert_merging(set: &mut MatchSet, m: IndexMatch) {
    match set.take(&m) {
        Some(mut existing) => {
            existing.merge(&m);
            set.insert(existing);
        }
        None => {
            set.insert(m);
        }
    }
}

/// OR of two match sets: every identifier from either side, nodes merged
pub fn union_matches(left: &MatchSet, right: &MatchSet) -> MatchSet {
    let mut result = MatchSet::new();
    for m in left.iter().chain(right.iter()) {
        let mut m = m.clone();
        m.match_type = MatchType::Or;
        insert_merging(&mut result, m);
    }
    result
}
