//! Node arena
//!
//! All nodes of an expression tree live in one `ExprArena` and refer to each
//! other by [`NodeId`]. Parent links are plain indices, so node surgery
//! (replacing, swapping, promoting) never creates ownership cycles.
//!
//! Nodes are never freed; a node detached by surgery simply has no parent.

use crate::node::{NodeId, NodeKind, Number};
use quarry_core::{Error, Result};
use smallvec::SmallVec;

/// A node plus its structural links
#[derive(Debug, Clone)]
pub struct Node {
    /// What the node is
    pub kind: NodeKind,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 2]>,
}

/// Owner of every node of one or more expression trees
#[derive(Debug, Clone, Default)]
pub struct ExprArena {
    nodes: Vec<Node>,
}

impl ExprArena {
    /// Create an empty arena
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Number of nodes ever allocated
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no node was allocated
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a detached node with no children
    pub fn add(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            parent: None,
            children: SmallVec::new(),
        });
        id
    }

    /// Allocate a node and attach `children` to it
    pub fn add_with_children(&mut self, kind: NodeKind, children: &[NodeId]) -> NodeId {
        let id = self.add(kind);
        self.set_children(id, children);
        id
    }

    /// Borrow a node
    ///
    /// Panics if `id` was not allocated by this arena.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Kind of a node
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    /// Parent of a node, `None` for roots and detached nodes
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Children of a node; empty for leaves
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Topmost ancestor of `id`
    pub fn root(&self, mut id: NodeId) -> NodeId {
        while let Some(parent) = self.parent(id) {
            id = parent;
        }
        id
    }

    /// Replace the children of `node` and point each child's parent at it
    pub fn set_children(&mut self, node: NodeId, children: &[NodeId]) -> NodeId {
        self.nodes[node.index()].children = SmallVec::from_slice(children);
        for &child in children {
            self.set_parent(child, node);
        }
        node
    }

    /// Point `child`'s parent link at `parent` without touching `parent`'s children
    pub fn set_parent(&mut self, child: NodeId, parent: NodeId) -> NodeId {
        self.nodes[child.index()].parent = Some(parent);
        child
    }

    fn position(&self, parent: NodeId, child: NodeId) -> Result<usize> {
        self.children(parent)
            .iter()
            .position(|&c| c == child)
            .ok_or_else(|| {
                Error::invalid_expression(format!("{} is not a child of {}", child, parent))
            })
    }

    /// Put `b` in `a`'s slot under `parent`; `a` keeps its stale parent link
    pub fn replace_child(&mut self, parent: NodeId, a: NodeId, b: NodeId) -> Result<NodeId> {
        let pos = self.position(parent, a)?;
        self.nodes[parent.index()].children[pos] = b;
        self.set_parent(b, parent);
        Ok(parent)
    }

    /// Put `b` in `a`'s slot under `parent` and detach `a`
    pub fn swap(&mut self, parent: NodeId, a: NodeId, b: NodeId) -> Result<NodeId> {
        self.replace_child(parent, a, b)?;
        self.nodes[a.index()].parent = None;
        Ok(parent)
    }

    /// Replace `parent` with `child` in the grandparent.
    ///
    /// When `parent` is a root, `child` becomes a detached root and is
    /// returned; otherwise the grandparent is returned.
    pub fn promote(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId> {
        match self.parent(parent) {
            None => {
                self.nodes[child.index()].parent = None;
                Ok(child)
            }
            Some(grandparent) => self.swap(grandparent, parent, child),
        }
    }

    /// The sibling of `child` under a binary `parent`
    pub fn other_child(&self, parent: NodeId, child: NodeId) -> Result<NodeId> {
        let children = self.children(parent);
        if children.len() != 2 {
            return Err(Error::invalid_expression(format!(
                "Expression tree must be binary, but received node with {} children",
                children.len()
            )));
        }
        children
            .iter()
            .copied()
            .find(|&c| c != child)
            .ok_or_else(|| Error::invalid_expression(format!("{} has no other child", parent)))
    }

    /// Wrap `node` in a `Reference`
    pub fn make_ref(&mut self, node: NodeId) -> NodeId {
        self.add_with_children(NodeKind::Reference, &[node])
    }

    /// Wrap `node` in a parenthesized `ReferenceExpression`
    pub fn wrap(&mut self, node: NodeId) -> NodeId {
        self.add_with_children(NodeKind::ReferenceExpression, &[node])
    }

    /// `!(node)`
    pub fn negate(&mut self, node: NodeId) -> NodeId {
        let wrapped = self.wrap(node);
        self.add_with_children(NodeKind::Not, &[wrapped])
    }

    /// Field name leaf
    pub fn identifier(&mut self, name: impl Into<String>) -> NodeId {
        self.add(NodeKind::Identifier(name.into()))
    }

    /// String literal leaf
    pub fn string_literal(&mut self, value: impl Into<String>) -> NodeId {
        self.add(NodeKind::StringLiteral(value.into()))
    }

    /// Numeric literal leaf
    pub fn number_literal(&mut self, value: impl Into<Number>) -> NodeId {
        self.add(NodeKind::NumberLiteral(value.into()))
    }

    /// Overwrite the value of a string literal
    pub fn set_string_literal(&mut self, node: NodeId, value: impl Into<String>) -> Result<()> {
        match &mut self.nodes[node.index()].kind {
            NodeKind::StringLiteral(current) => {
                *current = value.into();
                Ok(())
            }
            other => Err(Error::invalid_expression(format!(
                "{} is {}, not a string literal",
                node,
                other.label()
            ))),
        }
    }

    /// Overwrite the value of a numeric literal
    pub fn set_number_literal(&mut self, node: NodeId, value: impl Into<Number>) -> Result<()> {
        match &mut self.nodes[node.index()].kind {
            NodeKind::NumberLiteral(current) => {
                *current = value.into();
                Ok(())
            }
            other => Err(Error::invalid_expression(format!(
                "{} is {}, not a number literal",
                node,
                other.label()
            ))),
        }
    }

    /// `field == 'value'`
    pub fn eq_term(&mut self, field: impl Into<String>, value: impl Into<String>) -> NodeId {
        self.comparison(NodeKind::Eq, field, value)
    }

    /// `field <op> 'value'` for any binary comparison kind
    pub fn comparison(
        &mut self,
        kind: NodeKind,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> NodeId {
        let field = self.identifier(field);
        let value = self.string_literal(value);
        self.add_with_children(kind, &[field, value])
    }

    /// Conjunction of `children`
    pub fn and(&mut self, children: &[NodeId]) -> NodeId {
        self.add_with_children(NodeKind::And, children)
    }

    /// Disjunction of `children`
    pub fn or(&mut self, children: &[NodeId]) -> NodeId {
        self.add_with_children(NodeKind::Or, children)
    }

    /// Script wrapper around a query root
    pub fn script(&mut self, body: NodeId) -> NodeId {
        self.add_with_children(NodeKind::Script, &[body])
    }

    /// Strip `Reference`/`ReferenceExpression` wrappers down to the wrapped node
    pub fn dereference(&self, mut id: NodeId) -> NodeId {
        while matches!(
            self.kind(id),
            NodeKind::Reference | NodeKind::ReferenceExpression
        ) && self.children(id).len() == 1
        {
            id = self.children(id)[0];
        }
        id
    }

    /// Field and literal value of a binary comparison, in either operand order
    pub fn field_and_value(&self, comparison: NodeId) -> Option<(&str, String)> {
        let children = self.children(comparison);
        if children.len() != 2 || self.kind(comparison).operator().is_none() {
            return None;
        }
        let left = self.kind(self.dereference(children[0]));
        let right = self.kind(self.dereference(children[1]));
        match (left, right) {
            (NodeKind::Identifier(field), literal) | (literal, NodeKind::Identifier(field)) => {
                match literal {
                    NodeKind::StringLiteral(value) => Some((field.as_str(), value.clone())),
                    NodeKind::NumberLiteral(value) => Some((field.as_str(), value.to_string())),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Depth-first pre-order walk from `root`, passing each node and its depth
    pub fn walk<F: FnMut(NodeId, usize)>(&self, root: NodeId, mut visit: F) {
        self.walk_inner(root, 0, &mut visit);
    }

    fn walk_inner<F: FnMut(NodeId, usize)>(&self, id: NodeId, depth: usize, visit: &mut F) {
        visit(id, depth);
        for &child in self.children(id) {
            self.walk_inner(child, depth + 1, visit);
        }
    }
}
