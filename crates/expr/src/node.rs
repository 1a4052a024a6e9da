//! Expression node kinds
//!
//! Nodes are a single tagged enum; traversal code matches on the tag instead
//! of dispatching through one method per node type.

use std::fmt;

/// Index of a node inside an [`ExprArena`](crate::ExprArena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Position of the node in its arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Numeric literal value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Integer literal
    Int(i64),
    /// Floating point literal
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{}", v),
            Number::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Number::Int(v)
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Number::Float(v)
    }
}

/// Kind of an expression node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Top-level script wrapper
    Script,
    /// Conjunction
    And,
    /// Disjunction
    Or,
    /// Negation
    Not,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `=~`
    RegexMatch,
    /// `!~`
    RegexNotMatch,
    /// Reference wrapper around an identifier or literal
    Reference,
    /// Parenthesized sub-expression
    ReferenceExpression,
    /// Field name
    Identifier(String),
    /// String literal
    StringLiteral(String),
    /// Numeric literal
    NumberLiteral(Number),
    /// Function call `namespace:name(args)`
    Function {
        /// Function namespace
        namespace: String,
        /// Function name
        name: String,
    },
}

impl NodeKind {
    /// Infix operator for binary comparison nodes
    pub fn operator(&self) -> Option<&'static str> {
        match self {
            NodeKind::Eq => Some("=="),
            NodeKind::Ne => Some("!="),
            NodeKind::Lt => Some("<"),
            NodeKind::Le => Some("<="),
            NodeKind::Gt => Some(">"),
            NodeKind::Ge => Some(">="),
            NodeKind::RegexMatch => Some("=~"),
            NodeKind::RegexNotMatch => Some("!~"),
            _ => None,
        }
    }

    /// True for `And` and `Or`
    pub fn is_junction(&self) -> bool {
        matches!(self, NodeKind::And | NodeKind::Or)
    }

    /// Label used by the tree printer
    pub fn label(&self) -> String {
        match self {
            NodeKind::Script => "JexlScript".to_string(),
            NodeKind::And => "AndNode".to_string(),
            NodeKind::Or => "OrNode".to_string(),
            NodeKind::Not => "NotNode".to_string(),
            NodeKind::Eq => "EQNode".to_string(),
            NodeKind::Ne => "NENode".to_string(),
            NodeKind::Lt => "LTNode".to_string(),
            NodeKind::Le => "LENode".to_string(),
            NodeKind::Gt => "GTNode".to_string(),
            NodeKind::Ge => "GENode".to_string(),
            NodeKind::RegexMatch => "ERNode".to_string(),
            NodeKind::RegexNotMatch => "NRNode".to_string(),
            NodeKind::Reference => "Reference".to_string(),
            NodeKind::ReferenceExpression => "ReferenceExpression".to_string(),
            NodeKind::Identifier(name) => format!("Identifier:{}", name),
            NodeKind::StringLiteral(value) => format!("StringLiteral:{}", value),
            NodeKind::NumberLiteral(value) => format!("NumberLiteral:{}", value),
            NodeKind::Function { namespace, name } => format!("Function:{}:{}", namespace, name),
        }
    }
}
