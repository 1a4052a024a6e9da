//! Expression trees for Quarry
//!
//! Boolean query expressions are stored in an [`ExprArena`] and addressed by
//! [`NodeId`]. Index matches carry `NodeId`s to record which expression nodes
//! produced evidence for a record.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod arena;
pub mod node;
pub mod printer;

pub use arena::{ExprArena, Node};
pub use node::{NodeId, NodeKind, Number};
