//! Intersection strategies
//!
//! An [`Intersector`] resolves the AND of two independently evaluated
//! sub-expressions. `carried` holds nodes delayed by earlier stages; every
//! surviving match must carry them.
//!
//! - [`EqualityIntersector`]: combine only identical identifiers
//! - [`AncestorIntersector`]: combine identifiers related through the
//!   record hierarchy

mod ancestor;
mod equality;

pub use ancestor::AncestorIntersector;
pub use equality::EqualityIntersector;

use crate::index_match::MatchSet;
use quarry_core::{QueryConfig, Result};
use quarry_expr::NodeId;

/// Strategy for combining two match sets under AND
///
/// Implementations are pure functions of their inputs and may be shared
/// across threads.
pub trait Intersector: Send + Sync {
    /// AND of `left` and `right`; neither input is modified
    fn intersect(&self, left: &MatchSet, right: &MatchSet, carried: &[NodeId]) -> MatchSet;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Build the intersector a query should use.
///
/// Hierarchical records get the ancestor-aware strategy with the configured
/// separator and reduce policy; flat records get exact equality.
pub fn intersector_for(config: &QueryConfig, hierarchical: bool) -> Result<Box<dyn Intersector>> {
    if hierarchical {
        Ok(Box::new(AncestorIntersector::with_policy(
            config.uid_scheme()?,
            config.reduce_policy()?,
        )))
    } else {
        Ok(Box::new(EqualityIntersector))
    }
}
