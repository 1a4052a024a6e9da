//! Intersection Test Suite
//!
//! Hierarchical and flat intersection over index matches.
//!
//! ## Test Tiers
//!
//! - **Tier 1: Scenarios**: worked examples of parent/child, cousin and
//!   unrelated-root intersections
//! - **Tier 2: Invariants**: property tests for antichain results, AND
//!   soundness and idempotent re-reduction
//! - **Tier 3: Evaluation**: whole expressions against a term index
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test intersection
//! cargo test --test intersection invariant
//! ```

mod test_utils;

// Tier 1
mod scenario_tests;

// Tier 2
mod invariant_tests;

// Tier 3
mod evaluation_tests;
