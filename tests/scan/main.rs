//! Scan Test Suite
//!
//! Batched sessions, field-skipping advancement and the trailing
//! statistics entry across teardown/rebuild and host yields.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test scan
//! ```

mod test_utils;

mod advancer_tests;
mod trailing_entry_tests;
