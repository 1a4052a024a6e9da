//! Metadata Test Suite
//!
//! File-backed type metadata, the shared cache and its refresher.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test metadata
//! ```

mod cache_tests;
