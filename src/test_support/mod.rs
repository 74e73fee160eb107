//! Test utilities and fixtures for Drydock unit tests.
//!
//! This module provides pre-built package graphs and filesystem snapshots
//! for the scenarios the generator tests exercise.
//!
//! # Example
//!
//! ```rust,ignore
//! use drydock::test_support::fixtures;
//!
//! #[test]
//! fn test_example() {
//!     let graph = fixtures::two_package_graph();
//!     let fs = fixtures::scenario_filesystem();
//!     // Run the generator against the fixture...
//! }
//! ```

pub mod fixtures;

pub use fixtures::*;
