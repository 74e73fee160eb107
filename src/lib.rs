//! Drydock - Xcode project generation from resolved package graphs
//!
//! This crate provides the core library functionality for Drydock,
//! including the package-graph input model, the project generator, and
//! pbxproj serialization.

pub mod core;
pub mod generator;
pub mod ops;
pub mod util;
pub mod xcode;

/// Test utilities and mocks for Drydock unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides mock package graphs and in-memory
/// filesystem fixtures.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    graph::PackageGraph,
    package::Package,
    target::{Target, TargetKind},
};

pub use generator::{generate, GenerateError, GenerationOptions};
pub use util::fs::{FileSystem, InMemoryFileSystem, RealFileSystem};
