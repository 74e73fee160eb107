//! Core data structures for Drydock.
//!
//! This module contains the package-graph input model handed over by the
//! upstream dependency resolver:
//! - Packages and their build targets
//! - Target kinds and their product semantics
//! - The resolved, acyclic dependency graph

pub mod graph;
pub mod package;
pub mod target;

pub use graph::PackageGraph;
pub use package::{Package, MANIFEST_NAME};
pub use target::{Target, TargetKind};
