//! High-level operations.
//!
//! This module contains the implementation of Drydock commands.

pub mod generate;
pub mod load_graph;

pub use generate::{generate_project, load_options, GeneratedProject};
pub use load_graph::{graph_from_json, load_graph};
