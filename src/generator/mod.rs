//! The graph-to-project generator.
//!
//! A single-threaded, synchronous pipeline over an immutable graph
//! snapshot: map targets, link dependencies, resolve settings, assemble.
//! Filesystem contact is limited to the probes the mapper makes through
//! the [`FileSystem`] collaborator; everything else is a deterministic
//! function of the inputs, so a failed run leaves nothing behind and a
//! retry is a plain recompute.

pub mod assemble;
pub mod errors;
pub mod links;
pub mod refs;
pub mod settings;
pub mod targets;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::core::PackageGraph;
use crate::util::fs::FileSystem;
use crate::xcode::{IdAllocator, Project, RefArena};

pub use errors::GenerateError;

/// Options for one generation run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Auxiliary directories included verbatim as folder references at the
    /// top of the project.
    pub extra_dirs: Vec<PathBuf>,
}

/// Generate the project model for a resolved package graph.
///
/// `project_path` is the `.xcodeproj` directory the project is generated
/// for; settings paths are expressed relative to its parent. The returned
/// project is complete and immutable; serialization is the caller's move.
pub fn generate(
    project_path: &Path,
    graph: &PackageGraph,
    options: &GenerationOptions,
    fs: &dyn FileSystem,
) -> Result<Project, GenerateError> {
    debug_assert!(
        graph.is_acyclic(),
        "upstream resolver must hand over an acyclic graph"
    );
    info!(
        "generating {} for {} packages, {} targets",
        project_path.display(),
        graph.packages().len(),
        graph.target_count()
    );

    let mut ids = IdAllocator::new();
    let project_id = ids.next_id();
    let mut refs = RefArena::new();
    let main_group = refs.add_group(&mut ids, None, None, "");

    // The root package's manifest sits at the top of the tree.
    refs.add_file(
        &mut ids,
        main_group,
        None,
        graph.root_package().manifest_path(),
    );

    let mut mapped = targets::map_targets(&mut ids, &mut refs, main_group, graph, fs)?;
    debug!("mapped {} targets", mapped.len());

    links::link_dependencies(&mut ids, graph, &mut mapped)?;

    for m in &mut mapped {
        let table = settings::resolve_settings(m, project_path);
        m.target.build_settings = table;
    }

    Ok(assemble::assemble(
        &mut ids,
        refs,
        main_group,
        mapped,
        graph,
        project_id,
        project_path,
        options,
        fs,
    ))
}
