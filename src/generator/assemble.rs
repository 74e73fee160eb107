//! Final project composition.
//!
//! Purely structural: synthesizes the Products group, wires product
//! references into dependents' link phases, attaches extra directories,
//! and hands back the finished Project. No graph semantics live here.

use std::collections::HashMap;
use std::path::Path;

use crate::core::PackageGraph;
use crate::generator::targets::MappedTarget;
use crate::generator::GenerationOptions;
use crate::util::fs::FileSystem;
use crate::xcode::{IdAllocator, ObjectId, Project, RefArena};

/// Compose the final project from the outputs of the earlier passes.
#[allow(clippy::too_many_arguments)]
pub fn assemble(
    ids: &mut IdAllocator,
    mut refs: RefArena,
    main_group: ObjectId,
    mapped: Vec<MappedTarget>,
    graph: &PackageGraph,
    project_id: ObjectId,
    project_path: &Path,
    options: &GenerationOptions,
    fs: &dyn FileSystem,
) -> Project {
    for dir in &options.extra_dirs {
        if fs.is_dir(dir) {
            refs.add_file(ids, main_group, None, dir);
        }
    }

    let products_group = refs.add_group(ids, Some(main_group), Some("Products"), "");

    let mut targets: Vec<_> = mapped.into_iter().map(|m| m.target).collect();
    let mut product_refs: HashMap<ObjectId, ObjectId> = HashMap::new();
    for target in &mut targets {
        if let Some(product_type) = target.product_type {
            let reference_name = product_type.product_reference_name(&target.product_name);
            let product_ref = refs.add_file(ids, products_group, None, &reference_name);
            target.product_reference = Some(product_ref);
            product_refs.insert(target.id, product_ref);
        }
    }

    // Dependents link the products of their dependencies.
    for i in 0..targets.len() {
        let linked: Vec<ObjectId> = targets[i]
            .dependencies
            .iter()
            .filter_map(|d| product_refs.get(&d.target).copied())
            .collect();
        for product_ref in linked {
            targets[i].add_framework_file(ids, product_ref);
        }
    }

    let root_package = graph.root_package();
    let project_dir = root_package
        .root()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Project {
        id: project_id,
        name: root_package.name().to_string(),
        path: project_path.to_path_buf(),
        project_dir,
        main_group,
        refs,
        targets,
    }
}
