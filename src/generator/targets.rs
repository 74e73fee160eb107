//! Target mapping: package targets onto project targets.
//!
//! Each package target yields zero or one project targets plus its file
//! references. Non-buildable targets (system-library shims) contribute
//! references only; dependency edges pass through them in the linker.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::target::MODULE_MAP_NAME;
use crate::core::{PackageGraph, Target as PackageTarget, TargetKind};
use crate::generator::errors::GenerateError;
use crate::generator::refs::{build_tree, PathSpec};
use crate::util::fs::FileSystem;
use crate::xcode::{IdAllocator, ObjectId, ProductType, RefArena, Target};

/// How a C-family target's module map is sourced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleMap {
    /// The target declares one, or its include directory contains one
    Explicit(PathBuf),
    /// Synthesized under the project's GeneratedModuleMap directory
    Generated,
    /// Not applicable to this target kind
    None,
}

/// A package target mapped onto a project target, with the context the
/// linker and settings passes need.
#[derive(Debug)]
pub struct MappedTarget {
    pub target: Target,
    pub kind: TargetKind,
    pub module_map: ModuleMap,
    pub in_root_package: bool,
}

/// Map every package target, building the per-target reference groups.
///
/// Groups named `Sources` and `Tests` are created lazily under the main
/// group, one subgroup per target beneath them. Fails on the first
/// duplicate target name or reference outside every package root.
pub fn map_targets(
    ids: &mut IdAllocator,
    refs: &mut RefArena,
    main_group: ObjectId,
    graph: &PackageGraph,
    fs: &dyn FileSystem,
) -> Result<Vec<MappedTarget>, GenerateError> {
    let package_roots: Vec<&Path> = graph.packages().iter().map(|p| p.root()).collect();
    let mut seen = HashSet::new();
    let mut sources_group = None;
    let mut tests_group = None;
    let mut mapped = Vec::new();

    for package in graph.packages() {
        let in_root_package = graph.is_root(package);
        for target in package.targets() {
            if !seen.insert(target.name) {
                return Err(GenerateError::DuplicateTargetName {
                    name: target.name.to_string(),
                });
            }
            check_rooted(target, &package_roots)?;

            let parent = if target.kind.is_test() {
                *tests_group
                    .get_or_insert_with(|| refs.add_group(ids, Some(main_group), Some("Tests"), ""))
            } else {
                *sources_group.get_or_insert_with(|| {
                    refs.add_group(ids, Some(main_group), Some("Sources"), "")
                })
            };

            let group = refs.add_group(ids, Some(parent), Some(target.name.as_str()), &target.root);

            let mut specs: Vec<PathSpec> =
                target.source_paths().into_iter().map(PathSpec::file).collect();
            if let Some(include_dir) = target.include_dir_path() {
                // Attached beneath the target's own group, never hoisted to
                // the project root.
                specs.push(PathSpec::directory(include_dir));
            }
            let file_refs = build_tree(refs, ids, group, &target.root, &specs);

            let Some(product_type) = product_type_for(target.kind) else {
                debug!("target {} has no product, references only", target.name);
                continue;
            };

            let mut project_target =
                Target::new(ids, target.name, Some(product_type), target.name.as_str());
            for file_ref in file_refs {
                project_target.add_source_file(ids, file_ref);
            }

            mapped.push(MappedTarget {
                target: project_target,
                kind: target.kind,
                module_map: module_map_for(target, fs),
                in_root_package,
            });
        }
    }

    Ok(mapped)
}

/// Product type for a target kind; `None` means no project target at all.
fn product_type_for(kind: TargetKind) -> Option<ProductType> {
    match kind {
        TargetKind::Library | TargetKind::CFamily => Some(ProductType::Framework),
        TargetKind::Executable => Some(ProductType::Executable),
        TargetKind::Test => Some(ProductType::UnitTest),
        TargetKind::SystemLibrary => None,
    }
}

/// Resolve how a target's module map is sourced.
///
/// An explicit declaration wins; otherwise the conventional
/// `include/module.modulemap` location is probed, and failing that the map
/// is synthesized at generation time.
pub(crate) fn module_map_for(target: &PackageTarget, fs: &dyn FileSystem) -> ModuleMap {
    if !target.kind.is_c_family() {
        return ModuleMap::None;
    }
    if let Some(declared) = target.module_map_path() {
        return ModuleMap::Explicit(declared);
    }
    if let Some(include_dir) = target.include_dir_path() {
        let conventional = include_dir.join(MODULE_MAP_NAME);
        if fs.is_file(&conventional) {
            return ModuleMap::Explicit(conventional);
        }
    }
    ModuleMap::Generated
}

/// Reject targets whose paths fall outside every known package root.
fn check_rooted(target: &PackageTarget, roots: &[&Path]) -> Result<(), GenerateError> {
    let rooted = |path: &Path| !path.is_absolute() || roots.iter().any(|r| path.starts_with(r));

    if !rooted(&target.root) {
        return Err(GenerateError::DanglingReference {
            target: target.name.to_string(),
            path: target.root.clone(),
        });
    }
    for source in target.source_paths() {
        if !rooted(&source) {
            return Err(GenerateError::DanglingReference {
                target: target.name.to_string(),
                path: source,
            });
        }
    }
    Ok(())
}
