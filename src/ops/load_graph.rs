//! Loading resolved-graph snapshots.
//!
//! The upstream resolver emits the graph as a JSON snapshot: packages with
//! root paths, targets with kinds and dependency names. Source lists may be
//! omitted, in which case the loader enumerates the target's source root
//! through the filesystem collaborator - the one directory walk of the
//! whole pipeline, done before generation starts.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use semver::Version;
use serde::Deserialize;
use tracing::debug;

use crate::core::{Package, PackageGraph, Target, TargetKind};
use crate::util::fs::{self, FileSystem};

/// Source file extensions picked up when a target omits its source list.
const SOURCE_EXTENSIONS: &[&str] = &["swift", "c", "cc", "cpp", "m", "mm", "s"];

#[derive(Debug, Deserialize)]
struct GraphFile {
    /// Name of the root package
    root: String,
    packages: Vec<PackageEntry>,
}

#[derive(Debug, Deserialize)]
struct PackageEntry {
    name: String,
    root: PathBuf,
    #[serde(default)]
    version: Option<Version>,
    #[serde(default)]
    targets: Vec<TargetEntry>,
}

#[derive(Debug, Deserialize)]
struct TargetEntry {
    name: String,
    kind: TargetKind,
    /// Source root; defaults to `Sources/<name>` under the package root,
    /// falling back to the package root itself
    #[serde(default)]
    root: Option<PathBuf>,
    #[serde(default)]
    sources: Vec<PathBuf>,
    #[serde(default)]
    include_dir: Option<PathBuf>,
    #[serde(default)]
    module_map: Option<PathBuf>,
    #[serde(default)]
    dependencies: Vec<String>,
}

/// Load a resolved-graph snapshot from a JSON file on disk.
pub fn load_graph(path: &Path, fs_view: &dyn FileSystem) -> Result<PackageGraph> {
    let text = fs::read_to_string(path)?;
    graph_from_json(&text, fs_view)
        .with_context(|| format!("invalid graph snapshot: {}", path.display()))
}

/// Build a package graph from snapshot JSON.
pub fn graph_from_json(json: &str, fs_view: &dyn FileSystem) -> Result<PackageGraph> {
    let file: GraphFile = serde_json::from_str(json).context("malformed graph snapshot JSON")?;

    let mut packages = Vec::with_capacity(file.packages.len());
    for entry in file.packages {
        let mut package = Package::new(entry.name.as_str(), entry.root.clone());
        if let Some(version) = entry.version {
            package = package.with_version(version);
        }
        let targets: Vec<Target> = entry
            .targets
            .into_iter()
            .map(|t| build_target(t, &entry.root, fs_view))
            .collect();
        packages.push(package.with_targets(targets));
    }

    PackageGraph::new(packages, &file.root)
}

fn build_target(entry: TargetEntry, package_root: &Path, fs_view: &dyn FileSystem) -> Target {
    let root = match entry.root {
        Some(root) if root.is_absolute() => root,
        Some(root) => package_root.join(root),
        None => {
            let conventional = package_root.join("Sources").join(&entry.name);
            if fs_view.is_dir(&conventional) {
                conventional
            } else {
                package_root.to_path_buf()
            }
        }
    };

    let mut target = Target::new(entry.name.as_str(), entry.kind, root.clone());
    target.sources = if entry.sources.is_empty() {
        discover_sources(&root, entry.include_dir.as_deref(), fs_view)
    } else {
        entry.sources
    };
    target.include_dir = entry.include_dir;
    target.module_map = entry.module_map;
    target.dependencies = entry
        .dependencies
        .into_iter()
        .map(|d| d.as_str().into())
        .collect();
    target
}

/// Enumerate a target's sources from its root directory.
fn discover_sources(
    root: &Path,
    include_dir: Option<&Path>,
    fs_view: &dyn FileSystem,
) -> Vec<PathBuf> {
    let include_dir = include_dir.map(|d| {
        if d.is_absolute() {
            d.to_path_buf()
        } else {
            root.join(d)
        }
    });

    let sources: Vec<PathBuf> = fs_view
        .walk(root)
        .into_iter()
        .filter(|f| {
            f.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| SOURCE_EXTENSIONS.contains(&e))
        })
        .filter(|f| include_dir.as_deref().map_or(true, |d| !f.starts_with(d)))
        .collect();

    debug!("discovered {} sources under {}", sources.len(), root.display());
    sources
}
