//! Implementation of `drydock generate`.
//!
//! Runs the generator over a loaded graph and writes the `.xcodeproj`
//! wrapper: the serialized project file plus any synthesized module maps
//! the settings point at.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::core::PackageGraph;
use crate::generator::settings::generated_module_map_path;
use crate::generator::targets::{module_map_for, ModuleMap};
use crate::generator::{self, GenerationOptions};
use crate::util::fs::{self, FileSystem};
use crate::xcode::{pbxproj, Project};

/// File name of the optional generation options file.
pub const OPTIONS_FILE: &str = "Drydock.toml";

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct OptionsFile {
    generation: GenerationOptions,
}

/// A generated project and where it was written.
#[derive(Debug)]
pub struct GeneratedProject {
    /// The `.xcodeproj` directory
    pub path: PathBuf,

    /// The assembled model, for inspection
    pub project: Project,
}

/// Load generation options from `Drydock.toml` next to the graph snapshot,
/// when present.
pub fn load_options(dir: &Path) -> Result<GenerationOptions> {
    let path = dir.join(OPTIONS_FILE);
    if !path.is_file() {
        return Ok(GenerationOptions::default());
    }
    let text = fs::read_to_string(&path)?;
    let file: OptionsFile = toml::from_str(&text)
        .with_context(|| format!("invalid options file: {}", path.display()))?;
    Ok(file.generation)
}

/// Generate the project for `graph` and write it under `output_dir`.
pub fn generate_project(
    graph: &PackageGraph,
    output_dir: &Path,
    options: &GenerationOptions,
    fs_view: &dyn FileSystem,
) -> Result<GeneratedProject> {
    let project_path = output_dir.join(format!("{}.xcodeproj", graph.root_package().name()));

    let project = generator::generate(&project_path, graph, options, fs_view)?;

    fs::write_string(
        &project_path.join(pbxproj::PBXPROJ_NAME),
        &pbxproj::serialize(&project),
    )?;
    write_generated_module_maps(graph, &project_path, fs_view)?;

    info!("wrote {}", project_path.display());
    Ok(GeneratedProject {
        path: project_path,
        project,
    })
}

/// Synthesize module maps for C-family targets that declare none.
///
/// The settings resolver already pointed `MODULEMAP_FILE` at the
/// GeneratedModuleMap location; this writes the files those settings name.
fn write_generated_module_maps(
    graph: &PackageGraph,
    project_path: &Path,
    fs_view: &dyn FileSystem,
) -> Result<()> {
    for package in graph.packages() {
        for target in package.targets() {
            if module_map_for(target, fs_view) != ModuleMap::Generated {
                continue;
            }
            let umbrella = target
                .include_dir_path()
                .unwrap_or_else(|| target.root.clone());
            let contents = format!(
                "module {} {{\n    umbrella \"{}\"\n    export *\n}}\n",
                target.name,
                umbrella.display()
            );
            let path = generated_module_map_path(project_path, &target.name);
            fs::write_string(&path, &contents)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures;
    use tempfile::TempDir;

    #[test]
    fn test_generate_writes_project_and_module_maps() {
        let tmp = TempDir::new().unwrap();
        let graph = fixtures::two_package_graph();
        let fs_view = fixtures::scenario_filesystem();

        let generated = generate_project(
            &graph,
            tmp.path(),
            &GenerationOptions::default(),
            &fs_view,
        )
        .unwrap();

        assert_eq!(generated.path, tmp.path().join("Bar.xcodeproj"));
        let pbxproj_path = generated.path.join("project.pbxproj");
        assert!(pbxproj_path.is_file());
        let text = std::fs::read_to_string(pbxproj_path).unwrap();
        assert!(text.contains("isa = PBXProject;"));

        // Sea has no explicit module map, so one is synthesized; Sea2
        // declares its own and gets none.
        let sea_map = generated
            .path
            .join("GeneratedModuleMap/Sea/module.modulemap");
        assert!(sea_map.is_file());
        let contents = std::fs::read_to_string(sea_map).unwrap();
        assert!(contents.contains("module Sea {"));
        assert!(contents.contains("export *"));
        assert!(!generated
            .path
            .join("GeneratedModuleMap/Sea2/module.modulemap")
            .exists());
    }

    #[test]
    fn test_load_options_defaults_when_absent() {
        let tmp = TempDir::new().unwrap();
        let options = load_options(tmp.path()).unwrap();
        assert!(options.extra_dirs.is_empty());
    }

    #[test]
    fn test_load_options_reads_toml() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(OPTIONS_FILE),
            "[generation]\nextra_dirs = [\"/Bar/Extras\"]\n",
        )
        .unwrap();

        let options = load_options(tmp.path()).unwrap();
        assert_eq!(options.extra_dirs, vec![PathBuf::from("/Bar/Extras")]);
    }

    #[test]
    fn test_generation_failure_writes_nothing() {
        use crate::core::{Package, Target};
        use crate::util::fs::InMemoryFileSystem;

        let tmp = TempDir::new().unwrap();
        let pkg = Package::new("A", "/A").with_targets([Target::library("A", "/A")
            .with_sources(["a.swift"])
            .with_dependencies(["Ghost"])]);
        let graph = PackageGraph::new(vec![pkg], "A").unwrap();

        let result = generate_project(
            &graph,
            tmp.path(),
            &GenerationOptions::default(),
            &InMemoryFileSystem::default(),
        );
        assert!(result.is_err());
        assert!(!tmp.path().join("A.xcodeproj").exists());
    }
}
