//! Per-target build settings resolution.
//!
//! Total over all target kinds: a rule that does not apply simply leaves
//! its key absent. Settings are pure functions of the target's kind, its
//! package's position in the graph, and the module map resolution, so two
//! runs over one snapshot produce identical maps.

use std::path::{Path, PathBuf};

use crate::core::target::MODULE_MAP_NAME;
use crate::generator::targets::{MappedTarget, ModuleMap};
use crate::util::fs::relative_path;
use crate::xcode::{settings_keys, BuildSettingsTable};

/// Runtime search path for products linking the standard dynamic runtime.
pub const TOOLCHAIN_RUNPATH: &str = "$(TOOLCHAIN_DIR)/usr/lib/swift/macosx";

/// Runtime search path for test bundles, which load frameworks from their
/// own embedded Frameworks directory.
pub const TEST_BUNDLE_RUNPATH: &str = "@loader_path/../Frameworks";

/// Framework search path that lets test bundles find the test runtime.
pub const TEST_FRAMEWORKS_SEARCH_PATH: &str = "$(PLATFORM_DIR)/Developer/Library/Frameworks";

/// Directory under the project wrapper that holds synthesized module maps.
pub const GENERATED_MODULE_MAP_DIR: &str = "GeneratedModuleMap";

/// Resolve the settings table for one mapped target.
///
/// `project_path` is the `.xcodeproj` directory; file paths in settings are
/// expressed relative to its parent (the directory builds run from).
pub fn resolve_settings(mapped: &MappedTarget, project_path: &Path) -> BuildSettingsTable {
    let mut table = BuildSettingsTable::default();
    let common = &mut table.common;

    common.set(settings_keys::PRODUCT_NAME, "$(TARGET_NAME)");

    match &mapped.module_map {
        ModuleMap::Explicit(path) => {
            common.set(
                settings_keys::MODULEMAP_FILE,
                source_relative(project_path, path),
            );
        }
        ModuleMap::Generated => {
            let synthesized = generated_module_map_path(project_path, &mapped.target.name);
            common.set(
                settings_keys::MODULEMAP_FILE,
                source_relative(project_path, &synthesized),
            );
        }
        ModuleMap::None => {}
    }

    if mapped.kind.is_test() {
        common.set(
            settings_keys::LD_RUNPATH_SEARCH_PATHS,
            vec![TEST_BUNDLE_RUNPATH.to_string()],
        );
        common.set(
            settings_keys::FRAMEWORK_SEARCH_PATHS,
            vec![TEST_FRAMEWORKS_SEARCH_PATH.to_string()],
        );
    } else if mapped.in_root_package && mapped.kind.uses_standard_runtime() {
        common.set(
            settings_keys::LD_RUNPATH_SEARCH_PATHS,
            vec![TOOLCHAIN_RUNPATH.to_string()],
        );
    }

    table
}

/// Where a synthesized module map for `target` lives on disk.
pub fn generated_module_map_path(project_path: &Path, target: &str) -> PathBuf {
    project_path
        .join(GENERATED_MODULE_MAP_DIR)
        .join(target)
        .join(MODULE_MAP_NAME)
}

/// Express `path` relative to the directory the project wrapper sits in.
fn source_relative(project_path: &Path, path: &Path) -> String {
    let base = project_path.parent().unwrap_or(project_path);
    relative_path(base, path).to_string_lossy().into_owned()
}
