//! Passive project model: references, targets, build settings.
//!
//! References live in an arena keyed by [`ObjectId`]; groups hold child
//! identifiers rather than owning children directly, so shared structure
//! never creates ownership cycles. Targets reference each other the same
//! way. The model carries no behavior beyond lookups; the generator fills
//! it in and the pbxproj writer reads it back out.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::util::InternedString;
use crate::xcode::id::{IdAllocator, ObjectId};

/// The category of artifact a target produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductType {
    /// Framework (module and C-family libraries)
    Framework,
    /// Unit-test bundle
    UnitTest,
    /// Command-line executable
    Executable,
}

impl ProductType {
    /// Name of the product reference shown in the Products group.
    pub fn product_reference_name(&self, product_name: &str) -> String {
        match self {
            ProductType::Framework => format!("{}.framework", product_name),
            ProductType::UnitTest => format!("{}.xctest", product_name),
            ProductType::Executable => product_name.to_string(),
        }
    }

    /// Product type identifier used in the serialized project.
    pub fn identifier(&self) -> &'static str {
        match self {
            ProductType::Framework => "com.apple.product-type.framework",
            ProductType::UnitTest => "com.apple.product-type.bundle.unit-test",
            ProductType::Executable => "com.apple.product-type.tool",
        }
    }

    /// Explicit file type of the product reference.
    pub fn file_type(&self) -> &'static str {
        match self {
            ProductType::Framework => "wrapper.framework",
            ProductType::UnitTest => "wrapper.cfbundle",
            ProductType::Executable => "compiled.mach-o.executable",
        }
    }
}

/// A file reference.
#[derive(Debug, Clone, Serialize)]
pub struct FileRef {
    pub id: ObjectId,

    /// Explicit display name; when absent the path's basename is shown
    pub name: Option<String>,

    /// Path, absolute or relative to the enclosing group
    pub path: PathBuf,
}

/// A group (directory) of references.
#[derive(Debug, Clone, Serialize)]
pub struct Group {
    pub id: ObjectId,
    pub name: Option<String>,
    pub path: PathBuf,

    /// Children, in insertion order
    pub children: Vec<ObjectId>,
}

/// A node of the project's file hierarchy.
#[derive(Debug, Clone, Serialize)]
pub enum Reference {
    File(FileRef),
    Group(Group),
}

impl Reference {
    /// The node's identifier.
    pub fn id(&self) -> ObjectId {
        match self {
            Reference::File(f) => f.id,
            Reference::Group(g) => g.id,
        }
    }

    /// Resolved display basename: explicit name if present, otherwise the
    /// last path component. A path normalizing to nothing (the root group)
    /// yields an empty basename.
    pub fn basename(&self) -> String {
        let (name, path) = match self {
            Reference::File(f) => (&f.name, &f.path),
            Reference::Group(g) => (&g.name, &g.path),
        };
        if let Some(name) = name {
            return name.clone();
        }
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Arena of reference nodes, addressed by identifier.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RefArena {
    nodes: BTreeMap<ObjectId, Reference>,
}

impl RefArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        RefArena::default()
    }

    /// Add a group; when `parent` is given it must name an existing group.
    pub fn add_group(
        &mut self,
        ids: &mut IdAllocator,
        parent: Option<ObjectId>,
        name: Option<&str>,
        path: impl Into<PathBuf>,
    ) -> ObjectId {
        let id = ids.next_id();
        self.nodes.insert(
            id,
            Reference::Group(Group {
                id,
                name: name.map(String::from),
                path: path.into(),
                children: Vec::new(),
            }),
        );
        if let Some(parent) = parent {
            self.push_child(parent, id);
        }
        id
    }

    /// Add a file reference under an existing group.
    pub fn add_file(
        &mut self,
        ids: &mut IdAllocator,
        parent: ObjectId,
        name: Option<&str>,
        path: impl Into<PathBuf>,
    ) -> ObjectId {
        let id = ids.next_id();
        self.nodes.insert(
            id,
            Reference::File(FileRef {
                id,
                name: name.map(String::from),
                path: path.into(),
            }),
        );
        self.push_child(parent, id);
        id
    }

    fn push_child(&mut self, parent: ObjectId, child: ObjectId) {
        match self.nodes.get_mut(&parent) {
            Some(Reference::Group(group)) => group.children.push(child),
            _ => panic!("reference {} is not a group", parent),
        }
    }

    /// Look up a node.
    pub fn get(&self, id: ObjectId) -> Option<&Reference> {
        self.nodes.get(&id)
    }

    /// Look up a group node.
    pub fn group(&self, id: ObjectId) -> Option<&Group> {
        match self.nodes.get(&id) {
            Some(Reference::Group(g)) => Some(g),
            _ => None,
        }
    }

    /// Find the direct child of `parent` whose resolved basename matches.
    pub fn child_named(&self, parent: ObjectId, basename: &str) -> Option<ObjectId> {
        let group = self.group(parent)?;
        group
            .children
            .iter()
            .copied()
            .find(|&c| self.nodes.get(&c).is_some_and(|r| r.basename() == basename))
    }

    /// All nodes, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = &Reference> {
        self.nodes.values()
    }

    /// Recursive listing of all leaf (file) references below `root`.
    ///
    /// Each entry is the `/`-joined non-empty basenames on the way down, so
    /// the unnamed root group and any other empty-basename node contribute
    /// no segment.
    pub fn leaf_paths(&self, root: ObjectId) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_leaf_paths(root, "", &mut out);
        out
    }

    fn collect_leaf_paths(&self, id: ObjectId, prefix: &str, out: &mut Vec<String>) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        let basename = node.basename();
        let path = match (prefix.is_empty(), basename.is_empty()) {
            (_, true) => prefix.to_string(),
            (true, false) => basename,
            (false, false) => format!("{}/{}", prefix, basename),
        };
        match node {
            Reference::File(_) => {
                if !path.is_empty() {
                    out.push(path);
                }
            }
            Reference::Group(group) => {
                for &child in &group.children {
                    self.collect_leaf_paths(child, &path, out);
                }
            }
        }
    }
}

/// Fixed vocabulary of build-setting keys the generator emits.
pub mod settings_keys {
    pub const FRAMEWORK_SEARCH_PATHS: &str = "FRAMEWORK_SEARCH_PATHS";
    pub const LD_RUNPATH_SEARCH_PATHS: &str = "LD_RUNPATH_SEARCH_PATHS";
    pub const MODULEMAP_FILE: &str = "MODULEMAP_FILE";
    pub const PRODUCT_NAME: &str = "PRODUCT_NAME";
}

/// A build-setting value: one string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    String(String),
    List(Vec<String>),
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        SettingValue::String(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        SettingValue::String(s)
    }
}

impl From<Vec<String>> for SettingValue {
    fn from(v: Vec<String>) -> Self {
        SettingValue::List(v)
    }
}

impl From<&[&str]> for SettingValue {
    fn from(v: &[&str]) -> Self {
        SettingValue::List(v.iter().map(|s| s.to_string()).collect())
    }
}

/// One configuration's settings map, ordered for deterministic output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildSettings(BTreeMap<String, SettingValue>);

impl BuildSettings {
    /// Set a key. Inapplicable keys are never set, so absence means
    /// "no rule applied".
    pub fn set(&mut self, key: &str, value: impl Into<SettingValue>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Get a string-valued key.
    pub fn string(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(SettingValue::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Get a list-valued key.
    pub fn list(&self, key: &str) -> Option<&[String]> {
        match self.0.get(key) {
            Some(SettingValue::List(v)) => Some(v),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SettingValue)> {
        self.0.iter()
    }
}

/// A build configuration of the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Configuration {
    Debug,
    Release,
}

impl Configuration {
    pub fn name(&self) -> &'static str {
        match self {
            Configuration::Debug => "Debug",
            Configuration::Release => "Release",
        }
    }
}

/// Per-target settings: a common map plus per-configuration overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildSettingsTable {
    /// Visible to every configuration unless overridden
    pub common: BuildSettings,
    pub debug: BuildSettings,
    pub release: BuildSettings,
}

impl BuildSettingsTable {
    /// The effective map for one configuration: common entries with the
    /// configuration's own entries layered on top.
    pub fn merged(&self, config: Configuration) -> BuildSettings {
        let overrides = match config {
            Configuration::Debug => &self.debug,
            Configuration::Release => &self.release,
        };
        let mut merged = self.common.clone();
        for (key, value) in overrides.iter() {
            merged.set(key, value.clone());
        }
        merged
    }
}

/// A file's membership in a build phase.
#[derive(Debug, Clone, Serialize)]
pub struct BuildFile {
    pub id: ObjectId,
    pub file_ref: ObjectId,
}

/// The compile-sources phase of a target.
#[derive(Debug, Clone, Serialize)]
pub struct SourcesBuildPhase {
    pub id: ObjectId,
    pub files: Vec<BuildFile>,
}

/// The link-frameworks phase of a target.
#[derive(Debug, Clone, Serialize)]
pub struct FrameworksBuildPhase {
    pub id: ObjectId,
    pub files: Vec<BuildFile>,
}

/// A dependency link from one target to another.
#[derive(Debug, Clone, Serialize)]
pub struct TargetDependency {
    pub id: ObjectId,
    pub target: ObjectId,
}

/// A buildable unit of the generated project.
#[derive(Debug, Clone, Serialize)]
pub struct Target {
    pub id: ObjectId,

    /// Matches the originating package target's name
    pub name: InternedString,

    /// `None` models an aggregate placeholder with no product
    pub product_type: Option<ProductType>,

    pub product_name: String,

    /// Reference in the Products group, when the target has a product
    pub product_reference: Option<ObjectId>,

    pub build_settings: BuildSettingsTable,

    /// Links to other targets: first-discovered order, no duplicates,
    /// never self
    pub dependencies: Vec<TargetDependency>,

    pub sources: SourcesBuildPhase,
    pub frameworks: FrameworksBuildPhase,
}

impl Target {
    /// Create a target with empty phases and settings.
    pub fn new(
        ids: &mut IdAllocator,
        name: InternedString,
        product_type: Option<ProductType>,
        product_name: impl Into<String>,
    ) -> Self {
        Target {
            id: ids.next_id(),
            name,
            product_type,
            product_name: product_name.into(),
            product_reference: None,
            build_settings: BuildSettingsTable::default(),
            dependencies: Vec::new(),
            sources: SourcesBuildPhase {
                id: ids.next_id(),
                files: Vec::new(),
            },
            frameworks: FrameworksBuildPhase {
                id: ids.next_id(),
                files: Vec::new(),
            },
        }
    }

    /// Check whether a dependency link to `target` already exists.
    pub fn depends_on(&self, target: ObjectId) -> bool {
        self.dependencies.iter().any(|d| d.target == target)
    }

    /// Append a dependency link. Callers dedupe; this just records.
    pub fn add_dependency(&mut self, ids: &mut IdAllocator, target: ObjectId) {
        self.dependencies.push(TargetDependency {
            id: ids.next_id(),
            target,
        });
    }

    /// Add a source file to the compile phase.
    pub fn add_source_file(&mut self, ids: &mut IdAllocator, file_ref: ObjectId) {
        self.sources.files.push(BuildFile {
            id: ids.next_id(),
            file_ref,
        });
    }

    /// Add a product reference to the link phase.
    pub fn add_framework_file(&mut self, ids: &mut IdAllocator, file_ref: ObjectId) {
        self.frameworks.files.push(BuildFile {
            id: ids.next_id(),
            file_ref,
        });
    }
}

/// The assembled project: one reference tree, one target list.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: ObjectId,

    /// Project name (the root package's name)
    pub name: String,

    /// The `.xcodeproj` directory this project was generated for
    pub path: PathBuf,

    /// Basename of the root package's directory
    pub project_dir: String,

    pub main_group: ObjectId,
    pub refs: RefArena,
    pub targets: Vec<Target>,
}

impl Project {
    /// Look up a target by name.
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// Look up a target by identifier.
    pub fn target_by_id(&self, id: ObjectId) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    /// Names of a target's dependencies, in link order.
    pub fn dependency_names(&self, target: &Target) -> Vec<&str> {
        target
            .dependencies
            .iter()
            .filter_map(|d| self.target_by_id(d.target))
            .map(|t| t.name.as_str())
            .collect()
    }

    /// Recursive listing of every file reference below the main group.
    pub fn reference_paths(&self) -> Vec<String> {
        self.refs.leaf_paths(self.main_group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basename_resolution() {
        let mut ids = IdAllocator::new();
        let mut refs = RefArena::new();
        let root = refs.add_group(&mut ids, None, None, "");
        let named = refs.add_group(&mut ids, Some(root), Some("Sources"), "");
        let file = refs.add_file(&mut ids, named, None, "/Bar/bar.swift");

        assert_eq!(refs.get(root).unwrap().basename(), "");
        assert_eq!(refs.get(named).unwrap().basename(), "Sources");
        assert_eq!(refs.get(file).unwrap().basename(), "bar.swift");
    }

    #[test]
    fn test_leaf_paths_skip_empty_basenames() {
        let mut ids = IdAllocator::new();
        let mut refs = RefArena::new();
        let root = refs.add_group(&mut ids, None, None, "");
        let sources = refs.add_group(&mut ids, Some(root), Some("Sources"), "");
        let bar = refs.add_group(&mut ids, Some(sources), None, "/Bar/Sources/Bar");
        refs.add_file(&mut ids, bar, None, "bar.swift");
        // Childless groups contribute nothing.
        refs.add_group(&mut ids, Some(bar), None, "include");

        assert_eq!(refs.leaf_paths(root), vec!["Sources/Bar/bar.swift"]);
    }

    #[test]
    fn test_settings_common_visible_unless_overridden() {
        let mut table = BuildSettingsTable::default();
        table.common.set(settings_keys::PRODUCT_NAME, "$(TARGET_NAME)");
        table.common.set("OTHER", "common");
        table.release.set("OTHER", "release");

        let debug = table.merged(Configuration::Debug);
        assert_eq!(debug.string(settings_keys::PRODUCT_NAME), Some("$(TARGET_NAME)"));
        assert_eq!(debug.string("OTHER"), Some("common"));

        let release = table.merged(Configuration::Release);
        assert_eq!(release.string("OTHER"), Some("release"));
    }

    #[test]
    fn test_product_reference_names() {
        assert_eq!(
            ProductType::Framework.product_reference_name("Sea"),
            "Sea.framework"
        );
        assert_eq!(
            ProductType::UnitTest.product_reference_name("BarTests"),
            "BarTests.xctest"
        );
        assert_eq!(ProductType::Executable.product_reference_name("tool"), "tool");
    }

    #[test]
    fn test_dependency_links() {
        let mut ids = IdAllocator::new();
        let dep = Target::new(&mut ids, InternedString::new("Foo"), None, "Foo");
        let mut target = Target::new(&mut ids, InternedString::new("Bar"), None, "Bar");

        assert!(!target.depends_on(dep.id));
        target.add_dependency(&mut ids, dep.id);
        assert!(target.depends_on(dep.id));
    }
}
