//! Target definitions - the units the graph builds.
//!
//! A Target describes one source module of a package: what kind of artifact
//! it produces, where its sources live, and which other targets it depends
//! on. Identity is the name, unique across the whole resolved graph.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::util::InternedString;

/// Conventional module map file name inside a C-family target's include
/// directory.
pub const MODULE_MAP_NAME: &str = "module.modulemap";

/// The kind of target, which decides its product in the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetKind {
    /// Module library, built as a framework
    #[serde(alias = "lib")]
    Library,

    /// Executable binary
    #[serde(alias = "exe", alias = "bin")]
    Executable,

    /// C-family library with public headers, built as a framework
    #[serde(alias = "clang")]
    CFamily,

    /// Test bundle
    Test,

    /// System-library shim: module map over installed headers, nothing to build
    #[serde(alias = "system")]
    SystemLibrary,
}

impl TargetKind {
    /// Check if this target produces a buildable product.
    ///
    /// Non-buildable targets contribute file references to the project but
    /// no build target; dependency edges pass through them.
    pub fn is_buildable(&self) -> bool {
        !matches!(self, TargetKind::SystemLibrary)
    }

    /// Check if this is a test bundle.
    pub fn is_test(&self) -> bool {
        matches!(self, TargetKind::Test)
    }

    /// Check if this is a C-family target (headers, module map handling).
    pub fn is_c_family(&self) -> bool {
        matches!(self, TargetKind::CFamily)
    }

    /// Check if the product dynamically links the standard runtime.
    ///
    /// These are the kinds whose binary needs a runtime search path when
    /// launched outside the IDE's own tooling.
    pub fn uses_standard_runtime(&self) -> bool {
        matches!(self, TargetKind::Library | TargetKind::Executable)
    }
}

/// A build target with its source layout and dependencies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    /// Target name, unique across the graph
    pub name: InternedString,

    /// What kind of artifact this target produces
    pub kind: TargetKind,

    /// Source root directory of the target
    pub root: PathBuf,

    /// Source files, absolute or relative to `root`
    #[serde(default)]
    pub sources: Vec<PathBuf>,

    /// Public header directory (C-family targets)
    #[serde(default)]
    pub include_dir: Option<PathBuf>,

    /// Explicit module map file, when the target declares one
    #[serde(default)]
    pub module_map: Option<PathBuf>,

    /// Names of targets this one depends on, in declaration order
    #[serde(default)]
    pub dependencies: Vec<InternedString>,
}

impl Target {
    /// Create a new target with the given name, kind, and source root.
    pub fn new(
        name: impl Into<InternedString>,
        kind: TargetKind,
        root: impl Into<PathBuf>,
    ) -> Self {
        Target {
            name: name.into(),
            kind,
            root: root.into(),
            sources: Vec::new(),
            include_dir: None,
            module_map: None,
            dependencies: Vec::new(),
        }
    }

    /// Create a new library target.
    pub fn library(name: impl Into<InternedString>, root: impl Into<PathBuf>) -> Self {
        Self::new(name, TargetKind::Library, root)
    }

    /// Create a new executable target.
    pub fn executable(name: impl Into<InternedString>, root: impl Into<PathBuf>) -> Self {
        Self::new(name, TargetKind::Executable, root)
    }

    /// Create a new C-family library target.
    pub fn c_family(name: impl Into<InternedString>, root: impl Into<PathBuf>) -> Self {
        Self::new(name, TargetKind::CFamily, root)
    }

    /// Create a new test target.
    pub fn test(name: impl Into<InternedString>, root: impl Into<PathBuf>) -> Self {
        Self::new(name, TargetKind::Test, root)
    }

    /// Create a new system-library target.
    pub fn system_library(name: impl Into<InternedString>, root: impl Into<PathBuf>) -> Self {
        Self::new(name, TargetKind::SystemLibrary, root)
    }

    /// Add source files.
    pub fn with_sources(mut self, sources: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.sources = sources.into_iter().map(Into::into).collect();
        self
    }

    /// Set the public header directory.
    pub fn with_include_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.include_dir = Some(dir.into());
        self
    }

    /// Set an explicit module map file.
    pub fn with_module_map(mut self, path: impl Into<PathBuf>) -> Self {
        self.module_map = Some(path.into());
        self
    }

    /// Add dependencies by target name.
    pub fn with_dependencies(
        mut self,
        deps: impl IntoIterator<Item = impl Into<InternedString>>,
    ) -> Self {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Source files as absolute paths, joined onto the target root.
    pub fn source_paths(&self) -> Vec<PathBuf> {
        self.sources
            .iter()
            .map(|s| {
                if s.is_absolute() {
                    s.clone()
                } else {
                    self.root.join(s)
                }
            })
            .collect()
    }

    /// The include directory as an absolute path, if declared.
    pub fn include_dir_path(&self) -> Option<PathBuf> {
        self.include_dir.as_ref().map(|d| {
            if d.is_absolute() {
                d.clone()
            } else {
                self.root.join(d)
            }
        })
    }

    /// The explicit module map as an absolute path, if declared.
    pub fn module_map_path(&self) -> Option<PathBuf> {
        self.module_map.as_ref().map(|m| {
            if m.is_absolute() {
                m.clone()
            } else {
                self.root.join(m)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_predicates() {
        assert!(TargetKind::Library.is_buildable());
        assert!(TargetKind::Test.is_buildable());
        assert!(!TargetKind::SystemLibrary.is_buildable());

        assert!(TargetKind::Library.uses_standard_runtime());
        assert!(TargetKind::Executable.uses_standard_runtime());
        assert!(!TargetKind::CFamily.uses_standard_runtime());
        assert!(!TargetKind::Test.uses_standard_runtime());
    }

    #[test]
    fn test_source_paths_join_relative() {
        let target = Target::c_family("Sea", "/Bar/Sources/Sea").with_sources(["Sea.c"]);
        assert_eq!(
            target.source_paths(),
            vec![PathBuf::from("/Bar/Sources/Sea/Sea.c")]
        );
    }

    #[test]
    fn test_source_paths_keep_absolute() {
        let target =
            Target::library("Foo", "/Foo").with_sources(["/Foo/foo.swift", "nested/other.swift"]);
        assert_eq!(
            target.source_paths(),
            vec![
                PathBuf::from("/Foo/foo.swift"),
                PathBuf::from("/Foo/nested/other.swift"),
            ]
        );
    }

    #[test]
    fn test_builder() {
        let target = Target::c_family("Sea2", "/Bar/Sources/Sea2")
            .with_sources(["Sea2.c"])
            .with_include_dir("include")
            .with_module_map("include/module.modulemap")
            .with_dependencies(["Foo"]);

        assert_eq!(target.name.as_str(), "Sea2");
        assert_eq!(
            target.include_dir_path(),
            Some(PathBuf::from("/Bar/Sources/Sea2/include"))
        );
        assert_eq!(
            target.module_map_path(),
            Some(PathBuf::from("/Bar/Sources/Sea2/include/module.modulemap"))
        );
        assert_eq!(target.dependencies, vec![InternedString::new("Foo")]);
    }
}
