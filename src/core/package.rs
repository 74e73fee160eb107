//! Package - a resolved unit of the dependency graph.
//!
//! A Package combines a name and root directory with the build targets the
//! upstream resolver discovered for it. Packages are immutable input: by the
//! time one reaches this crate, manifest parsing and dependency resolution
//! are already done.

use std::path::{Path, PathBuf};

use semver::Version;

use crate::core::Target;
use crate::util::InternedString;

/// Manifest file name at every package root.
///
/// The manifest is opaque data here; it shows up in the generated project as
/// a plain file reference, nothing more.
pub const MANIFEST_NAME: &str = "Package.swift";

/// A resolved package with its root directory and targets.
#[derive(Debug, Clone)]
pub struct Package {
    /// The package name
    name: InternedString,

    /// Root directory of the package
    root: PathBuf,

    /// Resolved version, if the package came from a versioned source
    version: Option<Version>,

    /// Build targets, in manifest declaration order
    targets: Vec<Target>,
}

impl Package {
    /// Create a new package.
    pub fn new(name: impl Into<InternedString>, root: impl Into<PathBuf>) -> Self {
        Package {
            name: name.into(),
            root: root.into(),
            version: None,
            targets: Vec::new(),
        }
    }

    /// Set the resolved version.
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    /// Set the package's targets.
    pub fn with_targets(mut self, targets: impl IntoIterator<Item = Target>) -> Self {
        self.targets = targets.into_iter().collect();
        self
    }

    /// Get the package name.
    pub fn name(&self) -> InternedString {
        self.name
    }

    /// Get the package root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the resolved version, if any.
    pub fn version(&self) -> Option<&Version> {
        self.version.as_ref()
    }

    /// Get the manifest file path.
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_NAME)
    }

    /// Get all targets.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Get a target by name.
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }
}

impl std::fmt::Display for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{} v{}", self.name, version),
            None => write!(f, "{}", self.name),
        }
    }
}

impl PartialEq for Package {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.root == other.root
    }
}

impl Eq for Package {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TargetKind;

    #[test]
    fn test_package_accessors() {
        let pkg = Package::new("Bar", "/Bar")
            .with_version(Version::new(1, 2, 3))
            .with_targets([Target::new("Bar", TargetKind::Library, "/Bar/Sources/Bar")]);

        assert_eq!(pkg.name().as_str(), "Bar");
        assert_eq!(pkg.root(), Path::new("/Bar"));
        assert_eq!(pkg.version(), Some(&Version::new(1, 2, 3)));
        assert_eq!(pkg.manifest_path(), PathBuf::from("/Bar/Package.swift"));
        assert!(pkg.target("Bar").is_some());
        assert!(pkg.target("Baz").is_none());
        assert_eq!(pkg.to_string(), "Bar v1.2.3");
    }
}
