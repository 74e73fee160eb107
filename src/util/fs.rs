//! Filesystem access and path utilities.
//!
//! Project generation is a pure transformation; every filesystem question it
//! asks (does an explicit module map exist, which sources does a target
//! directory hold) goes through the read-only [`FileSystem`] trait, so tests
//! can run against an in-memory snapshot instead of the disk.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Read-only filesystem view consumed by graph loading and generation.
pub trait FileSystem {
    /// Check whether a path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Check whether a path is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Check whether a path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// All files under a directory, recursively, sorted.
    fn walk(&self, path: &Path) -> Vec<PathBuf>;
}

/// The real on-disk filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn walk(&self, path: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(path)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .collect();
        files.sort();
        files
    }
}

/// An in-memory filesystem built from a set of file paths.
///
/// Files are empty; directories exist implicitly wherever a file path passes
/// through them. This is the shape the upstream resolver hands the generator
/// in tests: a snapshot of which paths exist, nothing more.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFileSystem {
    files: BTreeSet<PathBuf>,
}

impl InMemoryFileSystem {
    /// Create an in-memory filesystem containing the given (empty) files.
    pub fn new<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        InMemoryFileSystem {
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    /// Add a file to the snapshot.
    pub fn add_file(&mut self, path: impl Into<PathBuf>) {
        self.files.insert(path.into());
    }
}

impl FileSystem for InMemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.is_file(path) || self.is_dir(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.files.iter().any(|f| f != path && f.starts_with(path))
    }

    fn walk(&self, path: &Path) -> Vec<PathBuf> {
        self.files
            .iter()
            .filter(|f| f.starts_with(path))
            .cloned()
            .collect()
    }
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents)
        .with_context(|| format!("failed to write file: {}", path.display()))
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

/// Split a path into its normal components as strings.
///
/// Root and current-directory markers are skipped, so an absolute path and
/// its root-relative form split identically.
pub fn path_components(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_in_memory_files_and_dirs() {
        let fs = InMemoryFileSystem::new(["/Pkg/Sources/Lib/lib.swift", "/Pkg/Package.swift"]);

        assert!(fs.is_file(Path::new("/Pkg/Package.swift")));
        assert!(fs.is_dir(Path::new("/Pkg/Sources/Lib")));
        assert!(fs.exists(Path::new("/Pkg/Sources")));
        assert!(!fs.is_file(Path::new("/Pkg/Sources")));
        assert!(!fs.exists(Path::new("/Other")));
    }

    #[test]
    fn test_in_memory_walk() {
        let fs = InMemoryFileSystem::new([
            "/Pkg/Sources/Lib/a.swift",
            "/Pkg/Sources/Lib/sub/b.swift",
            "/Pkg/Package.swift",
        ]);

        let files = fs.walk(Path::new("/Pkg/Sources/Lib"));
        assert_eq!(
            files,
            vec![
                PathBuf::from("/Pkg/Sources/Lib/a.swift"),
                PathBuf::from("/Pkg/Sources/Lib/sub/b.swift"),
            ]
        );
    }

    #[test]
    fn test_real_walk() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(src.join("sub")).unwrap();
        fs::write(src.join("main.swift"), "").unwrap();
        fs::write(src.join("sub/util.swift"), "").unwrap();

        let files = RealFileSystem.walk(&src);
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("/"), Path::new("/Bar/Sources/Sea2")),
            PathBuf::from("Bar/Sources/Sea2")
        );
        assert_eq!(
            relative_path(Path::new("/a/b"), Path::new("/a/c/d")),
            PathBuf::from("../c/d")
        );
    }

    #[test]
    fn test_path_components() {
        assert_eq!(
            path_components(Path::new("/Bar/Sources/Sea.c")),
            vec!["Bar", "Sources", "Sea.c"]
        );
        assert_eq!(path_components(Path::new("")), Vec::<String>::new());
    }
}
