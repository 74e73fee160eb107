//! Reference tree building.
//!
//! Folds a set of paths into nested groups under a parent, merging shared
//! directory prefixes so every directory appears once no matter how many
//! files it holds.

use std::path::{Path, PathBuf};

use crate::util::fs::path_components;
use crate::xcode::{IdAllocator, ObjectId, RefArena};

/// One path to place in the tree.
#[derive(Debug, Clone)]
pub struct PathSpec {
    /// Absolute, or relative to the build root
    pub path: PathBuf,

    /// Files become leaf references; directories become childless groups
    pub is_file: bool,
}

impl PathSpec {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        PathSpec {
            path: path.into(),
            is_file: true,
        }
    }

    pub fn directory(path: impl Into<PathBuf>) -> Self {
        PathSpec {
            path: path.into(),
            is_file: false,
        }
    }
}

/// Build the reference tree for `specs` under `parent`, with paths taken
/// relative to `root`.
///
/// Shared prefixes fold into one group per directory; a path already
/// represented (same resolved basename at the same level) is addressed
/// once. A path normalizing to nothing - the root itself - is a structural
/// no-op. Children keep insertion order; callers wanting a stable listing
/// sort externally.
///
/// Returns the file reference ids in input order.
pub fn build_tree(
    refs: &mut RefArena,
    ids: &mut IdAllocator,
    parent: ObjectId,
    root: &Path,
    specs: &[PathSpec],
) -> Vec<ObjectId> {
    let mut file_ids = Vec::new();

    for spec in specs {
        let relative = spec
            .path
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| spec.path.clone());
        let components = path_components(&relative);

        let Some((last, dirs)) = components.split_last() else {
            // The root itself; nothing to represent.
            continue;
        };

        let mut group = parent;
        for dir in dirs {
            group = match refs.child_named(group, dir) {
                Some(existing) => existing,
                None => refs.add_group(ids, Some(group), None, dir),
            };
        }

        if spec.is_file {
            let id = match refs.child_named(group, last) {
                Some(existing) => existing,
                None => refs.add_file(ids, group, None, last),
            };
            file_ids.push(id);
        } else if refs.child_named(group, last).is_none() {
            refs.add_group(ids, Some(group), None, last);
        }
    }

    file_ids
}
