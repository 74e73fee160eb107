//! Object identifier allocation.
//!
//! Every object in a generated project (group, file reference, target,
//! build file, dependency link) is addressed by an opaque identifier, so
//! cross-references are plain handles instead of structural pointers.

use std::fmt;

use serde::Serialize;

/// Opaque identifier of one object within a generated project.
///
/// Unique within a single generation run across all object kinds; carries
/// no meaning beyond identity and is not stable across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ObjectId(u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OBJ_{}", self.0)
    }
}

/// Issues identifiers for one generation run.
///
/// An explicit object passed into every component that creates model
/// objects. One allocator per run; concurrent runs each get their own.
#[derive(Debug)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    /// Create a fresh allocator.
    pub fn new() -> Self {
        IdAllocator { next: 1 }
    }

    /// Allocate the next identifier. Never reuses a value.
    pub fn next_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next);
        self.next += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let mut ids = IdAllocator::new();
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_display_format() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.next_id().to_string(), "OBJ_1");
        assert_eq!(ids.next_id().to_string(), "OBJ_2");
    }

    #[test]
    fn test_separate_runs_are_independent() {
        let mut a = IdAllocator::new();
        let mut b = IdAllocator::new();
        assert_eq!(a.next_id(), b.next_id());
    }
}
