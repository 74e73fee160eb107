//! Test fixtures for common generator scenarios.
//!
//! The centerpiece is the two-package graph: a root package `Bar` (module
//! library, two C libraries, a test bundle) depending on a single-module
//! package `Foo`. It exercises every target kind the mapper distinguishes
//! except system libraries, which the linker tests build inline.

use crate::core::{Package, PackageGraph, Target};
use crate::util::fs::InMemoryFileSystem;

/// Filesystem snapshot matching [`two_package_graph`].
///
/// `Sea` has headers but no module map; `Sea2` declares one explicitly.
pub fn scenario_filesystem() -> InMemoryFileSystem {
    InMemoryFileSystem::new([
        "/Foo/Package.swift",
        "/Foo/foo.swift",
        "/Foo/Tests/FooTests/fooTests.swift",
        "/Bar/Package.swift",
        "/Bar/Sources/Bar/bar.swift",
        "/Bar/Sources/Sea/include/Sea.h",
        "/Bar/Sources/Sea/Sea.c",
        "/Bar/Sources/Sea2/include/Sea2.h",
        "/Bar/Sources/Sea2/include/module.modulemap",
        "/Bar/Sources/Sea2/Sea2.c",
        "/Bar/Tests/BarTests/barTests.swift",
    ])
}

/// The two-package scenario graph with `Bar` as root.
pub fn two_package_graph() -> PackageGraph {
    let foo = Package::new("Foo", "/Foo")
        .with_targets([Target::library("Foo", "/Foo").with_sources(["foo.swift"])]);

    let bar = Package::new("Bar", "/Bar").with_targets([
        Target::library("Bar", "/Bar/Sources/Bar")
            .with_sources(["bar.swift"])
            .with_dependencies(["Foo"]),
        Target::c_family("Sea", "/Bar/Sources/Sea")
            .with_sources(["Sea.c"])
            .with_include_dir("include")
            .with_dependencies(["Foo"]),
        Target::c_family("Sea2", "/Bar/Sources/Sea2")
            .with_sources(["Sea2.c"])
            .with_include_dir("include")
            .with_dependencies(["Foo"]),
        Target::test("BarTests", "/Bar/Tests/BarTests")
            .with_sources(["barTests.swift"])
            .with_dependencies(["Foo", "Bar"]),
    ]);

    PackageGraph::new(vec![foo, bar], "Bar").unwrap()
}

/// A single-package graph with one library target, for smoke tests.
pub fn single_library_graph() -> PackageGraph {
    let pkg = Package::new("Solo", "/Solo")
        .with_targets([Target::library("Solo", "/Solo/Sources/Solo")
            .with_sources(["solo.swift", "ext/helper.swift"])]);

    PackageGraph::new(vec![pkg], "Solo").unwrap()
}
