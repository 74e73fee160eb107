//! Dependency linking between project targets.
//!
//! Walks every declared dependency edge in declaration order and records a
//! link on the dependent project target. Edges into non-buildable targets
//! flatten transitively to the nearest buildable descendants. First
//! occurrence wins position; later duplicates and self-references drop
//! silently.

use std::collections::HashMap;

use tracing::trace;

use crate::core::PackageGraph;
use crate::generator::errors::GenerateError;
use crate::generator::targets::MappedTarget;
use crate::util::InternedString;
use crate::xcode::IdAllocator;

/// Link all mapped targets according to the graph's dependency edges.
pub fn link_dependencies(
    ids: &mut IdAllocator,
    graph: &PackageGraph,
    mapped: &mut [MappedTarget],
) -> Result<(), GenerateError> {
    let index: HashMap<InternedString, usize> = mapped
        .iter()
        .enumerate()
        .map(|(i, m)| (m.target.name, i))
        .collect();

    for i in 0..mapped.len() {
        let name = mapped[i].target.name;
        let (_, package_target) = graph
            .target(&name)
            .expect("mapped targets come from the graph");

        let mut resolved = Vec::new();
        for dep in &package_target.dependencies {
            resolve_buildable(graph, &index, &name, *dep, &mut resolved)?;
        }

        let self_id = mapped[i].target.id;
        for di in resolved {
            let dep_id = mapped[di].target.id;
            if dep_id == self_id || mapped[i].target.depends_on(dep_id) {
                continue;
            }
            trace!("link {} -> {}", name, mapped[di].target.name);
            mapped[i].target.add_dependency(ids, dep_id);
        }
    }

    Ok(())
}

/// Resolve a dependency name to the mapped targets it links against.
///
/// A buildable dependency resolves to itself. A non-buildable one stands
/// for its own dependencies, followed transitively until buildable targets
/// appear; a chain ending in nothing buildable contributes no links. The
/// graph is acyclic, so the recursion terminates.
fn resolve_buildable(
    graph: &PackageGraph,
    index: &HashMap<InternedString, usize>,
    dependent: &str,
    dep: InternedString,
    out: &mut Vec<usize>,
) -> Result<(), GenerateError> {
    if let Some(&di) = index.get(&dep) {
        out.push(di);
        return Ok(());
    }

    let Some((_, dep_target)) = graph.target(&dep) else {
        return Err(GenerateError::UnresolvableDependency {
            target: dependent.to_string(),
            dependency: dep.to_string(),
        });
    };

    for transitive in &dep_target.dependencies {
        resolve_buildable(graph, index, dependent, *transitive, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Package, PackageGraph, Target};
    use crate::generator::targets::map_targets;
    use crate::test_support::fixtures;
    use crate::util::fs::InMemoryFileSystem;
    use crate::xcode::{ObjectId, RefArena};

    fn link(graph: &PackageGraph) -> Result<Vec<MappedTarget>, GenerateError> {
        let mut ids = IdAllocator::new();
        let mut refs = RefArena::new();
        let main_group = refs.add_group(&mut ids, None, None, "");
        let mut mapped = map_targets(
            &mut ids,
            &mut refs,
            main_group,
            graph,
            &InMemoryFileSystem::default(),
        )?;
        link_dependencies(&mut ids, graph, &mut mapped)?;
        Ok(mapped)
    }

    fn dependency_names(mapped: &[MappedTarget], name: &str) -> Vec<String> {
        let by_id = |id: ObjectId| {
            mapped
                .iter()
                .find(|m| m.target.id == id)
                .unwrap()
                .target
                .name
                .to_string()
        };
        mapped
            .iter()
            .find(|m| m.target.name == name)
            .unwrap()
            .target
            .dependencies
            .iter()
            .map(|d| by_id(d.target))
            .collect()
    }

    #[test]
    fn test_declaration_order_preserved() {
        let mapped = link(&fixtures::two_package_graph()).unwrap();
        assert_eq!(dependency_names(&mapped, "BarTests"), vec!["Foo", "Bar"]);
        assert_eq!(dependency_names(&mapped, "Bar"), vec!["Foo"]);
        assert!(dependency_names(&mapped, "Foo").is_empty());
    }

    #[test]
    fn test_duplicates_drop_keeping_first_position() {
        // App declares [Foo, Bar]; Bar also depends on Foo. The flattened
        // list stays [Foo, Bar], not [Foo, Bar, Foo].
        let pkg = Package::new("App", "/App").with_targets([
            Target::library("Foo", "/App/Sources/Foo").with_sources(["foo.swift"]),
            Target::library("Bar", "/App/Sources/Bar")
                .with_sources(["bar.swift"])
                .with_dependencies(["Foo"]),
            Target::executable("App", "/App/Sources/App")
                .with_sources(["main.swift"])
                .with_dependencies(["Foo", "Bar", "Foo"]),
        ]);
        let graph = PackageGraph::new(vec![pkg], "App").unwrap();

        let mapped = link(&graph).unwrap();
        assert_eq!(dependency_names(&mapped, "App"), vec!["Foo", "Bar"]);
    }

    #[test]
    fn test_diamond_links_once() {
        let pkg = Package::new("D", "/D").with_targets([
            Target::library("Base", "/D/Sources/Base").with_sources(["base.swift"]),
            Target::library("Left", "/D/Sources/Left")
                .with_sources(["l.swift"])
                .with_dependencies(["Base"]),
            Target::library("Right", "/D/Sources/Right")
                .with_sources(["r.swift"])
                .with_dependencies(["Base"]),
            Target::executable("Top", "/D/Sources/Top")
                .with_sources(["main.swift"])
                .with_dependencies(["Left", "Right", "Base"]),
        ]);
        let graph = PackageGraph::new(vec![pkg], "D").unwrap();

        let mapped = link(&graph).unwrap();
        assert_eq!(
            dependency_names(&mapped, "Top"),
            vec!["Left", "Right", "Base"]
        );
    }

    #[test]
    fn test_one_hop_flattening_through_system_target() {
        let pkg = Package::new("S", "/S").with_targets([
            Target::library("Impl", "/S/Sources/Impl").with_sources(["impl.swift"]),
            Target::system_library("CShim", "/S/Sources/CShim").with_dependencies(["Impl"]),
            Target::executable("App", "/S/Sources/App")
                .with_sources(["main.swift"])
                .with_dependencies(["CShim"]),
        ]);
        let graph = PackageGraph::new(vec![pkg], "S").unwrap();

        let mapped = link(&graph).unwrap();
        assert_eq!(dependency_names(&mapped, "App"), vec!["Impl"]);
    }

    #[test]
    fn test_multi_hop_flattening_through_system_targets() {
        let pkg = Package::new("S", "/S").with_targets([
            Target::library("Deep", "/S/Sources/Deep").with_sources(["deep.swift"]),
            Target::system_library("Inner", "/S/Sources/Inner").with_dependencies(["Deep"]),
            Target::system_library("Outer", "/S/Sources/Outer").with_dependencies(["Inner"]),
            Target::executable("App", "/S/Sources/App")
                .with_sources(["main.swift"])
                .with_dependencies(["Outer"]),
        ]);
        let graph = PackageGraph::new(vec![pkg], "S").unwrap();

        let mapped = link(&graph).unwrap();
        assert_eq!(dependency_names(&mapped, "App"), vec!["Deep"]);
    }

    #[test]
    fn test_chain_ending_nowhere_drops() {
        let pkg = Package::new("S", "/S").with_targets([
            Target::system_library("Dead", "/S/Sources/Dead"),
            Target::executable("App", "/S/Sources/App")
                .with_sources(["main.swift"])
                .with_dependencies(["Dead"]),
        ]);
        let graph = PackageGraph::new(vec![pkg], "S").unwrap();

        let mapped = link(&graph).unwrap();
        assert!(dependency_names(&mapped, "App").is_empty());
    }

    #[test]
    fn test_unresolvable_dependency() {
        let pkg = Package::new("S", "/S").with_targets([Target::executable(
            "App",
            "/S/Sources/App",
        )
        .with_sources(["main.swift"])
        .with_dependencies(["Ghost"])]);
        let graph = PackageGraph::new(vec![pkg], "S").unwrap();

        match link(&graph) {
            Err(GenerateError::UnresolvableDependency { target, dependency }) => {
                assert_eq!(target, "App");
                assert_eq!(dependency, "Ghost");
            }
            other => panic!("expected unresolvable dependency, got {:?}", other.map(|_| ())),
        }
    }
}
