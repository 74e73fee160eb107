//! PackageGraph - the immutable resolved dependency graph.
//!
//! Once created, a PackageGraph is read-only. It is the snapshot the
//! upstream resolver hands to the generator: ordered packages, one of them
//! designated the root, with target-to-target dependency edges.

use std::collections::{HashMap, HashSet};

use anyhow::{bail, Result};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Topo;

use crate::core::{Package, Target};
use crate::util::InternedString;

/// The resolved package graph.
///
/// Target names are the identifier space: every dependency edge is declared
/// by name, and lookups across packages go through a single name index.
/// Acyclicity is guaranteed by the upstream resolver.
#[derive(Debug, Clone)]
pub struct PackageGraph {
    /// All packages, in resolver order
    packages: Vec<Package>,

    /// Index of the root package in `packages`
    root: usize,

    /// Target dependency graph
    graph: DiGraph<InternedString, ()>,

    /// Map from target name to node index
    name_to_node: HashMap<InternedString, NodeIndex>,

    /// Map from target name to (package index, target index)
    target_index: HashMap<InternedString, (usize, usize)>,
}

impl PackageGraph {
    /// Create a graph from resolved packages, designating the root package
    /// by name.
    ///
    /// When two targets collide on a name, the first occurrence wins the
    /// index slot; the generator rejects such graphs before linking.
    pub fn new(packages: Vec<Package>, root: &str) -> Result<Self> {
        let Some(root_index) = packages.iter().position(|p| p.name() == *root) else {
            bail!("root package `{}` is not in the graph", root);
        };

        let mut graph = DiGraph::new();
        let mut name_to_node = HashMap::new();
        let mut target_index = HashMap::new();

        for (pi, package) in packages.iter().enumerate() {
            for (ti, target) in package.targets().iter().enumerate() {
                if target_index.contains_key(&target.name) {
                    continue;
                }
                let node = graph.add_node(target.name);
                name_to_node.insert(target.name, node);
                target_index.insert(target.name, (pi, ti));
            }
        }

        for package in &packages {
            for target in package.targets() {
                let from = name_to_node[&target.name];
                for dep in &target.dependencies {
                    // Unknown names surface as UnresolvableDependency during
                    // linking; here they simply have no edge.
                    if let Some(&to) = name_to_node.get(dep) {
                        if !graph.contains_edge(from, to) {
                            graph.add_edge(from, to, ());
                        }
                    }
                }
            }
        }

        Ok(PackageGraph {
            packages,
            root: root_index,
            graph,
            name_to_node,
            target_index,
        })
    }

    /// All packages, in resolver order.
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// The designated root package.
    pub fn root_package(&self) -> &Package {
        &self.packages[self.root]
    }

    /// Check whether a package is the root package.
    pub fn is_root(&self, package: &Package) -> bool {
        std::ptr::eq(package, &self.packages[self.root])
    }

    /// Look up a target and its owning package by name.
    pub fn target(&self, name: &str) -> Option<(&Package, &Target)> {
        let name = InternedString::new(name);
        let &(pi, ti) = self.target_index.get(&name)?;
        let package = &self.packages[pi];
        Some((package, &package.targets()[ti]))
    }

    /// Total number of targets across all packages.
    pub fn target_count(&self) -> usize {
        self.packages.iter().map(|p| p.targets().len()).sum()
    }

    /// Direct dependencies of a target, in declaration order.
    pub fn dependencies(&self, name: &str) -> &[InternedString] {
        self.target(name)
            .map(|(_, t)| t.dependencies.as_slice())
            .unwrap_or(&[])
    }

    /// All transitive dependencies of a target.
    pub fn transitive_dependencies(&self, name: &str) -> HashSet<InternedString> {
        let mut result = HashSet::new();
        let Some(&start) = self.name_to_node.get(&InternedString::new(name)) else {
            return result;
        };

        let mut stack: Vec<NodeIndex> = self.graph.neighbors(start).collect();
        while let Some(node) = stack.pop() {
            if result.insert(self.graph[node]) {
                stack.extend(self.graph.neighbors(node));
            }
        }
        result
    }

    /// Target names in topological order (dependencies before dependents).
    pub fn topological_order(&self) -> Vec<InternedString> {
        let mut topo = Topo::new(&self.graph);
        let mut order = Vec::new();
        while let Some(node) = topo.next(&self.graph) {
            order.push(self.graph[node]);
        }
        // Topo yields dependents before the edges they point at; build
        // order wants dependencies first.
        order.reverse();
        order
    }

    /// Check that the dependency graph has no cycles.
    ///
    /// Upstream guarantees this; the generator only debug-asserts it.
    pub fn is_acyclic(&self) -> bool {
        !petgraph::algo::is_cyclic_directed(&self.graph)
    }
}
