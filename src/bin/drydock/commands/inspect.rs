//! `drydock inspect` command
//!
//! Dry run of the generator: prints the targets, dependency links, and
//! file references a snapshot would yield, without writing anything.

use anyhow::Result;

use crate::cli::InspectArgs;
use drydock::ops::load_graph;
use drydock::{generate, GenerationOptions, RealFileSystem};

pub fn execute(args: InspectArgs) -> Result<()> {
    let fs = RealFileSystem;
    let graph = load_graph(&args.graph, &fs)?;

    if args.build_order {
        println!("Build order:");
        for name in graph.topological_order() {
            println!("  {}", name);
        }
        return Ok(());
    }

    let nominal = std::env::current_dir()?
        .join(format!("{}.xcodeproj", graph.root_package().name()));
    let project = generate(&nominal, &graph, &GenerationOptions::default(), &fs)?;

    println!("Project: {} (projectDir {})", project.name, project.project_dir);

    println!("\nTargets:");
    for target in &project.targets {
        let product = target
            .product_type
            .map(|p| p.product_reference_name(&target.product_name))
            .unwrap_or_else(|| "(aggregate)".to_string());
        let deps = project.dependency_names(target);
        if deps.is_empty() {
            println!("  {} -> {}", target.name, product);
        } else {
            println!("  {} -> {} (depends on {})", target.name, product, deps.join(", "));
        }
    }

    println!("\nReferences:");
    let mut paths = project.reference_paths();
    paths.sort();
    for path in paths {
        println!("  {}", path);
    }

    Ok(())
}
