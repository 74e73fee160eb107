//! `drydock generate` command

use anyhow::Result;

use crate::cli::GenerateArgs;
use drydock::ops::{generate_project, load_graph, load_options};
use drydock::util::diagnostic;
use drydock::GenerateError;
use drydock::RealFileSystem;

pub fn execute(args: GenerateArgs, no_color: bool) -> Result<()> {
    let fs = RealFileSystem;
    let snapshot_dir = args
        .graph
        .parent()
        .map(std::path::Path::to_path_buf)
        .unwrap_or_else(|| ".".into());

    let graph = load_graph(&args.graph, &fs)?;

    let mut options = load_options(&snapshot_dir)?;
    options.extra_dirs.extend(args.extra_dir);

    let output_dir = args.output.unwrap_or(snapshot_dir);

    match generate_project(&graph, &output_dir, &options, &fs) {
        Ok(generated) => {
            println!(
                "Generated {} ({} targets)",
                generated.path.display(),
                generated.project.targets.len()
            );
            Ok(())
        }
        Err(err) => {
            // Generation errors carry suggestions; render those instead of
            // the bare message chain.
            if let Some(generate_err) = err.downcast_ref::<GenerateError>() {
                diagnostic::emit(&generate_err.to_diagnostic(), !no_color);
                std::process::exit(1);
            }
            Err(err)
        }
    }
}
