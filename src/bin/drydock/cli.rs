//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Drydock - generate Xcode projects from resolved package graphs
#[derive(Parser)]
#[command(name = "drydock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate an .xcodeproj from a resolved-graph snapshot
    Generate(GenerateArgs),

    /// Print the targets and file references a snapshot would yield
    Inspect(InspectArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Resolved-graph snapshot (JSON) emitted by the resolver
    #[arg(long, value_name = "FILE")]
    pub graph: PathBuf,

    /// Directory to place the .xcodeproj in (defaults to the snapshot's
    /// directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Extra directories to include as folder references
    #[arg(long, value_name = "DIR")]
    pub extra_dir: Vec<PathBuf>,
}

#[derive(Args)]
pub struct InspectArgs {
    /// Resolved-graph snapshot (JSON) emitted by the resolver
    #[arg(long, value_name = "FILE")]
    pub graph: PathBuf,

    /// List targets in dependency (build) order
    #[arg(long)]
    pub build_order: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
