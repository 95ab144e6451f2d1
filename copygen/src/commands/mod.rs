mod check;
mod completions;
mod explain;
mod generate;

use std::path::{Path, PathBuf};

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use copygen_manifest::Manifest;
use eyre::Result;
use explain::ExplainCommand;
use generate::GenerateCommand;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for copygen_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Parse the manifest at `path`, exiting with a rendered report on failure.
pub(crate) fn open_manifest(path: &Path) -> Manifest {
    Manifest::from_file(path).unwrap_or_exit()
}

/// Directory relative manifest paths (like `boilerplate`) are resolved against.
pub(crate) fn manifest_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

#[derive(Parser)]
#[command(name = "copygen")]
#[command(version)]
#[command(about = "Generate deep-copy functions for Go types")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Explain(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate deep-copy files from universe.toml
    Generate(GenerateCommand),

    /// Validate universe.toml and resolve directives without generating code
    Check(CheckCommand),

    /// Show the pipeline and what would be generated
    Explain(ExplainCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
