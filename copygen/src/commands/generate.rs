use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::{manifest_dir, open_manifest};
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to universe.toml (defaults to ./universe.toml)
    #[arg(short, long, default_value = "universe.toml")]
    pub manifest: PathBuf,

    /// Output root; files land under <output>/<package path>/
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// File name for generated files, without `.go` (overrides universe.toml)
    #[arg(long)]
    pub file_base: Option<String>,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let manifest = open_manifest(&self.manifest);
        let report = ops::generate(
            manifest,
            GenerateOptions {
                output_dir: &self.output,
                base_dir: &manifest_dir(&self.manifest),
                file_base: self.file_base.as_deref(),
                dry_run: self.dry_run,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
