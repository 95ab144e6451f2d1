use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::open_manifest;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to universe.toml (defaults to ./universe.toml)
    #[arg(short, long, default_value = "universe.toml")]
    pub manifest: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let manifest = open_manifest(&self.manifest);
        let report = ops::check(&manifest, &self.manifest)?;

        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
