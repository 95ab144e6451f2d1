use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};

use super::open_manifest;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ExplainCommand {
    /// Path to universe.toml (defaults to ./universe.toml)
    #[arg(short, long, default_value = "universe.toml")]
    pub manifest: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl ExplainCommand {
    pub fn run(&self) -> Result<()> {
        let manifest = open_manifest(&self.manifest);
        let report = ops::explain(&manifest, &self.manifest)?;

        if self.json {
            let json =
                serde_json::to_string_pretty(&report).wrap_err("Failed to serialize report")?;
            println!("{}", json);
        } else {
            report.render(&mut TerminalOutput::new());
        }
        Ok(())
    }
}
