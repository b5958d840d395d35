use std::{path::PathBuf, process::ExitCode};

use clap::Args;
use eyre::Result;
use kubeboot_manifest::ProjectToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to kubeboot.toml (defaults to ./kubeboot.toml)
    #[arg(short, long, default_value = "kubeboot.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> Result<ExitCode> {
        let project = ProjectToml::open(&self.config).unwrap_or_exit();
        ops::check(&project).render(&mut TerminalOutput::new());
        Ok(ExitCode::SUCCESS)
    }
}
