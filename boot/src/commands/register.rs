use std::process::ExitCode;

use clap::Args;
use eyre::{Result, bail};

use super::ProjectArgs;
use crate::{
    commands::UnwrapOrExit,
    ops::{self, RegisterOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct RegisterCommand {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Preview generated files without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl RegisterCommand {
    pub fn run(&self) -> Result<ExitCode> {
        let project = self.project.project();
        let Some(manifest) = project.manifest() else {
            bail!(
                "no kubeboot.toml found in {}, register needs one to describe the API",
                project.root().display()
            );
        };

        let domain = project.domain(self.project.domain.as_deref());
        let repo = project.repo(self.project.repo.as_deref())?;
        let boilerplate = project.boilerplate(self.project.copyright.as_deref())?;

        let report = ops::register(
            manifest,
            RegisterOptions {
                root: project.root(),
                domain: &domain,
                repo: &repo,
                boilerplate: &boilerplate,
                dry_run: self.dry_run,
            },
        )
        .unwrap_or_exit();

        report.render(&mut TerminalOutput::new());
        Ok(ExitCode::from(report.exit_status()))
    }
}
