use std::process::ExitCode;

use clap::Args;
use eyre::Result;
use kubeboot_codegen::{CreateGroupRequest, CreateResourceRequest, CreateVersionRequest};

use super::{ProjectArgs, UnwrapOrExit};
use crate::{
    ops,
    reports::{GenerationReport, Report, TerminalOutput},
};

#[derive(Args)]
pub struct CreateResourceCommand {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// API group (lower case, e.g. apps)
    #[arg(long)]
    pub group: String,

    /// API version (e.g. v1, v1alpha1, v1beta1)
    #[arg(long)]
    pub version: String,

    /// Kind of the resource (e.g. Widget)
    #[arg(long)]
    pub kind: String,

    /// Plural resource name (defaults to the pluralized lower-case kind)
    #[arg(long)]
    pub resource: Option<String>,

    /// Preview generated files without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl CreateResourceCommand {
    pub fn run(&self) -> Result<ExitCode> {
        let project = self.project.project();
        let request = CreateResourceRequest {
            domain: project.domain(self.project.domain.as_deref()),
            group: self.group.clone(),
            version: self.version.clone(),
            kind: self.kind.clone(),
            resource: self.resource.clone(),
            repo: project.repo(self.project.repo.as_deref())?,
            boilerplate: project.boilerplate(self.project.copyright.as_deref())?,
        };

        let report = ops::create_resource(&request, project.root(), self.dry_run).unwrap_or_exit();
        Ok(finish(&report))
    }
}

#[derive(Args)]
pub struct CreateGroupCommand {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// API group (lower case, e.g. apps)
    #[arg(long)]
    pub group: String,
}

impl CreateGroupCommand {
    pub fn run(&self) -> Result<ExitCode> {
        let project = self.project.project();
        let request = CreateGroupRequest {
            domain: project.domain(self.project.domain.as_deref()),
            group: self.group.clone(),
            boilerplate: project.boilerplate(self.project.copyright.as_deref())?,
        };

        let report = ops::create_group(&request, project.root()).unwrap_or_exit();
        Ok(finish(&report))
    }
}

#[derive(Args)]
pub struct CreateVersionCommand {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// API group (lower case, e.g. apps)
    #[arg(long)]
    pub group: String,

    /// API version (e.g. v1, v1alpha1, v1beta1)
    #[arg(long)]
    pub version: String,
}

impl CreateVersionCommand {
    pub fn run(&self) -> Result<ExitCode> {
        let project = self.project.project();
        let request = CreateVersionRequest {
            domain: project.domain(self.project.domain.as_deref()),
            group: self.group.clone(),
            version: self.version.clone(),
            repo: project.repo(self.project.repo.as_deref())?,
            boilerplate: project.boilerplate(self.project.copyright.as_deref())?,
        };

        let report = ops::create_version(&request, project.root()).unwrap_or_exit();
        Ok(finish(&report))
    }
}

fn finish(report: &GenerationReport) -> ExitCode {
    report.render(&mut TerminalOutput::new());
    ExitCode::from(report.exit_status())
}
