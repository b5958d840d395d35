//! Resource definition orchestration.
//!
//! A run goes validate, derive, plan, apply, aggregate. Everything up to the
//! plan is pure; [`create_resource`] is the only entry point that writes.

use std::path::Path;

use kubeboot_core::{ApiVersion, Result, WriteResult, pluralize, to_lower_case};
use tracing::{debug, warn};

use crate::{
    ArtifactOutcome, ArtifactPlan, ArtifactRole, GenerationPayload, TemplateId, validate,
};

/// Everything needed to create one resource, resolved by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateResourceRequest {
    pub domain: String,
    pub group: String,
    pub version: String,
    pub kind: String,
    /// Plural path segment; derived from the kind when unset.
    pub resource: Option<String>,
    /// Go module path of the project.
    pub repo: String,
    /// Copyright header for every file.
    pub boilerplate: String,
}

impl CreateResourceRequest {
    /// Check the input, returning the parsed version.
    pub fn validate(&self) -> Result<ApiVersion> {
        validate::domain(&self.domain)?;
        validate::group(&self.group)?;
        let version = validate::version(&self.version)?;
        validate::kind(&self.kind)?;
        validate::repo(&self.repo)?;
        Ok(version)
    }

    /// The resource segment, falling back to the lower-cased plural of the kind
    /// so it always agrees with the pluralized kind.
    pub fn resource_name(&self) -> String {
        match self.resource.as_deref() {
            Some(resource) if !resource.is_empty() => resource.to_string(),
            _ => to_lower_case(&pluralize(&self.kind)),
        }
    }

    /// Validate and build the artifact plan without touching the filesystem.
    ///
    /// The plan lists the group and version scaffolds first, then the six
    /// resource artifacts in write order.
    pub fn plan(&self) -> Result<ArtifactPlan> {
        let version = self.validate()?;
        let payload = GenerationPayload::new(
            self.boilerplate.clone(),
            self.domain.clone(),
            self.group.clone(),
            version,
            self.kind.clone(),
            self.resource_name(),
            self.repo.clone(),
        );
        debug!(
            kind = payload.kind(),
            resource = payload.resource(),
            "planning resource"
        );

        let plan = ArtifactPlan::new(payload)
            .entry(TemplateId::GroupDoc, ArtifactRole::Prerequisite)
            .entry(TemplateId::VersionDoc, ArtifactRole::Prerequisite);

        Ok(TemplateId::RESOURCE
            .into_iter()
            .fold(plan, |plan, template| plan.entry(template, role(template))))
    }
}

/// The type definition and controller decide the terminal status.
fn role(template: TemplateId) -> ArtifactRole {
    match template {
        TemplateId::Types | TemplateId::Controller => ArtifactRole::Primary,
        TemplateId::GroupDoc | TemplateId::VersionDoc => ArtifactRole::Prerequisite,
        _ => ArtifactRole::Advisory,
    }
}

/// Terminal state of a run that was not aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every primary artifact was newly created.
    Completed,
    /// At least one primary artifact already existed.
    CompletedWithCollisions,
}

/// Outcome of every artifact a run attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    outcomes: Vec<ArtifactOutcome>,
}

impl RunReport {
    pub fn new(outcomes: Vec<ArtifactOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[ArtifactOutcome] {
        &self.outcomes
    }

    pub fn status(&self) -> RunStatus {
        let primary_collision = self
            .outcomes
            .iter()
            .any(|o| o.role == ArtifactRole::Primary && o.result == WriteResult::Skipped);
        if primary_collision {
            RunStatus::CompletedWithCollisions
        } else {
            RunStatus::Completed
        }
    }

    pub fn created(&self) -> impl Iterator<Item = &ArtifactOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.result == WriteResult::Created)
    }

    /// Primary and advisory artifacts that already existed.
    pub fn collisions(&self) -> impl Iterator<Item = &ArtifactOutcome> {
        self.outcomes.iter().filter(|o| o.is_collision())
    }
}

/// Create a resource and its prerequisites under `root`.
///
/// Validation failures return before any file is touched. I/O and render
/// failures stop the run at the failing artifact.
pub fn create_resource(request: &CreateResourceRequest, root: &Path) -> Result<RunReport> {
    let plan = request.plan()?;
    let report = RunReport::new(plan.apply(root)?);

    if report.status() == RunStatus::CompletedWithCollisions {
        warn!(
            kind = plan.payload().kind(),
            group = plan.payload().group(),
            version = %plan.payload().version(),
            "resource already exists"
        );
    }

    Ok(report)
}
