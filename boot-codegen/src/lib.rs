//! Go source generation for kubeboot.
//!
//! # Module Organization
//!
//! - [`builder`] - Indentation-aware source builder ([`CodeBuilder`])
//! - [`imports`] - Grouped Go import blocks ([`GoImports`])
//! - [`templates`] - The closed set of resource templates ([`TemplateId`])
//! - [`register`] - Scheme registration per API version ([`Registration`])
//! - [`plan`] - Pure artifact plans and their executor ([`ArtifactPlan`])
//! - [`resource`] - Resource creation runs ([`create_resource`])
//! - [`scaffold`] - Standalone group and version scaffolds

pub mod builder;
pub mod imports;
pub mod plan;
pub mod register;
pub mod resource;
pub mod scaffold;
pub mod templates;

mod payload;
mod validate;

pub use builder::CodeBuilder;
pub use imports::GoImports;
pub use payload::GenerationPayload;
pub use plan::{ArtifactOutcome, ArtifactPlan, ArtifactRole, PlanEntry};
pub use register::{REGISTER_FILE, REST_IMPORT, Registration};
pub use resource::{CreateResourceRequest, RunReport, RunStatus, create_resource};
pub use scaffold::{CreateGroupRequest, CreateVersionRequest, create_group, create_version};
pub use templates::{GroupDoc, TemplateId, VersionDoc};
