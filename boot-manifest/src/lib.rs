//! API metadata model and `kubeboot.toml` manifest parsing.
//!
//! The manifest declares which groups, versions and resources a project
//! serves. It is parsed with [`toml`], validated with source spans so
//! problems render as [`miette`] diagnostics, and converted into the
//! immutable [`ApiGroup`] tree the registration generator consumes.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod api;
mod error;
mod manifest;

pub use api::{ApiGroup, GroupVersion, Resource, Subresource};
pub use error::{Error, Result, SourceContext};
pub use manifest::{
    GroupConfig, MANIFEST_FILE, Manifest, ParseContext, ProjectConfig, ProjectToml,
    ResourceConfig, SubresourceConfig, VersionConfig, parse_manifest,
};
