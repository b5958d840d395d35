//! Manifest types and parsing for kubeboot.toml files.

mod file;
mod parse;
mod validate;

use std::path::PathBuf;

pub use file::{MANIFEST_FILE, ProjectToml};
use kubeboot_core::ApiVersion;
pub use parse::parse_manifest;
use serde::Deserialize;
pub use validate::ParseContext;

use crate::{ApiGroup, GroupVersion, Resource, Subresource};

/// Root manifest for kubeboot.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Defaults for command-line flags
    #[serde(default)]
    pub project: ProjectConfig,

    /// API groups served by the project, in declaration order
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
}

/// The `[project]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// DNS suffix shared by every group (e.g., "example.com")
    pub domain: Option<String>,
    /// Go module path (e.g., "github.com/acme/widgets")
    pub repo: Option<String>,
    /// Boilerplate header file, relative to the project root
    pub copyright: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupConfig {
    pub name: String,
    #[serde(default)]
    pub versions: Vec<VersionConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionConfig {
    pub name: ApiVersion,
    #[serde(default)]
    pub resources: Vec<ResourceConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceConfig {
    pub kind: String,
    pub rest: Option<String>,
    pub status_strategy: Option<String>,
    #[serde(default)]
    pub subresources: Vec<SubresourceConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubresourceConfig {
    pub kind: String,
    pub request: String,
    pub rest: Option<String>,
}

impl Manifest {
    /// Look up a group by name.
    pub fn group(&self, name: &str) -> Option<&GroupConfig> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Build the API metadata tree for every declared group.
    pub fn api_groups(&self, domain: &str, repo: &str) -> Vec<ApiGroup> {
        self.groups
            .iter()
            .map(|group| group.to_api_group(domain, repo))
            .collect()
    }
}

impl GroupConfig {
    pub fn to_api_group(&self, domain: &str, repo: &str) -> ApiGroup {
        self.versions.iter().fold(
            ApiGroup::new(self.name.as_str(), domain, repo),
            |api_group, version| api_group.version(GroupVersion::from(version)),
        )
    }
}

impl From<&VersionConfig> for GroupVersion {
    fn from(config: &VersionConfig) -> Self {
        config
            .resources
            .iter()
            .fold(GroupVersion::new(config.name.clone()), |version, resource| {
                version.resource(Resource::from(resource))
            })
    }
}

impl From<&ResourceConfig> for Resource {
    fn from(config: &ResourceConfig) -> Self {
        let mut resource = Resource::new(config.kind.as_str());
        if let Some(rest) = &config.rest {
            resource = resource.with_rest(rest.as_str());
        }
        if let Some(strategy) = &config.status_strategy {
            resource = resource.with_status_strategy(strategy.as_str());
        }
        config.subresources.iter().fold(resource, |resource, sub| {
            resource.subresource(Subresource::from(sub))
        })
    }
}

impl From<&SubresourceConfig> for Subresource {
    fn from(config: &SubresourceConfig) -> Self {
        let sub = Subresource::new(config.kind.as_str(), config.request.as_str());
        match &config.rest {
            Some(rest) => sub.with_rest(rest.as_str()),
            None => sub,
        }
    }
}
