//! API metadata model.
//!
//! These types describe the group/version/resource tree a registration file
//! is generated from. They are built once per generation pass, either from a
//! parsed [`Manifest`](crate::Manifest) or directly by callers, and are never
//! mutated afterwards.
//!
//! ```text
//! kubeboot.toml → Manifest (parsing) → ApiGroup tree → registration codegen
//! ```

use kubeboot_core::{ApiVersion, to_upper_first};

/// An API group such as `apps.example.com`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiGroup {
    /// Group name, lower case (e.g., "apps").
    pub name: String,
    /// DNS suffix the group lives under (e.g., "example.com").
    pub domain: String,
    /// Import path of the internal group package (e.g., "github.com/acme/widgets/pkg/apis/apps").
    pub package: String,
    /// Versions served by the group, in declaration order.
    pub versions: Vec<GroupVersion>,
}

impl ApiGroup {
    /// Create a group whose package lives under `<repo>/pkg/apis/<name>`.
    pub fn new(name: impl Into<String>, domain: impl Into<String>, repo: &str) -> Self {
        let name = name.into();
        let package = format!("{}/pkg/apis/{}", repo, name);
        Self {
            name,
            domain: domain.into(),
            package,
            versions: Vec::new(),
        }
    }

    /// Add a version to the group.
    pub fn version(mut self, version: GroupVersion) -> Self {
        self.versions.push(version);
        self
    }

    /// Fully qualified group name (e.g., "apps.example.com").
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.name, self.domain)
    }
}

/// One version of an API group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupVersion {
    pub version: ApiVersion,
    /// Resources served by the version, in declaration order.
    pub resources: Vec<Resource>,
}

impl GroupVersion {
    pub fn new(version: ApiVersion) -> Self {
        Self {
            version,
            resources: Vec::new(),
        }
    }

    /// Add a resource to the version.
    pub fn resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    /// Returns true if any resource declares at least one subresource.
    pub fn has_subresources(&self) -> bool {
        self.resources.iter().any(|r| !r.subresources.is_empty())
    }
}

/// A top-level API resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Capitalized type name (e.g., "Widget").
    pub kind: String,
    /// Name of an author-supplied serving implementation, if any.
    pub rest: Option<String>,
    /// Strategy type used by the status endpoint.
    pub status_strategy: String,
    pub subresources: Vec<Subresource>,
}

impl Resource {
    /// Create a resource with the default `<Kind>StatusStrategy`.
    pub fn new(kind: impl Into<String>) -> Self {
        let kind = kind.into();
        let status_strategy = format!("{}StatusStrategy", kind);
        Self {
            kind,
            rest: None,
            status_strategy,
            subresources: Vec::new(),
        }
    }

    pub fn with_rest(mut self, rest: impl Into<String>) -> Self {
        self.rest = Some(rest.into());
        self
    }

    pub fn with_status_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.status_strategy = strategy.into();
        self
    }

    pub fn subresource(mut self, subresource: Subresource) -> Self {
        self.subresources.push(subresource);
        self
    }

    /// Name of the storage variable in the internal group package
    /// (e.g., "AppsWidgetStorage").
    pub fn storage_name(&self, group: &str) -> String {
        format!("{}{}Storage", to_upper_first(group), self.kind)
    }
}

/// An endpoint nested under a resource (e.g., `widgets/scale`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subresource {
    pub kind: String,
    /// Request type accepted by the endpoint.
    pub request: String,
    /// Name of an author-supplied serving implementation, if any.
    pub rest: Option<String>,
}

impl Subresource {
    pub fn new(kind: impl Into<String>, request: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            request: request.into(),
            rest: None,
        }
    }

    pub fn with_rest(mut self, rest: impl Into<String>) -> Self {
        self.rest = Some(rest.into());
        self
    }
}
