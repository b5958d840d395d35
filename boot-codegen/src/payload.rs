use kubeboot_core::{ApiVersion, Error, Result, pluralize, to_lower_case, to_title_case};

/// The values every resource template renders from.
///
/// Built once per resource-creation run and never mutated, so sibling
/// artifacts always agree on derived names like the plural resource segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPayload {
    boilerplate: String,
    domain: String,
    group: String,
    version: ApiVersion,
    kind: String,
    resource: String,
    repo: String,
    pluralized_kind: String,
}

impl GenerationPayload {
    pub fn new(
        boilerplate: impl Into<String>,
        domain: impl Into<String>,
        group: impl Into<String>,
        version: ApiVersion,
        kind: impl Into<String>,
        resource: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        let kind = kind.into();
        let pluralized_kind = pluralize(&kind);
        Self {
            boilerplate: boilerplate.into(),
            domain: domain.into(),
            group: group.into(),
            version,
            kind,
            resource: resource.into(),
            repo: repo.into(),
            pluralized_kind,
        }
    }

    /// Copyright header placed at the top of every file.
    pub fn boilerplate(&self) -> &str {
        &self.boilerplate
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn version(&self) -> &ApiVersion {
        &self.version
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Plural lower-case path segment (e.g., "widgets").
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Go module path of the project.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Plural kind used for client accessors (e.g., "Widgets").
    pub fn pluralized_kind(&self) -> &str {
        &self.pluralized_kind
    }

    /// Package-safe kind (e.g., "widget").
    pub fn kind_lower(&self) -> String {
        to_lower_case(&self.kind)
    }

    pub fn group_title(&self) -> String {
        to_title_case(&self.group)
    }

    pub fn version_title(&self) -> String {
        to_title_case(self.version.as_str())
    }

    pub fn resource_title(&self) -> String {
        to_title_case(&self.resource)
    }

    /// Fully qualified group name (e.g., "apps.example.com").
    pub fn qualified_group(&self) -> String {
        format!("{}.{}", self.group, self.domain)
    }

    /// Import path of the internal group package.
    pub fn group_package(&self) -> String {
        format!("{}/pkg/apis/{}", self.repo, self.group)
    }

    /// Import path of the versioned package.
    pub fn version_package(&self) -> String {
        format!("{}/{}", self.group_package(), self.version)
    }

    /// Fail with a render error if a field a template needs is empty.
    pub(crate) fn check(&self, template: &str) -> Result<()> {
        let required = [
            ("domain", &self.domain),
            ("group", &self.group),
            ("kind", &self.kind),
            ("resource", &self.resource),
            ("repo", &self.repo),
        ];
        match required.iter().find(|(_, value)| value.is_empty()) {
            Some((field, _)) => Err(Error::render(
                template,
                format!("payload field '{}' is empty", field),
            )),
            None => Ok(()),
        }
    }
}
