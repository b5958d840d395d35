use std::path::{Path, PathBuf};

use kubeboot_core::{ApiVersion, GeneratedFile, Overwrite, Result};

use super::header;
use crate::GenerationPayload;

/// Internal (unversioned) group package declaration, `pkg/apis/<group>/doc.go`.
#[derive(Debug, Clone, Copy)]
pub struct GroupDoc<'a> {
    pub boilerplate: &'a str,
    pub domain: &'a str,
    pub group: &'a str,
}

impl<'a> From<&'a GenerationPayload> for GroupDoc<'a> {
    fn from(p: &'a GenerationPayload) -> Self {
        Self {
            boilerplate: p.boilerplate(),
            domain: p.domain(),
            group: p.group(),
        }
    }
}

impl GroupDoc<'_> {
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from("pkg")
            .join("apis")
            .join(self.group)
            .join("doc.go")
    }

    pub fn to_source(&self) -> String {
        header(self.boilerplate)
            .line("// +k8s:deepcopy-gen=package,register")
            .line(&format!("// +groupName={}.{}", self.group, self.domain))
            .blank()
            .line("// Package api is the internal version of the API.")
            .line(&format!("package {}", self.group))
            .build()
    }
}

impl GeneratedFile for GroupDoc<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.relative_path())
    }

    fn overwrite(&self) -> Overwrite {
        Overwrite::IfMissing
    }

    fn render(&self) -> Result<String> {
        Ok(self.to_source())
    }
}

/// Versioned package declaration with the code-generation tags,
/// `pkg/apis/<group>/<version>/doc.go`.
#[derive(Debug, Clone, Copy)]
pub struct VersionDoc<'a> {
    pub boilerplate: &'a str,
    pub domain: &'a str,
    pub group: &'a str,
    pub version: &'a ApiVersion,
    pub repo: &'a str,
}

impl<'a> From<&'a GenerationPayload> for VersionDoc<'a> {
    fn from(p: &'a GenerationPayload) -> Self {
        Self {
            boilerplate: p.boilerplate(),
            domain: p.domain(),
            group: p.group(),
            version: p.version(),
            repo: p.repo(),
        }
    }
}

impl VersionDoc<'_> {
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from("pkg")
            .join("apis")
            .join(self.group)
            .join(self.version.as_str())
            .join("doc.go")
    }

    pub fn to_source(&self) -> String {
        let group_package = format!("{}/pkg/apis/{}", self.repo, self.group);
        header(self.boilerplate)
            .comment("Api versions allow the api contract for a resource to be changed while keeping")
            .comment("backward compatibility by support multiple concurrent versions")
            .comment("of the same resource")
            .blank()
            .line("// +k8s:openapi-gen=true")
            .line("// +k8s:deepcopy-gen=package,register")
            .line(&format!("// +k8s:conversion-gen={}", group_package))
            .line("// +k8s:defaulter-gen=TypeMeta")
            .line(&format!("// +groupName={}.{}", self.group, self.domain))
            .line(&format!(
                "package {} // import \"{}/{}\"",
                self.version, group_package, self.version
            ))
            .build()
    }
}

impl GeneratedFile for VersionDoc<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.relative_path())
    }

    fn overwrite(&self) -> Overwrite {
        Overwrite::IfMissing
    }

    fn render(&self) -> Result<String> {
        Ok(self.to_source())
    }
}
