//! Standalone group and version scaffolds.

use std::path::{Path, PathBuf};

use kubeboot_core::{GeneratedFile, Result};
use tracing::info;

use crate::{ArtifactOutcome, ArtifactRole, GroupDoc, TemplateId, VersionDoc, validate};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateGroupRequest {
    pub domain: String,
    pub group: String,
    pub boilerplate: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateVersionRequest {
    pub domain: String,
    pub group: String,
    pub version: String,
    pub repo: String,
    pub boilerplate: String,
}

/// Create `pkg/apis/<group>/doc.go` if it does not exist.
pub fn create_group(request: &CreateGroupRequest, root: &Path) -> Result<ArtifactOutcome> {
    validate::domain(&request.domain)?;
    validate::group(&request.group)?;

    let doc = GroupDoc {
        boilerplate: &request.boilerplate,
        domain: &request.domain,
        group: &request.group,
    };
    write(&doc, doc.relative_path(), TemplateId::GroupDoc, root)
}

/// Create the group scaffold and `pkg/apis/<group>/<version>/doc.go`.
pub fn create_version(request: &CreateVersionRequest, root: &Path) -> Result<Vec<ArtifactOutcome>> {
    validate::domain(&request.domain)?;
    validate::group(&request.group)?;
    let version = validate::version(&request.version)?;
    validate::repo(&request.repo)?;

    let group = create_group(
        &CreateGroupRequest {
            domain: request.domain.clone(),
            group: request.group.clone(),
            boilerplate: request.boilerplate.clone(),
        },
        root,
    )?;

    let doc = VersionDoc {
        boilerplate: &request.boilerplate,
        domain: &request.domain,
        group: &request.group,
        version: &version,
        repo: &request.repo,
    };
    let version = write(&doc, doc.relative_path(), TemplateId::VersionDoc, root)?;

    Ok(vec![group, version])
}

fn write(
    file: &impl GeneratedFile,
    path: PathBuf,
    template: TemplateId,
    root: &Path,
) -> Result<ArtifactOutcome> {
    let result = file.write(root)?;
    info!(path = %path.display(), ?result, "scaffold");
    Ok(ArtifactOutcome {
        path,
        template,
        role: ArtifactRole::Prerequisite,
        result,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use kubeboot_core::WriteResult;
    use tempfile::TempDir;

    use super::*;

    fn version_request() -> CreateVersionRequest {
        CreateVersionRequest {
            domain: "example.com".into(),
            group: "apps".into(),
            version: "v1beta1".into(),
            repo: "github.com/acme/widgets".into(),
            boilerplate: "// Copyright Acme".into(),
        }
    }

    #[test]
    fn test_create_version_creates_group_too() {
        let temp = TempDir::new().unwrap();

        let outcomes = create_version(&version_request(), temp.path()).unwrap();

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| o.result == WriteResult::Created));
        let group_doc = fs::read_to_string(temp.path().join("pkg/apis/apps/doc.go")).unwrap();
        assert!(group_doc.starts_with("// Copyright Acme\n\n"));
        assert!(temp.path().join("pkg/apis/apps/v1beta1/doc.go").exists());
    }

    #[test]
    fn test_existing_scaffold_is_not_a_collision() {
        let temp = TempDir::new().unwrap();
        create_version(&version_request(), temp.path()).unwrap();

        let outcomes = create_version(&version_request(), temp.path()).unwrap();

        assert!(outcomes.iter().all(|o| o.result == WriteResult::Skipped));
        assert!(outcomes.iter().all(|o| !o.is_collision()));
    }

    #[test]
    fn test_create_group_rejects_mixed_case() {
        let temp = TempDir::new().unwrap();
        let request = CreateGroupRequest {
            domain: "example.com".into(),
            group: "Apps".into(),
            boilerplate: String::new(),
        };

        let err = create_group(&request, temp.path()).unwrap_err();

        assert!(err.is_validation());
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }
}
