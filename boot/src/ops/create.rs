//! Create operations - resource, group and version scaffolds.

use std::path::Path;

use kubeboot_codegen::{
    ArtifactOutcome, CreateGroupRequest, CreateResourceRequest, CreateVersionRequest, RunStatus,
};
use kubeboot_core::Result;

use crate::reports::{
    GenerationReport, GenerationResult, PreviewFile, PreviewResult, WrittenFile, WrittenResult,
};

/// Execute the create-resource operation.
///
/// With `dry_run` the request is validated and planned, and every planned
/// file is rendered without touching the filesystem.
pub fn create_resource(
    request: &CreateResourceRequest,
    root: &Path,
    dry_run: bool,
) -> Result<GenerationReport> {
    let subject = format!(
        "resource {} in {}/{}",
        request.kind, request.group, request.version
    );

    let result = if dry_run {
        let files = request
            .plan()?
            .preview()?
            .into_iter()
            .map(|(path, content)| PreviewFile {
                path: path.display().to_string(),
                content,
            })
            .collect();
        GenerationResult::Preview(PreviewResult { files })
    } else {
        let report = kubeboot_codegen::create_resource(request, root)?;
        GenerationResult::Written(WrittenResult {
            root: root.to_path_buf(),
            files: report.outcomes().iter().map(WrittenFile::from).collect(),
            status: report.status(),
        })
    };

    Ok(GenerationReport { subject, result })
}

/// Execute the create-group operation.
pub fn create_group(request: &CreateGroupRequest, root: &Path) -> Result<GenerationReport> {
    let outcome = kubeboot_codegen::create_group(request, root)?;
    Ok(scaffold_report(
        format!("group {}.{}", request.group, request.domain),
        root,
        &[outcome],
    ))
}

/// Execute the create-version operation.
pub fn create_version(request: &CreateVersionRequest, root: &Path) -> Result<GenerationReport> {
    let outcomes = kubeboot_codegen::create_version(request, root)?;
    Ok(scaffold_report(
        format!("version {}/{}", request.group, request.version),
        root,
        &outcomes,
    ))
}

/// Scaffolds that already exist are never collisions.
fn scaffold_report(subject: String, root: &Path, outcomes: &[ArtifactOutcome]) -> GenerationReport {
    GenerationReport {
        subject,
        result: GenerationResult::Written(WrittenResult {
            root: root.to_path_buf(),
            files: outcomes.iter().map(WrittenFile::from).collect(),
            status: RunStatus::Completed,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn request() -> CreateResourceRequest {
        CreateResourceRequest {
            domain: "example.com".into(),
            group: "apps".into(),
            version: "v1".into(),
            kind: "Widget".into(),
            resource: None,
            repo: "github.com/acme/widgets".into(),
            boilerplate: String::new(),
        }
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();

        let report = create_resource(&request(), temp.path(), true).unwrap();

        let GenerationResult::Preview(preview) = report.result else {
            panic!("expected a preview");
        };
        assert_eq!(preview.files.len(), 8);
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_second_run_exits_with_collisions() {
        let temp = TempDir::new().unwrap();

        let first = create_resource(&request(), temp.path(), false).unwrap();
        let second = create_resource(&request(), temp.path(), false).unwrap();

        assert_eq!(first.exit_status(), 0);
        assert_eq!(second.exit_status(), 2);
    }

    #[test]
    fn test_existing_group_is_success() {
        let temp = TempDir::new().unwrap();
        let request = CreateGroupRequest {
            domain: "example.com".into(),
            group: "apps".into(),
            boilerplate: String::new(),
        };

        create_group(&request, temp.path()).unwrap();
        let report = create_group(&request, temp.path()).unwrap();

        assert_eq!(report.exit_status(), 0);
    }
}
