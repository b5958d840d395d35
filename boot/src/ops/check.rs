//! Check operation - manifest validation.

use kubeboot_manifest::ProjectToml;

use crate::reports::CheckReport;

/// Summarize a manifest that parsed and validated.
pub fn check(project: &ProjectToml) -> CheckReport {
    let manifest = project.manifest();
    let versions = manifest
        .groups
        .iter()
        .flat_map(|group| {
            group.versions.iter().map(move |version| {
                (
                    format!("{}/{}", group.name, version.name),
                    version.resources.iter().map(|r| r.kind.clone()).collect(),
                )
            })
        })
        .collect();

    CheckReport {
        config_path: project.path().to_path_buf(),
        domain: manifest.project.domain.clone(),
        versions,
    }
}
