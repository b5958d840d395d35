//! Register operation - scheme registration from the manifest.

use std::path::Path;

use kubeboot_codegen::{Registration, RunStatus};
use kubeboot_core::{Error, GeneratedFile, Result};
use kubeboot_manifest::Manifest;
use tracing::info;

use crate::reports::{
    GenerationReport, GenerationResult, PreviewFile, PreviewResult, WrittenFile, WrittenResult,
};

/// Options for the register operation.
pub struct RegisterOptions<'a> {
    pub root: &'a Path,
    pub domain: &'a str,
    pub repo: &'a str,
    pub boilerplate: &'a str,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the register operation.
///
/// Renders one registration file per group version declared in the
/// manifest. Registration files are machine-owned and always rewritten.
pub fn register(manifest: &Manifest, opts: RegisterOptions) -> Result<GenerationReport> {
    if opts.domain.is_empty() {
        return Err(Error::validation(
            "domain",
            opts.domain,
            "pass --domain or set project.domain in kubeboot.toml",
        ));
    }
    if opts.repo.is_empty() {
        return Err(Error::validation(
            "repo",
            opts.repo,
            "pass --repo, set project.repo in kubeboot.toml or add a go.mod",
        ));
    }

    let groups = manifest.api_groups(opts.domain, opts.repo);
    let registrations: Vec<_> = groups
        .iter()
        .flat_map(|group| {
            group
                .versions
                .iter()
                .map(move |version| Registration::new(group, version, opts.boilerplate))
        })
        .collect();

    let subject = format!(
        "registration for {} version{}",
        registrations.len(),
        if registrations.len() == 1 { "" } else { "s" }
    );

    let result = if opts.dry_run {
        let files = registrations
            .iter()
            .map(|registration| {
                Ok(PreviewFile {
                    path: registration.relative_path().display().to_string(),
                    content: registration.render()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        GenerationResult::Preview(PreviewResult { files })
    } else {
        let mut files = Vec::with_capacity(registrations.len());
        for registration in &registrations {
            let result = registration.write(opts.root)?;
            let path = registration.relative_path().display().to_string();
            info!(path = %path, ?result, "registration");
            files.push(WrittenFile {
                path,
                result,
                collision: false,
            });
        }
        GenerationResult::Written(WrittenResult {
            root: opts.root.to_path_buf(),
            files,
            status: RunStatus::Completed,
        })
    };

    Ok(GenerationReport { subject, result })
}
