//! Two-phase artifact generation.
//!
//! [`ArtifactPlan`] is pure data: the payload plus the ordered list of files a
//! run intends to create. [`ArtifactPlan::apply`] is the only place that
//! touches the filesystem.

use std::path::{Path, PathBuf};

use kubeboot_core::{GeneratedFile, Overwrite, Result, WriteResult};
use tracing::{debug, info, warn};

use crate::{GenerationPayload, TemplateId};

/// How the outcome of an artifact affects the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactRole {
    /// Group or version scaffold. Already existing is the expected case.
    Prerequisite,
    /// A pre-existing file is a collision that changes the terminal status.
    Primary,
    /// A pre-existing file is logged and reported only.
    Advisory,
}

/// One file the plan will create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    /// Path relative to the project root.
    pub path: PathBuf,
    pub template: TemplateId,
    pub role: ArtifactRole,
}

/// What happened to one planned entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactOutcome {
    pub path: PathBuf,
    pub template: TemplateId,
    pub role: ArtifactRole,
    pub result: WriteResult,
}

impl ArtifactOutcome {
    /// A pre-existing primary or advisory artifact.
    pub fn is_collision(&self) -> bool {
        self.result == WriteResult::Skipped && self.role != ArtifactRole::Prerequisite
    }
}

/// Ordered set of artifacts sharing one payload.
#[derive(Debug, Clone)]
pub struct ArtifactPlan {
    payload: GenerationPayload,
    entries: Vec<PlanEntry>,
}

impl ArtifactPlan {
    pub fn new(payload: GenerationPayload) -> Self {
        Self {
            payload,
            entries: Vec::new(),
        }
    }

    /// Append a template, resolving its path from the payload.
    pub fn entry(mut self, template: TemplateId, role: ArtifactRole) -> Self {
        let path = template.relative_path(&self.payload);
        debug!(path = %path.display(), template = template.name(), ?role, "planned artifact");
        self.entries.push(PlanEntry {
            path,
            template,
            role,
        });
        self
    }

    pub fn payload(&self) -> &GenerationPayload {
        &self.payload
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Render every entry without writing anything.
    pub fn preview(&self) -> Result<Vec<(PathBuf, String)>> {
        self.entries
            .iter()
            .map(|entry| {
                let content = entry.template.render(&self.payload)?;
                Ok((entry.path.clone(), content))
            })
            .collect()
    }

    /// Write every entry in order under `root`.
    ///
    /// Existing files are never opened. The first I/O or render failure stops
    /// the run; files created before it stay on disk.
    pub fn apply(&self, root: &Path) -> Result<Vec<ArtifactOutcome>> {
        let mut outcomes = Vec::with_capacity(self.entries.len());

        for entry in &self.entries {
            let result = Planned {
                entry,
                payload: &self.payload,
            }
            .write(root)?;

            match (result, entry.role) {
                (WriteResult::Skipped, ArtifactRole::Prerequisite) => {
                    info!(path = %entry.path.display(), "already exists");
                }
                (WriteResult::Skipped, _) => {
                    warn!(path = %entry.path.display(), "already exists, leaving it untouched");
                }
                _ => info!(path = %entry.path.display(), "created"),
            }

            outcomes.push(ArtifactOutcome {
                path: entry.path.clone(),
                template: entry.template,
                role: entry.role,
                result,
            });
        }

        Ok(outcomes)
    }
}

struct Planned<'a> {
    entry: &'a PlanEntry,
    payload: &'a GenerationPayload,
}

impl GeneratedFile for Planned<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(&self.entry.path)
    }

    fn overwrite(&self) -> Overwrite {
        Overwrite::IfMissing
    }

    fn render(&self) -> Result<String> {
        self.entry.template.render(self.payload)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn plan() -> ArtifactPlan {
        let payload = GenerationPayload::new(
            "",
            "example.com",
            "apps",
            "v1".parse().unwrap(),
            "Widget",
            "widgets",
            "github.com/acme/widgets",
        );
        ArtifactPlan::new(payload)
            .entry(TemplateId::GroupDoc, ArtifactRole::Prerequisite)
            .entry(TemplateId::Types, ArtifactRole::Primary)
            .entry(TemplateId::TypesTest, ArtifactRole::Advisory)
    }

    #[test]
    fn test_plan_is_pure() {
        let plan = plan();
        let paths: Vec<_> = plan.entries().iter().map(|e| e.path.clone()).collect();
        assert_eq!(
            paths,
            [
                PathBuf::from("pkg/apis/apps/doc.go"),
                PathBuf::from("pkg/apis/apps/v1/widget_types.go"),
                PathBuf::from("pkg/apis/apps/v1/widget_types_test.go"),
            ]
        );
    }

    #[test]
    fn test_preview_matches_apply() {
        let temp = TempDir::new().unwrap();
        let plan = plan();

        let preview = plan.preview().unwrap();
        assert!(!temp.path().join("pkg").exists());

        plan.apply(temp.path()).unwrap();
        for (path, content) in preview {
            assert_eq!(fs::read_to_string(temp.path().join(path)).unwrap(), content);
        }
    }

    #[test]
    fn test_apply_reports_collisions_by_role() {
        let temp = TempDir::new().unwrap();
        let plan = plan();

        let first = plan.apply(temp.path()).unwrap();
        assert!(first.iter().all(|o| o.result == WriteResult::Created));

        let second = plan.apply(temp.path()).unwrap();
        let collisions: Vec<_> = second.iter().map(|o| o.is_collision()).collect();
        assert_eq!(collisions, [false, true, true]);
    }
}
