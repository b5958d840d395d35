//! Report for commands that write or preview generated files.

use std::path::PathBuf;

use kubeboot_codegen::{ArtifactOutcome, RunStatus};
use kubeboot_core::WriteResult;

use super::output::{Output, Report};

/// Report data from a generating command.
#[derive(Debug)]
pub struct GenerationReport {
    /// What was generated (e.g., "resource Widget in apps/v1alpha1").
    pub subject: String,
    pub result: GenerationResult,
}

#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

#[derive(Debug)]
pub struct WrittenResult {
    pub root: PathBuf,
    pub files: Vec<WrittenFile>,
    pub status: RunStatus,
}

#[derive(Debug)]
pub struct WrittenFile {
    /// Path relative to the project root.
    pub path: String,
    pub result: WriteResult,
    /// A pre-existing file the command meant to create.
    pub collision: bool,
}

impl From<&ArtifactOutcome> for WrittenFile {
    fn from(outcome: &ArtifactOutcome) -> Self {
        Self {
            path: outcome.path.display().to_string(),
            result: outcome.result,
            collision: outcome.is_collision(),
        }
    }
}

#[derive(Debug)]
pub struct PreviewResult {
    pub files: Vec<PreviewFile>,
}

#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl GenerationReport {
    /// Process exit status for the run.
    pub fn exit_status(&self) -> u8 {
        match &self.result {
            GenerationResult::Written(WrittenResult {
                status: RunStatus::CompletedWithCollisions,
                ..
            }) => 2,
            _ => 0,
        }
    }

    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        let (skipped, written_files): (Vec<_>, Vec<_>) = written
            .files
            .iter()
            .partition(|f| f.result == WriteResult::Skipped);

        if !written_files.is_empty() {
            out.section("Written");
            for file in &written_files {
                out.added_item(&file.path);
            }
        }

        if !skipped.is_empty() {
            if !written_files.is_empty() {
                out.newline();
            }
            out.section("Already exists");
            for file in &skipped {
                if file.collision {
                    out.skipped_item(&file.path);
                } else {
                    out.list_item(&file.path);
                }
            }
        }

        out.newline();
        out.key_value("Project", &written.root.display().to_string());
        match written.status {
            RunStatus::Completed => out.preformatted(&format!("✓ {}", self.subject)),
            RunStatus::CompletedWithCollisions => {
                out.warning(&format!("{} already exists", self.subject))
            }
        }
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!(
            "{} files would be generated for {}",
            preview.files.len(),
            self.subject
        ));
    }
}

impl Report for GenerationReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    fn report(status: RunStatus, files: Vec<WrittenFile>) -> GenerationReport {
        GenerationReport {
            subject: "resource Widget in apps/v1alpha1".into(),
            result: GenerationResult::Written(WrittenResult {
                root: PathBuf::from("."),
                files,
                status,
            }),
        }
    }

    fn file(path: &str, result: WriteResult) -> WrittenFile {
        WrittenFile {
            path: path.into(),
            result,
            collision: result == WriteResult::Skipped,
        }
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(report(RunStatus::Completed, vec![]).exit_status(), 0);
        assert_eq!(
            report(RunStatus::CompletedWithCollisions, vec![]).exit_status(),
            2
        );
    }

    #[test]
    fn test_render_written() {
        let report = report(
            RunStatus::CompletedWithCollisions,
            vec![
                file("pkg/apis/apps/doc.go", WriteResult::Created),
                file("pkg/controller/widget/controller.go", WriteResult::Skipped),
            ],
        );
        let mut out = BufferOutput::default();

        report.render(&mut out);

        assert_eq!(
            out.lines,
            [
                "Written:",
                "  + pkg/apis/apps/doc.go",
                "",
                "Already exists:",
                "  = pkg/controller/widget/controller.go",
                "",
                "Project: .",
                "warning: resource Widget in apps/v1alpha1 already exists",
            ]
        );
    }
}
