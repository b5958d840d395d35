//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from manifest validation.
#[derive(Debug)]
pub struct CheckReport {
    pub config_path: PathBuf,
    pub domain: Option<String>,
    /// One entry per group version, e.g. ("apps/v1alpha1", ["Widget"]).
    pub versions: Vec<(String, Vec<String>)>,
}

impl CheckReport {
    pub fn resource_count(&self) -> usize {
        self.versions.iter().map(|(_, kinds)| kinds.len()).sum()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();

        if let Some(domain) = &self.domain {
            out.key_value("Domain", domain);
        }

        let count = self.resource_count();
        out.section(&format!(
            "{} resource{}",
            count,
            if count == 1 { "" } else { "s" }
        ));
        for (version, kinds) in &self.versions {
            if kinds.is_empty() {
                out.list_item(version);
            } else {
                out.list_item(&format!("{}: {}", version, kinds.join(", ")));
            }
        }
    }
}
