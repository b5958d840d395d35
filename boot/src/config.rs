//! Resolution of command-line flags against project defaults.
//!
//! Explicit flags win over the `[project]` table of kubeboot.toml, which wins
//! over what can be read from the workspace (go.mod, boilerplate.go.txt).

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use eyre::{Context, Result, bail};
use kubeboot_manifest::{Manifest, ProjectToml};
use tracing::{debug, warn};

use crate::commands::{ProjectArgs, UnwrapOrExit};

/// Conventional copyright header file in the project root.
pub const BOILERPLATE_FILE: &str = "boilerplate.go.txt";

/// A project root and its manifest, if it has one.
pub struct Project {
    root: PathBuf,
    manifest: Option<ProjectToml>,
}

impl Project {
    /// Open the project at `root`, exiting with a diagnostic on a bad manifest.
    pub fn open(root: &Path) -> Self {
        let manifest = ProjectToml::discover(root).unwrap_or_exit();
        if let Some(manifest) = &manifest {
            debug!(path = %manifest.path().display(), "loaded manifest");
        }
        Self {
            root: root.to_path_buf(),
            manifest,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_ref().map(ProjectToml::manifest)
    }

    /// Domain from the flag or the manifest. Empty when neither sets it,
    /// leaving the rejection to request validation.
    pub fn domain(&self, flag: Option<&str>) -> String {
        flag.map(str::to_string)
            .or_else(|| self.manifest().and_then(|m| m.project.domain.clone()))
            .unwrap_or_default()
    }

    /// Go module path from the flag, the manifest or go.mod.
    pub fn repo(&self, flag: Option<&str>) -> Result<String> {
        if let Some(repo) = flag {
            return Ok(repo.to_string());
        }
        if let Some(repo) = self.manifest().and_then(|m| m.project.repo.clone()) {
            return Ok(repo);
        }
        Ok(go_module(&self.root)?.unwrap_or_default())
    }

    /// Copyright header for generated files.
    ///
    /// A configured file that does not exist yields an empty header. Without
    /// any configuration the conventional file must exist.
    pub fn boilerplate(&self, flag: Option<&Path>) -> Result<String> {
        let configured = flag.map(Path::to_path_buf).or_else(|| {
            self.manifest()
                .and_then(|m| m.project.copyright.as_ref())
                .map(|p| self.root.join(p))
        });

        match configured {
            Some(path) => match fs::read_to_string(&path) {
                Ok(content) => Ok(content),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    warn!(path = %path.display(), "copyright file not found, using an empty header");
                    Ok(String::new())
                }
                Err(e) => {
                    Err(e).wrap_err_with(|| format!("Failed to read {}", path.display()))
                }
            },
            None => {
                let path = self.root.join(BOILERPLATE_FILE);
                if !path.exists() {
                    bail!(
                        "no copyright header found at {}, pass --copyright <file>",
                        path.display()
                    );
                }
                fs::read_to_string(&path)
                    .wrap_err_with(|| format!("Failed to read {}", path.display()))
            }
        }
    }
}

impl ProjectArgs {
    pub fn project(&self) -> Project {
        Project::open(&self.root)
    }
}

/// Module path declared in `<root>/go.mod`, if there is one.
pub fn go_module(root: &Path) -> Result<Option<String>> {
    let path = root.join("go.mod");
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).wrap_err_with(|| format!("Failed to read {}", path.display())),
    };

    Ok(content.lines().find_map(|line| {
        line.trim()
            .strip_prefix("module ")
            .map(|module| module.trim().trim_matches('"').to_string())
    }))
}
