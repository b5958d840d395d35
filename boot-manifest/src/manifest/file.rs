use std::path::{Path, PathBuf};

use super::Manifest;
use crate::{Error, Result};

/// Conventional manifest filename in the project root.
pub const MANIFEST_FILE: &str = "kubeboot.toml";

/// Represents a kubeboot.toml file with both raw content and parsed manifest.
#[derive(Debug)]
pub struct ProjectToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl ProjectToml {
    /// Open and parse a kubeboot.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let manifest = Manifest::from_str_with_filename(&content, &path.display().to_string())?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    /// Open `kubeboot.toml` in `root` if it exists.
    pub fn discover(root: &Path) -> Result<Option<Self>> {
        let path = root.join(MANIFEST_FILE);
        let exists = path.try_exists().map_err(|e| Error::io(&path, e))?;
        if exists {
            Self::open(path).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_discover_missing() {
        let temp = TempDir::new().unwrap();
        assert!(ProjectToml::discover(temp.path()).unwrap().is_none());
    }

    #[test]
    fn test_discover_existing() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(MANIFEST_FILE),
            "[project]\ndomain = \"example.com\"\n",
        )
        .unwrap();

        let toml = ProjectToml::discover(temp.path()).unwrap().unwrap();
        assert_eq!(toml.path(), temp.path().join(MANIFEST_FILE));
        assert_eq!(
            toml.manifest().project.domain.as_deref(),
            Some("example.com")
        );
        assert!(toml.content().contains("example.com"));
    }

    #[test]
    fn test_open_missing_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = ProjectToml::open(temp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
