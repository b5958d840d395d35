use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{Error, Result};

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// How an existing file at the path is treated
    fn overwrite(&self) -> Overwrite;

    /// Render the file content
    fn render(&self) -> Result<String>;

    /// Write the file to disk
    fn write(&self, base: &Path) -> Result<WriteResult> {
        write_artifact(&self.path(base), self.overwrite(), || self.render())
    }
}

/// Write a single artifact.
///
/// The parent directory is created first. With [`Overwrite::IfMissing`] an
/// existing file is never opened, read or truncated; `render` is only called
/// when the file is about to be created. Every I/O failure is returned as
/// [`Error::Io`] and nothing is retried.
pub fn write_artifact<F>(path: &Path, overwrite: Overwrite, render: F) -> Result<WriteResult>
where
    F: FnOnce() -> Result<String>,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let existed = path.try_exists().map_err(|e| Error::io(path, e))?;

    match overwrite {
        Overwrite::IfMissing => {
            if existed {
                debug!(path = %path.display(), "artifact exists, skipping");
                return Ok(WriteResult::Skipped);
            }

            let content = render()?;
            // create_new refuses to clobber a file that appeared after the check
            let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    return Ok(WriteResult::Skipped);
                }
                Err(e) => return Err(Error::io(path, e)),
            };
            file.write_all(content.as_bytes())
                .map_err(|e| Error::io(path, e))?;
            Ok(WriteResult::Created)
        }
        Overwrite::Always => {
            let content = render()?;
            fs::write(path, content).map_err(|e| Error::io(path, e))?;
            if existed {
                Ok(WriteResult::Overwritten)
            } else {
                Ok(WriteResult::Created)
            }
        }
    }
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File did not exist and was written
    Created,
    /// File existed and was replaced
    Overwritten,
    /// File existed and was left untouched
    Skipped,
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Always overwrite (machine-owned generated code)
    Always,
    /// Only create if file doesn't exist (scaffolds users edit)
    IfMissing,
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn content(s: &str) -> impl FnOnce() -> Result<String> + '_ {
        move || Ok(s.to_string())
    }

    #[test]
    fn test_if_missing_creates_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.go");

        let result = write_artifact(&path, Overwrite::IfMissing, content("hello")).unwrap();

        assert_eq!(result, WriteResult::Created);
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_if_missing_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("c").join("test.go");

        write_artifact(&path, Overwrite::IfMissing, content("nested")).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_if_missing_skips_existing_without_rendering() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("existing.go");
        fs::write(&path, "user code").unwrap();

        let result = write_artifact(&path, Overwrite::IfMissing, || {
            panic!("render must not run for an existing artifact")
        })
        .unwrap();

        assert_eq!(result, WriteResult::Skipped);
        assert_eq!(fs::read_to_string(&path).unwrap(), "user code");
    }

    #[test]
    fn test_if_missing_skips_empty_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.go");
        fs::write(&path, "").unwrap();

        let result = write_artifact(&path, Overwrite::IfMissing, content("stub")).unwrap();

        assert_eq!(result, WriteResult::Skipped);
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_always_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("zz_generated.go");

        let first = write_artifact(&path, Overwrite::Always, content("first")).unwrap();
        let second = write_artifact(&path, Overwrite::Always, content("second")).unwrap();

        assert_eq!(first, WriteResult::Created);
        assert_eq!(second, WriteResult::Overwritten);
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_render_error_leaves_no_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.go");

        let err = write_artifact(&path, Overwrite::IfMissing, || {
            Err(Error::render("broken", "missing field"))
        })
        .unwrap_err();

        assert!(matches!(*err, Error::Render { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_unwritable_parent_is_io_error() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("pkg");
        fs::write(&blocker, "not a directory").unwrap();

        let err = write_artifact(
            &blocker.join("apis").join("doc.go"),
            Overwrite::IfMissing,
            content("x"),
        )
        .unwrap_err();

        assert!(matches!(*err, Error::Io { .. }));
    }
}
