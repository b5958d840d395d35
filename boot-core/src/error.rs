use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for kubeboot operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Fatal errors raised while generating artifacts.
///
/// A pre-existing artifact is not an error: it is reported as
/// [`WriteResult::Skipped`](crate::WriteResult::Skipped).
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("invalid --{field} '{value}'")]
    #[diagnostic(code(kubeboot::validation), help("{reason}"))]
    Validation {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to write '{path}'")]
    #[diagnostic(
        code(kubeboot::io),
        help("artifacts already created are kept and will be skipped when the command is re-run")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template '{template}' failed to render: {message}")]
    #[diagnostic(code(kubeboot::render))]
    Render { template: String, message: String },
}

impl Error {
    /// Create a validation error for a request field
    pub fn validation(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Box<Self> {
        Box::new(Error::Validation {
            field,
            value: value.into(),
            reason: reason.into(),
        })
    }

    /// Create an I/O error for the given path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }

    /// Create a render error for the given template
    pub fn render(template: impl Into<String>, message: impl Into<String>) -> Box<Self> {
        Box::new(Error::Render {
            template: template.into(),
            message: message.into(),
        })
    }

    /// Whether the error was raised before any file was touched.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}
