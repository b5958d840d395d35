use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Holds the manifest text and filename so every diagnostic can point back
/// into the file it came from.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error, optionally pointing at a span.
    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    pub fn duplicate_group_error(&self, name: &str, spans: (SourceSpan, SourceSpan)) -> Box<Error> {
        Box::new(Error::DuplicateGroup {
            src: self.named_source(),
            first_span: spans.0,
            second_span: spans.1,
            name: name.to_string(),
        })
    }

    pub fn duplicate_version_error(
        &self,
        group: &str,
        version: &str,
        spans: (SourceSpan, SourceSpan),
    ) -> Box<Error> {
        Box::new(Error::DuplicateVersion {
            src: self.named_source(),
            first_span: spans.0,
            second_span: spans.1,
            group: group.to_string(),
            version: version.to_string(),
        })
    }

    pub fn duplicate_kind_error(
        &self,
        scope: &str,
        kind: &str,
        spans: (SourceSpan, SourceSpan),
    ) -> Box<Error> {
        Box::new(Error::DuplicateKind {
            src: self.named_source(),
            first_span: spans.0,
            second_span: spans.1,
            scope: scope.to_string(),
            kind: kind.to_string(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(
        code(kubeboot::manifest_io),
        help("create a kubeboot.toml in the project root or pass --manifest")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse kubeboot.toml")]
    #[diagnostic(code(kubeboot::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(kubeboot::manifest_validation))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("duplicate group '{name}'")]
    #[diagnostic(
        code(kubeboot::duplicate_group),
        help("merge the versions of both '{name}' entries into a single [[groups]] table")
    )]
    DuplicateGroup {
        #[source_code]
        src: NamedSource<String>,
        #[label("first declared here")]
        first_span: SourceSpan,
        #[label("declared again here")]
        second_span: SourceSpan,
        name: String,
    },

    #[error("duplicate version '{version}' in group '{group}'")]
    #[diagnostic(
        code(kubeboot::duplicate_version),
        help("a version may appear only once per group")
    )]
    DuplicateVersion {
        #[source_code]
        src: NamedSource<String>,
        #[label("first declared here")]
        first_span: SourceSpan,
        #[label("declared again here")]
        second_span: SourceSpan,
        group: String,
        version: String,
    },

    #[error("duplicate kind '{kind}' in {scope}")]
    #[diagnostic(
        code(kubeboot::duplicate_kind),
        help("a kind may appear only once per version; rename one of them")
    )]
    DuplicateKind {
        #[source_code]
        src: NamedSource<String>,
        #[label("first declared here")]
        first_span: SourceSpan,
        #[label("declared again here")]
        second_span: SourceSpan,
        scope: String,
        kind: String,
    },
}

impl Error {
    /// Create an I/O error for the given path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }
}
