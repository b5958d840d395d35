//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{Manifest, validate::validate_manifest};
use crate::{Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "kubeboot.toml")
    }
}

impl Manifest {
    /// Parse a kubeboot.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a kubeboot.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse and validate a manifest, using `filename` for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use kubeboot_core::Stage;

    use super::*;

    const FULL: &str = r#"
[project]
domain = "example.com"
repo = "github.com/acme/widgets"
copyright = "hack/boilerplate.go.txt"

[[groups]]
name = "apps"

[[groups.versions]]
name = "v1alpha1"

[[groups.versions.resources]]
kind = "Widget"
rest = "WidgetREST"

[[groups.versions.resources]]
kind = "Gadget"
status_strategy = "GadgetStatus"

[[groups.versions.resources.subresources]]
kind = "GadgetScale"
request = "Scale"
"#;

    fn parse(src: &str) -> Result<Manifest> {
        src.parse()
    }

    #[test]
    fn test_parse_full_manifest() {
        let manifest = parse(FULL).unwrap();
        assert_eq!(manifest.project.domain.as_deref(), Some("example.com"));
        assert_eq!(
            manifest.project.copyright.as_deref(),
            Some(Path::new("hack/boilerplate.go.txt"))
        );

        let apps = manifest.group("apps").unwrap();
        assert_eq!(apps.versions.len(), 1);
        assert_eq!(apps.versions[0].name.stage(), Stage::Alpha(1));
        assert_eq!(apps.versions[0].resources[1].subresources[0].request, "Scale");
    }

    #[test]
    fn test_api_groups() {
        let manifest = parse(FULL).unwrap();
        let groups = manifest.api_groups("example.com", "github.com/acme/widgets");

        assert_eq!(groups.len(), 1);
        let version = &groups[0].versions[0];
        assert!(version.has_subresources());

        let widget = &version.resources[0];
        assert_eq!(widget.rest.as_deref(), Some("WidgetREST"));
        assert_eq!(widget.status_strategy, "WidgetStatusStrategy");

        let gadget = &version.resources[1];
        assert_eq!(gadget.rest, None);
        assert_eq!(gadget.status_strategy, "GadgetStatus");
        assert_eq!(gadget.subresources[0].kind, "GadgetScale");
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = parse("").unwrap();
        assert!(manifest.groups.is_empty());
        assert!(manifest.project.domain.is_none());
    }

    #[test]
    fn test_invalid_version_is_parse_error() {
        let src = "[[groups]]\nname = \"apps\"\n[[groups.versions]]\nname = \"beta1\"\n";
        let err = parse(src).unwrap_err();
        match *err {
            Error::Parse { source, .. } => {
                assert!(source.message().contains("invalid version 'beta1'"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = parse("[project]\ndomian = \"example.com\"\n").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_mixed_case_group_rejected() {
        let err = parse("[[groups]]\nname = \"Apps\"\n").unwrap_err();
        match *err {
            Error::Validation { message, span, .. } => {
                assert_eq!(message, "group 'Apps' must be lower case");
                assert_eq!(span.map(|s| s.offset()), Some(19));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_lowercase_kind_rejected() {
        let src = r#"
[[groups]]
name = "apps"
[[groups.versions]]
name = "v1"
[[groups.versions.resources]]
kind = "widget"
"#;
        let err = parse(src).unwrap_err();
        match *err {
            Error::Validation { message, .. } => {
                assert_eq!(
                    message,
                    "invalid kind 'widget': must start with an upper-case letter"
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_kind_rejected() {
        let src = r#"
[[groups]]
name = "apps"
[[groups.versions]]
name = "v1"
[[groups.versions.resources]]
kind = "Widget"
[[groups.versions.resources]]
kind = "Widget"
"#;
        let err = parse(src).unwrap_err();
        match *err {
            Error::DuplicateKind {
                scope,
                kind,
                first_span,
                second_span,
                ..
            } => {
                assert_eq!(scope, "apps/v1");
                assert_eq!(kind, "Widget");
                assert!(first_span.offset() < second_span.offset());
            }
            other => panic!("expected duplicate kind, got {other:?}"),
        }
    }

    #[test]
    fn test_same_kind_in_two_versions_allowed() {
        let src = r#"
[[groups]]
name = "apps"
[[groups.versions]]
name = "v1alpha1"
[[groups.versions.resources]]
kind = "Widget"
[[groups.versions]]
name = "v1"
[[groups.versions.resources]]
kind = "Widget"
"#;
        assert!(parse(src).is_ok());
    }

    #[test]
    fn test_duplicate_version_rejected() {
        let src = r#"
[[groups]]
name = "apps"
[[groups.versions]]
name = "v1"
[[groups.versions]]
name = "v1"
"#;
        let err = parse(src).unwrap_err();
        assert!(matches!(*err, Error::DuplicateVersion { .. }));
    }

    #[test]
    fn test_duplicate_group_rejected() {
        let src = "[[groups]]\nname = \"apps\"\n[[groups]]\nname = \"apps\"\n";
        let err = parse(src).unwrap_err();
        assert!(matches!(*err, Error::DuplicateGroup { .. }));
    }

    #[test]
    fn test_empty_subresource_request_rejected() {
        let src = r#"
[[groups]]
name = "apps"
[[groups.versions]]
name = "v1"
[[groups.versions.resources]]
kind = "Widget"
[[groups.versions.resources.subresources]]
kind = "WidgetScale"
request = ""
"#;
        let err = parse(src).unwrap_err();
        match *err {
            Error::Validation { message, .. } => {
                assert!(message.starts_with("request cannot be empty"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_domain_rejected() {
        let err = parse("[project]\ndomain = \"\"\n").unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }
}
