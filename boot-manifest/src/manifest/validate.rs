//! Validation context and utilities for manifest parsing.

use std::{collections::HashSet, sync::Arc};

use miette::SourceSpan;

use super::{GroupConfig, Manifest, ResourceConfig, VersionConfig};
use crate::{Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// Tracks where in the group/version/resource tree validation currently is,
/// so errors can name the offending scope and spans can be searched for after
/// the enclosing declaration rather than from the top of the file.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "kubeboot.toml");
/// let group = ctx.push("apps", ctx.offset_of("name", "apps"));
/// group.check_kind("kind", "widget")?; // error: must start with an upper-case letter
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Path segments (e.g., ["apps", "v1alpha1"])
    path: Vec<String>,
    /// Byte offset to start span searches from
    offset: usize,
}

impl ParseContext {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
            offset: 0,
        }
    }

    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context that searches from `offset`.
    pub fn push(&self, segment: &str, offset: usize) -> Self {
        let mut path = self.path.clone();
        path.push(segment.to_string());
        Self {
            source: Arc::clone(&self.source),
            path,
            offset,
        }
    }

    /// Get the current path joined with slashes (e.g., "apps/v1alpha1").
    pub fn path_string(&self) -> String {
        self.path.join("/")
    }

    /// Describe the current scope for error messages.
    pub fn context_for(&self, what: &str) -> String {
        if self.path.is_empty() {
            what.to_string()
        } else {
            format!("{} '{}'", what, self.path_string())
        }
    }

    /// Byte offset of the first `key = "value"` at or after the current offset.
    pub fn offset_of(&self, key: &str, value: &str) -> usize {
        find_value_spans(self.source.src(), self.offset, key, value)
            .first()
            .map_or(self.offset, |span| span.offset())
    }

    /// Span of the first `key = "value"` at or after the current offset.
    pub fn find_span(&self, key: &str, value: &str) -> Option<SourceSpan> {
        find_value_spans(self.source.src(), self.offset, key, value)
            .first()
            .copied()
    }

    /// Spans of the first two `key = "value"` entries at or after the current offset.
    pub fn find_duplicate_spans(&self, key: &str, value: &str) -> Option<(SourceSpan, SourceSpan)> {
        let spans = find_value_spans(self.source.src(), self.offset, key, value);
        match spans.as_slice() {
            [first, second, ..] => Some((*first, *second)),
            _ => None,
        }
    }

    fn error(&self, message: String, key: &str, value: &str) -> Box<crate::Error> {
        self.source
            .validation_error(message, self.find_span(key, value))
    }

    /// Group names must be non-empty and lower case.
    pub fn check_group(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(self.error("group name cannot be empty".into(), "name", name));
        }
        if name != name.to_lowercase() {
            return Err(self.error(
                format!("group '{}' must be lower case", name),
                "name",
                name,
            ));
        }
        Ok(())
    }

    /// Kinds must be Go identifiers starting with an upper-case letter.
    pub fn check_kind(&self, field: &str, kind: &str) -> Result<()> {
        if kind.is_empty() {
            return Err(self.error(
                format!("{} cannot be empty under '{}'", field, self.path_string()),
                field,
                kind,
            ));
        }
        if let Some(reason) = validate_go_type_name(kind) {
            return Err(self.error(
                format!("invalid {} '{}': {}", field, kind, reason),
                field,
                kind,
            ));
        }
        Ok(())
    }

    /// Optional identifiers may be omitted but not left empty.
    pub fn check_optional(&self, field: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) if value.is_empty() => Err(self.error(
                format!(
                    "{} cannot be empty in {}; omit it instead",
                    field,
                    self.context_for("resource")
                ),
                field,
                value,
            )),
            Some(value) => match validate_go_type_name(value) {
                Some(reason) => Err(self.error(
                    format!("invalid {} '{}': {}", field, value, reason),
                    field,
                    value,
                )),
                None => Ok(()),
            },
            None => Ok(()),
        }
    }
}

/// Validate the whole manifest after parsing.
pub(crate) fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    if manifest.project.domain.as_deref() == Some("") {
        return Err(ctx
            .source_context()
            .validation_error("project domain cannot be empty", ctx.find_span("domain", "")));
    }

    let mut seen = HashSet::new();
    for group in &manifest.groups {
        if !seen.insert(group.name.as_str()) {
            return Err(duplicate(&ctx, "name", &group.name, |spans| {
                ctx.source_context()
                    .duplicate_group_error(&group.name, spans)
            }));
        }
        validate_group(&ctx, group)?;
    }
    Ok(())
}

fn validate_group(ctx: &ParseContext, group: &GroupConfig) -> Result<()> {
    ctx.check_group(&group.name)?;
    let group_ctx = ctx.push(&group.name, ctx.offset_of("name", &group.name));

    let mut seen = HashSet::new();
    for version in &group.versions {
        let name = version.name.as_str();
        if !seen.insert(name) {
            return Err(duplicate(&group_ctx, "name", name, |spans| {
                group_ctx
                    .source_context()
                    .duplicate_version_error(&group.name, name, spans)
            }));
        }
        let version_ctx = group_ctx.push(name, group_ctx.offset_of("name", name));
        validate_version(&version_ctx, version)?;
    }
    Ok(())
}

fn validate_version(ctx: &ParseContext, version: &VersionConfig) -> Result<()> {
    let mut seen = HashSet::new();
    for resource in &version.resources {
        ctx.check_kind("kind", &resource.kind)?;
        if !seen.insert(resource.kind.as_str()) {
            let scope = ctx.path_string();
            return Err(duplicate(ctx, "kind", &resource.kind, |spans| {
                ctx.source_context()
                    .duplicate_kind_error(&scope, &resource.kind, spans)
            }));
        }
        validate_resource(ctx, resource)?;
    }
    Ok(())
}

fn validate_resource(ctx: &ParseContext, resource: &ResourceConfig) -> Result<()> {
    let ctx = ctx.push(&resource.kind, ctx.offset_of("kind", &resource.kind));
    ctx.check_optional("rest", resource.rest.as_deref())?;
    ctx.check_optional("status_strategy", resource.status_strategy.as_deref())?;

    for sub in &resource.subresources {
        ctx.check_kind("kind", &sub.kind)?;
        ctx.check_kind("request", &sub.request)?;
        ctx.check_optional("rest", sub.rest.as_deref())?;
    }
    Ok(())
}

/// Build a duplicate error with both spans, or a plain validation error when
/// the declarations cannot be located in the source.
fn duplicate<F>(ctx: &ParseContext, key: &str, value: &str, with_spans: F) -> Box<crate::Error>
where
    F: FnOnce((SourceSpan, SourceSpan)) -> Box<crate::Error>,
{
    match ctx.find_duplicate_spans(key, value) {
        Some(spans) => with_spans(spans),
        None => ctx.source_context().validation_error(
            format!("'{}' is declared more than once in {}", value, ctx.context_for("scope")),
            None,
        ),
    }
}

/// Find every `key = "value"` (or single-quoted) at or after `from`.
///
/// Spans cover the value text without its quotes.
pub(crate) fn find_value_spans(src: &str, from: usize, key: &str, value: &str) -> Vec<SourceSpan> {
    let Some(haystack) = src.get(from..) else {
        return Vec::new();
    };

    let mut spans = Vec::new();
    for quote in ['"', '\''] {
        for spacing in [" = ", "="] {
            let pattern = format!("{}{}{}{}{}", key, spacing, quote, value, quote);
            for (pos, _) in haystack.match_indices(&pattern) {
                // Reject matches inside a longer key (e.g., "subkind")
                let preceding = haystack[..pos].chars().next_back();
                if preceding.is_some_and(|c| c.is_alphanumeric() || c == '_') {
                    continue;
                }
                let start = from + pos + key.len() + spacing.len() + 1;
                spans.push(SourceSpan::from((start, value.len())));
            }
        }
    }
    spans.sort_by_key(|span| span.offset());
    spans
}

/// Validate that a name is an exported Go type name.
/// Returns None if valid, Some(reason) if invalid.
pub(crate) fn validate_go_type_name(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Some("name cannot be empty");
    };
    if !first.is_uppercase() {
        return Some("must start with an upper-case letter");
    }
    if !chars.all(|c| c.is_alphanumeric() || c == '_') {
        return Some("may only contain letters, digits and underscores");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_value_spans() {
        let src = "kind = \"Widget\"\nsubkind = \"Widget\"\nkind='Widget'\n";
        let spans = find_value_spans(src, 0, "kind", "Widget");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].offset(), 8);
        assert_eq!(spans[0].len(), 6);
        assert_eq!(&src[spans[1].offset()..spans[1].offset() + 6], "Widget");
    }

    #[test]
    fn test_find_value_spans_from_offset() {
        let src = "kind = \"Widget\"\nkind = \"Widget\"\n";
        let spans = find_value_spans(src, 1, "kind", "Widget");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].offset(), 24);
    }

    #[test]
    fn test_validate_go_type_name() {
        assert_eq!(validate_go_type_name("Widget"), None);
        assert_eq!(validate_go_type_name("WidgetV2"), None);
        assert!(validate_go_type_name("").is_some());
        assert!(validate_go_type_name("widget").is_some());
        assert!(validate_go_type_name("Wid-get").is_some());
        assert!(validate_go_type_name("9Lives").is_some());
    }
}
