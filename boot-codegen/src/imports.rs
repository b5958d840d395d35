//! Go import block collection.

use indexmap::IndexMap;

use crate::CodeBuilder;

/// Tracks Go imports and deduplicates them.
///
/// Imports are kept in insertion order, grouped into blank-line separated
/// sections, so rendering the same inputs always yields the same block.
///
/// # Example
///
/// ```
/// use kubeboot_codegen::GoImports;
///
/// let mut imports = GoImports::new();
/// imports.add("log");
/// imports.section();
/// imports.add_as("metav1", "k8s.io/apimachinery/pkg/apis/meta/v1");
///
/// assert!(imports.contains("log"));
/// assert_eq!(imports.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct GoImports {
    /// Import path -> optional alias, one map per section
    sections: Vec<IndexMap<String, Option<String>>>,
}

impl Default for GoImports {
    fn default() -> Self {
        Self {
            sections: vec![IndexMap::new()],
        }
    }
}

impl GoImports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Import a package under its own name. Re-adding a path is a no-op.
    pub fn add(&mut self, path: impl Into<String>) -> &mut Self {
        self.insert(path.into(), None)
    }

    /// Import a package under an alias (`.` for dot imports).
    pub fn add_as(&mut self, alias: impl Into<String>, path: impl Into<String>) -> &mut Self {
        self.insert(path.into(), Some(alias.into()))
    }

    /// Start a new section; later imports render after a blank line.
    pub fn section(&mut self) -> &mut Self {
        if self.sections.last().is_some_and(|s| !s.is_empty()) {
            self.sections.push(IndexMap::new());
        }
        self
    }

    pub fn contains(&self, path: &str) -> bool {
        self.sections.iter().any(|s| s.contains_key(path))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the number of imported packages.
    pub fn len(&self) -> usize {
        self.sections.iter().map(IndexMap::len).sum()
    }

    /// Render an `import ( ... )` block. Nothing is written when empty.
    pub fn render(&self, builder: CodeBuilder) -> CodeBuilder {
        if self.is_empty() {
            return builder;
        }

        let sections: Vec<_> = self.sections.iter().filter(|s| !s.is_empty()).collect();
        let mut builder = builder.line("import (").indent();
        for (i, section) in sections.iter().enumerate() {
            if i > 0 {
                builder = builder.blank();
            }
            for (path, alias) in section.iter() {
                builder = match alias {
                    Some(alias) => builder.line(&format!("{} \"{}\"", alias, path)),
                    None => builder.line(&format!("\"{}\"", path)),
                };
            }
        }
        builder.dedent().line(")")
    }

    fn insert(&mut self, path: String, alias: Option<String>) -> &mut Self {
        if self.contains(&path) {
            return self;
        }
        if let Some(section) = self.sections.last_mut() {
            section.insert(path, alias);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deduplicates() {
        let mut imports = GoImports::new();
        imports.add("log").add("log");
        imports.section();
        imports.add_as("alias", "log");

        assert_eq!(imports.len(), 1);
    }

    #[test]
    fn test_render_sections() {
        let mut imports = GoImports::new();
        imports.add("log");
        imports.section();
        imports
            .add("k8s.io/apimachinery/pkg/runtime")
            .add_as("metav1", "k8s.io/apimachinery/pkg/apis/meta/v1");

        let code = imports.render(CodeBuilder::go()).build();
        assert_eq!(
            code,
            "import (\n\t\"log\"\n\n\t\"k8s.io/apimachinery/pkg/runtime\"\n\tmetav1 \"k8s.io/apimachinery/pkg/apis/meta/v1\"\n)\n"
        );
    }

    #[test]
    fn test_empty_sections_are_skipped() {
        let mut imports = GoImports::new();
        imports.section().section();
        imports.add("testing");
        imports.section();

        let code = imports.render(CodeBuilder::go()).build();
        assert_eq!(code, "import (\n\t\"testing\"\n)\n");
    }

    #[test]
    fn test_render_empty() {
        let code = GoImports::new().render(CodeBuilder::go()).build();
        assert_eq!(code, "");
    }
}
