//! Code builder utility for generating properly indented Go code.

/// One level of Go indentation (gofmt uses tabs).
const INDENT: &str = "\t";

/// Fluent API for building code with proper indentation.
///
/// # Example
///
/// ```
/// use kubeboot_codegen::CodeBuilder;
///
/// let code = CodeBuilder::go()
///     .block_with_close("func main() {", "}", |b| b.line("fmt.Println(\"hello\")"))
///     .build();
///
/// assert_eq!(code, "func main() {\n\tfmt.Println(\"hello\")\n}\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    indent_level: usize,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with tab indentation.
    pub fn go() -> Self {
        Self::default()
    }

    /// Add a line of code with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        if !s.is_empty() {
            self.write_indent();
            self.buffer.push_str(s);
        }
        self.buffer.push('\n');
        self
    }

    /// Add a blank line (no indentation).
    pub fn blank(mut self) -> Self {
        self.buffer.push('\n');
        self
    }

    pub fn indent(mut self) -> Self {
        self.indent_level += 1;
        self
    }

    pub fn dedent(mut self) -> Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a `//` comment line.
    pub fn comment(self, text: &str) -> Self {
        if text.is_empty() {
            self.line("//")
        } else {
            self.line(&format!("// {}", text))
        }
    }

    /// Add a block with a closing line.
    pub fn block_with_close<F>(self, header: &str, close: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let builder = self.line(header).indent();
        f(builder).dedent().line(close)
    }

    /// Iterate and add content for each item.
    pub fn each<T, I, F>(mut self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        for item in items {
            self = f(self, item);
        }
        self
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(INDENT);
        }
    }
}
