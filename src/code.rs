//! Line-based source writer with scoped indentation.

use std::ops::{Deref, DerefMut};

/// One level of indentation.
const INDENT: &str = "    ";

/// Accumulates indented lines of source code.
///
/// Blocks are opened with [CodeWriter::block] or [CodeWriter::scope] and
/// closed when the returned guard is dropped, so the indentation is restored
/// on every exit path, including `?` returns and panics.
#[derive(Clone, Debug, Default)]
pub struct CodeWriter {
    indent: usize,
    lines: Vec<String>,
}

impl CodeWriter {
    pub fn new() -> Self {
        Default::default()
    }

    /// The current indentation level.
    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Appends a line at the current indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        self.lines
            .push(format!("{}{}", INDENT.repeat(self.indent), text.as_ref()));
    }

    /// Appends an empty, unindented line.
    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    pub fn comment(&mut self, text: impl AsRef<str>) {
        self.line(format!("// {}", text.as_ref()));
    }

    pub fn doc(&mut self, text: impl AsRef<str>) {
        self.line(format!("/// {}", text.as_ref()));
    }

    /// Appends a doc comment paragraph per item, separated by empty doc lines.
    pub fn docs<S: AsRef<str>>(&mut self, paragraphs: impl IntoIterator<Item = S>) {
        for (i, text) in paragraphs.into_iter().enumerate() {
            if i > 0 {
                self.line("///");
            }
            self.doc(text);
        }
    }

    pub fn attribute(&mut self, text: impl AsRef<str>) {
        self.line(format!("#[{}]", text.as_ref()));
    }

    /// Writes `header {` and indents until the guard is dropped, which writes `}`.
    pub fn block(&mut self, header: impl AsRef<str>) -> Scope<'_> {
        self.line(format!("{} {{", header.as_ref()));
        self.indent += 1;
        Scope {
            writer: self,
            closing: Some("}"),
        }
    }

    /// Writes `header` and indents until the guard is dropped.
    pub fn scope(&mut self, header: impl AsRef<str>) -> Scope<'_> {
        self.line(header);
        self.indent += 1;
        Scope {
            writer: self,
            closing: None,
        }
    }

    /// Wraps the following lines in foldable region markers.
    pub fn region(&mut self, label: impl AsRef<str>) -> Region<'_> {
        self.line(format!("// region: {}", label.as_ref()));
        self.blank();
        Region { writer: self }
    }
}

/// An indented block, closed on drop.
pub struct Scope<'a> {
    writer: &'a mut CodeWriter,
    closing: Option<&'static str>,
}

impl Deref for Scope<'_> {
    type Target = CodeWriter;

    fn deref(&self) -> &CodeWriter {
        self.writer
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut CodeWriter {
        self.writer
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        self.writer.indent -= 1;
        if let Some(closing) = self.closing {
            self.writer.line(closing);
        }
    }
}

/// A pair of region markers, closed on drop. Does not affect indentation.
pub struct Region<'a> {
    writer: &'a mut CodeWriter,
}

impl Deref for Region<'_> {
    type Target = CodeWriter;

    fn deref(&self) -> &CodeWriter {
        self.writer
    }
}

impl DerefMut for Region<'_> {
    fn deref_mut(&mut self) -> &mut CodeWriter {
        self.writer
    }
}

impl Drop for Region<'_> {
    fn drop(&mut self) {
        self.writer.blank();
        self.writer.line("// endregion");
    }
}
