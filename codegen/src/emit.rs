//! Indentation-tracking source writer.
//!
//! [`SourceWriter`] is an append-only buffer with a two-state line machine:
//! at the start of a line the next append writes the indentation for its
//! depth, in the middle of a line appends must come from the same depth.
//! Every emitter writes through [`Indented`] views, so indentation of the
//! generated text is a function of nesting depth and nothing else.

use std::path::Path;

use anyhow::{Context, Result};

/// Writer contract violations. These are programming errors in an emitter,
/// never user mistakes, and abort the pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmitError {
    /// A mid-line append came from a different depth than the line's first
    /// append.
    #[error("indentation mismatch: line started at depth {line_depth}, append requested at depth {requested}")]
    IndentMismatch {
        /// Depth of the line in progress.
        line_depth: usize,
        /// Depth of the offending append.
        requested: usize,
    },
    /// Appended text contained a line break.
    #[error("appended text contains a line break: {0:?}")]
    EmbeddedNewline(String),
}

/// Position of the writer within the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState {
    /// Nothing has been written on the current line.
    AtLineStart,
    /// The current line was started at the given depth.
    MidLine(usize),
}

/// Append-only text buffer enforcing depth-consistent indentation.
#[derive(Debug, Clone)]
pub struct SourceWriter {
    buf: String,
    state: LineState,
    unit: String,
}

impl Default for SourceWriter {
    fn default() -> Self {
        Self::new(4)
    }
}

impl SourceWriter {
    /// A writer indenting by `indent_width` spaces per level.
    pub fn new(indent_width: usize) -> Self {
        Self {
            buf: String::new(),
            state: LineState::AtLineStart,
            unit: " ".repeat(indent_width),
        }
    }

    /// Current line state.
    pub fn state(&self) -> LineState {
        self.state
    }

    /// Appends `text` at `depth`.
    ///
    /// Empty text is a no-op and leaves the state unchanged, so blank lines
    /// never carry indentation.
    ///
    /// # Errors
    ///
    /// Returns [`EmitError::EmbeddedNewline`] if `text` contains a line break
    /// and [`EmitError::IndentMismatch`] if the current line was started at a
    /// different depth.
    pub fn append(&mut self, depth: usize, text: &str) -> Result<(), EmitError> {
        if text.contains(|c| c == '\n' || c == '\r') {
            return Err(EmitError::EmbeddedNewline(text.to_string()));
        }
        if text.is_empty() {
            return Ok(());
        }
        match self.state {
            LineState::AtLineStart => {
                for _ in 0..depth {
                    self.buf.push_str(&self.unit);
                }
                self.state = LineState::MidLine(depth);
            }
            LineState::MidLine(line_depth) if line_depth != depth => {
                return Err(EmitError::IndentMismatch {
                    line_depth,
                    requested: depth,
                });
            }
            LineState::MidLine(_) => {}
        }
        self.buf.push_str(text);
        Ok(())
    }

    /// Ends the current line. Always returns the writer to
    /// [`LineState::AtLineStart`].
    pub fn newline(&mut self) {
        self.buf.push('\n');
        self.state = LineState::AtLineStart;
    }

    /// The depth-zero view.
    pub fn root(&mut self) -> Indented<'_> {
        Indented {
            writer: self,
            depth: 0,
        }
    }

    /// The text written so far.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Consumes the writer and returns its text.
    pub fn finish(self) -> String {
        self.buf
    }
}

/// A view of a [`SourceWriter`] at a fixed depth.
#[derive(Debug)]
pub struct Indented<'w> {
    writer: &'w mut SourceWriter,
    depth: usize,
}

impl Indented<'_> {
    /// Depth of this view.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The view one level deeper. Views at the same depth are
    /// interchangeable.
    pub fn tab(&mut self) -> Indented<'_> {
        Indented {
            writer: self.writer,
            depth: self.depth + 1,
        }
    }

    /// Appends `text` without ending the line.
    ///
    /// # Errors
    ///
    /// See [`SourceWriter::append`].
    pub fn append(&mut self, text: &str) -> Result<&mut Self, EmitError> {
        self.writer.append(self.depth, text)?;
        Ok(self)
    }

    /// Appends `text` and ends the line.
    ///
    /// # Errors
    ///
    /// See [`SourceWriter::append`].
    pub fn line(&mut self, text: &str) -> Result<(), EmitError> {
        self.writer.append(self.depth, text)?;
        self.writer.newline();
        Ok(())
    }

    /// Writes an empty line.
    pub fn blank(&mut self) {
        self.writer.newline();
    }

    /// Ends the current line.
    pub fn newline(&mut self) {
        self.writer.newline();
    }
}

/// Writes `content` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be
/// written.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indentation_follows_depth() {
        let mut w = SourceWriter::new(4);
        let mut root = w.root();
        root.line("class A {").unwrap();
        root.tab().line("int x;").unwrap();
        root.tab().tab().line("nested").unwrap();
        root.line("}").unwrap();
        assert_eq!(w.finish(), "class A {\n    int x;\n        nested\n}\n");
    }

    #[test]
    fn mid_line_append_at_other_depth_fails() {
        let mut w = SourceWriter::new(4);
        w.append(1, "a").unwrap();
        w.append(1, "b").unwrap();
        assert_eq!(
            w.append(2, "c"),
            Err(EmitError::IndentMismatch {
                line_depth: 1,
                requested: 2
            })
        );
        w.newline();
        assert_eq!(w.state(), LineState::AtLineStart);
        w.append(2, "c").unwrap();
        assert_eq!(w.as_str(), "    ab\n        c");
    }

    #[test]
    fn blank_lines_carry_no_indentation() {
        let mut w = SourceWriter::new(2);
        let mut root = w.root();
        let mut inner = root.tab();
        inner.line("x").unwrap();
        inner.line("").unwrap();
        inner.blank();
        inner.line("y").unwrap();
        assert_eq!(w.finish(), "  x\n\n\n  y\n");
    }

    #[test]
    fn line_breaks_in_text_are_rejected() {
        let mut w = SourceWriter::default();
        assert!(matches!(
            w.append(0, "a\nb"),
            Err(EmitError::EmbeddedNewline(_))
        ));
        assert_eq!(w.as_str(), "");
    }

    #[test]
    fn sibling_views_share_the_buffer() {
        let mut w = SourceWriter::new(4);
        let mut root = w.root();
        let mut first = root.tab();
        first.append("a").unwrap().append("b").unwrap();
        first.newline();
        let mut second = root.tab();
        second.line("c").unwrap();
        assert_eq!(w.finish(), "    ab\n    c\n");
    }
}
