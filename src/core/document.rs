//! Document text, spans, and offset-to-position conversion.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::error::{Error, Result};

/// File extensions the tool reacts to. Anything else is ignored.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "html"];

/// Returns true if the path carries one of [`SUPPORTED_EXTENSIONS`].
pub fn is_supported_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

/// Half-open byte range `[start, end)` into a document's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Zero-based line and character, as an editor reports a cursor position.
///
/// `character` counts Unicode scalar values from the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

/// Byte offsets where each line starts, for O(log n) position lookups.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Convert a byte offset into a position. `offset` must be on a char boundary.
    pub fn position_at(&self, text: &str, offset: usize) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let character = text[line_start..offset].chars().count();
        Position { line, character }
    }

    pub fn range_of(&self, text: &str, span: Span) -> Range {
        Range {
            start: self.position_at(text, span.start),
            end: self.position_at(text, span.end),
        }
    }

    /// Byte range of a line without its trailing newline.
    pub fn line_span(&self, text: &str, line: usize) -> Option<Span> {
        let start = *self.line_starts.get(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .map(|next| next - 1)
            .unwrap_or(text.len());
        let end = if end > start && text.as_bytes()[end - 1] == b'\r' {
            end - 1
        } else {
            end
        };
        Some(Span::new(start, end))
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

/// The single active document an operation works on.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    text: String,
    line_index: LineIndex,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let text = text.into();
        let line_index = LineIndex::new(&text);
        Self {
            path: path.into(),
            text,
            line_index,
        }
    }

    /// Read a document from disk.
    pub fn open(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::new(path, text))
    }

    /// Like [`Document::open`] but rejects unsupported file types first.
    pub fn open_supported(path: &Path) -> Result<Self> {
        if !is_supported_file(path) {
            return Err(Error::UnsupportedFile {
                path: path.to_path_buf(),
            });
        }
        Self::open(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_supported(&self) -> bool {
        is_supported_file(&self.path)
    }

    pub fn position_at(&self, offset: usize) -> Position {
        self.line_index.position_at(&self.text, offset)
    }

    pub fn range_of(&self, span: Span) -> Range {
        self.line_index.range_of(&self.text, span)
    }

    /// Text of a zero-based line, without the line terminator.
    pub fn line(&self, line: usize) -> Option<&str> {
        self.line_index
            .line_span(&self.text, line)
            .map(|span| &self.text[span.start..span.end])
    }

    pub fn slice(&self, span: Span) -> &str {
        &self.text[span.start..span.end]
    }
}
