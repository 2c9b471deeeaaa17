//! Source ranges and line maps.
//!
//! Scope trees carry byte ranges only. Line and column numbers are derived
//! on demand through a [`LineMap`] when a diagnostic is rendered.

use std::fmt;

/// A position in source text, measured as a byte offset from the start.
pub type TextPos = u32;

/// A text range with start and end positions.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TextRange {
    /// The byte offset where this range starts (inclusive).
    pub pos: TextPos,
    /// The byte offset where this range ends (exclusive).
    pub end: TextPos,
}

impl TextRange {
    #[inline]
    pub fn new(pos: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= pos);
        Self { pos, end }
    }

    /// Whether `other` lies within this range, touching the bounds allowed.
    #[inline]
    pub fn covers(&self, other: &TextRange) -> bool {
        self.pos <= other.pos && other.end <= self.end
    }

    /// Whether `other` lies within this range without touching either bound.
    #[inline]
    pub fn strictly_covers(&self, other: &TextRange) -> bool {
        self.pos < other.pos && other.end < self.end
    }

    /// Whether this range ends before `other` starts.
    #[inline]
    pub fn ends_before(&self, other: &TextRange) -> bool {
        self.end < other.pos
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.pos, self.end)
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.pos, self.end)
    }
}

impl From<[TextPos; 2]> for TextRange {
    fn from([pos, end]: [TextPos; 2]) -> Self {
        TextRange::new(pos, end)
    }
}

impl From<TextRange> for [TextPos; 2] {
    fn from(range: TextRange) -> Self {
        [range.pos, range.end]
    }
}

/// Line and column information derived from source text.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LineAndColumn {
    /// 0-based line number.
    pub line: u32,
    /// 0-based column, in bytes from the line start.
    pub character: u32,
}

impl LineAndColumn {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A map from byte offsets to line numbers, built from source text.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Byte offsets of the start of each line.
    line_starts: Vec<TextPos>,
}

impl LineMap {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push((i + 1) as u32);
            }
        }
        Self { line_starts }
    }

    /// Get the line number (0-based) for a byte offset.
    pub fn line_of(&self, pos: TextPos) -> u32 {
        match self.line_starts.binary_search(&pos) {
            Ok(line) => line as u32,
            Err(line) => (line - 1) as u32,
        }
    }

    pub fn line_and_column_of(&self, pos: TextPos) -> LineAndColumn {
        let line = self.line_of(pos);
        let line_start = self.line_starts[line as usize];
        LineAndColumn {
            line,
            character: pos - line_start,
        }
    }
}
