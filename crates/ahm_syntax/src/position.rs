//! Source positions and spans.
//!
//! Positions are 1-based `(line, column)` cursors counted in code points. A [`Span`] is a half-open
//! `[start, end)` pair of positions, grown one code point at a time while a token is scanned.
//!
//! ## Notes
//! - [`Position::ZERO`] is the "not yet started" value. It is never produced by the lexer, but a
//!   span created from it snaps to [`Position::first`] on the first code point added.

use std::fmt;

use crate::lexer::tokens::NEWLINE;

/// A 1-based line/column cursor into the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// The invalid, not-yet-started position.
    pub const ZERO: Position = Position { line: 0, column: 0 };

    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The position of the first code point of any source.
    pub fn first() -> Self {
        Self { line: 1, column: 1 }
    }

    pub fn is_valid(self) -> bool {
        self.line >= 1 && self.column >= 1
    }

    /// The position right after consuming `c` at `self`.
    pub fn advance(self, c: char) -> Self {
        let at = if self.is_valid() { self } else { Self::first() };
        if c == NEWLINE {
            Self::new(at.line + 1, 1)
        } else {
            Self::new(at.line, at.column + 1)
        }
    }

    /// Tag the position with the name of the source it points into.
    pub fn in_source(self, source: impl Into<String>) -> SourcePosition {
        SourcePosition {
            source: source.into(),
            position: self,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.line, self.column)
    }
}

/// A position together with the name of its source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    pub source: String,
    pub position: Position,
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.position)
    }
}

/// Half-open source range; `end` is one past the last consumed code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// An empty span starting and ending at `at`.
    pub fn empty_at(at: Position) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Extend the span by one consumed code point.
    pub fn grow(self, c: char) -> Self {
        let start = if self.start.is_valid() { self.start } else { Position::first() };
        Self {
            start,
            end: self.end.advance(c),
        }
    }

    /// The smallest span covering both `self` and `other`.
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}
