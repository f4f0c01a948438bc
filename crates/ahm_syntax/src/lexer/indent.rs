//! Indentation handling for the ahm lexer
//!
//! Every open nesting level remembers the literal whitespace that opened it. A line belongs to
//! depth `k` when it starts with the concatenation of the first `k` entries, so mixed tabs and
//! spaces work as long as each block repeats its opening prefix exactly.

use super::source::CharSource;
use super::tokens::{TokenKind, is_intraline_space};
use super::{Lexer, Scan, State};
use crate::diagnostics::ErrorKind;

/// Literal indentation strings of the currently open levels, outermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndentStack {
    levels: Vec<String>,
}

impl IndentStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.levels.iter().map(String::as_str)
    }

    /// The whitespace prefix required for a line at the current depth.
    pub fn prefix(&self) -> String {
        self.levels.concat()
    }

    pub(super) fn push(&mut self, extra: String) {
        self.levels.push(extra);
    }

    pub(super) fn pop(&mut self) {
        self.levels
            .pop()
            .expect("INVARIANT: a Dedent is only emitted while a level is open");
    }
}

impl<S: CharSource> Lexer<S> {
    /// Scan the indentation at the start of a line.
    ///
    /// Emits one `Dedent` when the line fails to repeat every open level (scheduling the rest),
    /// an `Indent` when it adds whitespace beyond them, and otherwise goes straight on to the
    /// line's content.
    pub(super) fn scan_try_indent(&mut self) -> Result<Scan, ErrorKind> {
        self.state = State::AfterIndent;

        let depth = self.indents.depth();
        let matched = self.match_open_levels()?;
        if matched < depth {
            tracing::trace!(depth, matched, "closing indentation levels");
            let left = depth - matched - 1;
            if left > 0 {
                self.state = State::Dedents { left };
            }
            self.scanner.builder.start(TokenKind::Dedent);
            return Ok(Scan::Token);
        }

        self.scanner.builder.start(TokenKind::Indent);
        self.scanner.accept_while(is_intraline_space)?;
        if !self.scanner.builder.is_empty() {
            return Ok(Scan::Token);
        }
        self.scan_after_indent()
    }

    /// Emit one of the `Dedent`s scheduled by [`Lexer::scan_try_indent`].
    pub(super) fn scan_scheduled_dedent(&mut self, left: usize) -> Result<Scan, ErrorKind> {
        self.state = if left > 1 {
            State::Dedents { left: left - 1 }
        } else {
            State::AfterIndent
        };
        self.scanner.builder.start(TokenKind::Dedent);
        Ok(Scan::Token)
    }

    /// Consume the prefix of every open level in order, stopping at the first one the line does
    /// not repeat. Returns how many levels matched.
    ///
    /// A mismatch on the first code point of a level (or running out of input) only means the
    /// level is closed. A mismatch further into a level is a hard error.
    fn match_open_levels(&mut self) -> Result<usize, ErrorKind> {
        self.scanner.builder.start_skipping();

        for (level, prefix) in self.indents.iter().enumerate() {
            for (i, want) in prefix.chars().enumerate() {
                match self.scanner.accept_one(want) {
                    Ok(true) => {}
                    Ok(false) => return Ok(level),
                    Err(err) if i == 0 && err.is_unexpected_code_point() => return Ok(level),
                    Err(err) => return Err(err),
                }
            }
        }
        Ok(self.indents.depth())
    }
}
