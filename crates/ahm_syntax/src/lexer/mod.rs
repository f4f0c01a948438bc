//! Lexer for the ahm markup dialect
//!
//! Turns a code point stream into tokens, one token per call:
//! - `@name title` lines become `ProcMark`, `ProcName` and `ProcArg`
//! - any other line becomes a single `Text`
//! - line breaks become `Newline`
//! - changes of indentation become synthetic `Indent`/`Dedent` tokens
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `source` - Code point sources with one code point of lookahead
//! - `builder` - Accumulates the token being scanned
//! - `indent` - Indent stack and INDENT/DEDENT handling

mod builder;
mod indent;
pub mod source;
pub mod tokens;

pub use indent::IndentStack;
pub use source::{CharSource, ReadSource, StrSource};
pub use tokens::{NEWLINE, PROC_MARK, Token, TokenKind};

use builder::TokenBuilder;
use tokens::is_intraline_space;

use crate::diagnostics::{Error, ErrorKind};
use crate::position::Position;

// ============================================================================
// LEXER STATE
// ----------------------------------------------------------------------------
// Lexer state diagram (one token per arrow that leaves a state):
//
// [AfterIndent] ─'@'→ [ProcMark] → [ProcName] → [ProcTitle] ─┐
//       │                                                     ↓
//       └──────────→ [Text] ─────────────────────────────→ [Newline]
//                                                             ↓
// [AfterIndent] ←── no new indent ── [TryIndent] ←────────────┘
//       ↑                              │    │
//       └────────── Indent ────────────┘    └─ Dedent → [Dedents n] → ... → [AfterIndent]
// ============================================================================

/// Scanning phase the next call to [`Lexer::next_token`] starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AfterIndent,
    ProcMark,
    ProcName,
    ProcTitle,
    Text,
    Newline,
    TryIndent,
    /// `left` more scheduled `Dedent` tokens, one per call.
    Dedents { left: usize },
    Exhausted,
    Failed,
}

/// Outcome of running one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// The builder holds a finished token.
    Token,
    /// No input left and no levels left to close.
    Exhausted,
}

/// Construction-time lexer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexerOptions {
    /// Name of the source, used only in diagnostics.
    pub source_name: Option<String>,
}

impl LexerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }
}

/// Character source plus the token being built from it.
#[derive(Debug)]
struct Scanner<S> {
    source: S,
    builder: TokenBuilder,
}

impl<S: CharSource> Scanner<S> {
    fn peek(&mut self) -> Result<Option<char>, ErrorKind> {
        Ok(self.source.peek()?)
    }

    /// Consume code points while `pred` holds.
    fn accept_while(&mut self, pred: impl Fn(char) -> bool) -> Result<(), ErrorKind> {
        while let Some(c) = self.source.peek()? {
            if !pred(c) {
                break;
            }
            self.source.next_char()?;
            self.builder.accept(c);
        }
        Ok(())
    }

    /// Consume exactly `want`. Returns `false` at the end of input.
    fn accept_one(&mut self, want: char) -> Result<bool, ErrorKind> {
        match self.source.peek()? {
            None => Ok(false),
            Some(got) if got != want => Err(ErrorKind::UnexpectedCodePoint { got, wanted: want }),
            Some(c) => {
                self.source.next_char()?;
                self.builder.accept(c);
                Ok(true)
            }
        }
    }
}

/// Indentation-sensitive lexer for ahm documents.
///
/// Pull-based: every [`Lexer::next_token`] call runs the state machine until exactly one token is
/// finished. End of input is `Ok(None)`; after it, or after an error, every call returns the same
/// terminal result.
#[derive(Debug)]
pub struct Lexer<S> {
    scanner: Scanner<S>,
    indents: IndentStack,
    state: State,
    error: Option<Error>,
    options: LexerOptions,
}

impl<S: CharSource> Lexer<S> {
    /// Create a new lexer reading from `source`.
    pub fn new(source: S) -> Self {
        Self::with_options(source, LexerOptions::default())
    }

    pub fn with_options(source: S, options: LexerOptions) -> Self {
        Self {
            scanner: Scanner {
                source,
                builder: TokenBuilder::new(Position::first()),
            },
            indents: IndentStack::new(),
            state: State::AfterIndent,
            error: None,
            options,
        }
    }

    /// The levels currently open, as seen by the next line.
    pub fn indents(&self) -> &IndentStack {
        &self.indents
    }

    /// Position right after the last consumed code point.
    pub fn cursor(&self) -> Position {
        self.scanner.builder.cursor()
    }

    /// Produce the next token.
    ///
    /// ## Errors
    /// Returns an [`Error`] if the source fails or the indentation of a line repeats only part
    /// of an open level.
    pub fn next_token(&mut self) -> Result<Option<Token>, Error> {
        loop {
            match self.state {
                State::Exhausted => return Ok(None),
                State::Failed => {
                    return Err(self.error.clone().expect("INVARIANT: a failed lexer keeps its error"));
                }
                _ => {}
            }

            match self.step() {
                Ok(Scan::Token) => {
                    // Skipping results carry no token; keep scanning.
                    if let Some(token) = self.scanner.builder.build() {
                        self.track_indentation(&token);
                        tracing::trace!(token = %token, "lexed token");
                        return Ok(Some(token));
                    }
                }
                Ok(Scan::Exhausted) => {
                    self.state = State::Exhausted;
                    return Ok(None);
                }
                Err(kind) => {
                    let err = Error::new(kind, self.scanner.builder.cursor())
                        .with_source_name(self.options.source_name.clone());
                    tracing::debug!(error = %err, "lexer failed");
                    self.state = State::Failed;
                    self.error = Some(err.clone());
                    return Err(err);
                }
            }
        }
    }

    /// Keep the indent stack in step with the tokens handed out.
    fn track_indentation(&mut self, token: &Token) {
        match token.kind {
            TokenKind::Indent => self.indents.push(token.text.clone()),
            TokenKind::Dedent => self.indents.pop(),
            _ => {}
        }
    }

    // ========================================================================
    // States
    // ========================================================================

    fn step(&mut self) -> Result<Scan, ErrorKind> {
        match self.state {
            State::AfterIndent => self.scan_after_indent(),
            State::ProcMark => self.scan_proc_mark(),
            State::ProcName => self.scan_proc_name(),
            State::ProcTitle => self.scan_proc_title(),
            State::Text => self.scan_text(),
            State::Newline => self.scan_newline(),
            State::TryIndent => self.scan_try_indent(),
            State::Dedents { left } => self.scan_scheduled_dedent(left),
            State::Exhausted | State::Failed => Ok(Scan::Exhausted),
        }
    }

    fn scan_after_indent(&mut self) -> Result<Scan, ErrorKind> {
        self.state = if self.scanner.peek()? == Some(PROC_MARK) {
            State::ProcMark
        } else {
            State::Text
        };
        self.step()
    }

    fn scan_proc_mark(&mut self) -> Result<Scan, ErrorKind> {
        self.state = State::ProcName;
        self.scanner.builder.start(TokenKind::ProcMark);
        self.scanner.accept_one(PROC_MARK)?;
        Ok(Scan::Token)
    }

    fn scan_proc_name(&mut self) -> Result<Scan, ErrorKind> {
        self.state = State::ProcTitle;
        self.scanner.builder.start(TokenKind::ProcName);
        self.scanner.accept_while(|c| !c.is_whitespace())?;
        Ok(Scan::Token)
    }

    fn scan_proc_title(&mut self) -> Result<Scan, ErrorKind> {
        self.state = State::Newline;
        self.scanner.builder.start_skipping();
        self.scanner.accept_while(is_intraline_space)?;
        self.scanner.builder.start(TokenKind::ProcArg);
        self.scanner.accept_while(|c| c != NEWLINE)?;
        Ok(Scan::Token)
    }

    fn scan_text(&mut self) -> Result<Scan, ErrorKind> {
        self.state = State::Newline;
        self.scanner.builder.start(TokenKind::Text);
        self.scanner.accept_while(|c| c != NEWLINE)?;
        Ok(Scan::Token)
    }

    /// Consume a line break. At the end of input, close the open levels one per call first.
    fn scan_newline(&mut self) -> Result<Scan, ErrorKind> {
        if self.scanner.peek()?.is_none() {
            if self.indents.is_empty() {
                return Ok(Scan::Exhausted);
            }
            self.scanner.builder.start(TokenKind::Dedent);
            return Ok(Scan::Token);
        }

        self.state = State::TryIndent;
        self.scanner.builder.start(TokenKind::Newline);
        self.scanner.accept_one(NEWLINE)?;
        Ok(Scan::Token)
    }
}

impl<S: CharSource> Iterator for Lexer<S> {
    type Item = Result<Token, Error>;

    /// Yields tokens until the end of input, or a single error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.state == State::Failed {
            return None;
        }
        self.next_token().transpose()
    }
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for collecting `Lexer::new(StrSource::new(source))`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Error> {
    Lexer::new(StrSource::new(source)).collect()
}

// ============================================================================
// TESTS
// ============================================================================
