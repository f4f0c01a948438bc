//! Errors reported by the lexer and parser.
//!
//! Every failure is an [`Error`]: an [`ErrorKind`] located at the [`Position`] where it was detected,
//! optionally tagged with the source name configured at construction time.
//!
//! ## Notes
//! - End of input is not an error. The lexer, the token stream and the parser all report it as
//!   `Ok(None)`.
//! - Errors are `Clone` so that a failed lexer can keep returning the same failure.

use std::fmt;
use std::io;
use std::sync::Arc;

use thiserror::Error;

use crate::lexer::tokens::{Token, TokenKind};
use crate::position::Position;

/// What went wrong.
#[derive(Debug, Clone, Error)]
pub enum ErrorKind {
    /// A literal match (newline, marker, indentation prefix) read the wrong code point.
    #[error("got code point {got:?}, wanted {wanted:?}")]
    UnexpectedCodePoint { got: char, wanted: char },

    /// The parser saw a token it has no rule for at this point.
    #[error("unexpected token kind {}, wanted one of {}", .found.kind, KindList(.wanted))]
    UnexpectedTokenKind { found: Token, wanted: Vec<TokenKind> },

    /// The input ended inside a construct that needs more tokens.
    #[error("unexpected end of input, wanted one of {}", KindList(.wanted))]
    UnexpectedEndOfInput { wanted: Vec<TokenKind> },

    /// The underlying source failed to produce a code point.
    #[error("failed to read input: {0}")]
    Io(#[source] Arc<io::Error>),
}

impl ErrorKind {
    pub fn unexpected_token(found: Token, wanted: &[TokenKind]) -> Self {
        ErrorKind::UnexpectedTokenKind {
            found,
            wanted: wanted.to_vec(),
        }
    }

    pub fn unexpected_end(wanted: &[TokenKind]) -> Self {
        ErrorKind::UnexpectedEndOfInput {
            wanted: wanted.to_vec(),
        }
    }

    pub fn is_unexpected_code_point(&self) -> bool {
        matches!(self, ErrorKind::UnexpectedCodePoint { .. })
    }

    /// A short suggestion for the user, where one applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ErrorKind::UnexpectedCodePoint { wanted, .. } if wanted.is_whitespace() => {
                Some("indent this line with exactly the prefix of an enclosing block")
            }
            ErrorKind::UnexpectedTokenKind { found, .. } if found.kind == TokenKind::Indent => {
                Some("only lines following a proc may be indented deeper")
            }
            _ => None,
        }
    }
}

impl From<io::Error> for ErrorKind {
    fn from(err: io::Error) -> Self {
        ErrorKind::Io(Arc::new(err))
    }
}

/// An [`ErrorKind`] paired with the position it was detected at.
#[derive(Debug, Clone, Error)]
#[error("at {:?}:{}:{}: {kind}", .source_name.as_deref().unwrap_or(""), .at.line, .at.column)]
pub struct Error {
    #[source]
    kind: ErrorKind,
    at: Position,
    source_name: Option<String>,
}

impl Error {
    pub fn new(kind: ErrorKind, at: Position) -> Self {
        Self {
            kind,
            at,
            source_name: None,
        }
    }

    pub fn with_source_name(mut self, source_name: Option<String>) -> Self {
        self.source_name = source_name;
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    pub fn at(&self) -> Position {
        self.at
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }
}

/// Renders `{A, B}` for the wanted-kinds list.
struct KindList<'a>(&'a [TokenKind]);

impl fmt::Display for KindList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, kind) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{kind}")?;
        }
        f.write_str("}")
    }
}
