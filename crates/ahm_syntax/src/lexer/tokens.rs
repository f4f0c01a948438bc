//! Token types for the ahm lexer.
//!
//! ## Notes
//! - There is no `Invalid` kind: "no token" is `None` wherever a token may be missing.
//! - `Indent` carries the literal extra indentation it opens, `Dedent` always carries empty text.

use std::fmt;

use crate::position::Span;

/// Marker character starting a proc line.
pub const PROC_MARK: char = '@';

/// The only line terminator.
pub const NEWLINE: char = '\n';

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ========== Indentation ==========
    Indent,
    Dedent,
    /// Reserved for indentation that matches no open level. Never produced.
    Misdent,
    Newline,

    // ========== Procs ==========
    ProcMark,
    ProcName,
    ProcArg,

    // ========== Free text ==========
    Text,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Indent => "Indent",
            TokenKind::Dedent => "Dedent",
            TokenKind::Misdent => "Misdent",
            TokenKind::Newline => "Newline",
            TokenKind::ProcMark => "ProcMark",
            TokenKind::ProcName => "ProcName",
            TokenKind::ProcArg => "ProcArg",
            TokenKind::Text => "Text",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token with its kind, source span and literal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub text: String,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span, text: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            text: text.into(),
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{:?}", self.span, self.kind, self.text)
    }
}

/// Whitespace that does not end the line.
pub fn is_intraline_space(c: char) -> bool {
    c != NEWLINE && c.is_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    #[test]
    fn test_token_display() {
        let tok = Token::new(
            TokenKind::ProcName,
            Span::new(Position::new(1, 2), Position::new(1, 6)),
            "proc",
        );
        assert_eq!(tok.to_string(), r#"1,2:1,6:ProcName:"proc""#);
    }

    #[test]
    fn test_intraline_space() {
        assert!(is_intraline_space(' '));
        assert!(is_intraline_space('\t'));
        assert!(!is_intraline_space('\n'));
        assert!(!is_intraline_space('x'));
    }
}
