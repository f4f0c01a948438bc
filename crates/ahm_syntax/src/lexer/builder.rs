//! Accumulates the token currently being scanned.

use super::tokens::{Token, TokenKind};
use crate::position::{Position, Span};

/// Text and span of the token under construction.
///
/// While no token is started the builder is *skipping*: accepted code points still move the
/// cursor, but the span collapses to the new cursor and no text is buffered.
#[derive(Debug, Clone)]
pub(super) struct TokenBuilder {
    kind: Option<TokenKind>,
    text: String,
    span: Span,
}

impl TokenBuilder {
    pub(super) fn new(at: Position) -> Self {
        Self {
            kind: None,
            text: String::new(),
            span: Span::empty_at(at),
        }
    }

    /// Start a new token at the current cursor.
    pub(super) fn start(&mut self, kind: TokenKind) {
        self.kind = Some(kind);
        self.text.clear();
        self.span = Span::empty_at(self.span.end);
    }

    pub(super) fn start_skipping(&mut self) {
        self.kind = None;
        self.text.clear();
        self.span = Span::empty_at(self.span.end);
    }

    pub(super) fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// Position right after the last accepted code point.
    pub(super) fn cursor(&self) -> Position {
        self.span.end
    }

    pub(super) fn accept(&mut self, c: char) {
        self.span = self.span.grow(c);
        match self.kind {
            Some(_) => self.text.push(c),
            None => self.span = Span::empty_at(self.span.end),
        }
    }

    /// Finish the current token and go back to skipping.
    pub(super) fn build(&mut self) -> Option<Token> {
        let token = self
            .kind
            .map(|kind| Token::new(kind, self.span, std::mem::take(&mut self.text)));
        self.start_skipping();
        token
    }
}
