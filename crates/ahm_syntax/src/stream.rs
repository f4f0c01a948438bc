//! Lookahead buffer between the lexer and the parser.
//!
//! The parser decides with at most two tokens of lookahead, so the stream only pulls as many
//! tokens from the lexer as the deepest outstanding [`TokenStream::peek`] needs.

use std::collections::VecDeque;

use crate::diagnostics::Error;
use crate::lexer::{CharSource, Lexer, Token};

/// Token stream with peek-ahead-by-N and commit-first-N.
#[derive(Debug)]
pub struct TokenStream<S> {
    lexer: Lexer<S>,
    tokens: VecDeque<Token>,
    /// Set once the lexer failed; replayed for every peek past the buffer.
    error: Option<Error>,
    exhausted: bool,
}

impl<S: CharSource> TokenStream<S> {
    pub fn new(lexer: Lexer<S>) -> Self {
        Self {
            lexer,
            tokens: VecDeque::new(),
            error: None,
            exhausted: false,
        }
    }

    /// The token `depth` positions ahead of the front, without consuming it.
    ///
    /// Returns `Ok(None)` when the input ends before `depth`.
    ///
    /// ## Errors
    /// Returns the lexer's error if it fails before producing the requested token.
    pub fn peek(&mut self, depth: usize) -> Result<Option<&Token>, Error> {
        self.fill(depth + 1);
        if let Some(token) = self.tokens.get(depth) {
            return Ok(Some(token));
        }
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(None),
        }
    }

    /// Commit the first `count` buffered tokens.
    ///
    /// # Panics
    /// If `count` is zero or more tokens than currently buffered. Callers only accept what they
    /// peeked at.
    pub fn accept(&mut self, count: usize) {
        assert!(count > 0, "cannot accept {count} tokens because {count} <= 0");
        assert!(
            count <= self.tokens.len(),
            "cannot accept {count} tokens when there are {} in the lookahead buffer",
            self.tokens.len()
        );
        self.tokens.drain(..count);
    }

    /// Number of tokens pulled from the lexer but not yet accepted.
    pub fn buffered(&self) -> usize {
        self.tokens.len()
    }

    fn fill(&mut self, wanted: usize) {
        while self.tokens.len() < wanted && !self.exhausted && self.error.is_none() {
            match self.lexer.next_token() {
                Ok(Some(token)) => self.tokens.push_back(token),
                Ok(None) => self.exhausted = true,
                Err(err) => self.error = Some(err),
            }
        }
    }
}
