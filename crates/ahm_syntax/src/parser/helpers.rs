/// Token-stream helpers.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek_kind`, `peek_token`, `skip`, `expect`)
/// - Building located errors (`unexpected`, `unexpected_front`)
/// - Recording node spans (`record`)
impl<S: CharSource> Parser<S> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Kind of the token `depth` positions ahead, without consuming it.
    fn peek_kind(&mut self, depth: usize) -> Result<Option<TokenKind>, Error> {
        Ok(self.stream.peek(depth)?.map(|token| token.kind))
    }

    fn peek_token(&mut self, depth: usize) -> Result<Option<Token>, Error> {
        Ok(self.stream.peek(depth)?.cloned())
    }

    fn at_end(&mut self) -> Result<bool, Error> {
        Ok(self.peek_kind(0)?.is_none())
    }

    /// Consume `count` tokens the caller has already peeked at.
    fn skip(&mut self, count: usize) -> Result<(), Error> {
        if let Some(last) = self.stream.peek(count - 1)? {
            self.cursor = last.span.end;
        }
        self.stream.accept(count);
        Ok(())
    }

    /// Consume the front token if it is a `kind`, otherwise fail.
    fn expect(&mut self, kind: TokenKind) -> Result<Token, Error> {
        match self.peek_token(0)? {
            Some(token) if token.is(kind) => {
                self.cursor = token.span.end;
                self.stream.accept(1);
                Ok(token)
            }
            Some(token) => Err(self.unexpected(token, &[kind])),
            None => Err(self.locate(ErrorKind::unexpected_end(&[kind]), self.cursor)),
        }
    }

    fn unexpected(&self, found: Token, wanted: &[TokenKind]) -> Error {
        let at = found.span.start;
        self.locate(ErrorKind::unexpected_token(found, wanted), at)
    }

    /// Error for whatever is at the front of the stream.
    fn unexpected_front(&mut self, wanted: &[TokenKind]) -> Error {
        match self.peek_token(0) {
            Ok(Some(token)) => self.unexpected(token, wanted),
            Ok(None) => self.locate(ErrorKind::unexpected_end(wanted), self.cursor),
            Err(err) => err,
        }
    }

    fn locate(&self, kind: ErrorKind, at: Position) -> Error {
        Error::new(kind, at).with_source_name(self.source_name.clone())
    }

    fn record(&mut self, path: NodePath, span: Span) {
        if let Some(ranges) = &mut self.ranges {
            ranges.set(path, span);
        }
    }
}
