/// Parser core types and entrypoints.
///
/// This chunk defines [`Parser`], its options, and the node grammar:
/// - `node  := proc | text`
/// - `proc  := ProcMark ProcName ProcArg [Newline [Indent node {sep node} Dedent]]`
/// - `text  := Text {Newline Text} [Newline Dedent]`
///
/// ## Notes
/// - Where a node stopped is reported through [`Boundary`] instead of the error channel. The
///   block loop uses it to decide which separator it still has to consume.
/// - A trailing text node swallows the `Dedent` closing its block, a trailing proc leaves it to
///   the enclosing block loop.
/// - Nesting is tracked on an explicit stack of [`OpenProc`]s rather than the call stack, so depth
///   is bounded only by memory. On failure the stack folds into the partial node.
///
/// How a node parse left the line it ended on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    /// The node ended mid-line; its `Newline` is still in the stream.
    Open,
    /// The node consumed its own line break.
    LineEnded,
    /// The node consumed the `Dedent` closing the enclosing block.
    BlockClosed,
}

/// A node together with where it came from and how it ended.
#[derive(Debug)]
struct Parsed {
    node: Node,
    span: Span,
    boundary: Boundary,
}

/// A proc whose indented children are still being parsed.
#[derive(Debug)]
struct OpenProc {
    name: String,
    title: String,
    path: NodePath,
    children: Vec<Node>,
    /// Head line merged with every finished child.
    span: Span,
}

impl OpenProc {
    fn into_node(self) -> Node {
        Node::Proc(Proc {
            name: self.name,
            title: self.title,
            children: self.children,
        })
    }

    /// Finish the proc once its block is closed. The closing `Dedent` (or the line break of the
    /// last child) has been consumed, so the proc always ends its line.
    fn close(self) -> Parsed {
        tracing::trace!(name = %self.name, children = self.children.len(), "parsed proc");
        let span = self.span;
        Parsed {
            node: self.into_node(),
            span,
            boundary: Boundary::LineEnded,
        }
    }
}

/// Result of reading a proc's head line.
#[derive(Debug)]
enum Head {
    /// No indented block follows.
    Leaf(Parsed),
    /// An `Indent` was consumed; children come next.
    Opened(OpenProc),
}

/// A parse error together with the part of the current top-level node finished before it.
#[derive(Debug)]
struct Failure {
    partial: Option<Node>,
    error: Error,
}

impl From<Error> for Failure {
    fn from(error: Error) -> Self {
        Self { partial: None, error }
    }
}

/// Fold still-open procs into one node, innermost last child of its parent.
fn fold_open(open: Vec<OpenProc>) -> Option<Node> {
    let mut partial = None;
    for mut frame in open.into_iter().rev() {
        frame.children.extend(partial.take());
        partial = Some(frame.into_node());
    }
    partial
}

/// Construction-time parser configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Name of the source, used only in diagnostics.
    pub source_name: Option<String>,
    /// Range map to record node spans into, replacing a fresh one.
    pub range_map: Option<RangeMap>,
    /// Record node spans at all.
    pub track_ranges: bool,
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    /// Record spans into `ranges`. Implies range tracking.
    pub fn with_range_map(mut self, ranges: RangeMap) -> Self {
        self.range_map = Some(ranges);
        self.track_ranges = true;
        self
    }

    pub fn with_range_tracking(mut self, enabled: bool) -> Self {
        self.track_ranges = enabled;
        self
    }
}

/// Parser state.
///
/// ## Notes
/// - There is no error recovery: after an error the parser should be dropped.
/// - Top-level nodes are produced one at a time; see [`Parser::parse`].
#[derive(Debug)]
pub struct Parser<S> {
    stream: TokenStream<S>,
    source_name: Option<String>,
    ranges: Option<RangeMap>,
    /// End of the last consumed token.
    cursor: Position,
    /// The previous top-level node ended mid-line.
    pending_newline: bool,
    produced: usize,
}

impl<'a> Parser<StrSource<'a>> {
    /// Create a parser over an in-memory string.
    pub fn for_str(source: &'a str) -> Self {
        Self::new(StrSource::new(source))
    }
}

impl<S: CharSource> Parser<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, ParserOptions::default())
    }

    pub fn with_options(source: S, options: ParserOptions) -> Self {
        let lexer_options = LexerOptions {
            source_name: options.source_name.clone(),
        };
        let ranges = match options.range_map {
            Some(ranges) => Some(ranges),
            None if options.track_ranges => Some(RangeMap::new()),
            None => None,
        };
        Self {
            stream: TokenStream::new(Lexer::with_options(source, lexer_options)),
            source_name: options.source_name,
            ranges,
            cursor: Position::first(),
            pending_newline: false,
            produced: 0,
        }
    }

    /// Recorded node spans, if range tracking is on.
    pub fn ranges(&self) -> Option<&RangeMap> {
        self.ranges.as_ref()
    }

    pub fn into_ranges(self) -> Option<RangeMap> {
        self.ranges
    }

    /// Parse the next top-level node.
    ///
    /// Returns `Ok(None)` once the document has no further nodes.
    ///
    /// ## Notes
    /// - A document ending with a line break has an empty last line. When that line is all that is
    ///   left after at least one node, it is treated as the end of the document.
    ///
    /// ## Errors
    /// Returns an [`Error`] if the lexer fails or a token has no place in the grammar.
    pub fn parse(&mut self) -> Result<Option<Node>, Error> {
        self.next_top_level().map_err(|failure| failure.error)
    }

    /// Parse every remaining top-level node.
    ///
    /// On failure the nodes completed before the error are returned alongside it, followed by
    /// the node that was being parsed, holding whatever children it had finished.
    #[tracing::instrument(skip_all, fields(source_name = ?self.source_name))]
    pub fn parse_all(&mut self) -> (Vec<Node>, Option<Error>) {
        let mut nodes = Vec::new();
        loop {
            match self.next_top_level() {
                Ok(Some(node)) => nodes.push(node),
                Ok(None) => {
                    tracing::debug!(nodes = nodes.len(), "parsed document");
                    return (nodes, None);
                }
                Err(Failure { partial, error }) => {
                    nodes.extend(partial);
                    tracing::debug!(nodes = nodes.len(), error = %error, "parse failed");
                    return (nodes, Some(error));
                }
            }
        }
    }

    /// Parse the whole input into a [`Document`], discarding partial results on failure.
    pub fn parse_document(&mut self) -> Result<Document, Error> {
        match self.parse_all() {
            (nodes, None) => Ok(Document::new(nodes)),
            (_, Some(err)) => Err(err),
        }
    }

    fn next_top_level(&mut self) -> Result<Option<Node>, Failure> {
        if self.pending_newline {
            match self.peek_kind(0)? {
                None => return Ok(None),
                Some(TokenKind::Newline) => {
                    self.skip(1)?;
                    self.pending_newline = false;
                }
                Some(_) => return Err(self.unexpected_front(&[TokenKind::Newline]).into()),
            }
        }

        let path = NodePath::top(self.produced);
        let Some(parsed) = self.parse_node(&path)? else {
            return Ok(None);
        };
        if self.produced > 0 && parsed.boundary == Boundary::Open && is_blank(&parsed.node) {
            match self.at_end() {
                Ok(true) => return Ok(None),
                Ok(false) => {}
                Err(error) => {
                    return Err(Failure {
                        partial: Some(parsed.node),
                        error,
                    });
                }
            }
        }

        self.pending_newline = parsed.boundary == Boundary::Open;
        self.record(path, parsed.span);
        self.produced += 1;
        Ok(Some(parsed.node))
    }

    // ========================================================================
    // Grammar
    // ========================================================================

    /// Parse one node, with all of its descendants, starting at the front of the stream.
    /// `Ok(None)` at the end of input.
    fn parse_node(&mut self, path: &NodePath) -> Result<Option<Parsed>, Failure> {
        let mut open = Vec::new();
        match self.parse_nested(path, &mut open) {
            Ok(parsed) => Ok(parsed),
            Err(error) => Err(Failure {
                partial: fold_open(open),
                error,
            }),
        }
    }

    fn parse_nested(&mut self, path: &NodePath, open: &mut Vec<OpenProc>) -> Result<Option<Parsed>, Error> {
        let mut path = path.clone();
        loop {
            let mut finished = match self.peek_kind(0)? {
                None if open.is_empty() => return Ok(None),
                None => None,
                Some(TokenKind::ProcMark) => match self.parse_proc_head(&path)? {
                    Head::Leaf(parsed) => Some(parsed),
                    Head::Opened(frame) => {
                        path = frame.path.child(0);
                        open.push(frame);
                        continue;
                    }
                },
                Some(TokenKind::Text) => Some(self.parse_text()?),
                Some(_) => return Err(self.unexpected_front(&[TokenKind::ProcMark, TokenKind::Text])),
            };

            // Hand the finished node to its parent; closing a block finishes the parent in turn.
            loop {
                let Some(mut frame) = open.pop() else {
                    return Ok(finished);
                };
                let closed = match finished.take() {
                    None => Ok(true),
                    Some(child) => {
                        let child_path = frame.path.child(frame.children.len());
                        self.record(child_path, child.span);
                        frame.span = frame.span.merge(child.span);
                        frame.children.push(child.node);
                        self.block_closed_after(child.boundary)
                    }
                };
                match closed {
                    Ok(false) => {
                        path = frame.path.child(frame.children.len());
                        open.push(frame);
                        break;
                    }
                    Ok(true) => finished = Some(frame.close()),
                    Err(err) => {
                        open.push(frame);
                        return Err(err);
                    }
                }
            }
        }
    }

    /// Read `@name title` and, if an indented block follows, open it.
    fn parse_proc_head(&mut self, path: &NodePath) -> Result<Head, Error> {
        let mark = self.expect(TokenKind::ProcMark)?;
        let name = self.expect(TokenKind::ProcName)?;
        let title = self.expect(TokenKind::ProcArg)?;
        let span = mark.span.merge(name.span).merge(title.span);
        if self.peek_kind(0)? != Some(TokenKind::Newline) {
            return Ok(leaf(name.text, title.text, span, Boundary::Open));
        }
        self.skip(1)?;
        if self.peek_kind(0)? != Some(TokenKind::Indent) {
            return Ok(leaf(name.text, title.text, span, Boundary::LineEnded));
        }
        self.skip(1)?;

        Ok(Head::Opened(OpenProc {
            name: name.text,
            title: title.text,
            path: path.clone(),
            children: Vec::new(),
            span,
        }))
    }

    /// Consume the separator after a child that ended at `boundary`. Returns whether the block
    /// is closed.
    fn block_closed_after(&mut self, boundary: Boundary) -> Result<bool, Error> {
        match boundary {
            Boundary::BlockClosed => Ok(true),
            Boundary::LineEnded => match self.peek_kind(0)? {
                Some(TokenKind::Dedent) => {
                    self.skip(1)?;
                    Ok(true)
                }
                Some(TokenKind::ProcMark | TokenKind::Text) => Ok(false),
                None => Ok(true),
                Some(_) => Err(self.unexpected_front(&[TokenKind::Dedent, TokenKind::ProcMark, TokenKind::Text])),
            },
            Boundary::Open => match self.peek_kind(0)? {
                Some(TokenKind::Dedent) => {
                    self.skip(1)?;
                    Ok(true)
                }
                Some(TokenKind::Newline) => {
                    self.skip(1)?;
                    Ok(false)
                }
                None => Ok(true),
                Some(_) => Err(self.unexpected_front(&[TokenKind::Newline, TokenKind::Dedent])),
            },
        }
    }

    fn parse_text(&mut self) -> Result<Parsed, Error> {
        let first = self.expect(TokenKind::Text)?;
        let mut span = first.span;
        let mut builder = TextBuilder::new();
        builder.push_line(&first.text);

        let boundary = loop {
            if self.peek_kind(0)? != Some(TokenKind::Newline) {
                break Boundary::Open;
            }
            match self.peek_kind(1)? {
                Some(TokenKind::Text) => {
                    self.skip(1)?;
                    let line = self.expect(TokenKind::Text)?;
                    span = span.merge(line.span);
                    builder.push_line(&line.text);
                }
                Some(TokenKind::Dedent) => {
                    self.skip(2)?;
                    break Boundary::BlockClosed;
                }
                _ => break Boundary::Open,
            }
        };

        Ok(Parsed {
            node: Node::Text(builder.build()),
            span,
            boundary,
        })
    }
}

/// A proc with no indented block.
fn leaf(name: String, title: String, span: Span, boundary: Boundary) -> Head {
    Head::Leaf(Parsed {
        node: Node::Proc(Proc {
            name,
            title,
            children: Vec::new(),
        }),
        span,
        boundary,
    })
}

fn is_blank(node: &Node) -> bool {
    matches!(node, Node::Text(text) if text.content.is_empty())
}
