//! Rendering of syntax errors with source context.
//!
//! Syntax errors carry a 1-based line/column position. For display they are turned into a
//! `miette` diagnostic pointing at the byte offset of that position in the source text.

use ahm_syntax::diagnostics::Error;
use ahm_syntax::position::Position;
use miette::{Diagnostic, NamedSource, Report, SourceSpan};

/// A syntax error ready for rich display.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(ahm::syntax))]
pub struct SyntaxReport {
    message: String,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("here")]
    span: SourceSpan,
    #[help]
    help: Option<String>,
}

impl SyntaxReport {
    /// Build a report for `err`, found in `source` named `name`.
    pub fn new(name: &str, source: &str, err: &Error) -> Self {
        let name = err.source_name().unwrap_or(name);
        let offset = byte_offset(source, err.at());
        let len = source[offset..].chars().next().map_or(0, char::len_utf8);
        Self {
            message: err.kind().to_string(),
            source_code: NamedSource::new(name, source.to_string()),
            span: SourceSpan::from((offset, len)),
            help: err.kind().hint().map(str::to_string),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn offset(&self) -> usize {
        self.span.offset()
    }

    /// Render the report the way the terminal shows it.
    pub fn render(self) -> String {
        format!("{:?}", Report::new(self))
    }
}

/// Byte offset of a line/column position, clamped to the end of its line (or of the source).
pub fn byte_offset(source: &str, at: Position) -> usize {
    let mut offset = 0;
    for (index, line) in source.split('\n').enumerate() {
        if index + 1 == at.line {
            let column = at.column.saturating_sub(1);
            let within = line.char_indices().nth(column).map_or(line.len(), |(i, _)| i);
            return offset + within;
        }
        offset += line.len() + 1;
    }
    source.len()
}
