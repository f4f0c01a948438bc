//! Parser for the ahm markup dialect
//!
//! Predictive parsing over a [`TokenStream`], building one top-level [`Node`] per
//! [`Parser::parse`] call. Open blocks live on an explicit stack, not the call stack. Decisions never need more than two tokens of lookahead.
//!
//! ## Examples
//!
//! ```rust
//! use ahm_syntax::ast::Node;
//! use ahm_syntax::parser;
//!
//! let nodes = parser::parse("@proc\n  Child text").unwrap();
//! assert_eq!(nodes, vec![Node::proc("proc", "", vec![Node::text("Child text")])]);
//! ```

use crate::ast::{Document, Node, Proc, Text};
use crate::diagnostics::{Error, ErrorKind};
use crate::lexer::{CharSource, Lexer, LexerOptions, StrSource, Token, TokenKind};
use crate::position::{Position, Span};
use crate::range_map::{NodePath, RangeMap};
use crate::stream::TokenStream;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/text.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
