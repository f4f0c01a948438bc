//! Syntax frontend for the ahm markup dialect: lexer, token stream, parser, node tree, diagnostics.
//!
//! This crate is dependency-light and intended for reuse by the `ahm` command-line tool and any
//! other consumer that needs the node tree of an ahm document.
//!
//! ## Notes
//! - End of input is never an error: every layer reports it as `Ok(None)`.
//! - Source spans live beside the tree, in an optional [`range_map::RangeMap`], so nodes stay
//!   plain values.
//!
//! ## Examples
//! ```rust
//! use ahm_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("@proc arg").unwrap();
//! assert_eq!(tokens.len(), 3);
//!
//! let nodes = parser::parse("@parent\n  child\naunt").unwrap();
//! assert_eq!(nodes.len(), 2);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod position;
pub mod range_map;
pub mod stream;

pub use ast::{Document, Node, NodeConsumer, Proc, Text};
pub use diagnostics::{Error, ErrorKind};
pub use lexer::{Lexer, LexerOptions, Token, TokenKind};
pub use parser::{Parser, ParserOptions};
pub use position::{Position, Span};
pub use range_map::{NodePath, RangeMap};
pub use stream::TokenStream;
