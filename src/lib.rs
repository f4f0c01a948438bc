#![forbid(unsafe_code)]
//! ahm: an indentation-structured markup dialect
//!
//! An `@name title` line starts a proc; lines indented deeper below it are its children. Any
//! other line is free text. This crate provides the `ahm` command-line tool and re-exports the
//! syntax frontend from `ahm_syntax`.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a bug (logic error), use `.expect("INVARIANT: reason")` with a
//!   clear explanation. Misusing [`stream::TokenStream::accept`] also panics.

pub mod cli;

pub use ahm_syntax::{ast, diagnostics, lexer, parser, position, range_map, stream};
pub use ahm_syntax::{Error, ErrorKind, Node, Parser, ParserOptions};
