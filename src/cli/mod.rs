//! CLI module for the ahm tool
//!
//! This module provides the command-line interface over the ahm syntax crate.
//!
//! ## Commands
//!
//! - `tokens <file>` - Print the token stream
//! - `parse <file>` - Print the node tree (and optionally node ranges)
//! - `check <file>` - Parse and report success or the first error
//!
//! A bare `ahm <file>` behaves like `check`. A file argument of `-` reads standard input.
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//! - `report` - Rendering of syntax errors with source context
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;
pub mod report;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Lexer and parser for the ahm markup dialect
#[derive(Parser, Debug)]
#[command(name = "ahm")]
#[command(version = VERSION)]
#[command(about = "Lexer and parser for the ahm markup dialect", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File to check (default action when no subcommand given)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Name of the input in diagnostics (defaults to the file path)
    #[arg(long, global = true, value_name = "NAME")]
    pub source_name: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every token, one per line
    Tokens {
        /// Source file (`-` for stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the parsed node tree
    Parse {
        /// Source file (`-` for stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Also print the source range of every node
        #[arg(long)]
        ranges: bool,
    },

    /// Parse and report the first error, if any
    Check {
        /// Source file (`-` for stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    let source_name = cli.source_name.as_deref();
    match cli.command {
        Some(Command::Tokens { file }) => commands::tokens_file(&file.to_string_lossy(), source_name),
        Some(Command::Parse { file, ranges }) => commands::parse_file(&file.to_string_lossy(), source_name, ranges),
        Some(Command::Check { file }) => commands::check_file(&file.to_string_lossy(), source_name),
        None => {
            // Default: check the file if provided
            if let Some(file) = cli.file {
                commands::check_file(&file.to_string_lossy(), source_name)
            } else {
                Err(CliError::failure("Error: no input file given (see `ahm --help`)"))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_tokens() {
        let cli = Cli::try_parse_from(["ahm", "tokens", "doc.ahm"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Tokens { .. })));
    }

    #[test]
    fn test_cli_parse_with_ranges() {
        let cli = Cli::try_parse_from(["ahm", "parse", "doc.ahm", "--ranges"]).unwrap();
        if let Some(Command::Parse { ranges, file }) = cli.command {
            assert!(ranges);
            assert_eq!(file, PathBuf::from("doc.ahm"));
        } else {
            panic!("Expected Parse command");
        }
    }

    #[test]
    fn test_cli_source_name_is_global() {
        let cli = Cli::try_parse_from(["ahm", "check", "-", "--source-name", "notes"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Check { .. })));
        assert_eq!(cli.source_name.as_deref(), Some("notes"));
    }

    #[test]
    fn test_cli_bare_file_defaults_to_check() {
        let cli = Cli::try_parse_from(["ahm", "doc.ahm"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.file, Some(PathBuf::from("doc.ahm")));
    }

    #[test]
    fn test_execute_without_file_fails() {
        let cli = Cli::try_parse_from(["ahm"]).unwrap();
        let err = execute(cli).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }
}
