//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::io::{self, Read};

use ahm_syntax::diagnostics::Error;
use ahm_syntax::lexer::{Lexer, LexerOptions, StrSource};
use ahm_syntax::parser::{Parser, ParserOptions};

use super::report::SyntaxReport;
use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (100 MB)
///
/// Files larger than this are rejected to prevent out-of-memory conditions
/// while building the node tree.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Path argument that selects standard input.
const STDIN_PATH: &str = "-";

/// Read source file contents, or standard input for `-`.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(file_path: &str) -> CliResult<String> {
    if file_path == STDIN_PATH {
        let mut source = String::new();
        io::stdin()
            .take(MAX_SOURCE_SIZE + 1)
            .read_to_string(&mut source)
            .map_err(|e| CliError::failure(format!("Error reading standard input: {}", e)))?;
        if source.len() as u64 > MAX_SOURCE_SIZE {
            return Err(CliError::failure(format!(
                "Standard input is too large (max {} bytes)",
                MAX_SOURCE_SIZE
            )));
        }
        return Ok(source);
    }

    // Check file size before reading
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path, e)))
}

/// Name shown in diagnostics: the explicit one, else the path (`<stdin>` for `-`).
fn display_name(file_path: &str, source_name: Option<&str>) -> String {
    match source_name {
        Some(name) => name.to_string(),
        None if file_path == STDIN_PATH => "<stdin>".to_string(),
        None => file_path.to_string(),
    }
}

fn syntax_failure(name: &str, source: &str, err: &Error) -> CliError {
    tracing::debug!(error = %err, "syntax error");
    CliError::failure(SyntaxReport::new(name, source, err).render())
}

/// Tokenize and display tokens.
pub fn tokens_file(file_path: &str, source_name: Option<&str>) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let name = display_name(file_path, source_name);
    let options = LexerOptions::new().with_source_name(name.clone());

    for token in Lexer::with_options(StrSource::new(&source), options) {
        let token = token.map_err(|err| syntax_failure(&name, &source, &err))?;
        println!("{}", token);
    }
    Ok(ExitCode::SUCCESS)
}

/// Parse and display the node tree.
pub fn parse_file(file_path: &str, source_name: Option<&str>, ranges: bool) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let name = display_name(file_path, source_name);
    let options = ParserOptions::new()
        .with_source_name(name.clone())
        .with_range_tracking(ranges);

    let mut parser = Parser::with_options(StrSource::new(&source), options);
    let document = parser
        .parse_document()
        .map_err(|err| syntax_failure(&name, &source, &err))?;

    println!("{:#?}", document.nodes);
    if let Some(ranges) = parser.ranges() {
        for (path, span) in ranges.iter() {
            println!("{} {}", path, span);
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Parse a file and report the outcome.
pub fn check_file(file_path: &str, source_name: Option<&str>) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let name = display_name(file_path, source_name);
    let options = ParserOptions::new().with_source_name(name.clone());

    let document = Parser::with_options(StrSource::new(&source), options)
        .parse_document()
        .map_err(|err| syntax_failure(&name, &source, &err))?;

    println!("ok: {} nodes", document.len());
    Ok(ExitCode::SUCCESS)
}
