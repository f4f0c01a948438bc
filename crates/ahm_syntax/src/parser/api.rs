/// Parse a source string into its top-level nodes.
///
/// This is the main public entrypoint for parsing in-memory documents.
///
/// ## Errors
/// Returns the first [`Error`]; use [`Parser::parse_all`] to keep the nodes parsed before it.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn parse(source: &str) -> Result<Vec<Node>, Error> {
    match Parser::for_str(source).parse_all() {
        (nodes, None) => Ok(nodes),
        (_, Some(err)) => Err(err),
    }
}
