#![no_main]

use ahm::lexer::{self, ReadSource, TokenKind};
use ahm::parser::Parser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Raw bytes go through the streaming source, which must reject bad UTF-8 without panicking
    let _ = Parser::new(ReadSource::from_read(data)).parse_all();

    if let Ok(s) = std::str::from_utf8(data) {
        // A successful lex always closes every level it opened
        if let Ok(tokens) = lexer::lex(s) {
            let indents = tokens.iter().filter(|t| t.is(TokenKind::Indent)).count();
            let dedents = tokens.iter().filter(|t| t.is(TokenKind::Dedent)).count();
            assert_eq!(indents, dedents);
        }
        let _ = Parser::for_str(s).parse_all();
    }
});
