use crate::error::SproutError;
use crate::lexer::Lexer;
use crate::token::{Token, TokenType};

/// Result of scanning one source text: every token up to and including
/// `Eof`, plus the diagnostics worth showing the user.
#[derive(Debug)]
pub struct ScanOutput {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<SproutError>,
}

/// Scans `source` and collects diagnostics in source order. Illegal tokens
/// are turned into errors here; the lexer itself only records unterminated
/// strings.
pub fn scan(source: &str) -> ScanOutput {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.scan_tokens();

    let mut diagnostics: Vec<SproutError> = tokens
        .iter()
        .filter(|token| token.token_type == TokenType::Illegal)
        .map(SproutError::illegal_character)
        .collect();
    diagnostics.extend(lexer.errors().iter().cloned());
    diagnostics.sort_by_key(|error| error.span.start);

    ScanOutput {
        tokens,
        diagnostics,
    }
}

/// Prints the token stream of `source` and reports every diagnostic.
/// Returns the number of diagnostics reported.
pub fn run(source: &str, filename: Option<&str>, show_tokens: bool) -> usize {
    let output = scan(source);

    if show_tokens {
        for token in output.tokens.iter().filter(|token| !token.is_eof()) {
            println!("{}", token);
        }
    }

    for error in &output.diagnostics {
        if let Err(io_error) = error.report(source, filename) {
            eprintln!("{} (failed to render report: {})", error, io_error);
        }
    }

    output.diagnostics.len()
}
