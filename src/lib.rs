// Sprout language front end
//
// Lexical analysis for Sprout, a tiny interpreted language: the scanner,
// its token model, diagnostics rendering and a token-printing shell.

pub mod error;
pub mod lexer;
pub mod repl;
pub mod runner;
pub mod token;

pub use error::{ErrorKind, Span, SproutError};
pub use lexer::{tokenize, Lexer};
pub use token::{lookup_ident, Token, TokenType};

pub use repl::start as start_repl;
pub use runner::{run, scan, ScanOutput};
