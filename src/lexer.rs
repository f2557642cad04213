use crate::error::{Span, SproutError};
use crate::token::{lookup_ident, Token, TokenType};

/// Characters that may follow a backslash inside a string literal.
const ESCAPABLE: [char; 5] = ['"', '\\', 'n', 't', 'r'];

/// Single-pass scanner over one input text.
///
/// Produces one token per call to [`Lexer::next_token`]. Problems in the
/// input never abort scanning: unknown characters come back as `Illegal`
/// tokens, and strings missing their closing quote are returned with the
/// text scanned so far and recorded in [`Lexer::errors`].
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    ch: Option<char>,
    errors: Vec<SproutError>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let input: Vec<char> = input.chars().collect();
        let ch = input.first().copied();

        Self {
            input,
            position: 0,
            ch,
            errors: Vec::new(),
        }
    }

    /// Returns the next token. Once the input is exhausted every call
    /// returns an `Eof` token positioned at the end of the input.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.position;
        let Some(ch) = self.ch else {
            return Token::new(TokenType::Eof, String::new(), start);
        };

        let token_type = match ch {
            '=' => self.either('=', TokenType::Eq, TokenType::Assign),
            '!' => self.either('=', TokenType::NotEq, TokenType::Bang),
            ';' => TokenType::Semicolon,
            ',' => TokenType::Comma,
            ':' => TokenType::Colon,
            '+' => TokenType::Plus,
            '-' => TokenType::Minus,
            '/' => TokenType::Slash,
            '*' => TokenType::Asterisk,
            '<' => TokenType::Lt,
            '>' => TokenType::Gt,
            '(' => TokenType::LParen,
            ')' => TokenType::RParen,
            '{' => TokenType::LBrace,
            '}' => TokenType::RBrace,
            '[' => TokenType::LBracket,
            ']' => TokenType::RBracket,
            '"' => return self.string(start),
            c if is_identifier_start(c) => return self.identifier(start),
            c if c.is_ascii_digit() => return self.number(start),
            _ => TokenType::Illegal,
        };

        self.advance();
        Token::new(token_type, self.slice(start, self.position), start)
    }

    /// Drains the lexer. The result always ends with exactly one `Eof`.
    pub fn scan_tokens(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.is_eof();
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    pub fn errors(&self) -> &[SproutError] {
        &self.errors
    }

    pub fn position(&self) -> usize {
        self.position
    }

    fn advance(&mut self) {
        if self.position < self.input.len() {
            self.position += 1;
        }
        self.ch = self.input.get(self.position).copied();
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, Some(' ' | '\t' | '\n' | '\r')) {
            self.advance();
        }
    }

    /// Consumes the lookahead only when it completes the two-character form.
    fn either(&mut self, second: char, matched: TokenType, single: TokenType) -> TokenType {
        if self.peek() == Some(second) {
            self.advance();
            matched
        } else {
            single
        }
    }

    fn string(&mut self, start: usize) -> Token {
        // opening quote
        self.advance();
        let content_start = self.position;

        while let Some(c) = self.ch {
            if c == '"' {
                break;
            }
            if c == '\\' && self.peek().is_some_and(|next| ESCAPABLE.contains(&next)) {
                self.advance();
            }
            self.advance();
        }

        let raw = self.slice(content_start, self.position);

        if self.ch.is_some() {
            // closing quote
            self.advance();
        } else {
            self.errors
                .push(SproutError::unterminated_string(Span::new(start, self.position)));
        }

        Token::new(TokenType::String, unescape(&raw), start)
    }

    fn identifier(&mut self, start: usize) -> Token {
        while self.ch.is_some_and(is_identifier_char) {
            self.advance();
        }

        let text = self.slice(start, self.position);
        Token::new(lookup_ident(&text), text, start)
    }

    fn number(&mut self, start: usize) -> Token {
        while self.ch.is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        Token::new(TokenType::Int, self.slice(start, self.position), start)
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.input[start..end].iter().collect()
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Decodes backslash escapes from the closed set `\" \\ \n \t \r`. A
/// backslash followed by anything else is kept as written.
fn unescape(raw: &str) -> String {
    let mut decoded = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }

        let escaped = match chars.peek() {
            Some('"') => '"',
            Some('\\') => '\\',
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            _ => {
                decoded.push('\\');
                continue;
            }
        };
        chars.next();
        decoded.push(escaped);
    }

    decoded
}

/// Convenience wrapper: scans `input` to completion.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).scan_tokens()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn kinds(input: &str) -> Vec<TokenType> {
        tokenize(input).into_iter().map(|t| t.token_type).collect()
    }

    fn tok(token_type: TokenType, literal: &str, position: usize) -> Token {
        Token::new(token_type, literal.to_string(), position)
    }

    #[test]
    fn let_statement() {
        assert_eq!(
            tokenize("let five = 5;"),
            vec![
                tok(TokenType::Let, "let", 0),
                tok(TokenType::Ident, "five", 4),
                tok(TokenType::Assign, "=", 9),
                tok(TokenType::Int, "5", 11),
                tok(TokenType::Semicolon, ";", 12),
                tok(TokenType::Eof, "", 13),
            ]
        );
    }

    #[test]
    fn equality_uses_lookahead() {
        assert_eq!(
            tokenize("10 == 10;"),
            vec![
                tok(TokenType::Int, "10", 0),
                tok(TokenType::Eq, "==", 3),
                tok(TokenType::Int, "10", 6),
                tok(TokenType::Semicolon, ";", 8),
                tok(TokenType::Eof, "", 9),
            ]
        );
    }

    #[test]
    fn inequality_uses_lookahead() {
        assert_eq!(
            tokenize("10 != 9;"),
            vec![
                tok(TokenType::Int, "10", 0),
                tok(TokenType::NotEq, "!=", 3),
                tok(TokenType::Int, "9", 6),
                tok(TokenType::Semicolon, ";", 7),
                tok(TokenType::Eof, "", 8),
            ]
        );
    }

    #[test]
    fn lookahead_not_committed_on_mismatch() {
        assert_eq!(
            kinds("=! !! =="),
            vec![
                TokenType::Assign,
                TokenType::Bang,
                TokenType::Bang,
                TokenType::Bang,
                TokenType::Eq,
                TokenType::Eof,
            ]
        );
        assert_eq!(kinds("==="), vec![TokenType::Eq, TokenType::Assign, TokenType::Eof]);
        assert_eq!(kinds("!"), vec![TokenType::Bang, TokenType::Eof]);
        assert_eq!(kinds("= ="), vec![TokenType::Assign, TokenType::Assign, TokenType::Eof]);
    }

    #[test]
    fn single_character_punctuation() {
        assert_eq!(
            kinds(";,:+-/*<>(){}[]"),
            vec![
                TokenType::Semicolon,
                TokenType::Comma,
                TokenType::Colon,
                TokenType::Plus,
                TokenType::Minus,
                TokenType::Slash,
                TokenType::Asterisk,
                TokenType::Lt,
                TokenType::Gt,
                TokenType::LParen,
                TokenType::RParen,
                TokenType::LBrace,
                TokenType::RBrace,
                TokenType::LBracket,
                TokenType::RBracket,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(
            kinds("fn let true false if else return func _x x1 Let"),
            vec![
                TokenType::Function,
                TokenType::Let,
                TokenType::True,
                TokenType::False,
                TokenType::If,
                TokenType::Else,
                TokenType::Return,
                TokenType::Ident,
                TokenType::Ident,
                TokenType::Ident,
                TokenType::Ident,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn identifier_runs_include_digits_and_underscores() {
        let tokens = tokenize("foo_bar2 9lives");
        assert_eq!(tokens[0], tok(TokenType::Ident, "foo_bar2", 0));
        assert_eq!(tokens[1], tok(TokenType::Int, "9", 9));
        assert_eq!(tokens[2], tok(TokenType::Ident, "lives", 10));
    }

    #[test]
    fn decimal_point_ends_integer() {
        assert_eq!(
            tokenize("3.14"),
            vec![
                tok(TokenType::Int, "3", 0),
                tok(TokenType::Illegal, ".", 1),
                tok(TokenType::Int, "14", 2),
                tok(TokenType::Eof, "", 4),
            ]
        );
    }

    #[test]
    fn string_escapes_are_decoded() {
        let tokens = tokenize(r#""a\nb""#);
        assert_eq!(tokens[0], tok(TokenType::String, "a\nb", 0));
        assert_eq!(tokens[0].literal.chars().count(), 3);
        assert_eq!(tokens[1], tok(TokenType::Eof, "", 6));

        let tokens = tokenize(r#""say \"hi\"\t\\\r""#);
        assert_eq!(tokens[0].literal, "say \"hi\"\t\\\r");
        assert_eq!(tokens[1].token_type, TokenType::Eof);
    }

    #[test]
    fn unknown_escape_kept_verbatim() {
        let tokens = tokenize(r#""\qA""#);
        assert_eq!(tokens[0].literal, r"\qA");
    }

    #[test]
    fn escaped_backslash_before_closing_quote() {
        let tokens = tokenize(r#""a\\" b"#);
        assert_eq!(tokens[0], tok(TokenType::String, "a\\", 0));
        assert_eq!(tokens[1], tok(TokenType::Ident, "b", 6));
        assert_eq!(tokens[2].token_type, TokenType::Eof);
    }

    #[test]
    fn empty_string() {
        assert_eq!(
            tokenize(r#""""#),
            vec![tok(TokenType::String, "", 0), tok(TokenType::Eof, "", 2)]
        );
    }

    #[test]
    fn unterminated_string_returns_partial_text() {
        let mut lexer = Lexer::new("\"abc");
        assert_eq!(lexer.next_token(), tok(TokenType::String, "abc", 0));
        assert_eq!(lexer.next_token(), tok(TokenType::Eof, "", 4));

        assert_eq!(lexer.errors().len(), 1);
        assert_eq!(lexer.errors()[0].kind, ErrorKind::UnterminatedString);
        assert_eq!(lexer.errors()[0].span, Span::new(0, 4));
    }

    #[test]
    fn unterminated_string_with_trailing_backslash() {
        let mut lexer = Lexer::new("\"ab\\");
        assert_eq!(lexer.next_token().literal, "ab\\");
        assert!(lexer.next_token().is_eof());
        assert_eq!(lexer.errors().len(), 1);
    }

    #[test]
    fn escaped_quote_does_not_close_string() {
        let mut lexer = Lexer::new(r#""abc\""#);
        assert_eq!(lexer.next_token().literal, "abc\"");
        assert!(lexer.next_token().is_eof());
        assert_eq!(lexer.errors().len(), 1);
    }

    #[test]
    fn terminated_strings_record_no_errors() {
        let mut lexer = Lexer::new(r#"let s = "ok";"#);
        lexer.scan_tokens();
        assert!(lexer.errors().is_empty());
    }

    #[test]
    fn illegal_character_then_continue() {
        assert_eq!(
            tokenize("@"),
            vec![tok(TokenType::Illegal, "@", 0), tok(TokenType::Eof, "", 1)]
        );
        assert_eq!(
            tokenize("a @ b"),
            vec![
                tok(TokenType::Ident, "a", 0),
                tok(TokenType::Illegal, "@", 2),
                tok(TokenType::Ident, "b", 4),
                tok(TokenType::Eof, "", 5),
            ]
        );
    }

    #[test]
    fn non_ascii_letters_are_illegal() {
        assert_eq!(
            tokenize("é"),
            vec![tok(TokenType::Illegal, "é", 0), tok(TokenType::Eof, "", 1)]
        );
    }

    #[test]
    fn nul_character_is_not_end_of_input() {
        assert_eq!(
            kinds("a\0b"),
            vec![TokenType::Ident, TokenType::Illegal, TokenType::Ident, TokenType::Eof]
        );
    }

    #[test]
    fn eof_is_idempotent() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().token_type, TokenType::Ident);
        for _ in 0..5 {
            assert_eq!(lexer.next_token(), tok(TokenType::Eof, "", 1));
            assert_eq!(lexer.position(), 1);
        }
    }

    #[test]
    fn empty_and_whitespace_only_input() {
        assert_eq!(tokenize(""), vec![tok(TokenType::Eof, "", 0)]);
        assert_eq!(tokenize(" \t\r\n "), vec![tok(TokenType::Eof, "", 5)]);
    }

    #[test]
    fn positions_are_token_starts() {
        let tokens = tokenize("fn(x, y) {\n  x + y;\n}");
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 2, 3, 4, 6, 7, 9, 13, 15, 17, 18, 20, 21]);
    }

    #[test]
    fn unescape_closed_set() {
        assert_eq!(unescape(r#"\n\t\r\\\""#), "\n\t\r\\\"");
        assert_eq!(unescape(r"\x41"), r"\x41");
        assert_eq!(unescape("plain"), "plain");
        assert_eq!(unescape("\\"), "\\");
    }
}
