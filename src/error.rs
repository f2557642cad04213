use crate::token::Token;
use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::fmt;
use std::io;

/// Character range in the source, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    IllegalCharacter,
    UnterminatedString,
}

impl ErrorKind {
    fn color(self) -> Color {
        match self {
            ErrorKind::IllegalCharacter => Color::Red,
            ErrorKind::UnterminatedString => Color::Yellow,
        }
    }

    fn title(self) -> &'static str {
        match self {
            ErrorKind::IllegalCharacter => "Illegal Character",
            ErrorKind::UnterminatedString => "Unterminated String",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SproutError {
    pub kind: ErrorKind,
    pub span: Span,
    pub message: String,
    pub help: Option<String>,
}

impl SproutError {
    pub fn new(kind: ErrorKind, span: Span, message: String) -> Self {
        Self {
            kind,
            span,
            message,
            help: None,
        }
    }

    pub fn new_with_help(kind: ErrorKind, span: Span, message: String, help: String) -> Self {
        Self {
            kind,
            span,
            message,
            help: Some(help),
        }
    }

    /// Builds a diagnostic for an `Illegal` token.
    pub fn illegal_character(token: &Token) -> Self {
        Self::new(
            ErrorKind::IllegalCharacter,
            Span::single(token.position),
            format!("Unexpected character: '{}'", token.literal.escape_debug()),
        )
    }

    pub fn unterminated_string(span: Span) -> Self {
        Self::new_with_help(
            ErrorKind::UnterminatedString,
            span,
            "String literal is missing its closing quote".to_string(),
            "add a '\"' to close the string".to_string(),
        )
    }

    /// Renders the diagnostic on stderr. Spans are character offsets, which
    /// is what ariadne's `Source` indexes by.
    pub fn report(&self, source: &str, filename: Option<&str>) -> io::Result<()> {
        let filename = filename.unwrap_or("<repl>");
        let color = self.kind.color();

        let mut report_builder = Report::build(ReportKind::Error, filename, self.span.start)
            .with_message(format!("{}: {}", self.kind.title().fg(color), self.message))
            .with_label(
                Label::new((filename, self.span.start..self.span.end))
                    .with_message(&self.message)
                    .with_color(color),
            );

        if let Some(ref help_text) = self.help {
            report_builder =
                report_builder.with_note(format!("{}: {}", "help".fg(Color::Cyan), help_text));
        }

        report_builder
            .finish()
            .eprint((filename, Source::from(source)))
    }
}

impl fmt::Display for SproutError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at {}: {}", self.kind.title(), self.span.start, self.message)
    }
}

impl std::error::Error for SproutError {}
