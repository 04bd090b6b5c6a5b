//! Error types for parsing, with annotated source reporting

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Syntax error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },
}

impl ParseError {
    /// Shift the error span by `base` bytes
    ///
    /// Statement-at-a-time parsing works on a suffix of the grammar source,
    /// so spans come back relative to that suffix; the assembler re-bases
    /// them against the full input before reporting.
    pub fn shifted(self, base: usize) -> Self {
        match self {
            ParseError::Syntax {
                span,
                message,
                expected,
            } => ParseError::Syntax {
                span: span.start + base..span.end + base,
                message,
                expected,
            },
        }
    }

    /// Get the source span of the error
    pub fn span(&self) -> &Span {
        match self {
            ParseError::Syntax { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        match self {
            ParseError::Syntax {
                span,
                message,
                expected,
            } => {
                let expected_str = if expected.is_empty() {
                    String::new()
                } else {
                    format!("\nExpected: {}", expected.join(", "))
                };

                Report::build(ReportKind::Error, filename, span.start)
                    .with_message(message)
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message(format!("{}{}", message, expected_str))
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf)
                    .unwrap();
            }
        }
        String::from_utf8(buf).unwrap()
    }
}

impl<'a> From<chumsky::error::Rich<'a, char>> for ParseError {
    fn from(err: chumsky::error::Rich<'a, char>) -> Self {
        use chumsky::error::{RichPattern, RichReason};

        // Format expected tokens first so a lone expectation can shape the
        // message ("';' expected" rather than "unexpected '|'")
        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                RichPattern::Token(c) => Some(format_char(**c)),
                RichPattern::Label(label) => Some(label.to_string()),
                RichPattern::EndOfInput => Some("end of input".to_string()),
                RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                RichPattern::Any => Some("any character".to_string()),
                RichPattern::SomethingElse => None,
            })
            .collect();

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => {
                if expected.len() == 1 {
                    format!("{} expected", expected[0])
                } else if expected.iter().any(|e| e == "';'") {
                    // Merged expectations at a statement boundary (the
                    // stalled operator run merges with the terminator
                    // check); the missing `;` is the actionable one.
                    "';' expected".to_string()
                } else {
                    match found {
                        Some(c) => format!("Unexpected {}", format_char(**c)),
                        None => "Unexpected end of input".to_string(),
                    }
                }
            }
            RichReason::Custom(msg) => msg.to_string(),
        };

        ParseError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a character for human-readable error messages
fn format_char(c: char) -> String {
    match c {
        '\n' => "newline".to_string(),
        '\t' => "tab".to_string(),
        _ => format!("'{}'", c),
    }
}
