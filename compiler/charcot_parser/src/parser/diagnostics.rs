use charcot_ast::Span;
use charcot_lexer::token::{Token, TokenType};
use nom::error::ErrorKind;
use thiserror::Error;

use crate::parser::ParseError;

/// A fatal syntax error at the first token the grammar could not accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{expected} at line {line}, column {column}, found {found} '{lexeme}'")]
pub struct SyntaxError {
    /// Human-readable expectation, e.g. "expected ';' after variable declaration"
    pub expected: String,
    /// Kind of the offending token
    pub found: String,
    /// Literal text of the offending token
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
    /// Optional hint for the author
    pub help: Option<String>,
}

impl SyntaxError {
    /// Create an error anchored at `token`, or at the end of input
    pub fn at_token<S: Into<String>>(token: Option<&Token>, expected: S) -> Self {
        match token {
            Some(token) => Self {
                expected: expected.into(),
                found: token.token_type.name().to_string(),
                lexeme: token.lexeme.to_string(),
                line: token.location.line,
                column: token.location.column,
                help: default_help_for_token(&token.token_type),
            },
            None => Self {
                expected: expected.into(),
                found: TokenType::Eof.name().to_string(),
                lexeme: String::new(),
                line: 0,
                column: 0,
                help: None,
            },
        }
    }
}

impl<'a> From<ParseError<'a>> for SyntaxError {
    fn from(err: ParseError<'a>) -> Self {
        SyntaxError::at_token(err.input.first(), err.expected)
    }
}

/// Convert the error half of a nom result into a [`SyntaxError`]
pub fn syntax_error_from_nom(err: nom::Err<ParseError<'_>>) -> SyntaxError {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => e.into(),
        nom::Err::Incomplete(_) => SyntaxError::at_token(None, "unexpected end of input"),
    }
}

/// Fallback expectation text for nom's own error kinds
pub fn message_for_error_kind(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Eof => "expected end of input",
        ErrorKind::Tag => "unexpected token",
        ErrorKind::Many0 | ErrorKind::Many1 => "expected a repeated element",
        ErrorKind::SeparatedList => "expected a comma-separated list",
        _ => "unexpected token",
    }
}

/// A short hint for tokens that commonly show up in the wrong place
pub fn default_help_for_token(tt: &TokenType) -> Option<String> {
    match tt {
        TokenType::Eof => Some("the file ended early; check for a missing '}' or ';'".into()),
        TokenType::Equal | TokenType::ColonEqual => {
            Some("use '==' to compare values; '=' and ':=' assign".into())
        }
        TokenType::TypeName(name) => Some(format!(
            "'{name}' is a built-in type name and cannot be used as an identifier"
        )),
        t if t.is_keyword() => Some(format!(
            "'{}' is a reserved word and cannot be used as an identifier",
            t.name().to_lowercase()
        )),
        _ => None,
    }
}

/// Span covering a single token
pub fn span_from_token(token: &Token) -> Span {
    Span {
        start: token.location.offset,
        end: token.location.offset + token.lexeme.as_str().len(),
        line: token.location.line,
        column: token.location.column,
    }
}
