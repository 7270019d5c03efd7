// Parser for the Charcot language built from nom combinators over lexer tokens.
//
// Every grammar mismatch is a `nom::Err::Failure`: the grammar never needs to
// backtrack past a consumed token, and a failure must stop the whole parse.

use std::borrow::Cow;

use charcot_ast::ProgramNode;
use charcot_lexer::{Token, TokenType};
use nom::error::ErrorKind;
use nom::IResult;

pub mod declarations;
pub mod diagnostics;
pub mod expressions;
pub mod identifiers;
pub mod literals;
pub mod statements;
pub mod token_stream;

#[cfg(test)]
pub(crate) mod test_utils;
#[cfg(test)]
mod tests;

pub use declarations::parse_declaration;
pub use expressions::parse_expression;
pub use statements::{parse_block, parse_statement};
pub use token_stream::TokenSlice;

use diagnostics::{message_for_error_kind, syntax_error_from_nom, SyntaxError};

/// The parser's nom error: where parsing stopped and what was expected there.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError<'a> {
    pub input: TokenSlice<'a>,
    pub expected: Cow<'static, str>,
}

impl<'a> ParseError<'a> {
    pub fn new(input: TokenSlice<'a>, expected: impl Into<Cow<'static, str>>) -> Self {
        Self {
            input,
            expected: expected.into(),
        }
    }
}

impl<'a> nom::error::ParseError<TokenSlice<'a>> for ParseError<'a> {
    fn from_error_kind(input: TokenSlice<'a>, kind: ErrorKind) -> Self {
        Self::new(input, message_for_error_kind(kind))
    }

    fn append(_input: TokenSlice<'a>, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

/// Result type shared by every parser in this crate
pub type PResult<'a, T> = IResult<TokenSlice<'a>, T, ParseError<'a>>;

/// A hard failure at the current token
pub fn fail<'a, T>(input: TokenSlice<'a>, expected: impl Into<Cow<'static, str>>) -> PResult<'a, T> {
    Err(nom::Err::Failure(ParseError::new(input, expected)))
}

/// Consume one token whose kind satisfies `pred`, or fail with `expected`.
pub fn take_token_if<'a, F>(
    pred: F,
    expected: &'static str,
) -> impl Fn(TokenSlice<'a>) -> PResult<'a, &'a Token>
where
    F: Fn(&TokenType) -> bool,
{
    move |input: TokenSlice<'a>| match input.first() {
        Some(token) if pred(&token.token_type) => Ok((input.advance(), token)),
        _ => fail(input, expected),
    }
}

/// Parses a comma-separated list up to (not including) the token matching
/// `closer`. An empty list is allowed; a trailing comma is allowed when
/// `trailing_comma` is set.
pub fn comma_list<'a, T, P, C>(
    mut item: P,
    closer: C,
    trailing_comma: bool,
) -> impl FnMut(TokenSlice<'a>) -> PResult<'a, Vec<T>>
where
    P: FnMut(TokenSlice<'a>) -> PResult<'a, T>,
    C: Fn(&TokenType) -> bool,
{
    move |mut input: TokenSlice<'a>| {
        let mut items = Vec::new();
        if input.check(&closer) {
            return Ok((input, items));
        }
        loop {
            let (rest, value) = item(input)?;
            items.push(value);
            input = rest;
            if !input.check(|t| matches!(t, TokenType::Comma)) {
                break;
            }
            input = input.advance();
            if trailing_comma && input.check(&closer) {
                break;
            }
        }
        Ok((input, items))
    }
}

/// `program := declaration* EOF`
pub fn parse_program(mut input: TokenSlice<'_>) -> PResult<'_, ProgramNode> {
    let mut declarations = Vec::new();
    while !input.is_at_end() {
        let (rest, decl) = parse_declaration(input)?;
        declarations.push(decl);
        input = rest;
    }
    Ok((input, ProgramNode { declarations }))
}

/// Parse a complete token sequence into a program.
pub fn parse(tokens: &[Token]) -> Result<ProgramNode, SyntaxError> {
    match parse_program(TokenSlice::new(tokens)) {
        Ok((_, program)) => {
            log::debug!("parsed {} top-level declarations", program.declarations.len());
            Ok(program)
        }
        Err(err) => {
            let err = syntax_error_from_nom(err);
            log::debug!("parse failed: {err}");
            Err(err)
        }
    }
}
