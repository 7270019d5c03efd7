use charcot_ast::IdentifierNode;
use charcot_lexer::TokenType;

use crate::parser::diagnostics::span_from_token;
use crate::parser::{fail, PResult, TokenSlice};

/// Parses a plain identifier, failing with `expected` otherwise.
pub fn expect_identifier<'a>(
    input: TokenSlice<'a>,
    expected: &'static str,
) -> PResult<'a, IdentifierNode> {
    match input.first() {
        Some(token) => match &token.token_type {
            TokenType::Identifier(name) => Ok((
                input.advance(),
                IdentifierNode::new(name.as_str(), span_from_token(token)),
            )),
            _ => fail(input, expected),
        },
        None => fail(input, expected),
    }
}

/// Parses an identifier.
pub fn parse_identifier(input: TokenSlice<'_>) -> PResult<'_, IdentifierNode> {
    expect_identifier(input, "expected identifier")
}

/// Parses a type name: a built-in domain type (`Patient`) or a plain name
/// such as `int` or `string`.
pub fn parse_type_name(input: TokenSlice<'_>) -> PResult<'_, String> {
    match input.peek_type() {
        Some(TokenType::TypeName(name)) | Some(TokenType::Identifier(name)) => {
            Ok((input.advance(), name.to_string()))
        }
        _ => fail(input, "expected type name"),
    }
}

/// Parses an optional `: type` annotation.
pub fn parse_type_annotation(input: TokenSlice<'_>) -> PResult<'_, Option<String>> {
    if !input.check(|t| matches!(t, TokenType::Colon)) {
        return Ok((input, None));
    }
    let (input, ty) = parse_type_name(input.advance())?;
    Ok((input, Some(ty)))
}
