use charcot_ast::LiteralNode;
use charcot_lexer::TokenType;

use crate::parser::{fail, PResult, TokenSlice};

/// True when the current token starts a literal
pub fn is_literal_start(tt: &TokenType) -> bool {
    matches!(
        tt,
        TokenType::Number(_) | TokenType::String(_) | TokenType::Date(_) | TokenType::Measurement(_)
    )
}

/// Parses a number, string, date or measurement literal.
pub fn parse_literal(input: TokenSlice<'_>) -> PResult<'_, LiteralNode> {
    let literal = match input.peek_type() {
        Some(TokenType::Number(value)) => LiteralNode::Number(*value),
        Some(TokenType::String(value)) => LiteralNode::String(value.to_string()),
        Some(TokenType::Date(value)) => LiteralNode::Date(value.to_string()),
        Some(TokenType::Measurement(value)) => LiteralNode::Measurement(value.to_string()),
        _ => return fail(input, "expected literal"),
    };
    Ok((input.advance(), literal))
}
