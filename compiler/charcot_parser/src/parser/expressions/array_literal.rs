use charcot_ast::{ArrayLiteralNode, ExpressionNode};
use charcot_lexer::TokenType;

use crate::parser::{comma_list, parse_expression, take_token_if, PResult, TokenSlice};

/// `[ expr, expr, ... ]`, trailing comma allowed.
pub fn parse_array_literal(input: TokenSlice<'_>) -> PResult<'_, ExpressionNode> {
    let close = |t: &TokenType| matches!(t, TokenType::RightBracket);
    let (input, _) = take_token_if(|t| matches!(t, TokenType::LeftBracket), "expected '['")(input)?;
    let (input, elements) = comma_list(parse_expression, close, true)(input)?;
    let (input, _) = take_token_if(close, "expected ']' after array elements")(input)?;
    Ok((input, ExpressionNode::Array(ArrayLiteralNode { elements })))
}
