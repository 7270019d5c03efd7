use charcot_ast::{ExpressionNode, ObjectLiteralNode, PropertyAssignmentNode};
use charcot_lexer::TokenType;

use crate::parser::identifiers::expect_identifier;
use crate::parser::{comma_list, parse_expression, take_token_if, PResult, TokenSlice};

/// `name : expr`
pub fn parse_property_assignment(input: TokenSlice<'_>) -> PResult<'_, PropertyAssignmentNode> {
    let (input, name) = expect_identifier(input, "expected property name")?;
    let (input, _) = take_token_if(
        |t| matches!(t, TokenType::Colon),
        "expected ':' after property name",
    )(input)?;
    let (input, value) = parse_expression(input)?;
    Ok((
        input,
        PropertyAssignmentNode {
            name: name.name,
            value,
        },
    ))
}

/// Comma-separated properties up to the closing `}`, trailing comma allowed.
/// The braces themselves are left to the caller.
pub fn parse_property_list(input: TokenSlice<'_>) -> PResult<'_, Vec<PropertyAssignmentNode>> {
    comma_list(
        parse_property_assignment,
        |t: &TokenType| matches!(t, TokenType::RightBrace),
        true,
    )(input)
}

/// `{ name: expr, ... }` in expression position.
pub fn parse_object_literal(input: TokenSlice<'_>) -> PResult<'_, ExpressionNode> {
    let (input, _) = take_token_if(|t| matches!(t, TokenType::LeftBrace), "expected '{'")(input)?;
    let (input, properties) = parse_property_list(input)?;
    let (input, _) = take_token_if(
        |t| matches!(t, TokenType::RightBrace),
        "expected '}' after properties",
    )(input)?;
    Ok((input, ExpressionNode::Object(ObjectLiteralNode { properties })))
}
