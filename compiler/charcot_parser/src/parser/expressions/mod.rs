use charcot_ast::{
    BinaryExpressionNode, BinaryOperator, CallExpressionNode, ExpressionNode, MemberExpressionNode,
    MethodCallNode, UnaryExpressionNode, UnaryOperator,
};
use charcot_lexer::TokenType;
use nom::sequence::{delimited, preceded};

use crate::parser::identifiers::{expect_identifier, parse_identifier};
use crate::parser::literals::{is_literal_start, parse_literal};
use crate::parser::{comma_list, fail, take_token_if, PResult, TokenSlice};

pub mod array_literal;
pub mod object_literal;

#[cfg(test)]
mod tests;

pub use array_literal::parse_array_literal;
pub use object_literal::{parse_object_literal, parse_property_assignment, parse_property_list};

fn binary_operator(tt: &TokenType) -> Option<BinaryOperator> {
    Some(match tt {
        TokenType::Equal | TokenType::ColonEqual => BinaryOperator::Assign,
        TokenType::OrOr => BinaryOperator::Or,
        TokenType::AndAnd => BinaryOperator::And,
        TokenType::EqualEqual => BinaryOperator::Eq,
        TokenType::NotEqual => BinaryOperator::Neq,
        TokenType::Less => BinaryOperator::Lt,
        TokenType::Greater => BinaryOperator::Gt,
        TokenType::LessEqual => BinaryOperator::Le,
        TokenType::GreaterEqual => BinaryOperator::Ge,
        TokenType::Plus => BinaryOperator::Add,
        TokenType::Minus => BinaryOperator::Sub,
        TokenType::Star => BinaryOperator::Mul,
        TokenType::Slash => BinaryOperator::Div,
        _ => return None,
    })
}

/// Binding strength of a binary operator; higher binds tighter.
pub fn get_precedence(op: BinaryOperator) -> u8 {
    match op {
        BinaryOperator::Mul | BinaryOperator::Div => 7,
        BinaryOperator::Add | BinaryOperator::Sub => 6,
        BinaryOperator::Lt | BinaryOperator::Gt | BinaryOperator::Le | BinaryOperator::Ge => 5,
        BinaryOperator::Eq | BinaryOperator::Neq => 4,
        BinaryOperator::And => 3,
        BinaryOperator::Or => 2,
        BinaryOperator::Assign => 1,
    }
}

fn is_right_associative(op: BinaryOperator) -> bool {
    matches!(op, BinaryOperator::Assign)
}

/// Parses a full expression, assignment included.
pub fn parse_expression(input: TokenSlice<'_>) -> PResult<'_, ExpressionNode> {
    parse_binary_expression(input, 0)
}

/// Precedence climbing over the binary operator levels.
pub fn parse_binary_expression(input: TokenSlice<'_>, min_prec: u8) -> PResult<'_, ExpressionNode> {
    let (mut input, mut lhs) = parse_unary_expression(input)?;

    while let Some(op) = input.peek_type().and_then(binary_operator) {
        let prec = get_precedence(op);
        if prec < min_prec {
            break;
        }
        let next_min = if is_right_associative(op) { prec } else { prec + 1 };
        let (rest, rhs) = parse_binary_expression(input.advance(), next_min)?;
        lhs = ExpressionNode::Binary(Box::new(BinaryExpressionNode {
            left: lhs,
            operator: op,
            right: rhs,
        }));
        input = rest;
    }

    Ok((input, lhs))
}

/// `!expr` and `-expr`, nesting to the right.
pub fn parse_unary_expression(input: TokenSlice<'_>) -> PResult<'_, ExpressionNode> {
    let operator = match input.peek_type() {
        Some(TokenType::Not) => UnaryOperator::Not,
        Some(TokenType::Minus) => UnaryOperator::Neg,
        _ => return parse_postfix_expression(input),
    };
    let (input, operand) = parse_unary_expression(input.advance())?;
    Ok((
        input,
        ExpressionNode::Unary(Box::new(UnaryExpressionNode { operator, operand })),
    ))
}

/// A primary followed by any number of `.name` or `.name(args)` suffixes.
pub fn parse_postfix_expression(input: TokenSlice<'_>) -> PResult<'_, ExpressionNode> {
    let (mut input, mut expr) = parse_primary_expression(input)?;

    while input.check(|t| matches!(t, TokenType::Dot)) {
        let (rest, member) = expect_identifier(input.advance(), "expected property name after '.'")?;
        if rest.check(|t| matches!(t, TokenType::LeftParen)) {
            let (rest, arguments) = parse_arguments(rest)?;
            expr = ExpressionNode::MethodCall(Box::new(MethodCallNode {
                object: expr,
                method: member.name,
                arguments,
            }));
            input = rest;
        } else {
            expr = ExpressionNode::Member(Box::new(MemberExpressionNode {
                object: expr,
                property: member.name,
            }));
            input = rest;
        }
    }

    Ok((input, expr))
}

/// Literals, array and object literals, parenthesized expressions, plain
/// names and calls.
pub fn parse_primary_expression(input: TokenSlice<'_>) -> PResult<'_, ExpressionNode> {
    match input.peek_type() {
        Some(tt) if is_literal_start(tt) => {
            let (input, literal) = parse_literal(input)?;
            Ok((input, ExpressionNode::Literal(literal)))
        }
        Some(TokenType::LeftBracket) => parse_array_literal(input),
        Some(TokenType::LeftBrace) => parse_object_literal(input),
        Some(TokenType::LeftParen) => delimited(
            take_token_if(|t| matches!(t, TokenType::LeftParen), "expected '('"),
            parse_expression,
            take_token_if(
                |t| matches!(t, TokenType::RightParen),
                "expected ')' after expression",
            ),
        )(input),
        Some(TokenType::Identifier(_)) => {
            let (input, name) = parse_identifier(input)?;
            if input.check(|t| matches!(t, TokenType::LeftParen)) {
                let (input, arguments) = parse_arguments(input)?;
                Ok((
                    input,
                    ExpressionNode::Call(CallExpressionNode {
                        callee: name,
                        arguments,
                    }),
                ))
            } else {
                Ok((input, ExpressionNode::Variable(name)))
            }
        }
        _ => fail(input, "expected expression"),
    }
}

/// `( expr, expr, ... )` with no trailing comma.
pub fn parse_arguments(input: TokenSlice<'_>) -> PResult<'_, Vec<ExpressionNode>> {
    let close = |t: &TokenType| matches!(t, TokenType::RightParen);
    let (input, arguments) = preceded(
        take_token_if(|t| matches!(t, TokenType::LeftParen), "expected '('"),
        comma_list(parse_expression, close, false),
    )(input)?;
    let (input, _) = take_token_if(close, "expected ')' after arguments")(input)?;
    Ok((input, arguments))
}
