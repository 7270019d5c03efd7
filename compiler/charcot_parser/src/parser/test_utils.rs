use charcot_lexer::Token;

use crate::parser::diagnostics::SyntaxError;
use crate::parser::{parse, parse_expression, parse_statement, TokenSlice};
use charcot_ast::{ExpressionNode, ProgramNode, StatementNode};

/// Tokenize test source, panicking on lexical errors
pub fn tokenize(source: &str) -> Vec<Token> {
    charcot_lexer::tokenize(source).expect("test source should tokenize")
}

pub fn parse_expr(source: &str) -> ExpressionNode {
    let tokens = tokenize(source);
    let (rest, expr) = parse_expression(TokenSlice::new(&tokens)).expect("expression should parse");
    assert!(rest.is_at_end(), "unconsumed tokens: {:?}", rest);
    expr
}

pub fn parse_stmt(source: &str) -> StatementNode {
    let tokens = tokenize(source);
    let (rest, stmt) = parse_statement(TokenSlice::new(&tokens)).expect("statement should parse");
    assert!(rest.is_at_end(), "unconsumed tokens: {:?}", rest);
    stmt
}

pub fn parse_source(source: &str) -> Result<ProgramNode, SyntaxError> {
    parse(&tokenize(source))
}
