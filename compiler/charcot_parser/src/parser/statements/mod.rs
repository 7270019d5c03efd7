use charcot_ast::{
    BlockNode, CaseNode, ClinicalPathNode, ExpressionNode, ForEachNode, IfNode, LoopBinding, PrescribeNode,
    ReturnNode, StatementNode, WhileNode,
};
use charcot_lexer::TokenType;
use nom::sequence::{delimited, terminated};

use crate::parser::declarations::{parse_variable_declaration, parse_variable_head};
use crate::parser::identifiers::parse_identifier;
use crate::parser::{parse_expression, take_token_if, PResult, TokenSlice};

#[cfg(test)]
mod tests;

fn is_colon(t: &TokenType) -> bool {
    matches!(t, TokenType::Colon)
}

fn is_semicolon(t: &TokenType) -> bool {
    matches!(t, TokenType::Semicolon)
}

/// Parses one statement.
///
/// An identifier directly followed by `:` starts a variable declaration;
/// any other identifier starts an expression statement.
pub fn parse_statement(input: TokenSlice<'_>) -> PResult<'_, StatementNode> {
    match input.peek_type() {
        Some(TokenType::LeftBrace) => {
            let (input, block) = parse_block(input)?;
            Ok((input, StatementNode::Block(block)))
        }
        Some(TokenType::If) => parse_if_statement(input),
        Some(TokenType::While) => parse_while_statement(input),
        Some(TokenType::Foreach) => parse_foreach_statement(input),
        Some(TokenType::ClinicalPath) => parse_clinical_path(input),
        Some(TokenType::Return) => parse_return_statement(input),
        Some(TokenType::Prescribe) => parse_prescribe_statement(input),
        Some(TokenType::Identifier(_))
            if input.peek_nth(1).map_or(false, |t| is_colon(&t.token_type)) =>
        {
            let (input, decl) = parse_variable_declaration(input)?;
            Ok((input, StatementNode::Variable(decl)))
        }
        _ => {
            let (input, expr) = terminated(
                parse_expression,
                take_token_if(is_semicolon, "expected ';' after expression"),
            )(input)?;
            Ok((input, StatementNode::Expr(expr)))
        }
    }
}

/// `{ statement* }`
pub fn parse_block(input: TokenSlice<'_>) -> PResult<'_, BlockNode> {
    let (mut input, _) = take_token_if(|t| matches!(t, TokenType::LeftBrace), "expected '{'")(input)?;
    let mut statements = Vec::new();

    while !input.check(|t| matches!(t, TokenType::RightBrace | TokenType::Eof)) && !input.is_empty() {
        let (rest, stmt) = parse_statement(input)?;
        statements.push(stmt);
        input = rest;
    }

    let (input, _) = take_token_if(|t| matches!(t, TokenType::RightBrace), "expected '}' after block")(input)?;
    Ok((input, BlockNode { statements }))
}

/// `( expr )` as used by `if` and `while` headers
fn parse_condition(input: TokenSlice<'_>) -> PResult<'_, ExpressionNode> {
    delimited(
        take_token_if(|t| matches!(t, TokenType::LeftParen), "expected '(' before condition"),
        parse_expression,
        take_token_if(|t| matches!(t, TokenType::RightParen), "expected ')' after condition"),
    )(input)
}

/// `if ( expr ) statement (else statement)?`
pub fn parse_if_statement(input: TokenSlice<'_>) -> PResult<'_, StatementNode> {
    let (input, _) = take_token_if(|t| matches!(t, TokenType::If), "expected 'if'")(input)?;
    let (input, condition) = parse_condition(input)?;
    let (mut input, then_branch) = parse_statement(input)?;

    let mut else_branch = None;
    if input.check(|t| matches!(t, TokenType::Else)) {
        let (rest, stmt) = parse_statement(input.advance())?;
        else_branch = Some(stmt);
        input = rest;
    }

    Ok((
        input,
        StatementNode::If(Box::new(IfNode {
            condition,
            then_branch,
            else_branch,
        })),
    ))
}

/// `while ( expr ) statement`
pub fn parse_while_statement(input: TokenSlice<'_>) -> PResult<'_, StatementNode> {
    let (input, _) = take_token_if(|t| matches!(t, TokenType::While), "expected 'while'")(input)?;
    let (input, condition) = parse_condition(input)?;
    let (input, body) = parse_statement(input)?;
    Ok((input, StatementNode::While(Box::new(WhileNode { condition, body }))))
}

/// `foreach ( name (: type)? in expr ) statement`
///
/// With a type annotation the header declares a fresh loop variable;
/// a bare name reuses an existing binding.
pub fn parse_foreach_statement(input: TokenSlice<'_>) -> PResult<'_, StatementNode> {
    let (input, _) = take_token_if(|t| matches!(t, TokenType::Foreach), "expected 'foreach'")(input)?;
    let (input, _) = take_token_if(
        |t| matches!(t, TokenType::LeftParen),
        "expected '(' after 'foreach'",
    )(input)?;

    let declares = input.check(|t| matches!(t, TokenType::Identifier(_)))
        && input.peek_nth(1).map_or(false, |t| is_colon(&t.token_type));
    let (input, binding) = if declares {
        let (input, decl) = parse_variable_head(input)?;
        (input, LoopBinding::Declaration(decl))
    } else {
        let (input, ident) = parse_identifier(input)?;
        (input, LoopBinding::Existing(ident))
    };

    let (input, _) = take_token_if(
        |t| matches!(t, TokenType::In),
        "expected 'in' after loop variable",
    )(input)?;
    let (input, collection) = parse_expression(input)?;
    let (input, _) = take_token_if(
        |t| matches!(t, TokenType::RightParen),
        "expected ')' after collection",
    )(input)?;
    let (input, body) = parse_statement(input)?;

    Ok((
        input,
        StatementNode::ForEach(Box::new(ForEachNode {
            binding,
            collection,
            body,
        })),
    ))
}

/// `case expr : statement`
pub fn parse_case(input: TokenSlice<'_>) -> PResult<'_, CaseNode> {
    let (input, _) = take_token_if(|t| matches!(t, TokenType::Case), "expected 'case'")(input)?;
    let (input, value) = parse_expression(input)?;
    let (input, _) = take_token_if(is_colon, "expected ':' after case value")(input)?;
    let (input, body) = parse_statement(input)?;
    Ok((input, CaseNode { value, body }))
}

/// `clinical_path expr { case* }`
pub fn parse_clinical_path(input: TokenSlice<'_>) -> PResult<'_, StatementNode> {
    let (input, _) = take_token_if(
        |t| matches!(t, TokenType::ClinicalPath),
        "expected 'clinical_path'",
    )(input)?;
    let (input, subject) = parse_expression(input)?;
    let (mut input, _) = take_token_if(
        |t| matches!(t, TokenType::LeftBrace),
        "expected '{' after clinical_path expression",
    )(input)?;

    let mut cases = Vec::new();
    while input.check(|t| matches!(t, TokenType::Case)) {
        let (rest, case) = parse_case(input)?;
        cases.push(case);
        input = rest;
    }

    let (input, _) = take_token_if(
        |t| matches!(t, TokenType::RightBrace),
        "expected 'case' or '}' in clinical_path",
    )(input)?;
    Ok((
        input,
        StatementNode::ClinicalPath(Box::new(ClinicalPathNode { subject, cases })),
    ))
}

/// `return expr? ;`
pub fn parse_return_statement(input: TokenSlice<'_>) -> PResult<'_, StatementNode> {
    let (mut input, _) = take_token_if(|t| matches!(t, TokenType::Return), "expected 'return'")(input)?;
    let mut value = None;
    if !input.check(is_semicolon) {
        let (rest, expr) = parse_expression(input)?;
        value = Some(expr);
        input = rest;
    }
    let (input, _) = take_token_if(is_semicolon, "expected ';' after return")(input)?;
    Ok((input, StatementNode::Return(ReturnNode { value })))
}

/// `prescribe ( patient , medication , dose (, instructions (, duration)?)? ) ;`
pub fn parse_prescribe_statement(input: TokenSlice<'_>) -> PResult<'_, StatementNode> {
    let comma = |t: &TokenType| matches!(t, TokenType::Comma);

    let (input, _) = take_token_if(|t| matches!(t, TokenType::Prescribe), "expected 'prescribe'")(input)?;
    let (input, _) = take_token_if(
        |t| matches!(t, TokenType::LeftParen),
        "expected '(' after 'prescribe'",
    )(input)?;
    let (input, patient) = parse_expression(input)?;
    let (input, _) = take_token_if(comma, "expected ',' after patient")(input)?;
    let (input, medication) = parse_expression(input)?;
    let (input, _) = take_token_if(comma, "expected ',' after medication")(input)?;
    let (mut input, dose) = parse_expression(input)?;

    let mut instructions = None;
    let mut duration = None;
    if input.check(comma) {
        let (rest, expr) = parse_expression(input.advance())?;
        instructions = Some(expr);
        input = rest;
        if input.check(comma) {
            let (rest, expr) = parse_expression(input.advance())?;
            duration = Some(expr);
            input = rest;
        }
    }

    let (input, _) = take_token_if(
        |t| matches!(t, TokenType::RightParen),
        "expected ')' after prescribe arguments",
    )(input)?;
    let (input, _) = take_token_if(is_semicolon, "expected ';' after prescribe")(input)?;

    Ok((
        input,
        StatementNode::Prescribe(Box::new(PrescribeNode {
            patient,
            medication,
            dose,
            instructions,
            duration,
        })),
    ))
}
