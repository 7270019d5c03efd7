use charcot_ast::{
    DeclarationNode, ImportNode, ParameterNode, PatientDeclarationNode, ProcedureNode,
    VariableDeclarationNode,
};
use charcot_lexer::TokenType;

use crate::parser::diagnostics::span_from_token;
use crate::parser::expressions::parse_property_list;
use crate::parser::identifiers::{expect_identifier, parse_type_annotation};
use crate::parser::{
    comma_list, fail, parse_block, parse_expression, take_token_if, PResult, TokenSlice,
};

#[cfg(test)]
mod tests;

/// Dispatches on the current token. Anything that is not `import`,
/// `patient`, `procedure` or `treatment` must be a variable declaration.
pub fn parse_declaration(input: TokenSlice<'_>) -> PResult<'_, DeclarationNode> {
    match input.peek_type() {
        Some(TokenType::Import) => {
            let (input, import) = parse_import(input)?;
            Ok((input, DeclarationNode::Import(import)))
        }
        Some(TokenType::Patient) => {
            let (input, patient) = parse_patient_declaration(input)?;
            Ok((input, DeclarationNode::Patient(patient)))
        }
        Some(TokenType::Procedure) => {
            let (input, proc) = parse_procedure(input)?;
            Ok((input, DeclarationNode::Procedure(proc)))
        }
        Some(TokenType::Treatment) => {
            let (input, proc) = parse_procedure(input)?;
            Ok((input, DeclarationNode::Treatment(proc)))
        }
        _ => {
            let (input, var) = parse_variable_declaration(input)?;
            Ok((input, DeclarationNode::Variable(var)))
        }
    }
}

/// `import name ( . name )* ;`
pub fn parse_import(input: TokenSlice<'_>) -> PResult<'_, ImportNode> {
    let (mut input, keyword) = take_token_if(|t| matches!(t, TokenType::Import), "expected 'import'")(input)?;
    let span = span_from_token(keyword);

    let (rest, first) = expect_identifier(input, "expected module name after 'import'")?;
    let mut path = vec![first.name];
    input = rest;

    while input.check(|t| matches!(t, TokenType::Dot)) {
        let (rest, segment) = expect_identifier(input.advance(), "expected identifier after '.'")?;
        path.push(segment.name);
        input = rest;
    }

    let (input, _) = take_token_if(
        |t| matches!(t, TokenType::Semicolon),
        "expected ';' after import",
    )(input)?;
    Ok((input, ImportNode { path, span }))
}

/// `patient name : Patient { properties }`
pub fn parse_patient_declaration(input: TokenSlice<'_>) -> PResult<'_, PatientDeclarationNode> {
    let (input, _) = take_token_if(|t| matches!(t, TokenType::Patient), "expected 'patient'")(input)?;
    let (input, name) = expect_identifier(input, "expected patient name after 'patient'")?;
    let (input, _) = take_token_if(
        |t| matches!(t, TokenType::Colon),
        "expected ':' after patient name",
    )(input)?;
    let (input, _) = take_token_if(
        |t| matches!(t, TokenType::TypeName(name) if name.as_str() == "Patient"),
        "expected type 'Patient' after ':'",
    )(input)?;
    let (input, _) = take_token_if(
        |t| matches!(t, TokenType::LeftBrace),
        "expected '{' before patient properties",
    )(input)?;
    let (input, properties) = parse_property_list(input)?;
    let (input, _) = take_token_if(
        |t| matches!(t, TokenType::RightBrace),
        "expected '}' after patient properties",
    )(input)?;
    Ok((input, PatientDeclarationNode { name, properties }))
}

/// `name (: type)?`
pub fn parse_parameter(input: TokenSlice<'_>) -> PResult<'_, ParameterNode> {
    let (input, name) = expect_identifier(input, "expected parameter name")?;
    let (input, type_annotation) = parse_type_annotation(input)?;
    Ok((
        input,
        ParameterNode {
            name,
            type_annotation,
        },
    ))
}

/// `procedure|treatment name ( params ) { body }`
pub fn parse_procedure(input: TokenSlice<'_>) -> PResult<'_, ProcedureNode> {
    let (input, _) = take_token_if(
        |t| matches!(t, TokenType::Procedure | TokenType::Treatment),
        "expected 'procedure' or 'treatment'",
    )(input)?;
    let (input, name) = expect_identifier(input, "expected procedure name")?;
    let (input, _) = take_token_if(
        |t| matches!(t, TokenType::LeftParen),
        "expected '(' after procedure name",
    )(input)?;
    let close = |t: &TokenType| matches!(t, TokenType::RightParen);
    let (input, parameters) = comma_list(parse_parameter, close, false)(input)?;
    let (input, _) = take_token_if(close, "expected ')' after parameters")(input)?;
    let (input, body) = parse_block(input)?;
    Ok((
        input,
        ProcedureNode {
            name,
            parameters,
            body,
        },
    ))
}

/// `name (: type)?`, the part of a variable declaration a `foreach` header
/// shares.
pub fn parse_variable_head(input: TokenSlice<'_>) -> PResult<'_, VariableDeclarationNode> {
    let (input, name) = expect_identifier(input, "expected variable name")?;
    let (input, type_annotation) = parse_type_annotation(input)?;
    Ok((
        input,
        VariableDeclarationNode {
            name,
            type_annotation,
            initializer: None,
        },
    ))
}

/// `name (: type)? ((= | :=) expr)? ;`
pub fn parse_variable_declaration(input: TokenSlice<'_>) -> PResult<'_, VariableDeclarationNode> {
    if !input.check(|t| matches!(t, TokenType::Identifier(_))) {
        return fail(input, "expected declaration");
    }
    let (mut input, mut decl) = parse_variable_head(input)?;

    if input.check(TokenType::is_assign) {
        let (rest, value) = parse_expression(input.advance())?;
        decl.initializer = Some(value);
        input = rest;
    }

    let (input, _) = take_token_if(
        |t| matches!(t, TokenType::Semicolon),
        "expected ';' after variable declaration",
    )(input)?;
    Ok((input, decl))
}
