use super::*;
use crate::parser::test_utils::{parse_stmt, tokenize};
use charcot_ast::{BinaryOperator, ExpressionNode, LiteralNode};
use pretty_assertions::assert_eq;

#[test]
fn test_identifier_colon_is_declaration() {
    match parse_stmt("dose: float = 2.5;") {
        StatementNode::Variable(decl) => {
            assert_eq!(decl.name.name, "dose");
            assert_eq!(decl.type_annotation.as_deref(), Some("float"));
            assert_eq!(
                decl.initializer,
                Some(ExpressionNode::Literal(LiteralNode::Number(2.5)))
            );
        }
        other => panic!("expected declaration, got {other:?}"),
    }
}

#[test]
fn test_identifier_without_colon_is_expression() {
    match parse_stmt("dose = 2.5;") {
        StatementNode::Expr(ExpressionNode::Binary(bin)) => {
            assert_eq!(bin.operator, BinaryOperator::Assign)
        }
        other => panic!("expected assignment, got {other:?}"),
    }
}

#[test]
fn test_if_else() {
    match parse_stmt("if (x > 1) { y = 1; } else y = 2;") {
        StatementNode::If(node) => {
            assert!(matches!(node.then_branch, StatementNode::Block(_)));
            assert!(matches!(node.else_branch, Some(StatementNode::Expr(_))));
        }
        other => panic!("expected if, got {other:?}"),
    }
}

#[test]
fn test_dangling_else_binds_to_nearest_if() {
    match parse_stmt("if (a) if (b) x = 1; else x = 2;") {
        StatementNode::If(outer) => {
            assert!(outer.else_branch.is_none());
            match outer.then_branch {
                StatementNode::If(inner) => assert!(inner.else_branch.is_some()),
                other => panic!("expected inner if, got {other:?}"),
            }
        }
        other => panic!("expected if, got {other:?}"),
    }
}

#[test]
fn test_while() {
    assert!(matches!(
        parse_stmt("while (i < 10) { i = i + 1; }"),
        StatementNode::While(_)
    ));
}

#[test]
fn test_foreach_with_declaration() {
    match parse_stmt("foreach (m: Medication in meds) { log(m); }") {
        StatementNode::ForEach(node) => match &node.binding {
            LoopBinding::Declaration(decl) => {
                assert_eq!(decl.name.name, "m");
                assert_eq!(decl.type_annotation.as_deref(), Some("Medication"));
            }
            other => panic!("expected declaration binding, got {other:?}"),
        },
        other => panic!("expected foreach, got {other:?}"),
    }
}

#[test]
fn test_foreach_with_existing_binding() {
    match parse_stmt("foreach (m in p.medications) log(m);") {
        StatementNode::ForEach(node) => {
            assert_eq!(node.binding.name(), "m");
            assert!(matches!(node.binding, LoopBinding::Existing(_)));
            assert!(matches!(node.collection, ExpressionNode::Member(_)));
        }
        other => panic!("expected foreach, got {other:?}"),
    }
}

#[test]
fn test_clinical_path() {
    let source = r#"clinical_path severity {
        case "high": { escalate(); }
        case "low": return;
    }"#;
    match parse_stmt(source) {
        StatementNode::ClinicalPath(node) => {
            assert_eq!(node.cases.len(), 2);
            assert!(matches!(node.cases[1].body, StatementNode::Return(_)));
        }
        other => panic!("expected clinical_path, got {other:?}"),
    }
    match parse_stmt("clinical_path x { }") {
        StatementNode::ClinicalPath(node) => assert!(node.cases.is_empty()),
        other => panic!("expected clinical_path, got {other:?}"),
    }
}

#[test]
fn test_return_forms() {
    assert_eq!(
        parse_stmt("return;"),
        StatementNode::Return(ReturnNode { value: None })
    );
    assert!(matches!(
        parse_stmt("return x + 1;"),
        StatementNode::Return(ReturnNode { value: Some(_) })
    ));
}

#[test]
fn test_prescribe_arities() {
    for (source, has_instructions, has_duration) in [
        ("prescribe(p, \"ibuprofen\", 200);", false, false),
        ("prescribe(p, \"ibuprofen\", 200, \"after meals\");", true, false),
        ("prescribe(p, \"ibuprofen\", 200, \"after meals\", 7days);", true, true),
    ] {
        match parse_stmt(source) {
            StatementNode::Prescribe(node) => {
                assert_eq!(node.instructions.is_some(), has_instructions, "{source}");
                assert_eq!(node.duration.is_some(), has_duration, "{source}");
            }
            other => panic!("expected prescribe, got {other:?}"),
        }
    }
}

#[test]
fn test_prescribe_needs_three_arguments() {
    let tokens = tokenize("prescribe(p, \"ibuprofen\");");
    assert!(parse_statement(TokenSlice::new(&tokens)).is_err());
}

#[test]
fn test_block_requires_closing_brace() {
    let tokens = tokenize("{ x = 1;");
    let err = parse_statement(TokenSlice::new(&tokens)).unwrap_err();
    match err {
        nom::Err::Failure(e) => assert_eq!(e.expected, "expected '}' after block"),
        other => panic!("expected failure, got {other:?}"),
    }
}
