use super::*;
use crate::parser::test_utils::{parse_expr, tokenize};
use charcot_ast::{LiteralNode, UnaryOperator};
use pretty_assertions::assert_eq;

fn shape(source: &str) -> String {
    parse_expr(source).to_string()
}

#[test]
fn test_multiplication_binds_tighter() {
    crate::tests::init_test_logger();
    assert_eq!(shape("1 + 2 * 3"), "(1 + (2 * 3))");
    assert_eq!(shape("1 * 2 + 3"), "((1 * 2) + 3)");
}

#[test]
fn test_every_level() {
    assert_eq!(
        shape("a = b || c && d == e < f + g * -h"),
        "(a = (b || (c && (d == (e < (f + (g * (-h))))))))"
    );
}

#[test]
fn test_left_associativity() {
    assert_eq!(shape("a - b - c"), "((a - b) - c)");
    assert_eq!(shape("a / b * c"), "((a / b) * c)");
    assert_eq!(shape("a == b != c"), "((a == b) != c)");
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(shape("a = b = 1"), "(a = (b = 1))");
    assert_eq!(shape("a := b + 1"), "(a = (b + 1))");
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(shape("(1 + 2) * 3"), "((1 + 2) * 3)");
}

#[test]
fn test_unary_nests() {
    let expr = parse_expr("!!ok");
    match expr {
        ExpressionNode::Unary(outer) => {
            assert_eq!(outer.operator, UnaryOperator::Not);
            assert!(matches!(outer.operand, ExpressionNode::Unary(_)));
        }
        other => panic!("expected unary, got {other:?}"),
    }
}

#[test]
fn test_member_and_method_chain() {
    assert_eq!(shape("p.labs.latest(\"hb\").value"), r#"p.labs.latest("hb").value"#);
    match parse_expr("p.weight > 50") {
        ExpressionNode::Binary(bin) => {
            assert_eq!(bin.operator, BinaryOperator::Gt);
            assert!(matches!(bin.left, ExpressionNode::Member(_)));
        }
        other => panic!("expected binary, got {other:?}"),
    }
}

#[test]
fn test_function_call() {
    match parse_expr("verify_dosage(p, \"ibuprofen\", 200mg)") {
        ExpressionNode::Call(call) => {
            assert_eq!(call.callee.name, "verify_dosage");
            assert_eq!(call.arguments.len(), 3);
            assert_eq!(
                call.arguments[2],
                ExpressionNode::Literal(LiteralNode::Measurement("200mg".into()))
            );
        }
        other => panic!("expected call, got {other:?}"),
    }
    assert_eq!(shape("now()"), "now()");
}

#[test]
fn test_array_literal_trailing_comma() {
    assert_eq!(shape("[1, 2, 3,]"), "[1, 2, 3]");
    assert_eq!(shape("[]"), "[]");
}

#[test]
fn test_object_literal() {
    assert_eq!(
        shape("{ name: \"Ana\", weight: 60kg, }"),
        r#"{name: "Ana", weight: 60kg}"#
    );
}

#[test]
fn test_argument_list_rejects_trailing_comma() {
    let tokens = tokenize("f(1, )");
    assert!(parse_expression(TokenSlice::new(&tokens)).is_err());
}

#[test]
fn test_missing_operand() {
    let tokens = tokenize("1 + ;");
    let err = parse_expression(TokenSlice::new(&tokens)).unwrap_err();
    match err {
        nom::Err::Failure(e) => {
            assert_eq!(e.expected, "expected expression");
            assert_eq!(e.input.peek_type(), Some(&TokenType::Semicolon));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}
