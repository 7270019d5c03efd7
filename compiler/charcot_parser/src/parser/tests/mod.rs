use crate::parser::test_utils::parse_source;
use charcot_ast::{AstPrinter, DeclarationNode};
use pretty_assertions::assert_eq;

#[test]
fn test_parse_program() {
    let program = parse_source(
        r#"
        import clinical.protocols;
        patient p : Patient { name: "Ana", weight: 60 }
        procedure check(p: Patient) {
            if (p.weight > 50) {
                prescribe(p, "ibuprofen", 200, "after meals");
            }
        }
        threshold: float = 50;
    "#,
    )
    .unwrap();
    assert_eq!(program.declarations.len(), 4);
    assert!(matches!(program.declarations[0], DeclarationNode::Import(_)));
    assert!(matches!(program.declarations[1], DeclarationNode::Patient(_)));
    assert!(matches!(program.declarations[2], DeclarationNode::Procedure(_)));
    assert!(matches!(program.declarations[3], DeclarationNode::Variable(_)));
}

#[test]
fn test_empty_program() {
    let program = parse_source("// nothing here").unwrap();
    assert!(program.declarations.is_empty());
}

#[test]
fn test_syntax_error_reports_token() {
    let err = parse_source("x: int = 1\ny = 2;").unwrap_err();
    assert_eq!(err.expected, "expected ';' after variable declaration");
    assert_eq!(err.found, "IDENTIFIER");
    assert_eq!(err.lexeme, "y");
    assert_eq!((err.line, err.column), (2, 1));
    assert_eq!(
        err.to_string(),
        "expected ';' after variable declaration at line 2, column 1, found IDENTIFIER 'y'"
    );
}

#[test]
fn test_syntax_error_at_end_of_input() {
    let err = parse_source("procedure f() {").unwrap_err();
    assert_eq!(err.expected, "expected '}' after block");
    assert_eq!(err.found, "EOF");
    assert!(err.help.is_some());
}

#[test]
fn test_reserved_word_help() {
    let err = parse_source("procedure new() { }").unwrap_err();
    assert_eq!(err.found, "NEW");
    assert_eq!(
        err.help.as_deref(),
        Some("'new' is a reserved word and cannot be used as an identifier")
    );
}

#[test]
fn test_printed_tree_is_stable_across_reformatting() {
    let compact = parse_source("procedure f(a){x:int=a+1*2;foreach(i in xs){log(i);}}").unwrap();
    let spaced = parse_source(
        "procedure f(a) {\n  x: int = a + 1 * 2; // note\n  foreach (i in xs) { log(i); }\n}",
    )
    .unwrap();
    assert_eq!(
        AstPrinter::new().print_program(&compact),
        AstPrinter::new().print_program(&spaced)
    );
}
