use super::*;
use crate::parser::test_utils::tokenize;
use charcot_ast::{ExpressionNode, LiteralNode};
use pretty_assertions::assert_eq;

fn declaration(source: &str) -> DeclarationNode {
    let tokens = tokenize(source);
    let (rest, decl) = parse_declaration(TokenSlice::new(&tokens)).expect("declaration should parse");
    assert!(rest.is_at_end());
    decl
}

#[test]
fn test_import_path() {
    match declaration("import clinical.protocols.cardiology;") {
        DeclarationNode::Import(import) => {
            assert_eq!(import.module_name(), "clinical.protocols.cardiology")
        }
        other => panic!("expected import, got {other:?}"),
    }
}

#[test]
fn test_patient_declaration() {
    match declaration("patient p : Patient { name: \"Ana\", weight: 60kg, }") {
        DeclarationNode::Patient(patient) => {
            assert_eq!(patient.name.name, "p");
            let names: Vec<&str> = patient.properties.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names, vec!["name", "weight"]);
            assert_eq!(
                patient.properties[1].value,
                ExpressionNode::Literal(LiteralNode::Measurement("60kg".into()))
            );
        }
        other => panic!("expected patient, got {other:?}"),
    }
}

#[test]
fn test_patient_requires_patient_type() {
    let tokens = tokenize("patient p : Medication { }");
    let err = parse_declaration(TokenSlice::new(&tokens)).unwrap_err();
    match err {
        nom::Err::Failure(e) => assert_eq!(e.expected, "expected type 'Patient' after ':'"),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn test_procedure_and_treatment_share_shape() {
    let procedure = declaration("procedure check(p: Patient, dose) { }");
    let treatment = declaration("treatment check(p: Patient, dose) { }");
    match (&procedure, &treatment) {
        (DeclarationNode::Procedure(a), DeclarationNode::Treatment(b)) => {
            assert_eq!(a, b);
            assert_eq!(a.parameters.len(), 2);
            assert_eq!(a.parameters[0].type_annotation.as_deref(), Some("Patient"));
            assert_eq!(a.parameters[1].type_annotation, None);
        }
        other => panic!("unexpected declarations: {other:?}"),
    }
}

#[test]
fn test_variable_declaration_forms() {
    for source in ["x;", "x: int;", "x = 1;", "x: int := 1;"] {
        assert!(
            matches!(declaration(source), DeclarationNode::Variable(_)),
            "{source}"
        );
    }
}

#[test]
fn test_top_level_statement_is_rejected() {
    let tokens = tokenize("if (x) { }");
    let err = parse_declaration(TokenSlice::new(&tokens)).unwrap_err();
    match err {
        nom::Err::Failure(e) => assert_eq!(e.expected, "expected declaration"),
        other => panic!("expected failure, got {other:?}"),
    }
}
