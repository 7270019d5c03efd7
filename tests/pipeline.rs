use charcot_ast::{AstPrinter, DeclarationNode, ExpressionNode, StatementNode};
use pretty_assertions::assert_eq;
use tests::{compile, count_lines, function_body};

const WARD: &str = r#"
    patient p : Patient { name: "Ana", weight: 60 }
    procedure check(p: Patient) {
        if (p.weight > 50) {
            prescribe(p, "ibuprofen", 200, "after meals");
        }
    }
"#;

#[test]
fn patient_procedure_scenario() {
    let out = compile(WARD).expect("ward program compiles");
    assert_eq!(out.notices, vec![]);

    assert_eq!(count_lines(&out.ir, "= global %Patient zeroinitializer"), 1);
    assert_eq!(count_lines(&out.ir, "define void @check("), 1);

    let main = function_body(&out.ir, "main");
    let field_stores: Vec<_> = main
        .iter()
        .filter(|l| l.trim_start().starts_with("store"))
        .collect();
    assert_eq!(field_stores.len(), 2);

    let check = function_body(&out.ir, "check");
    assert_eq!(
        check.iter().filter(|l| l.trim_start().starts_with("br i1")).count(),
        1
    );
    assert_eq!(count_lines(&out.ir, "call void @prescribe("), 1);
}

#[test]
fn optimizer_keeps_ir_intact() {
    let plain = compile(WARD).unwrap().ir;
    let optimized = charcot::compile_source(WARD, &charcot::CompileOptions::default())
        .unwrap()
        .ir;
    assert_eq!(plain, optimized);
}

#[test]
fn precedence_survives_parse_and_print() {
    let tokens = charcot_lexer::tokenize("x := a = 1 + 2 * 3 < 4 && !b || c == d;").unwrap();
    let program = charcot_parser::parse(&tokens).unwrap();
    let DeclarationNode::Variable(var) = &program.declarations[0] else {
        panic!("expected a variable declaration");
    };
    let init = var.initializer.as_ref().unwrap();
    assert_eq!(
        init.to_string(),
        "(a = ((((1 + (2 * 3)) < 4) && (!b)) || (c == d)))"
    );
}

#[test]
fn token_and_ast_dumps() {
    let tokens = charcot_lexer::tokenize("bp := 120/80mmHg;").unwrap();
    let dumped: Vec<String> = tokens.iter().map(ToString::to_string).collect();
    assert_eq!(
        dumped,
        vec![
            "IDENTIFIER 'bp' at 1:1",
            "ASSIGN ':=' at 1:4",
            "MEASUREMENT '120/80mmHg' at 1:7",
            "SEMICOLON ';' at 1:17",
            "EOF '' at 1:18",
        ]
    );

    let program = charcot_parser::parse(&tokens).unwrap();
    let text = AstPrinter::new().print_program(&program);
    assert!(text.starts_with("Program:\n"));
    assert!(text.contains("Variable: bp : inferred"));
    assert!(text.contains("Literal (measurement): 120/80mmHg"));
}

#[test]
fn clinical_workflow_compiles_cleanly() {
    let source = r#"
        import clinical.dosing;

        threshold: float = 38.5;
        patient ana : Patient { name: "Ana", weight: 60kg, allergies: ["penicillin"] }

        treatment fever(p: Patient, temp: float) {
            clinical_path temp > threshold {
                case 1: { prescribe(p, "paracetamol", 500mg, "every 6 hours", 5); }
            }
        }

        procedure rounds(patients: array, meds: array) {
            count: int = 0;
            foreach (p: Patient in patients) {
                if (verify_allergies(p.allergies, meds) || p.weight < 40) {
                    return;
                } else {
                    count = count + 1;
                }
            }
            while (count > 0 && !(count == 1)) {
                count = count - 1;
            }
            fever(ana, 39);
        }
    "#;
    let out = compile(source).expect("workflow compiles");
    assert_eq!(out.notices, vec![]);
    assert_eq!(out.imports, vec!["clinical.dosing".to_string()]);
    assert!(out.ir.contains("; import: clinical.dosing"));
    assert!(out.ir.contains("define void @fever(%Patient* %arg0, float %arg1) {"));
    assert!(out.ir.contains("call void @fever(%Patient* @ana, float"));
    assert!(out.ir.contains("call i8** @create_array(i32 1)"));
    assert!(out.ir.contains("@threshold = global float zeroinitializer"));
}

#[test]
fn foreach_header_declaration_needs_no_semicolon() {
    let tokens =
        charcot_lexer::tokenize("procedure p(xs: array) { foreach (x: int in xs) { } }").unwrap();
    let program = charcot_parser::parse(&tokens).unwrap();
    let DeclarationNode::Procedure(proc) = &program.declarations[0] else {
        panic!("expected a procedure");
    };
    assert!(matches!(
        &proc.body.statements[0],
        StatementNode::ForEach(node) if matches!(node.collection, ExpressionNode::Variable(_))
    ));
}
