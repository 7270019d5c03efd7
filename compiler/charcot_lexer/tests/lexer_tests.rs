use charcot_lexer::{tokenize, Lexer, TokenType};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::Once;

static INIT: Once = Once::new();

fn init_test_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

const RESERVED: &[&str] = &[
    "patient", "procedure", "treatment", "prescription", "verify", "import", "if", "else",
    "while", "for", "foreach", "in", "return", "case", "clinical_path", "diagnose", "monitor",
    "prescribe", "new", "Patient", "BloodTest", "VitalSigns", "Prescription", "Medication",
    "LabResult", "Diagnosis", "Treatment",
];

#[test]
fn test_patient_declaration_stream() {
    init_test_logger();
    let source = r#"
        import clinical.protocols;
        patient p : Patient {
            name: "Ana",
            weight: 60kg,
            admitted: 2024-01-15,
        }
    "#;
    let names: Vec<&str> = tokenize(source)
        .unwrap()
        .iter()
        .map(|t| t.token_type.name())
        .collect();
    assert_eq!(
        names,
        vec![
            "IMPORT", "IDENTIFIER", "DOT", "IDENTIFIER", "SEMICOLON", "PATIENT", "IDENTIFIER",
            "COLON", "TYPE", "LBRACE", "IDENTIFIER", "COLON", "STRING", "COMMA", "IDENTIFIER",
            "COLON", "MEASUREMENT", "COMMA", "IDENTIFIER", "COLON", "DATE", "COMMA", "RBRACE",
            "EOF",
        ]
    );
}

#[test]
fn test_iterator_stops_after_error() {
    let mut lexer = Lexer::new("a # b");
    assert!(matches!(lexer.next(), Some(Ok(_))));
    assert!(matches!(lexer.next(), Some(Err(_))));
    assert!(lexer.next().is_none());
}

proptest! {
    #[test]
    fn identifiers_lex_as_one_token(name in "[a-z_][a-z0-9_]{0,12}") {
        prop_assume!(!RESERVED.contains(&name.as_str()));
        let tokens = tokenize(&name).unwrap();
        prop_assert_eq!(tokens.len(), 2);
        prop_assert_eq!(&tokens[0].token_type, &TokenType::Identifier(name.as_str().into()));
    }

    #[test]
    fn integers_keep_their_value(value in 0u32..1_000_000) {
        let tokens = tokenize(&value.to_string()).unwrap();
        prop_assert_eq!(&tokens[0].token_type, &TokenType::Number(f64::from(value)));
    }

    #[test]
    fn token_lexemes_reassemble_the_program(
        parts in proptest::collection::vec(
            prop_oneof![
                Just("x"), Just("dose"), Just("60kg"), Just("120/80mmHg"), Just("2024-01-15"),
                Just("+"), Just("=="), Just(":="), Just("("), Just(")"), Just("42"), Just(";"),
            ],
            0..20,
        )
    ) {
        let source = parts.join(" ");
        let tokens = tokenize(&source).unwrap();
        let rebuilt: Vec<String> = tokens
            .iter()
            .filter(|t| !t.is_eof())
            .map(|t| t.lexeme.to_string())
            .collect();
        prop_assert_eq!(rebuilt.join(" "), source);
    }
}
