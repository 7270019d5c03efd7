use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_blood_pressure_is_one_measurement() {
    let tokens = tokenize("bp = 120/80mmHg;").unwrap();
    assert_eq!(
        tokens[2].token_type,
        TokenType::Measurement("120/80mmHg".into())
    );
    assert_eq!(tokens[2].lexeme.as_str(), "120/80mmHg");
    assert_eq!(tokens[3].token_type, TokenType::Semicolon);
}

#[test]
fn test_unknown_unit_backtracks() {
    assert_eq!(
        kinds("5xyz"),
        vec![
            TokenType::Number(5.0),
            TokenType::Identifier("xyz".into()),
            TokenType::Eof,
        ]
    );
}

#[test]
fn test_ratio_without_unit_is_division() {
    assert_eq!(
        kinds("120/80"),
        vec![
            TokenType::Number(120.0),
            TokenType::Slash,
            TokenType::Number(80.0),
            TokenType::Eof,
        ]
    );
}

#[test]
fn test_units() {
    for (source, text) in [
        ("60kg", "60kg"),
        ("5mg/dL", "5mg/dL"),
        ("2.5mmol/L", "2.5mmol/L"),
        ("72bpm", "72bpm"),
        ("37.5C", "37.5C"),
        ("10min", "10min"),
        ("3μmol", "3μmol"),
    ] {
        assert_eq!(
            kinds(source),
            vec![TokenType::Measurement(text.into()), TokenType::Eof],
            "{source}"
        );
    }
}

#[test]
fn test_measurement_followed_by_punctuation() {
    assert_eq!(
        kinds("{ weight: 60kg, }"),
        vec![
            TokenType::LeftBrace,
            TokenType::Identifier("weight".into()),
            TokenType::Colon,
            TokenType::Measurement("60kg".into()),
            TokenType::Comma,
            TokenType::RightBrace,
            TokenType::Eof,
        ]
    );
}

#[test]
fn test_date_literal() {
    assert_eq!(
        kinds("2024-01-15"),
        vec![TokenType::Date("2024-01-15".into()), TokenType::Eof]
    );
}

#[test]
fn test_almost_date_is_arithmetic() {
    assert_eq!(
        kinds("2024-01"),
        vec![
            TokenType::Number(2024.0),
            TokenType::Minus,
            TokenType::Number(1.0),
            TokenType::Eof,
        ]
    );
}

#[test]
fn test_clinical_path_header() {
    assert_eq!(
        kinds("clinical_path severity { case \"high\": return; }"),
        vec![
            TokenType::ClinicalPath,
            TokenType::Identifier("severity".into()),
            TokenType::LeftBrace,
            TokenType::Case,
            TokenType::String("high".into()),
            TokenType::Colon,
            TokenType::Return,
            TokenType::Semicolon,
            TokenType::RightBrace,
            TokenType::Eof,
        ]
    );
}
