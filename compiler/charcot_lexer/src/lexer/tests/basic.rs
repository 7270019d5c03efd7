use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_lexer_basic() {
    let tokens = tokenize("x = 42;").unwrap();

    assert_eq!(tokens.len(), 5);
    assert_eq!(tokens[0].token_type, TokenType::Identifier("x".into()));
    assert_eq!(tokens[1].token_type, TokenType::Equal);
    assert_eq!(tokens[2].token_type, TokenType::Number(42.0));
    assert_eq!(tokens[3].token_type, TokenType::Semicolon);
    assert_eq!(tokens[4].token_type, TokenType::Eof);
}

#[test]
fn test_empty_source_is_just_eof() {
    let tokens = tokenize("   // only a comment\n").unwrap();
    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].is_eof());
    assert_eq!(tokens[0].location, Location::new(2, 1, 21));
}

#[test]
fn test_lexer_keywords() {
    let input = "patient procedure treatment prescription verify import if else while \
                 for foreach in return case clinical_path diagnose monitor prescribe new";
    assert_eq!(
        kinds(input),
        vec![
            TokenType::Patient,
            TokenType::Procedure,
            TokenType::Treatment,
            TokenType::Prescription,
            TokenType::Verify,
            TokenType::Import,
            TokenType::If,
            TokenType::Else,
            TokenType::While,
            TokenType::For,
            TokenType::Foreach,
            TokenType::In,
            TokenType::Return,
            TokenType::Case,
            TokenType::ClinicalPath,
            TokenType::Diagnose,
            TokenType::Monitor,
            TokenType::Prescribe,
            TokenType::New,
            TokenType::Eof,
        ]
    );
}

#[test]
fn test_keyword_prefix_is_identifier() {
    assert_eq!(
        kinds("patients iffy clinical"),
        vec![
            TokenType::Identifier("patients".into()),
            TokenType::Identifier("iffy".into()),
            TokenType::Identifier("clinical".into()),
            TokenType::Eof,
        ]
    );
}

#[test]
fn test_type_names() {
    assert_eq!(
        kinds("Patient BloodTest VitalSigns Prescription Medication LabResult Diagnosis Treatment Doctor"),
        vec![
            TokenType::TypeName("Patient".into()),
            TokenType::TypeName("BloodTest".into()),
            TokenType::TypeName("VitalSigns".into()),
            TokenType::TypeName("Prescription".into()),
            TokenType::TypeName("Medication".into()),
            TokenType::TypeName("LabResult".into()),
            TokenType::TypeName("Diagnosis".into()),
            TokenType::TypeName("Treatment".into()),
            TokenType::Identifier("Doctor".into()),
            TokenType::Eof,
        ]
    );
}

#[test]
fn test_operators_prefer_two_characters() {
    assert_eq!(
        kinds(":= == != >= <= && || = ! > < + - * / : ."),
        vec![
            TokenType::ColonEqual,
            TokenType::EqualEqual,
            TokenType::NotEqual,
            TokenType::GreaterEqual,
            TokenType::LessEqual,
            TokenType::AndAnd,
            TokenType::OrOr,
            TokenType::Equal,
            TokenType::Not,
            TokenType::Greater,
            TokenType::Less,
            TokenType::Plus,
            TokenType::Minus,
            TokenType::Star,
            TokenType::Slash,
            TokenType::Colon,
            TokenType::Dot,
            TokenType::Eof,
        ]
    );
}

#[test]
fn test_delimiters() {
    assert_eq!(
        kinds("( ) { } [ ] , ;"),
        vec![
            TokenType::LeftParen,
            TokenType::RightParen,
            TokenType::LeftBrace,
            TokenType::RightBrace,
            TokenType::LeftBracket,
            TokenType::RightBracket,
            TokenType::Comma,
            TokenType::Semicolon,
            TokenType::Eof,
        ]
    );
}

#[test]
fn test_numbers() {
    assert_eq!(
        kinds("7 3.25 5."),
        vec![
            TokenType::Number(7.0),
            TokenType::Number(3.25),
            TokenType::Number(5.0),
            TokenType::Eof,
        ]
    );
}

#[test]
fn test_comments_are_skipped() {
    let source = "a // trailing\n/* block\n comment */ b";
    assert_eq!(
        kinds(source),
        vec![
            TokenType::Identifier("a".into()),
            TokenType::Identifier("b".into()),
            TokenType::Eof,
        ]
    );
}

#[test]
fn test_unterminated_block_comment_is_silent() {
    assert_eq!(
        kinds("a /* no end"),
        vec![TokenType::Identifier("a".into()), TokenType::Eof]
    );
}

#[test]
fn test_string_contents_and_escapes() {
    let tokens = tokenize(r#"note = "line\none \"quoted\"";"#).unwrap();
    assert_eq!(
        tokens[2].token_type,
        TokenType::String("line\none \"quoted\"".into())
    );
    assert_eq!(tokens[2].lexeme.as_str(), "line\none \"quoted\"");
}

#[test]
fn test_locations_are_one_based() {
    let tokens = tokenize("x\n  y = 1").unwrap();
    assert_eq!(tokens[0].location, Location::new(1, 1, 0));
    assert_eq!(tokens[1].location, Location::new(2, 3, 4));
    assert_eq!(tokens[2].location, Location::new(2, 5, 6));
    assert_eq!(tokens[3].location, Location::new(2, 7, 8));
}

#[test]
fn test_columns_count_characters() {
    let tokens = tokenize("\"μ\" x").unwrap();
    assert_eq!(tokens[1].location.column, 5);
}

#[test]
fn test_unterminated_string_points_at_opening_quote() {
    let err = tokenize("x = \"abc").unwrap_err();
    assert_eq!(
        err,
        LexError::UnterminatedString {
            location: Location::new(1, 5, 4)
        }
    );
}

#[test]
fn test_unexpected_character() {
    let err = tokenize("a\n  & b").unwrap_err();
    match err {
        LexError::UnexpectedCharacter { character, location } => {
            assert_eq!(character, '&');
            assert_eq!((location.line, location.column), (2, 3));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
