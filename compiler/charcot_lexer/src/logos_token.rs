//! Raw `logos` token definitions and the callbacks that need to look past
//! what a regular expression can express (unit suffixes, string escapes,
//! block comments that may run to end of input).

use logos::{Logos, Skip};

use crate::units::measurement_suffix_len;

/// Failure raised by the raw tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexingError {
    /// No token pattern matches at this position
    #[default]
    UnexpectedCharacter,
    /// End of input reached inside a string literal
    UnterminatedString,
}

/// A numeric literal is either a plain number or a measurement whose text
/// already includes its unit suffix.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericLiteral {
    /// Plain number, already parsed
    Number(f64),
    /// Number followed by a recognized medical unit
    Measurement,
}

/// Raw token kinds recognized by the `logos` DFA, before positions are
/// attached.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexingError)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
pub enum LogosToken {
    /// Never produced; the callback skips the comment body
    #[token("/*", skip_block_comment)]
    BlockComment,

    // Keywords
    /// `patient`
    #[token("patient")]
    Patient,
    /// `procedure`
    #[token("procedure")]
    Procedure,
    /// `treatment`
    #[token("treatment")]
    Treatment,
    /// `prescription`
    #[token("prescription")]
    Prescription,
    /// `verify`
    #[token("verify")]
    Verify,
    /// `import`
    #[token("import")]
    Import,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `for`
    #[token("for")]
    For,
    /// `foreach`
    #[token("foreach")]
    Foreach,
    /// `in`
    #[token("in")]
    In,
    /// `return`
    #[token("return")]
    Return,
    /// `case`
    #[token("case")]
    Case,
    /// `clinical_path`
    #[token("clinical_path")]
    ClinicalPath,
    /// `diagnose`
    #[token("diagnose")]
    Diagnose,
    /// `monitor`
    #[token("monitor")]
    Monitor,
    /// `prescribe`
    #[token("prescribe")]
    Prescribe,
    /// `new`
    #[token("new")]
    New,

    /// One of the built-in domain type names
    #[token("Patient")]
    #[token("BloodTest")]
    #[token("VitalSigns")]
    #[token("Prescription")]
    #[token("Medication")]
    #[token("LabResult")]
    #[token("Diagnosis")]
    #[token("Treatment")]
    TypeName,

    /// Any other word
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    /// `YYYY-MM-DD`; wins over numbers by being the longer match
    #[regex(r"[0-9]{4}-[0-9]{2}-[0-9]{2}")]
    Date,

    /// Number, possibly extended into a measurement
    #[regex(r"[0-9]+(\.[0-9]*)?", lex_numeric)]
    Numeric(NumericLiteral),

    /// String literal with its escapes resolved
    #[token("\"", lex_string)]
    String(String),

    // Operators
    /// `:=`
    #[token(":=")]
    ColonEqual,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    NotEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// `=`
    #[token("=")]
    Equal,
    /// `!`
    #[token("!")]
    Not,
    /// `>`
    #[token(">")]
    Greater,
    /// `<`
    #[token("<")]
    Less,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,

    // Delimiters
    /// `.`
    #[token(".")]
    Dot,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `(`
    #[token("(")]
    LeftParen,
    /// `)`
    #[token(")")]
    RightParen,
    /// `{`
    #[token("{")]
    LeftBrace,
    /// `}`
    #[token("}")]
    RightBrace,
    /// `[`
    #[token("[")]
    LeftBracket,
    /// `]`
    #[token("]")]
    RightBracket,
}

/// Skips to the closing `*/`, or to end of input when there is none.
fn skip_block_comment(lex: &mut logos::Lexer<LogosToken>) -> Skip {
    let rest = lex.remainder();
    let len = rest.find("*/").map(|end| end + 2).unwrap_or(rest.len());
    lex.bump(len);
    Skip
}

/// Extends a numeric body with a medical unit suffix when one follows.
fn lex_numeric(lex: &mut logos::Lexer<LogosToken>) -> Result<NumericLiteral, LexingError> {
    let suffix = measurement_suffix_len(lex.remainder());
    if suffix > 0 {
        lex.bump(suffix);
        return Ok(NumericLiteral::Measurement);
    }
    lex.slice()
        .parse()
        .map(NumericLiteral::Number)
        .map_err(|_| LexingError::UnexpectedCharacter)
}

/// Reads a string body after the opening quote, resolving escapes.
fn lex_string(lex: &mut logos::Lexer<LogosToken>) -> Result<String, LexingError> {
    let mut value = String::new();
    let mut chars = lex.remainder().char_indices();

    while let Some((index, c)) = chars.next() {
        match c {
            '"' => {
                lex.bump(index + 1);
                return Ok(value);
            }
            '\\' => match chars.next() {
                Some((_, 'n')) => value.push('\n'),
                Some((_, 't')) => value.push('\t'),
                Some((_, 'r')) => value.push('\r'),
                Some((_, other)) => value.push(other),
                None => break,
            },
            other => value.push(other),
        }
    }

    let rest = lex.remainder().len();
    lex.bump(rest);
    Err(LexingError::UnterminatedString)
}
