//! Positioned tokens handed to the parser.

use std::fmt;

use crate::string_interner::InternedString;

/// Represents a token's location in the source code.
///
/// Line and column are 1-based; the column counts characters, not bytes.
/// The offset is the 0-based byte offset from the start of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// The 1-based line number in the source file
    pub line: usize,
    /// The 1-based column number in the source file
    pub column: usize,
    /// The 0-based byte offset from the start of the source
    pub offset: usize,
}

impl Location {
    /// Create a new location
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The kind of a Charcot token.
///
/// Literal kinds carry their value: identifiers, type names, dates and
/// measurements carry their source text, strings carry the unescaped
/// contents, numbers carry the parsed value.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenType {
    // Keywords
    /// `patient`
    Patient,
    /// `procedure`
    Procedure,
    /// `treatment`
    Treatment,
    /// `prescription`
    Prescription,
    /// `verify`
    Verify,
    /// `import`
    Import,
    /// `if`
    If,
    /// `else`
    Else,
    /// `while`
    While,
    /// `for`
    For,
    /// `foreach`
    Foreach,
    /// `in`
    In,
    /// `return`
    Return,
    /// `case`
    Case,
    /// `clinical_path`
    ClinicalPath,
    /// `diagnose`
    Diagnose,
    /// `monitor`
    Monitor,
    /// `prescribe`
    Prescribe,
    /// `new`
    New,

    /// One of the built-in domain type names (`Patient`, `BloodTest`, ...)
    TypeName(InternedString),

    // Literals
    /// Plain identifier
    Identifier(InternedString),
    /// Numeric literal
    Number(f64),
    /// String literal, escapes resolved
    String(InternedString),
    /// `YYYY-MM-DD` date literal
    Date(InternedString),
    /// A number with a recognized medical unit, e.g. `120/80mmHg`
    Measurement(InternedString),

    // Operators
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `:=`
    ColonEqual,
    /// `=`
    Equal,
    /// `==`
    EqualEqual,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
    /// `!`
    Not,

    // Punctuation
    /// `.`
    Dot,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,

    /// End of input
    Eof,
}

impl TokenType {
    /// Returns true for either assignment spelling (`=` or `:=`)
    pub fn is_assign(&self) -> bool {
        matches!(self, TokenType::Equal | TokenType::ColonEqual)
    }

    /// Returns true for reserved words
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenType::Patient
                | TokenType::Procedure
                | TokenType::Treatment
                | TokenType::Prescription
                | TokenType::Verify
                | TokenType::Import
                | TokenType::If
                | TokenType::Else
                | TokenType::While
                | TokenType::For
                | TokenType::Foreach
                | TokenType::In
                | TokenType::Return
                | TokenType::Case
                | TokenType::ClinicalPath
                | TokenType::Diagnose
                | TokenType::Monitor
                | TokenType::Prescribe
                | TokenType::New
        )
    }

    /// Short name of the kind, used in dumps and syntax errors
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::Patient => "PATIENT",
            TokenType::Procedure => "PROCEDURE",
            TokenType::Treatment => "TREATMENT",
            TokenType::Prescription => "PRESCRIPTION",
            TokenType::Verify => "VERIFY",
            TokenType::Import => "IMPORT",
            TokenType::If => "IF",
            TokenType::Else => "ELSE",
            TokenType::While => "WHILE",
            TokenType::For => "FOR",
            TokenType::Foreach => "FOREACH",
            TokenType::In => "IN",
            TokenType::Return => "RETURN",
            TokenType::Case => "CASE",
            TokenType::ClinicalPath => "CLINICAL_PATH",
            TokenType::Diagnose => "DIAGNOSE",
            TokenType::Monitor => "MONITOR",
            TokenType::Prescribe => "PRESCRIBE",
            TokenType::New => "NEW",
            TokenType::TypeName(_) => "TYPE",
            TokenType::Identifier(_) => "IDENTIFIER",
            TokenType::Number(_) => "NUMBER",
            TokenType::String(_) => "STRING",
            TokenType::Date(_) => "DATE",
            TokenType::Measurement(_) => "MEASUREMENT",
            TokenType::Plus => "PLUS",
            TokenType::Minus => "MINUS",
            TokenType::Star => "MULTIPLY",
            TokenType::Slash => "DIVIDE",
            TokenType::ColonEqual | TokenType::Equal => "ASSIGN",
            TokenType::EqualEqual => "EQUALS",
            TokenType::NotEqual => "NOT_EQUALS",
            TokenType::Less => "LESS",
            TokenType::LessEqual => "LESS_EQUAL",
            TokenType::Greater => "GREATER",
            TokenType::GreaterEqual => "GREATER_EQUAL",
            TokenType::AndAnd => "AND",
            TokenType::OrOr => "OR",
            TokenType::Not => "NOT",
            TokenType::Dot => "DOT",
            TokenType::Comma => "COMMA",
            TokenType::Colon => "COLON",
            TokenType::Semicolon => "SEMICOLON",
            TokenType::LeftParen => "LPAREN",
            TokenType::RightParen => "RPAREN",
            TokenType::LeftBrace => "LBRACE",
            TokenType::RightBrace => "RBRACE",
            TokenType::LeftBracket => "LBRACKET",
            TokenType::RightBracket => "RBRACKET",
            TokenType::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token produced by the lexer
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token, with its literal value where applicable
    pub token_type: TokenType,
    /// The literal text of the token (unescaped contents for strings)
    pub lexeme: InternedString,
    /// Where the token starts in the source
    pub location: Location,
}

impl Token {
    /// Create a new token
    pub fn new(token_type: TokenType, lexeme: &str, location: Location) -> Self {
        Self {
            token_type,
            lexeme: InternedString::from(lexeme),
            location,
        }
    }

    /// Returns true for the end-of-input token
    pub fn is_eof(&self) -> bool {
        matches!(self.token_type, TokenType::Eof)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' at {}",
            self.token_type, self.lexeme, self.location
        )
    }
}
