//! Lexical errors. Both are fatal: tokenization stops at the first one.

use thiserror::Error;

use crate::token::Location;

/// A lexical error, located at the offending position
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    /// End of input was reached before the closing quote
    #[error("unterminated string literal starting at line {}, column {}", .location.line, .location.column)]
    UnterminatedString {
        /// Position of the opening quote
        location: Location,
    },
    /// No token starts with this character
    #[error("unexpected character '{character}' at line {}, column {}", .location.line, .location.column)]
    UnexpectedCharacter {
        /// The offending character
        character: char,
        /// Position of the character
        location: Location,
    },
}

impl LexError {
    /// Where the error was detected
    pub fn location(&self) -> Location {
        match self {
            LexError::UnterminatedString { location }
            | LexError::UnexpectedCharacter { location, .. } => *location,
        }
    }
}
