//! Charcot lexical analyzer
//!
//! Converts Charcot source text into an ordered, eagerly produced sequence of
//! tokens that always ends with an end-of-input token.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod lexer;
pub mod logos_token;
pub mod string_interner;
pub mod token;
pub mod units;

// Re-export the main types for convenience
pub use error::LexError;
pub use lexer::{tokenize, Lexer};
pub use logos_token::LogosToken;
pub use string_interner::InternedString;
pub use token::{Location, Token, TokenType};
