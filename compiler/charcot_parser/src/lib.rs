//! Recursive-descent parser for Charcot, written as `nom` parsers over a
//! slice of lexer tokens.
//!
//! Parsing stops at the first mismatch; there is no error recovery and no
//! partial tree is returned.

pub mod parser;

pub use parser::diagnostics::SyntaxError;
pub use parser::{parse, parse_program, TokenSlice};
