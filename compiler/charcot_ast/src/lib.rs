//! Abstract Syntax Tree (AST) for the Charcot language.
//!
//! The node family is closed: every phase (analysis, lowering, printing)
//! matches exhaustively over it, so adding a variant forces every phase to
//! handle it.

pub mod ast;
pub mod printer;

// Re-export commonly used types
pub use ast::*;
pub use printer::AstPrinter;

/// Serializes an AST node to a pretty-printed JSON string.
///
/// # Example
///
/// ```
/// use charcot_ast::*;
///
/// let expr = ExpressionNode::Literal(LiteralNode::Number(42.0));
/// let json = to_json(&expr).unwrap();
/// assert!(json.contains("Literal"));
/// ```
#[cfg(feature = "serde")]
pub fn to_json<T: serde::Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Deserializes an AST node from a JSON string.
#[cfg(feature = "serde")]
pub fn from_json<T: for<'de> serde::Deserialize<'de>>(json: &str) -> serde_json::Result<T> {
    serde_json::from_str(json)
}
