pub mod analyzer;
pub mod error;

pub use analyzer::{analyze, SemanticAnalyzer};
pub use error::SemanticError;
