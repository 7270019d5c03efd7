use thiserror::Error;

/// A non-fatal diagnostic recorded during analysis.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SemanticError {
    #[error("{kind} '{name}' is already defined in this scope at line {line}, column {column}")]
    DuplicateDefinition {
        kind: &'static str,
        name: String,
        line: usize,
        column: usize,
    },

    #[error("variable '{name}' is not defined at line {line}, column {column}")]
    UndefinedVariable {
        name: String,
        line: usize,
        column: usize,
    },

    /// The name is missing or resolves to something that is not a function.
    #[error("function '{name}' is not defined at line {line}, column {column}")]
    UndefinedFunction {
        name: String,
        line: usize,
        column: usize,
    },

    #[error(
        "wrong number of arguments for '{name}': expected {expected}, got {found} at line {line}, column {column}"
    )]
    ArgumentCountMismatch {
        name: String,
        expected: usize,
        found: usize,
        line: usize,
        column: usize,
    },
}

impl SemanticError {
    /// The name the diagnostic is about.
    pub fn name(&self) -> &str {
        match self {
            SemanticError::DuplicateDefinition { name, .. }
            | SemanticError::UndefinedVariable { name, .. }
            | SemanticError::UndefinedFunction { name, .. }
            | SemanticError::ArgumentCountMismatch { name, .. } => name,
        }
    }
}
