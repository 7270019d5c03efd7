use thiserror::Error;

/// Advisory raised while lowering. The emitted IR stays well formed, with a
/// placeholder where the offending value would have been.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Notice {
    #[error("variable '{name}' not found at line {line}, column {column}")]
    UnresolvedVariable {
        name: String,
        line: usize,
        column: usize,
    },

    #[error("function '{name}' not found, calling it as an external")]
    UnresolvedFunction { name: String },

    #[error("'{name}' clashes with an existing module symbol, emitted as '@{symbol}'")]
    RenamedSymbol { name: String, symbol: String },

    #[error("record '{record}' has no field '{field}'")]
    UnknownField { record: &'static str, field: String },

    #[error("cannot assign to '{target}'")]
    InvalidAssignmentTarget { target: String },
}
