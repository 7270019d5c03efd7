pub mod env;
pub mod symbol;

pub use env::{DuplicateSymbol, ScopeId, SymbolTable};
pub use symbol::{FunctionSymbol, Symbol, VariableSymbol};
