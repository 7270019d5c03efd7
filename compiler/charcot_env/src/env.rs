// Scope tree for name resolution.
// Scopes live in an arena and refer to their parent by index, so a lookup
// walks parent indices from the innermost scope outward.

use std::collections::HashMap;

use charcot_type::RecordKind;
use thiserror::Error;

use crate::symbol::{FunctionSymbol, Symbol, VariableSymbol};

/// Handle to a scope inside a [`SymbolTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

#[derive(Debug, Error, PartialEq)]
#[error("'{name}' is already defined in this scope")]
pub struct DuplicateSymbol {
    pub name: String,
}

#[derive(Debug, Default)]
struct Scope {
    symbols: HashMap<String, Symbol>,
    parent: Option<ScopeId>,
}

#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// A table holding only an empty global scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
        }
    }

    /// A table whose global scope holds the built-in clinical functions.
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        let global = table.global();
        let prescription = RecordKind::Prescription.name();
        let builtins = [
            FunctionSymbol::new(
                "verify_interaction",
                vec![
                    VariableSymbol::new("current_medications", Some("array")),
                    VariableSymbol::new("drug", Some("Medication")),
                ],
            ),
            FunctionSymbol::new(
                "verify_allergies",
                vec![
                    VariableSymbol::new("allergies", Some("array")),
                    VariableSymbol::new("drug", Some("Medication")),
                ],
            ),
            FunctionSymbol::new(
                "verify_dosage",
                vec![
                    VariableSymbol::new("patient", Some("Patient")),
                    VariableSymbol::new("drug", Some("Medication")),
                    VariableSymbol::new("amount", Some("measurement")),
                ],
            ),
            FunctionSymbol::new(
                "prescribe",
                vec![
                    VariableSymbol::new("patient", Some("Patient")),
                    VariableSymbol::new("drug", Some("string")),
                    VariableSymbol::new("dose", Some("measurement")),
                    VariableSymbol::new("instructions", Some("string")),
                ],
            )
            .returning(prescription),
        ];
        for builtin in builtins {
            // The global scope is empty here, so these cannot collide.
            let _ = table.define(global, Symbol::Function(builtin));
        }
        table
    }

    pub fn global(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Open a child scope of `parent`.
    pub fn push_scope(&mut self, parent: ScopeId) -> ScopeId {
        self.scopes.push(Scope {
            symbols: HashMap::new(),
            parent: Some(parent),
        });
        ScopeId(self.scopes.len() - 1)
    }

    /// Discard `scope` and return its parent.
    ///
    /// Only the most recently pushed scope is removed from the arena; popping
    /// anything else just hands back the parent.
    pub fn pop_scope(&mut self, scope: ScopeId) -> ScopeId {
        let parent = self.parent(scope).unwrap_or(self.global());
        if scope.0 != 0 && scope.0 + 1 == self.scopes.len() {
            self.scopes.pop();
        }
        parent
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes.get(scope.0).and_then(|s| s.parent)
    }

    /// Define `symbol` in `scope`. Shadowing an outer scope is allowed.
    pub fn define(&mut self, scope: ScopeId, symbol: Symbol) -> Result<(), DuplicateSymbol> {
        let Some(target) = self.scopes.get_mut(scope.0) else {
            return Ok(());
        };
        let name = symbol.name().to_string();
        if target.symbols.contains_key(&name) {
            return Err(DuplicateSymbol { name });
        }
        target.symbols.insert(name, symbol);
        Ok(())
    }

    /// Resolve `name` from `scope` outward to the global scope.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<&Symbol> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let entry = self.scopes.get(id.0)?;
            if let Some(symbol) = entry.symbols.get(name) {
                return Some(symbol);
            }
            current = entry.parent;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn var(name: &str) -> Symbol {
        Symbol::Variable(VariableSymbol::new(name, Some("int")))
    }

    #[test]
    fn test_builtins_are_global_functions() {
        let table = SymbolTable::with_builtins();
        let prescribe = table
            .lookup(table.global(), "prescribe")
            .and_then(Symbol::as_function)
            .expect("prescribe builtin");
        assert_eq!(prescribe.arity(), 4);
        assert_eq!(prescribe.return_type.as_deref(), Some("Prescription"));
        let dosage = table.lookup(table.global(), "verify_dosage");
        assert_eq!(dosage.and_then(Symbol::as_function).map(|f| f.arity()), Some(3));
    }

    #[test]
    fn test_duplicate_in_same_scope() {
        let mut table = SymbolTable::new();
        let global = table.global();
        assert!(table.define(global, var("x")).is_ok());
        assert_eq!(
            table.define(global, var("x")),
            Err(DuplicateSymbol { name: "x".into() })
        );
    }

    #[test]
    fn test_shadowing_and_lookup_order() {
        let mut table = SymbolTable::new();
        let global = table.global();
        table.define(global, var("x")).unwrap();
        let inner = table.push_scope(global);
        table
            .define(inner, Symbol::Variable(VariableSymbol::new("x", Some("float"))))
            .unwrap();

        let found = table.lookup(inner, "x");
        assert_eq!(
            found,
            Some(&Symbol::Variable(VariableSymbol::new("x", Some("float"))))
        );
        assert!(table.lookup(inner, "y").is_none());

        let back = table.pop_scope(inner);
        assert_eq!(back, global);
        assert!(table.lookup(inner, "x").is_none());
        assert_eq!(table.lookup(global, "x"), Some(&var("x")));
    }

    #[test]
    fn test_lookup_walks_several_levels() {
        let mut table = SymbolTable::new();
        let global = table.global();
        table.define(global, var("dose")).unwrap();
        let a = table.push_scope(global);
        let b = table.push_scope(a);
        assert!(table.lookup(b, "dose").is_some());
        assert!(table.lookup(b, "missing").is_none());
    }
}
