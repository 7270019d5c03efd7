//! Process-wide interning of identifier and literal text.

use lazy_static::lazy_static;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

lazy_static! {
    static ref INTERNER: Mutex<HashSet<Arc<str>>> = Mutex::new(HashSet::new());
}

/// A reference-counted, interned string
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InternedString(Arc<str>);

impl InternedString {
    /// Intern `s`, reusing the existing allocation when the text was seen before
    pub fn new(s: &str) -> Self {
        // A poisoned interner still holds valid entries.
        let mut set = match INTERNER.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(existing) = set.get(s) {
            return InternedString(Arc::clone(existing));
        }
        let arc: Arc<str> = Arc::from(s);
        set.insert(Arc::clone(&arc));
        InternedString(arc)
    }

    /// Get the string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for InternedString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for InternedString {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl AsRef<str> for InternedString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InternedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
