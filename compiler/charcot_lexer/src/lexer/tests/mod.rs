mod basic;
mod healthcare;

use super::*;

pub(super) fn kinds(source: &str) -> Vec<TokenType> {
    tokenize(source)
        .expect("source should tokenize")
        .into_iter()
        .map(|t| t.token_type)
        .collect()
}
