use charcot_lexer::{Token, TokenType};

/// The parser's input: the not-yet-consumed tail of the token sequence.
///
/// Every parser takes a `TokenSlice` and returns the remaining one, so
/// backtracking is just keeping an earlier copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenSlice<'a>(pub &'a [Token]);

impl<'a> TokenSlice<'a> {
    /// Wrap a token slice
    pub fn new(tokens: &'a [Token]) -> Self {
        TokenSlice(tokens)
    }

    /// The current token
    pub fn first(&self) -> Option<&'a Token> {
        self.0.first()
    }

    /// The kind of the current token
    pub fn peek_type(&self) -> Option<&'a TokenType> {
        self.0.first().map(|t| &t.token_type)
    }

    /// Look `n` tokens ahead (0 is the current token)
    pub fn peek_nth(&self, n: usize) -> Option<&'a Token> {
        self.0.get(n)
    }

    /// True when the current token satisfies `pred`
    pub fn check(&self, pred: impl Fn(&TokenType) -> bool) -> bool {
        self.peek_type().map_or(false, pred)
    }

    /// Drop the current token
    pub fn advance(&self) -> Self {
        TokenSlice(self.0.get(1..).unwrap_or(&[]))
    }

    /// True at the end-of-input token or when nothing is left
    pub fn is_at_end(&self) -> bool {
        self.first().map_or(true, Token::is_eof)
    }

    /// Number of tokens left
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no tokens are left
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl nom::InputLength for TokenSlice<'_> {
    fn input_len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charcot_lexer::tokenize;

    #[test]
    fn test_advance_and_peek() {
        let tokens = tokenize("a . b").unwrap();
        let slice = TokenSlice::new(&tokens);
        assert_eq!(slice.len(), 4);
        assert!(slice.check(|t| matches!(t, TokenType::Identifier(_))));
        assert_eq!(slice.peek_nth(1).map(|t| &t.token_type), Some(&TokenType::Dot));

        let rest = slice.advance().advance().advance();
        assert!(rest.is_at_end());
        assert!(rest.advance().is_empty());
        assert!(rest.advance().advance().is_empty());
    }
}
