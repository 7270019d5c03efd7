//! Lexer implementation for the Charcot language.
//! Wraps the `logos` tokenizer, tracks line/column positions and converts raw
//! tokens into [`Token`]s.

use logos::Logos;
use std::ops::Range;

use crate::error::LexError;
use crate::logos_token::{LexingError, LogosToken, NumericLiteral};
use crate::token::{Location, Token, TokenType};
use crate::InternedString;

#[cfg(test)]
mod tests;

/// Tokenize a whole compilation unit.
///
/// The returned sequence always ends with a [`TokenType::Eof`] token. The first
/// lexical error aborts tokenization.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let tokens = Lexer::new(source).collect::<Result<Vec<_>, _>>()?;
    #[cfg(feature = "logging")]
    log::debug!("tokenized {} bytes into {} tokens", source.len(), tokens.len());
    Ok(tokens)
}

/// The main lexer struct that holds the state of the lexing process
pub struct Lexer<'a> {
    /// The source code being lexed
    source: &'a str,
    /// The current line number (1-based)
    line: usize,
    /// The current column number (1-based)
    column: usize,
    /// The byte offset the line/column pair refers to
    offset: usize,
    /// The inner Logos lexer
    inner: logos::Lexer<'a, LogosToken>,
    /// Set once EOF or an error has been yielded
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            line: 1,
            column: 1,
            offset: 0,
            inner: LogosToken::lexer(source),
            finished: false,
        }
    }

    /// Advance the line/column pair to byte offset `target`.
    /// Counts characters, not bytes, so multi-byte text keeps columns right.
    fn sync_position_to(&mut self, target: usize) {
        let text = &self.source[self.offset..target];

        let mut iter = text.chars().peekable();
        while let Some(c) = iter.next() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else if c == '\r' {
                // Windows line endings count once
                if iter.peek() == Some(&'\n') {
                    iter.next();
                }
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }

        self.offset = target;
    }

    fn location_at(&mut self, offset: usize) -> Location {
        self.sync_position_to(offset);
        Location::new(self.line, self.column, self.offset)
    }

    /// Convert a raw token into a [`Token`]. Returns `None` for tokens that
    /// carry no syntax.
    fn convert_token(&mut self, raw: LogosToken, span: Range<usize>) -> Option<Token> {
        let location = self.location_at(span.start);
        let text = &self.source[span];

        let token_type = match raw {
            LogosToken::BlockComment => return None,

            LogosToken::Patient => TokenType::Patient,
            LogosToken::Procedure => TokenType::Procedure,
            LogosToken::Treatment => TokenType::Treatment,
            LogosToken::Prescription => TokenType::Prescription,
            LogosToken::Verify => TokenType::Verify,
            LogosToken::Import => TokenType::Import,
            LogosToken::If => TokenType::If,
            LogosToken::Else => TokenType::Else,
            LogosToken::While => TokenType::While,
            LogosToken::For => TokenType::For,
            LogosToken::Foreach => TokenType::Foreach,
            LogosToken::In => TokenType::In,
            LogosToken::Return => TokenType::Return,
            LogosToken::Case => TokenType::Case,
            LogosToken::ClinicalPath => TokenType::ClinicalPath,
            LogosToken::Diagnose => TokenType::Diagnose,
            LogosToken::Monitor => TokenType::Monitor,
            LogosToken::Prescribe => TokenType::Prescribe,
            LogosToken::New => TokenType::New,

            LogosToken::TypeName => TokenType::TypeName(InternedString::from(text)),
            LogosToken::Identifier => TokenType::Identifier(InternedString::from(text)),
            LogosToken::Date => TokenType::Date(InternedString::from(text)),
            LogosToken::Numeric(NumericLiteral::Number(value)) => TokenType::Number(value),
            LogosToken::Numeric(NumericLiteral::Measurement) => {
                TokenType::Measurement(InternedString::from(text))
            }
            LogosToken::String(value) => {
                // The lexeme of a string token is its unescaped contents
                let lexeme = InternedString::from(value);
                return Some(Token {
                    token_type: TokenType::String(lexeme.clone()),
                    lexeme,
                    location,
                });
            }

            LogosToken::ColonEqual => TokenType::ColonEqual,
            LogosToken::EqualEqual => TokenType::EqualEqual,
            LogosToken::NotEqual => TokenType::NotEqual,
            LogosToken::GreaterEqual => TokenType::GreaterEqual,
            LogosToken::LessEqual => TokenType::LessEqual,
            LogosToken::AndAnd => TokenType::AndAnd,
            LogosToken::OrOr => TokenType::OrOr,
            LogosToken::Equal => TokenType::Equal,
            LogosToken::Not => TokenType::Not,
            LogosToken::Greater => TokenType::Greater,
            LogosToken::Less => TokenType::Less,
            LogosToken::Plus => TokenType::Plus,
            LogosToken::Minus => TokenType::Minus,
            LogosToken::Star => TokenType::Star,
            LogosToken::Slash => TokenType::Slash,

            LogosToken::Dot => TokenType::Dot,
            LogosToken::Comma => TokenType::Comma,
            LogosToken::Colon => TokenType::Colon,
            LogosToken::Semicolon => TokenType::Semicolon,
            LogosToken::LeftParen => TokenType::LeftParen,
            LogosToken::RightParen => TokenType::RightParen,
            LogosToken::LeftBrace => TokenType::LeftBrace,
            LogosToken::RightBrace => TokenType::RightBrace,
            LogosToken::LeftBracket => TokenType::LeftBracket,
            LogosToken::RightBracket => TokenType::RightBracket,
        };

        Some(Token::new(token_type, text, location))
    }

    fn convert_error(&mut self, error: LexingError, span: Range<usize>) -> LexError {
        let location = self.location_at(span.start);
        match error {
            LexingError::UnterminatedString => LexError::UnterminatedString { location },
            LexingError::UnexpectedCharacter => LexError::UnexpectedCharacter {
                character: self.source[span.start..].chars().next().unwrap_or('\0'),
                location,
            },
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.inner.next() {
                Some(Ok(raw)) => {
                    let span = self.inner.span();
                    if let Some(token) = self.convert_token(raw, span) {
                        #[cfg(feature = "logging")]
                        log::trace!("{}", token);
                        return Some(Ok(token));
                    }
                }
                Some(Err(error)) => {
                    self.finished = true;
                    let span = self.inner.span();
                    return Some(Err(self.convert_error(error, span)));
                }
                None => {
                    self.finished = true;
                    let location = self.location_at(self.source.len());
                    return Some(Ok(Token::new(TokenType::Eof, "", location)));
                }
            }
        }
    }
}
