//! Tokens produced by the [`Tokenizer`](crate::Tokenizer).
//!
//! A token is a classified, verbatim span of the source text. Concatenating the
//! text of every token in a stream reproduces the source exactly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    #[default]
    None,
    Key,
    Value,
    Whitespace,
    Newline,
    Delimiter,
    Comment,
}

impl TokenKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TokenKind::None => "none",
            TokenKind::Key => "key",
            TokenKind::Value => "value",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Newline => "newline",
            TokenKind::Delimiter => "delimiter",
            TokenKind::Comment => "comment",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified span of source text.
///
/// # Examples
///
/// ```rust
/// use kvedit::{Token, TokenKind};
///
/// let token = Token::new(TokenKind::Key, "name");
/// assert!(token.is(TokenKind::Key));
/// assert_eq!(token.text, "name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }

    pub fn key(text: impl Into<String>) -> Self {
        Token::new(TokenKind::Key, text)
    }

    pub fn value(text: impl Into<String>) -> Self {
        Token::new(TokenKind::Value, text)
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Token::new(TokenKind::Comment, text)
    }

    pub fn delimiter() -> Self {
        Token::new(TokenKind::Delimiter, "=")
    }

    pub fn newline() -> Self {
        Token::new(TokenKind::Newline, "\n")
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(Token::delimiter(), Token::new(TokenKind::Delimiter, "="));
        assert_eq!(Token::newline().text, "\n");
        assert!(Token::comment("# hi").is(TokenKind::Comment));
        assert_eq!(TokenKind::default(), TokenKind::None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Token::value("v 1").to_string(), "v 1");
        assert_eq!(TokenKind::Whitespace.to_string(), "whitespace");
    }
}
