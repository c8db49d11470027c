//! Tokenizer for `key=value` documents.
//!
//! The [`Tokenizer`] walks a [`Cursor`] once, front to back, and emits the
//! token stream for a [`Document`](crate::Document). It never backtracks; its
//! only state is the cursor position plus the call stack of
//! `read_entry` / `read_value` / `read_comment`.
//!
//! ## Grammar
//!
//! ```text
//! [ws]key[ws]=[ws]value[ws][#comment]
//! [ws]#comment
//! <blank line>
//! ```
//!
//! Keys and values are either bare words or `'`/`"` quoted literals. Quotes are
//! kept verbatim in the token text and there is no escaping of the quote
//! character.
//!
//! Every newline, space and tab outside a key, value or comment becomes its own
//! token, so concatenating the stream gives back the input unchanged.
//!
//! ## Examples
//!
//! ```rust
//! use kvedit::{tokenize, TokenKind};
//!
//! let tokens = tokenize("key = value # note\n").unwrap();
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(kinds[0], TokenKind::Key);
//! assert!(kinds.contains(&TokenKind::Comment));
//!
//! let text: String = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(text, "key = value # note\n");
//! ```

use crate::options::ParseOptions;
use crate::{Cursor, Error, Result, Token, TokenKind};

const SPACE_AND_TAB: [char; 2] = [' ', '\t'];
const KEY_END: [char; 4] = [' ', '\t', '=', '\n'];
const VALUE_END: [char; 2] = ['#', '\n'];

/// Single-pass tokenizer over a [`Cursor`].
pub struct Tokenizer {
    cursor: Cursor,
    tokens: Vec<Token>,
}

impl Tokenizer {
    /// Creates a tokenizer with default [`ParseOptions`].
    pub fn new(input: &str) -> Self {
        Tokenizer::with_options(input, &ParseOptions::default())
    }

    pub fn with_options(input: &str, options: &ParseOptions) -> Self {
        let cursor = if options.normalize_newlines {
            Cursor::normalized(input)
        } else {
            Cursor::new(input)
        };
        Tokenizer::from_cursor(cursor)
    }

    /// Creates a tokenizer over raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Utf8`] if the bytes are not valid UTF-8.
    pub fn from_bytes(input: &[u8], options: &ParseOptions) -> Result<Self> {
        Ok(Tokenizer::from_cursor(Cursor::from_bytes(
            input,
            options.normalize_newlines,
        )?))
    }

    pub fn from_cursor(cursor: Cursor) -> Self {
        Tokenizer {
            cursor,
            tokens: Vec::new(),
        }
    }

    /// Tokens emitted so far.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Consumes the whole input and returns the token stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] on an unterminated quoted literal, a `=` with no
    /// key before it, or a key not followed by `=`. The partial stream is dropped.
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        while !self.cursor.is_eof() {
            let before = self.cursor.position();
            tracing::trace!(position = before, "reading entry");
            self.read_entry()?;

            if self.cursor.position() == before {
                return Err(self.syntax_error(before, "tokenizer made no progress", None));
            }
        }

        tracing::debug!(
            chars = self.cursor.len(),
            tokens = self.tokens.len(),
            "tokenized input"
        );
        Ok(self.tokens)
    }

    fn read_entry(&mut self) -> Result<()> {
        self.eat_leading_whitespace();

        if self.is_comment_start() {
            return self.read_comment();
        }

        if self.cursor.is_eof() {
            return Ok(());
        }

        let start = self.cursor.position();

        if self.cursor.current() == Some('=') {
            return Err(self.syntax_error(
                start,
                "found \"=\" without a preceding key",
                Some("Add a key name before '=', e.g. 'KEY=value'"),
            ));
        }

        let end = if self.is_quote_char() {
            self.find_string_end()?
        } else {
            match self.cursor.find_next_of(&KEY_END) {
                Some(end) => end,
                None => {
                    return Err(self.syntax_error(
                        self.cursor.len(),
                        "expected \"=\" after key, got end of input",
                        Some("Every key must be followed by '=', e.g. 'KEY=value'"),
                    ))
                }
            }
        };

        self.push_span(TokenKind::Key, start, end)?;
        self.eat_spaces_and_tabs();

        match self.cursor.current() {
            Some('=') => {
                self.push_current(TokenKind::Delimiter);
                self.cursor.advance();
                self.read_value()
            }
            Some(other) => Err(self.syntax_error(
                self.cursor.position(),
                &format!("expected \"=\" after key, got {:?}", other),
                Some("Every key must be followed by '=', e.g. 'KEY=value'"),
            )),
            None => Err(self.syntax_error(
                self.cursor.position(),
                "expected \"=\" after key, got end of input",
                Some("Every key must be followed by '=', e.g. 'KEY=value'"),
            )),
        }
    }

    fn read_value(&mut self) -> Result<()> {
        self.eat_spaces_and_tabs();

        // The newline stays in the input so the next entry emits it as a token
        if self.cursor.is_eof() || self.is_newline() {
            self.push(TokenKind::Value, String::new());
            return Ok(());
        }

        if self.is_comment_start() {
            self.push(TokenKind::Value, String::new());
            return self.read_comment();
        }

        let start = self.cursor.position();
        let end = if self.is_quote_char() {
            self.find_string_end()?
        } else {
            self.cursor
                .find_next_of(&VALUE_END)
                .unwrap_or(self.cursor.len())
        };

        let value_end = if self.cursor.at(end) == Some('#') {
            self.trim_comment_padding(start, end)
        } else {
            end
        };

        self.push_span(TokenKind::Value, start, value_end)?;
        self.eat_spaces_and_tabs();
        self.read_comment()
    }

    fn read_comment(&mut self) -> Result<()> {
        if !self.is_comment_start() {
            return Ok(());
        }

        let start = self.cursor.position();
        let end = self.cursor.find_next('\n').unwrap_or(self.cursor.len());

        self.push_span(TokenKind::Comment, start, end)?;
        self.eat_leading_whitespace();
        Ok(())
    }

    /// Consumes newlines and spaces/tabs until neither is left at the cursor.
    fn eat_leading_whitespace(&mut self) {
        if self.cursor.is_eof() {
            return;
        }

        let start = self.cursor.position();
        self.eat_newlines();
        self.eat_spaces_and_tabs();

        if start != self.cursor.position() {
            self.eat_leading_whitespace();
        }
    }

    fn eat_newlines(&mut self) {
        while self.is_newline() {
            self.push_current(TokenKind::Newline);
            self.cursor.advance();
        }
    }

    fn eat_spaces_and_tabs(&mut self) {
        while self.is_space_or_tab() {
            self.push_current(TokenKind::Whitespace);
            self.cursor.advance();
        }
    }

    /// Position just past the closing quote matching the one at the cursor.
    fn find_string_end(&self) -> Result<usize> {
        let start = self.cursor.position();
        let quote = self.cursor.current().unwrap_or('"');

        match self.cursor.find_next(quote) {
            Some(end) => Ok(end + 1),
            None => Err(self.syntax_error(
                start,
                "unterminated string literal",
                Some(&format!("Close the literal with a matching {}", quote)),
            )),
        }
    }

    /// Moves `end` back over the spaces/tabs that pad a trailing comment.
    fn trim_comment_padding(&self, start: usize, end: usize) -> usize {
        let mut trimmed = end;
        while trimmed > start
            && self
                .cursor
                .at(trimmed - 1)
                .is_some_and(|ch| SPACE_AND_TAB.contains(&ch))
        {
            trimmed -= 1;
        }
        trimmed
    }

    fn is_quote_char(&self) -> bool {
        matches!(self.cursor.current(), Some('"') | Some('\''))
    }

    fn is_comment_start(&self) -> bool {
        self.cursor.current() == Some('#')
    }

    fn is_newline(&self) -> bool {
        self.cursor.current() == Some('\n')
    }

    fn is_space_or_tab(&self) -> bool {
        self.cursor
            .current()
            .is_some_and(|ch| SPACE_AND_TAB.contains(&ch))
    }

    fn push(&mut self, kind: TokenKind, text: String) {
        self.tokens.push(Token { kind, text });
    }

    fn push_current(&mut self, kind: TokenKind) {
        if let Some(ch) = self.cursor.current() {
            self.push(kind, ch.to_string());
        }
    }

    /// Emits `start..end` as one token and leaves the cursor at `end`.
    fn push_span(&mut self, kind: TokenKind, start: usize, end: usize) -> Result<()> {
        let text = self.cursor.substring(start, end)?;
        self.push(kind, text);
        self.cursor.move_to(end)?;
        Ok(())
    }

    fn syntax_error(&self, pos: usize, msg: &str, suggestion: Option<&str>) -> Error {
        let (line, col) = self.cursor.line_col(pos);
        Error::syntax_with_context(line, col, msg, &self.cursor.line_text(pos), suggestion)
    }
}

/// Tokenizes `input` with default [`ParseOptions`].
///
/// # Errors
///
/// Returns [`Error::Syntax`] if the input is malformed.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Tokenizer::new(input).tokenize()
}

/// Tokenizes `input` with custom [`ParseOptions`].
///
/// # Errors
///
/// Returns [`Error::Syntax`] if the input is malformed.
pub fn tokenize_with_options(input: &str, options: &ParseOptions) -> Result<Vec<Token>> {
    Tokenizer::with_options(input, options).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    fn join(tokens: &[Token]) -> String {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_key_preceded_by_whitespace() {
        let tokens = tokenize(" \tkey=value").unwrap();
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[2].kind, TokenKind::Key);
    }

    #[test]
    fn test_key_preceded_by_whitespace_after_newline() {
        let tokens = tokenize("\n \tkey=value").unwrap();
        assert_eq!(tokens.len(), 6);
        assert_eq!(tokens[3].kind, TokenKind::Key);
    }

    #[test]
    fn test_key_delimiter_value() {
        let tokens = tokenize("key=value").unwrap();
        assert_eq!(
            tokens,
            vec![Token::key("key"), Token::delimiter(), Token::value("value")]
        );
    }

    #[test]
    fn test_comment_only() {
        let tokens = tokenize("# this is a comment").unwrap();
        assert_eq!(tokens, vec![Token::comment("# this is a comment")]);
    }

    #[test]
    fn test_whitespace_between_key_delimiter_value() {
        let tokens = tokenize("key \t=   value\n").unwrap();
        assert_eq!(tokens.len(), 9);
        assert_eq!(tokens[1].text, " ");
        assert_eq!(tokens[2].text, "\t");
        assert_eq!(tokens[4].text, " ");
        assert_eq!(tokens[5].text, " ");
        assert_eq!(tokens[6].text, " ");
        assert_eq!(tokens[7], Token::value("value"));
        assert_eq!(tokens[8].kind, TokenKind::Newline);
    }

    #[test]
    fn test_trailing_comment_padding_is_whitespace() {
        let tokens = tokenize("key=value  # ending comment").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Key,
                TokenKind::Delimiter,
                TokenKind::Value,
                TokenKind::Whitespace,
                TokenKind::Whitespace,
                TokenKind::Comment,
            ]
        );
        assert_eq!(tokens[2].text, "value");
        assert_eq!(tokens[5].text, "# ending comment");
    }

    #[test]
    fn test_comment_directly_after_value() {
        let tokens = tokenize("key=value#c").unwrap();
        assert_eq!(tokens[2], Token::value("value"));
        assert_eq!(tokens[3], Token::comment("#c"));
    }

    #[test]
    fn test_value_with_inner_spaces() {
        let tokens = tokenize("key2 = value 2 # Trailing comment\n").unwrap();
        let value = tokens.iter().find(|t| t.is(TokenKind::Value)).unwrap();
        assert_eq!(value.text, "value 2");
    }

    #[test]
    fn test_empty_values() {
        let tokens = tokenize("a=\nb=").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::key("a"),
                Token::delimiter(),
                Token::value(""),
                Token::newline(),
                Token::key("b"),
                Token::delimiter(),
                Token::value(""),
            ]
        );
    }

    #[test]
    fn test_empty_value_before_comment() {
        let tokens = tokenize("a= # nothing").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Key,
                TokenKind::Delimiter,
                TokenKind::Whitespace,
                TokenKind::Value,
                TokenKind::Comment,
            ]
        );
        assert_eq!(tokens[3].text, "");
    }

    #[test]
    fn test_quoted_key_and_value() {
        let tokens = tokenize("\"my key\" = 'a # b' # real comment").unwrap();
        assert_eq!(tokens[0], Token::key("\"my key\""));
        let value = tokens.iter().find(|t| t.is(TokenKind::Value)).unwrap();
        assert_eq!(value.text, "'a # b'");
        assert_eq!(tokens.last().unwrap().text, "# real comment");
    }

    #[test]
    fn test_quoted_value_may_span_lines() {
        let input = "cert=\"line1\nline2\"\nnext=1";
        let tokens = tokenize(input).unwrap();
        assert_eq!(tokens[2].text, "\"line1\nline2\"");
        assert_eq!(join(&tokens), input);
    }

    #[test]
    fn test_comment_blocks_and_blank_lines() {
        let input = "# one\n\n  # two\n\t\nkey=1\n";
        let tokens = tokenize(input).unwrap();
        let comments: Vec<_> = tokens
            .iter()
            .filter(|t| t.is(TokenKind::Comment))
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(comments, vec!["# one", "# two"]);
        assert_eq!(join(&tokens), input);
    }

    #[test]
    fn test_unterminated_quote() {
        let err = tokenize("key='value").unwrap_err();
        match err {
            Error::Syntax { line, col, msg, .. } => {
                assert_eq!((line, col), (1, 5));
                assert!(msg.contains("unterminated"));
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }

        assert!(tokenize("'key=value").unwrap_err().is_syntax());
    }

    #[test]
    fn test_missing_delimiter() {
        let err = tokenize("ok=1\nkey value").unwrap_err();
        match err {
            Error::Syntax {
                line, col, msg, context, ..
            } => {
                assert_eq!((line, col), (2, 5));
                assert!(msg.contains("'v'"));
                assert_eq!(context, "key value");
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_key_without_delimiter_at_end() {
        let err = tokenize("lonely").unwrap_err();
        assert!(err.to_string().contains("end of input"));

        let err = tokenize("lonely\nnext=1").unwrap_err();
        assert!(err.to_string().contains("'\\n'"));
    }

    #[test]
    fn test_delimiter_without_key() {
        let err = tokenize("  =value").unwrap_err();
        assert_eq!(err.position(), Some((1, 3)));
        assert!(err.to_string().contains("without a preceding key"));
    }

    #[test]
    fn test_crlf_is_normalized_by_default() {
        let tokens = tokenize("a=1\r\nb=2\r\n").unwrap();
        assert_eq!(join(&tokens), "a=1\nb=2\n");

        let options = ParseOptions::new().with_normalize_newlines(false);
        let tokens = tokenize_with_options("a=1\r\nb=2", &options).unwrap();
        assert_eq!(tokens[2].text, "1\r");
        assert_eq!(join(&tokens), "a=1\r\nb=2");
    }

    #[test]
    fn test_from_bytes() {
        let tokens = Tokenizer::from_bytes(b"k=v", &ParseOptions::default())
            .unwrap()
            .tokenize()
            .unwrap();
        assert_eq!(tokens.len(), 3);
        assert!(Tokenizer::from_bytes(&[0xc3, 0x28], &ParseOptions::default()).is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").unwrap().is_empty());
    }
}
