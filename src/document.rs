//! The token document: lookup, in-place editing and serialization.
//!
//! A [`Document`] owns the token stream of one key/value text. Edits touch only
//! the tokens that belong to the change, so everything else (indentation,
//! alignment, quoting, comments) survives a parse → edit → serialize cycle
//! unchanged.
//!
//! Mutating methods return `&mut Self` so calls can be chained.
//!
//! ## Examples
//!
//! ```rust
//! use kvedit::parse_str;
//!
//! let mut doc = parse_str("# Database\nHOST = localhost  # dev only\nPORT=5432\n").unwrap();
//!
//! doc.set("PORT", 6543)
//!     .rename("HOST", "DB_HOST")
//!     .set("USER", "admin");
//!
//! assert_eq!(doc.get("DB_HOST"), Some("localhost"));
//! assert_eq!(
//!     doc.to_string(),
//!     "# Database\nDB_HOST = localhost  # dev only\nPORT=6543\nUSER=admin"
//! );
//! ```

use crate::lexer::tokenize;
use crate::map::EntryMap;
use crate::value::Scalar;
use crate::{Error, Result, Token, TokenKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::str::FromStr;

/// An editable, lossless key/value document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    tokens: Vec<Token>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Document { tokens }
    }

    /// Tokenizes `input` into a document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] if the input is malformed.
    pub fn parse(input: &str) -> Result<Self> {
        Ok(Document::from_tokens(tokenize(input)?))
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Returns the raw text of the value for `name`, or `None` if the key is absent.
    ///
    /// With duplicate keys the first one wins.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvedit::parse_str;
    ///
    /// let doc = parse_str("key1 = value1\nkey2 = 'quoted'").unwrap();
    /// assert_eq!(doc.get("key1"), Some("value1"));
    /// assert_eq!(doc.get("key2"), Some("'quoted'"));
    /// assert_eq!(doc.get("no-such-key"), None);
    /// ```
    pub fn get(&self, name: &str) -> Option<&str> {
        self.value_index_for(name)
            .map(|i| self.tokens[i].text.as_str())
    }

    /// Like [`get`](Self::get), but strips one pair of matching surrounding quotes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvedit::parse_str;
    ///
    /// let doc = parse_str("a='x y'\nb=\"z\"\nc=it's").unwrap();
    /// assert_eq!(doc.get_unquoted("a"), Some("x y"));
    /// assert_eq!(doc.get_unquoted("b"), Some("z"));
    /// assert_eq!(doc.get_unquoted("c"), Some("it's"));
    /// ```
    pub fn get_unquoted(&self, name: &str) -> Option<&str> {
        self.get(name).map(unquote)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.key_index(name).is_some()
    }

    /// All key names in document order, duplicates included.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tokens
            .iter()
            .filter(|t| t.is(TokenKind::Key))
            .map(|t| t.text.as_str())
    }

    /// All `(key, value)` pairs in document order, duplicates included.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is(TokenKind::Key))
            .map(move |(i, t)| {
                let value = self
                    .value_index_after(i)
                    .map_or("", |v| self.tokens[v].text.as_str());
                (t.text.as_str(), value)
            })
    }

    /// Number of key/value pairs.
    pub fn len(&self) -> usize {
        self.keys().count()
    }

    /// Returns `true` if the document has no key/value pairs.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ordered snapshot of all pairs; the first occurrence of a key wins.
    pub fn to_map(&self) -> EntryMap {
        let mut map = EntryMap::new();
        for (key, value) in self.entries() {
            map.insert_first(key.to_string(), value.to_string());
        }
        map
    }

    /// Sets the value of `name`, creating the pair if it doesn't exist.
    ///
    /// An existing value is replaced in place; surrounding whitespace and
    /// comments are kept. A new pair is appended as `name=value` on its own line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvedit::Document;
    ///
    /// let mut doc = Document::new();
    /// doc.set("key1", "value1").set("key2", 2);
    /// assert_eq!(doc.to_string(), "key1=value1\nkey2=2");
    /// ```
    pub fn set(&mut self, name: &str, value: impl Into<Scalar>) -> &mut Self {
        let text = value.into().to_string();

        match self.key_index(name) {
            Some(k) => match self.value_index_after(k) {
                Some(i) => self.tokens[i].text = text,
                None => self.insert_value_after_key(k, text),
            },
            None => {
                if self.needs_newline_before_append() {
                    self.tokens.push(Token::newline());
                }
                self.tokens.push(Token::key(name));
                self.tokens.push(Token::delimiter());
                self.tokens.push(Token::value(text));
            }
        }

        self
    }

    /// Renames the key `name` to `new_name`. No-op if `name` is absent.
    pub fn rename(&mut self, name: &str, new_name: &str) -> &mut Self {
        if let Some(i) = self.key_index(name) {
            self.tokens[i].text = new_name.to_string();
        }
        self
    }

    /// Removes the pair for `name`, from its key through its value.
    ///
    /// Whitespace, comments and the newline around the pair are left in place.
    /// No-op if `name` is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvedit::parse_str;
    ///
    /// let mut doc = parse_str("a=1\nb = 2 # gone\nc=3").unwrap();
    /// doc.delete("b");
    /// assert_eq!(doc.get("b"), None);
    /// assert_eq!(doc.to_string(), "a=1\n # gone\nc=3");
    /// ```
    pub fn delete(&mut self, name: &str) -> &mut Self {
        let Some(k) = self.key_index(name) else {
            return self;
        };

        let stop = self.tokens[k + 1..]
            .iter()
            .position(|t| !matches!(t.kind, TokenKind::Whitespace | TokenKind::Delimiter))
            .map(|offset| k + 1 + offset);

        match stop {
            Some(v) if self.tokens[v].is(TokenKind::Value) => {
                self.tokens.drain(k..=v);
            }
            Some(v) => {
                self.tokens.drain(k..v);
            }
            None => {
                self.tokens.truncate(k);
            }
        }

        self
    }

    /// Appends a newline token.
    pub fn add_newline(&mut self) -> &mut Self {
        self.tokens.push(Token::newline());
        self
    }

    /// Appends a comment. Each line of `text` is prefixed with `# `; the
    /// comment should not start with `#` itself.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvedit::Document;
    ///
    /// let mut doc = Document::new();
    /// doc.add_comment("Generated file\ndo not edit").add_newline().set("a", 1);
    /// assert_eq!(doc.to_string(), "# Generated file\n# do not edit\na=1");
    /// ```
    pub fn add_comment(&mut self, text: &str) -> &mut Self {
        let comment = text
            .split('\n')
            .map(|line| format!("# {}", line))
            .collect::<Vec<_>>()
            .join("\n");
        self.tokens.push(Token::comment(comment));
        self
    }

    /// Removes every comment.
    ///
    /// An own-line comment takes its indentation and its terminating newline
    /// with it, so the whole line disappears. A trailing comment is removed on
    /// its own; the padding before it and the newline after it stay.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvedit::parse_str;
    ///
    /// let mut doc = parse_str("# Comment\nkey1=1 # Dude\n  # Comment\nkey2=2\n# Comment").unwrap();
    /// doc.remove_comments();
    /// assert_eq!(doc.to_string(), "key1=1 \nkey2=2\n");
    /// ```
    pub fn remove_comments(&mut self) -> &mut Self {
        let mut kept = Vec::with_capacity(self.tokens.len());
        let mut i = 0;

        while i < self.tokens.len() {
            if !self.tokens[i].is(TokenKind::Comment) {
                kept.push(self.tokens[i].clone());
                i += 1;
                continue;
            }

            if !self.is_trailing_comment(i) {
                while kept
                    .last()
                    .is_some_and(|t: &Token| t.is(TokenKind::Whitespace))
                {
                    kept.pop();
                }
                if self
                    .tokens
                    .get(i + 1)
                    .is_some_and(|t| t.is(TokenKind::Newline))
                {
                    i += 1;
                }
            }

            i += 1;
        }

        tracing::trace!(removed = self.tokens.len() - kept.len(), "removed comments");
        self.tokens = kept;
        self
    }

    /// Returns `true` if the token at `pos` is a comment on the same line as,
    /// and after, a value.
    pub fn is_trailing_comment(&self, pos: usize) -> bool {
        if !self.tokens.get(pos).is_some_and(|t| t.is(TokenKind::Comment)) {
            return false;
        }

        self.tokens[..pos]
            .iter()
            .rev()
            .find(|t| !t.is(TokenKind::Whitespace))
            .is_some_and(|t| t.is(TokenKind::Value))
    }

    /// Concatenates all token text.
    ///
    /// With `collapse_whitespace` every whitespace token is dropped first;
    /// newlines are always kept. Without it, an unedited document serializes
    /// to exactly the text it was parsed from.
    pub fn serialize(&self, collapse_whitespace: bool) -> String {
        let mut out = String::with_capacity(self.tokens.iter().map(|t| t.text.len()).sum());
        for token in self.visible_tokens(collapse_whitespace) {
            out.push_str(&token.text);
        }
        out
    }

    /// Shorthand for `serialize(true)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvedit::parse_str;
    ///
    /// let doc = parse_str("  key = value 2   # note\n").unwrap();
    /// assert_eq!(doc.to_string_collapsed(), "key=value 2# note\n");
    /// ```
    pub fn to_string_collapsed(&self) -> String {
        self.serialize(true)
    }

    /// Serializes the document into `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if writing fails.
    pub fn write_to<W: io::Write>(&self, mut writer: W, collapse_whitespace: bool) -> Result<()> {
        for token in self.visible_tokens(collapse_whitespace) {
            writer.write_all(token.text.as_bytes())?;
        }
        writer.flush()?;
        Ok(())
    }

    fn visible_tokens(&self, collapse_whitespace: bool) -> impl Iterator<Item = &Token> {
        self.tokens
            .iter()
            .filter(move |t| !(collapse_whitespace && t.is(TokenKind::Whitespace)))
    }

    fn key_index(&self, name: &str) -> Option<usize> {
        self.tokens
            .iter()
            .position(|t| t.is(TokenKind::Key) && t.text == name)
    }

    fn value_index_for(&self, name: &str) -> Option<usize> {
        self.key_index(name).and_then(|k| self.value_index_after(k))
    }

    /// Index of the value belonging to the key at `key`, skipping whitespace
    /// and the delimiter.
    fn value_index_after(&self, key: usize) -> Option<usize> {
        self.tokens[key + 1..]
            .iter()
            .position(|t| !matches!(t.kind, TokenKind::Whitespace | TokenKind::Delimiter))
            .map(|offset| key + 1 + offset)
            .filter(|&i| self.tokens[i].is(TokenKind::Value))
    }

    /// Fills in the value of a key that has none, after its delimiter when
    /// there is one.
    fn insert_value_after_key(&mut self, key: usize, text: String) {
        let delimiter = self.tokens[key + 1..]
            .iter()
            .take_while(|t| matches!(t.kind, TokenKind::Whitespace | TokenKind::Delimiter))
            .position(|t| t.is(TokenKind::Delimiter))
            .map(|offset| key + 1 + offset);

        match delimiter {
            Some(d) => self.tokens.insert(d + 1, Token::value(text)),
            None => {
                self.tokens.insert(key + 1, Token::delimiter());
                self.tokens.insert(key + 2, Token::value(text));
            }
        }
    }

    fn needs_newline_before_append(&self) -> bool {
        self.tokens
            .last()
            .is_some_and(|t| !t.is(TokenKind::Newline))
    }
}

fn unquote(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            f.write_str(&token.text)?;
        }
        Ok(())
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Document::parse(s)
    }
}

impl From<Vec<Token>> for Document {
    fn from(tokens: Vec<Token>) -> Self {
        Document::from_tokens(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(input: &str) -> Document {
        Document::parse(input).unwrap()
    }

    #[test]
    fn test_get() {
        let kv = doc("key1 = value1\nkey2 = value 2\n");
        assert_eq!(kv.get("key1"), Some("value1"));
        assert_eq!(kv.get("key2"), Some("value 2"));
        assert_eq!(kv.get("no-such-key"), None);
    }

    #[test]
    fn test_get_does_not_match_values() {
        let kv = doc("a=b\nb=c");
        assert_eq!(kv.get("b"), Some("c"));
    }

    #[test]
    fn test_duplicate_keys_resolve_to_first() {
        let mut kv = doc("a=1\na=2\n");
        assert_eq!(kv.get("a"), Some("1"));
        kv.set("a", 3);
        assert_eq!(kv.to_string(), "a=3\na=2\n");
        kv.delete("a");
        assert_eq!(kv.get("a"), Some("2"));
    }

    #[test]
    fn test_set_chain() {
        let mut kv = doc("key1 = value1\nkey2 = value 2\n");
        kv.set("key2", "new value 2")
            .set("key1", "new value1")
            .set("key3", "all new value");

        assert_eq!(kv.get("key1"), Some("new value1"));
        assert_eq!(kv.get("key2"), Some("new value 2"));
        assert_eq!(kv.get("key3"), Some("all new value"));
        assert_eq!(
            kv.to_string(),
            "key1 = new value1\nkey2 = new value 2\nkey3=all new value"
        );
    }

    #[test]
    fn test_set_on_empty_document() {
        let mut kv = Document::new();
        kv.set("key1", "value1").set("key2", 2);
        assert_eq!(kv.to_string(), "key1=value1\nkey2=2");
    }

    #[test]
    fn test_set_keeps_trailing_comment() {
        let mut kv = doc("port = 80   # http\n");
        kv.set("port", 8080);
        assert_eq!(kv.to_string(), "port = 8080   # http\n");
    }

    #[test]
    fn test_set_empty_value() {
        let mut kv = doc("a=\nb=2");
        kv.set("a", "filled");
        assert_eq!(kv.to_string(), "a=filled\nb=2");
    }

    #[test]
    fn test_rename() {
        let mut kv = doc("key1 = value1\nkey2 = value 2\n");
        kv.rename("key2", "newKey2").rename("missing", "x");
        assert_eq!(kv.get("key2"), None);
        assert_eq!(kv.get("newKey2"), Some("value 2"));
        assert_eq!(kv.to_string(), "key1 = value1\nnewKey2 = value 2\n");
    }

    #[test]
    fn test_delete() {
        let mut kv = doc("key1=value1\nkey2 = value 2\nkey3=value3\n");
        kv.delete("key2").delete("missing");
        assert_eq!(kv.get("key2"), None);
        assert_eq!(kv.get("key3"), Some("value3"));
        assert_eq!(kv.to_string(), "key1=value1\n\nkey3=value3\n");
    }

    #[test]
    fn test_delete_without_value_token() {
        let mut kv = Document::from_tokens(vec![
            Token::key("a"),
            Token::delimiter(),
            Token::newline(),
            Token::key("b"),
            Token::delimiter(),
            Token::value("1"),
        ]);
        kv.delete("a");
        assert_eq!(kv.to_string(), "\nb=1");
    }

    #[test]
    fn test_set_key_without_value_token() {
        let mut kv = Document::from_tokens(vec![
            Token::key("a"),
            Token::delimiter(),
            Token::newline(),
            Token::key("b"),
            Token::newline(),
        ]);
        kv.set("a", 1).set("b", "two");

        assert_eq!(kv.get("a"), Some("1"));
        assert_eq!(kv.get("b"), Some("two"));
        assert_eq!(kv.len(), 2);
        assert_eq!(kv.to_string(), "a=1\nb=two\n");
    }

    #[test]
    fn test_add_comment() {
        let mut kv = doc("a=1\n");
        kv.add_comment("one\ntwo");
        assert_eq!(kv.tokens().last(), Some(&Token::comment("# one\n# two")));
        assert_eq!(kv.to_string(), "a=1\n# one\n# two");
    }

    #[test]
    fn test_remove_comments() {
        let mut kv = doc("# Comment\nkey1=1 # Dude\n  # Comment\nkey2=2\n# Comment");
        kv.remove_comments();
        assert_eq!(kv.to_string(), "key1=1 \nkey2=2\n");
    }

    #[test]
    fn test_remove_added_multiline_comment() {
        let mut kv = Document::new();
        kv.add_comment("a\nb").add_newline().set("k", "v");
        kv.remove_comments();
        assert_eq!(kv.to_string(), "k=v");
    }

    #[test]
    fn test_is_trailing_comment() {
        let kv = doc("a=1 # t\n# own\nb= # empty value\n");
        let comments: Vec<_> = kv
            .tokens()
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is(TokenKind::Comment))
            .map(|(i, _)| kv.is_trailing_comment(i))
            .collect();
        assert_eq!(comments, vec![true, false, true]);
        assert!(!kv.is_trailing_comment(0));
    }

    #[test]
    fn test_round_trip() {
        let input = "key1 = value1\n # A comment\nkey2 = value 2 # Trailing comment\n";
        assert_eq!(doc(input).to_string(), input);
        assert_eq!(doc(input).serialize(false), input);
    }

    #[test]
    fn test_collapse_whitespace() {
        let kv = doc("  a = 1\n\n\tb =\t'x y'  # c\n");
        assert_eq!(kv.serialize(true), "a=1\n\nb='x y'# c\n");
        assert_eq!(doc(&kv.serialize(true)).serialize(true), kv.serialize(true));
    }

    #[test]
    fn test_entries_and_map() {
        let kv = doc("a=1\nb = two # x\na=3\nc=");
        let entries: Vec<_> = kv.entries().collect();
        assert_eq!(entries, vec![("a", "1"), ("b", "two"), ("a", "3"), ("c", "")]);
        assert_eq!(kv.len(), 4);
        assert!(kv.contains_key("c"));

        let map = kv.to_map();
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("a"), Some("1"));
    }

    #[test]
    fn test_write_to() {
        let kv = doc("a = 1\n");
        let mut buffer = Vec::new();
        kv.write_to(&mut buffer, true).unwrap();
        assert_eq!(buffer, b"a=1\n");
    }

    #[test]
    fn test_from_str() {
        let kv: Document = "x=1".parse().unwrap();
        assert_eq!(kv.get("x"), Some("1"));
        assert!("x".parse::<Document>().is_err());
    }

    #[test]
    fn test_remove_comments_then_set() {
        let mut kv = doc("# header\na=1 # note\n");
        kv.remove_comments().set("b", 2);
        assert_eq!(kv.to_string(), "a=1 \nb=2");

        let mut kv = doc("# header\na=1 # note\n");
        kv.set("b", 2).remove_comments();
        assert_eq!(kv.to_string(), "a=1 \nb=2");
    }
}
