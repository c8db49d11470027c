//! # kvedit
//!
//! A lossless parser and in-place editor for `key=value` configuration files
//! such as `.env`.
//!
//! ## What does lossless mean?
//!
//! Parsing turns text into a stream of [`Token`]s covering every character of
//! the input: keys, values, `=` delimiters, comments, spaces, tabs and
//! newlines. Serializing an unedited [`Document`] gives back the input byte for
//! byte, and edits only touch the tokens that belong to the changed pair.
//!
//! ## Key Features
//!
//! - **Round-trip exact**: Comments, alignment and quoting survive edits
//! - **Targeted edits**: `get`, `set`, `rename`, `delete`, comment management
//! - **Collapse mode**: Optional serialization without non-newline whitespace
//! - **Precise errors**: Syntax errors carry line, column and the offending line
//! - **No Unsafe Code**: Written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use kvedit::parse_str;
//!
//! let input = "key1 = value1\n# A comment\nkey2 = value 2 # Trailing comment\n";
//! let mut doc = parse_str(input).unwrap();
//!
//! assert_eq!(doc.get("key1"), Some("value1"));
//! assert_eq!(doc.get("key2"), Some("value 2"));
//! assert_eq!(doc.to_string(), input);
//!
//! doc.set("key2", 42).delete("key1");
//! assert_eq!(doc.to_string(), "\n# A comment\nkey2 = 42 # Trailing comment\n");
//! ```
//!
//! ### Working with Files
//!
//! ```rust,no_run
//! use kvedit::{parse_file, WriteOptions};
//!
//! let mut env = parse_file(".env")?;
//! env.rename("DB_URL", "DATABASE_URL").remove_comments();
//! env.write_file(false, &WriteOptions::default())?;
//! # Ok::<(), kvedit::Error>(())
//! ```
//!
//! ## Format
//!
//! ```text
//! # own-line comment
//! KEY=value
//!   INDENTED = value with spaces   # trailing comment
//! QUOTED='single # not a comment'
//! "quoted key"="double"
//! EMPTY=
//! ```
//!
//! Line endings are normalized to `\n` by default; see [`ParseOptions`].

pub mod cursor;
pub mod document;
pub mod error;
pub mod file;
pub mod fs;
pub mod lexer;
pub mod map;
pub mod options;
pub mod token;
pub mod value;

pub use cursor::Cursor;
pub use document::Document;
pub use error::{Error, Result};
pub use file::KeyValueFile;
pub use fs::{FileSystem, StdFileSystem};
pub use lexer::{tokenize, tokenize_with_options, Tokenizer};
pub use map::EntryMap;
pub use options::{ParseOptions, WriteOptions};
pub use token::{Token, TokenKind};
pub use value::{Number, Scalar};

use std::io;
use std::path::Path;

/// Parse a document from a string.
///
/// # Examples
///
/// ```rust
/// use kvedit::parse_str;
///
/// let doc = parse_str("key1=value1\nkey2=value2").unwrap();
/// assert_eq!(doc.get("key1"), Some("value1"));
/// assert_eq!(doc.get("key2"), Some("value2"));
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] if the input is malformed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_str(input: &str) -> Result<Document> {
    Document::parse(input)
}

/// Parse a document from a string with custom options.
///
/// # Errors
///
/// Returns [`Error::Syntax`] if the input is malformed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_str_with_options(input: &str, options: &ParseOptions) -> Result<Document> {
    Ok(Document::from_tokens(tokenize_with_options(input, options)?))
}

/// Parse a document from UTF-8 bytes.
///
/// # Examples
///
/// ```rust
/// use kvedit::parse_slice;
///
/// let doc = parse_slice(b"key1=value1\nkey2=value2").unwrap();
/// assert_eq!(doc.get("key2"), Some("value2"));
/// ```
///
/// # Errors
///
/// Returns [`Error::Utf8`] if the bytes are not valid UTF-8 and
/// [`Error::Syntax`] if the input is malformed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_slice(bytes: &[u8]) -> Result<Document> {
    let tokens = Tokenizer::from_bytes(bytes, &ParseOptions::default())?.tokenize()?;
    Ok(Document::from_tokens(tokens))
}

/// Parse a document from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use kvedit::parse_reader;
/// use std::io::Cursor;
///
/// let doc = parse_reader(Cursor::new(b"a = 1\n")).unwrap();
/// assert_eq!(doc.get("a"), Some("1"));
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, plus everything [`parse_slice`] returns.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_reader<R>(mut reader: R) -> Result<Document>
where
    R: io::Read,
{
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    parse_slice(&bytes)
}

/// Load an existing file into a [`KeyValueFile`].
///
/// Use [`KeyValueFile::create`] to also accept a path that doesn't exist yet.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if `path` does not exist, [`Error::Io`] if it
/// can't be read and [`Error::Syntax`] if its content is malformed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_file(path: impl AsRef<Path>) -> Result<KeyValueFile> {
    KeyValueFile::open(path)
}
