//! Error types for tokenizing and editing key/value documents.
//!
//! ## Error Categories
//!
//! - **Syntax Errors**: Malformed input (unterminated quote, missing `=`, a `=`
//!   without a key) with line/column information
//! - **Not Found**: The source file passed to [`parse_file`](crate::parse_file) does not exist
//! - **Cursor Errors**: Out-of-range positions or inverted ranges handed to the
//!   [`Cursor`](crate::Cursor)
//! - **I/O and Encoding Errors**: File reading/writing failures and invalid UTF-8
//!
//! A missing key is never an error: lookups return `None` and mutations on an
//! absent key are no-ops.
//!
//! ## Examples
//!
//! ```rust
//! use kvedit::{parse_str, Error};
//!
//! let result = parse_str("name 'Alice");
//! assert!(result.is_err());
//!
//! if let Err(err) = result {
//!     eprintln!("Parse error: {}", err);
//!     assert!(matches!(err, Error::Syntax { .. }));
//! }
//! ```

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Represents all possible errors raised while tokenizing, editing or persisting
/// a key/value document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// The requested source file does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Input bytes are not valid UTF-8
    #[error("Invalid UTF-8: {0}")]
    Utf8(String),

    /// Syntax error with detailed context
    #[error("Syntax error at line {line}, column {col}:\n{context}\n{msg}{suggestion}")]
    Syntax {
        line: usize,
        col: usize,
        msg: String,
        context: String,
        suggestion: String,
    },

    /// A cursor position outside `0..=len`
    #[error("Position {pos} is out of bounds for input of length {len}")]
    OutOfBounds { pos: isize, len: usize },

    /// A range whose start lies after its end
    #[error("Invalid range: start {from} is greater than end {to}")]
    InvalidRange { from: usize, to: usize },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error with line and column information.
    ///
    /// Use [`Error::syntax_with_context`] for more detailed error messages.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvedit::Error;
    ///
    /// let err = Error::syntax(10, 5, "unterminated string literal");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
            context: String::new(),
            suggestion: String::new(),
        }
    }

    /// Creates a syntax error with the offending line and an optional suggestion.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvedit::Error;
    ///
    /// let err = Error::syntax_with_context(
    ///     3,
    ///     6,
    ///     "expected \"=\" after key, got \":\"",
    ///     "name: Alice",
    ///     Some("Did you mean 'name=Alice'?"),
    /// );
    /// assert!(err.to_string().contains("Help:"));
    /// ```
    pub fn syntax_with_context(
        line: usize,
        col: usize,
        msg: &str,
        context: &str,
        suggestion: Option<&str>,
    ) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
            context: context.to_string(),
            suggestion: suggestion
                .map(|s| format!("\nHelp: {}", s))
                .unwrap_or_default(),
        }
    }

    /// Creates a not-found error for a missing source file.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Error::NotFound(path.into())
    }

    /// Creates an out-of-bounds error for a cursor position.
    pub fn out_of_bounds(pos: isize, len: usize) -> Self {
        Error::OutOfBounds { pos, len }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` for [`Error::Syntax`].
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax { .. })
    }

    /// Line and column of a syntax error, if this is one.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::Syntax { line, col, .. } => Some((*line, *col)),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::Utf8(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
