//! Configuration options for tokenizing and writing documents.
//!
//! - [`ParseOptions`]: controls how raw input is prepared for the tokenizer
//! - [`WriteOptions`]: controls how a [`KeyValueFile`](crate::KeyValueFile) is persisted
//!
//! ## Examples
//!
//! ```rust
//! use kvedit::{tokenize_with_options, ParseOptions, WriteOptions};
//!
//! // Keep carriage returns as ordinary content
//! let options = ParseOptions::new().with_normalize_newlines(false);
//! let tokens = tokenize_with_options("key=value\r\n", &options).unwrap();
//! assert_eq!(tokens[2].text, "value\r");
//!
//! let write = WriteOptions::new().with_create_dirs(true).with_sync(true);
//! assert!(write.create_dirs);
//! ```

/// Options applied before and during tokenization.
///
/// # Examples
///
/// ```rust
/// use kvedit::ParseOptions;
///
/// let options = ParseOptions::new();
/// assert!(options.normalize_newlines);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Collapse `\r\n` and lone `\r` into `\n` before tokenizing.
    pub normalize_newlines: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            normalize_newlines: true,
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_normalize_newlines(mut self, normalize: bool) -> Self {
        self.normalize_newlines = normalize;
        self
    }
}

/// Options handed to the file collaborator when a document is written.
///
/// # Examples
///
/// ```rust
/// use kvedit::WriteOptions;
///
/// let options = WriteOptions::new();
/// assert!(!options.create_dirs);
/// assert!(!options.sync);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Create missing parent directories before writing.
    pub create_dirs: bool,
    /// Flush file contents to disk before returning.
    pub sync: bool,
}

impl WriteOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_create_dirs(mut self, create_dirs: bool) -> Self {
        self.create_dirs = create_dirs;
        self
    }

    #[must_use]
    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }
}
