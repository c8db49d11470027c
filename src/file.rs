//! A [`Document`] bound to a file path.
//!
//! [`KeyValueFile`] holds a document plus the path it was loaded from (or will
//! be written to). It dereferences to [`Document`], so every lookup and edit
//! is available directly on it.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use kvedit::{KeyValueFile, WriteOptions};
//!
//! let mut env = KeyValueFile::create(".env")?;
//! env.set("API_URL", "https://example.com").set("RETRIES", 3);
//! env.write_file(false, &WriteOptions::default())?;
//! # Ok::<(), kvedit::Error>(())
//! ```

use crate::fs::{FileSystem, StdFileSystem};
use crate::lexer::Tokenizer;
use crate::options::{ParseOptions, WriteOptions};
use crate::{Document, Error, Result, Token};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

/// A key/value document persisted at a fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValueFile {
    path: PathBuf,
    document: Document,
}

impl KeyValueFile {
    /// Creates an empty document bound to `path`. Nothing is read or written.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        KeyValueFile::with_document(path, Document::new())
    }

    pub fn with_tokens(path: impl Into<PathBuf>, tokens: Vec<Token>) -> Self {
        KeyValueFile::with_document(path, Document::from_tokens(tokens))
    }

    pub fn with_document(path: impl Into<PathBuf>, document: Document) -> Self {
        KeyValueFile {
            path: path.into(),
            document,
        }
    }

    /// Loads `path` if it exists, otherwise returns an empty document bound to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if an existing file can't be read and
    /// [`Error::Syntax`] if its content is malformed.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        KeyValueFile::create_with(&StdFileSystem, path)
    }

    /// Like [`create`](Self::create), using a custom [`FileSystem`].
    pub fn create_with<F: FileSystem>(fs: &F, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if fs.exists(path) {
            KeyValueFile::load(fs, path)
        } else {
            tracing::debug!(path = %path.display(), "no existing file, starting empty");
            Ok(KeyValueFile::new(path))
        }
    }

    /// Loads an existing file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `path` does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        KeyValueFile::open_with(&StdFileSystem, path)
    }

    /// Like [`open`](Self::open), using a custom [`FileSystem`].
    pub fn open_with<F: FileSystem>(fs: &F, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !fs.exists(path) {
            return Err(Error::not_found(path));
        }

        KeyValueFile::load(fs, path)
    }

    fn load<F: FileSystem>(fs: &F, path: &Path) -> Result<Self> {
        let bytes = fs.read_file(path)?;
        let tokens = Tokenizer::from_bytes(&bytes, &ParseOptions::default())?.tokenize()?;

        tracing::debug!(
            path = %path.display(),
            bytes = bytes.len(),
            tokens = tokens.len(),
            "loaded file"
        );
        Ok(KeyValueFile::with_tokens(path, tokens))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Serializes the document and overwrites the file at [`path`](Self::path).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if writing fails.
    pub fn write_file(
        &mut self,
        collapse_whitespace: bool,
        options: &WriteOptions,
    ) -> Result<&mut Self> {
        self.write_file_with(&StdFileSystem, collapse_whitespace, options)
    }

    /// Like [`write_file`](Self::write_file), using a custom [`FileSystem`].
    pub fn write_file_with<F: FileSystem>(
        &mut self,
        fs: &F,
        collapse_whitespace: bool,
        options: &WriteOptions,
    ) -> Result<&mut Self> {
        let data = self.document.serialize(collapse_whitespace);
        fs.write_file(&self.path, data.as_bytes(), options)?;

        tracing::debug!(path = %self.path.display(), bytes = data.len(), "wrote file");
        Ok(self)
    }
}

impl Deref for KeyValueFile {
    type Target = Document;

    fn deref(&self) -> &Document {
        &self.document
    }
}

impl DerefMut for KeyValueFile {
    fn deref_mut(&mut self) -> &mut Document {
        &mut self.document
    }
}

impl AsRef<Document> for KeyValueFile {
    fn as_ref(&self) -> &Document {
        &self.document
    }
}
