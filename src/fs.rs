//! File access used by [`KeyValueFile`](crate::KeyValueFile).
//!
//! The [`FileSystem`] trait is the only place documents touch the outside
//! world. [`StdFileSystem`] implements it over `std::fs`; tests and embedders
//! can substitute their own implementation.

use crate::options::WriteOptions;
use crate::Result;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Minimal file operations needed to load and persist a document.
pub trait FileSystem {
    /// Returns `true` if `path` exists. Never fails: any I/O error means `false`.
    fn exists(&self, path: &Path) -> bool;

    /// Reads the whole file at `path`.
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;

    /// Creates or truncates the file at `path` and writes `bytes` to it.
    fn write_file(&self, path: &Path, bytes: &[u8], options: &WriteOptions) -> Result<()>;
}

/// [`FileSystem`] backed by the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn exists(&self, path: &Path) -> bool {
        fs::metadata(path).is_ok()
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(fs::read(path)?)
    }

    fn write_file(&self, path: &Path, bytes: &[u8], options: &WriteOptions) -> Result<()> {
        if options.create_dirs {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = fs::File::create(path)?;
        file.write_all(bytes)?;

        if options.sync {
            file.sync_all()?;
        }

        Ok(())
    }
}
