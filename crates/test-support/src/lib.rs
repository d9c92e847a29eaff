#![deny(unsafe_code)]
#![deny(missing_docs)]

//! Shared test utilities for the loglove workspace.
//!
//! Provides a scratch directory for configuration files that tests write,
//! rewrite, and delete between reloads.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Temporary directory holding configuration files for one test.
///
/// Removed together with its contents when dropped.
#[derive(Debug)]
pub struct ConfigDir {
    dir: TempDir,
}

impl ConfigDir {
    /// Creates an empty scratch directory.
    ///
    /// # Errors
    ///
    /// Returns any error from creating the directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of `name` inside the directory, whether or not it exists.
    #[must_use]
    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Writes (or overwrites) `name` with `contents` and returns its path.
    ///
    /// # Errors
    ///
    /// Returns any error from writing the file.
    pub fn write(&self, name: &str, contents: &str) -> io::Result<PathBuf> {
        let path = self.join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Deletes `name` if it exists.
    ///
    /// # Errors
    ///
    /// Returns any error other than the file being absent.
    pub fn remove(&self, name: &str) -> io::Result<()> {
        match fs::remove_file(self.join(name)) {
            Err(error) if error.kind() != io::ErrorKind::NotFound => Err(error),
            _ => Ok(()),
        }
    }
}

/// Writes `contents` to a fresh `love.config` and returns the directory
/// with the file's path.
///
/// # Errors
///
/// Returns any error from creating the directory or writing the file.
pub fn config_file(contents: &str) -> io::Result<(ConfigDir, PathBuf)> {
    let dir = ConfigDir::new()?;
    let path = dir.write("love.config", contents)?;
    Ok((dir, path))
}
