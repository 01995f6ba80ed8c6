//! Filesystem port for directory creation and file I/O.

use std::io;
use std::path::Path;

/// Provides filesystem access.
pub trait FileSystem: Send + Sync {
    /// Creates `path` and all missing ancestors. Succeeds if it already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if creation is blocked (permissions, a file in the way).
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Writes the given contents to a file, creating or overwriting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Returns `true` if the path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if the path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;
}
