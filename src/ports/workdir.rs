//! Working-directory port.

use std::io;
use std::path::{Path, PathBuf};

/// Reads and changes the process-wide current directory.
///
/// There is exactly one current directory per process. Callers should go
/// through `ScopedCommandRunner::with_directory` rather than calling
/// [`WorkingDirectory::change_to`] directly.
pub trait WorkingDirectory: Send + Sync {
    /// Returns the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory was removed or is unreadable.
    fn current(&self) -> io::Result<PathBuf>;

    /// Makes `path` the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` does not exist or is not traversable.
    fn change_to(&self, path: &Path) -> io::Result<()>;
}
