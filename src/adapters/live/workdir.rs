//! Live working-directory adapter using `std::env`.

use std::io;
use std::path::{Path, PathBuf};

use crate::ports::workdir::WorkingDirectory;

/// Reads and changes the real process-wide current directory.
pub struct LiveWorkingDirectory;

impl WorkingDirectory for LiveWorkingDirectory {
    fn current(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn change_to(&self, path: &Path) -> io::Result<()> {
        std::env::set_current_dir(path)
    }
}
