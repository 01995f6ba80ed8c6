//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and the
//! outside world (child processes, the current directory, the filesystem,
//! the process environment). Implementations live in `src/adapters/`.

pub mod environment;
pub mod filesystem;
pub mod process;
pub mod workdir;

pub use environment::Environment;
pub use filesystem::FileSystem;
pub use process::ProcessRunner;
pub use workdir::WorkingDirectory;
