//! Live adapters for real external interactions.

pub mod environment;
pub mod filesystem;
pub mod process;
pub mod workdir;

pub use environment::LiveEnvironment;
pub use filesystem::LiveFileSystem;
pub use process::LiveProcessRunner;
pub use workdir::LiveWorkingDirectory;
