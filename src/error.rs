//! Crate-wide error type and exit-code mapping.

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Category of a failure, independent of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A filesystem or stream operation failed.
    Io,
    /// The executable could not be located.
    CommandNotFound,
    /// The process ran and exited non-zero.
    CommandFailed,
    /// Switching into the requested directory failed.
    DirectoryChange,
    /// Switching back to the original directory failed.
    RestoreFailed,
    /// Invalid user-supplied configuration.
    Config,
}

/// Errors produced while running commands or managing the working directory.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A filesystem operation failed.
    #[error("{context}: {source}")]
    Io {
        /// What was being attempted.
        context: String,
        /// Underlying error.
        source: io::Error,
    },

    /// The executable could not be found on `PATH`.
    #[error("command not found: `{executable}`")]
    CommandNotFound {
        /// Executable name as given.
        executable: String,
    },

    /// The command ran but exited with a non-zero status.
    #[error("command `{command}` failed with exit code {exit_code}")]
    CommandFailed {
        /// Rendered command line.
        command: String,
        /// Process exit code (`-1` when killed by a signal).
        exit_code: i32,
    },

    /// The target directory does not exist or is not traversable.
    #[error("cannot change directory to {}: {source}", .path.display())]
    DirectoryChange {
        /// Directory we tried to enter.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// The original directory could not be restored.
    ///
    /// The process is left in a directory the caller did not expect, so any
    /// error from the scoped action is carried along instead of dropped.
    #[error(
        "failed to restore working directory to {}: {source}{}",
        .path.display(),
        after_action(.action.as_deref())
    )]
    RestoreFailed {
        /// Directory we tried to return to.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
        /// Error raised inside the scope, if any.
        action: Option<Box<Error>>,
    },

    /// Invalid configuration or arguments.
    #[error("{0}")]
    Config(String),
}

fn after_action(action: Option<&Error>) -> String {
    action.map_or_else(String::new, |err| format!(" (after: {err})"))
}

impl Error {
    /// Builds an [`Error::Io`] with a short description of the attempted operation.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } => ErrorKind::Io,
            Self::CommandNotFound { .. } => ErrorKind::CommandNotFound,
            Self::CommandFailed { .. } => ErrorKind::CommandFailed,
            Self::DirectoryChange { .. } => ErrorKind::DirectoryChange,
            Self::RestoreFailed { .. } => ErrorKind::RestoreFailed,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Process exit code reported by the binary for this error.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        self.kind().exit_code()
    }

    /// The error raised inside a scope whose restore then failed.
    #[must_use]
    pub fn action_error(&self) -> Option<&Error> {
        match self {
            Self::RestoreFailed { action, .. } => action.as_deref(),
            _ => None,
        }
    }
}

impl ErrorKind {
    /// Exit code used by the binary when an error of this kind terminates it.
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Config => 2,
            Self::Io => 3,
            Self::CommandFailed => 4,
            Self::DirectoryChange => 5,
            Self::RestoreFailed => 6,
            Self::CommandNotFound => 127,
        }
    }
}
