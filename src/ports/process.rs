//! Process runner port for launching external commands.

use crate::command::{CommandSpec, ExecutionResult};
use crate::error::Result;

/// Launches external commands.
///
/// Abstracting process execution allows recording and replaying command
/// results, so workflows can be tested without spawning real processes.
pub trait ProcessRunner: Send + Sync {
    /// Runs the command in the current working directory and blocks until it
    /// exits. Standard output and error go straight to the caller's streams.
    ///
    /// The spec's working directory is not applied here; directory scoping is
    /// the caller's job.
    ///
    /// # Errors
    ///
    /// Returns `CommandNotFound` if the executable cannot be located and `Io`
    /// for any other spawn failure. A non-zero exit is not an error at this
    /// level; it is reported through [`ExecutionResult::error_kind`].
    fn run(&self, spec: &CommandSpec) -> Result<ExecutionResult>;
}
