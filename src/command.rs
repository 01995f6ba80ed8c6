//! Command descriptions and execution results.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind, Result};

/// An external command to run: executable, ordered arguments, and an
/// optional directory to run it in.
///
/// Built once with the consuming builder methods and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    executable: String,
    arguments: Vec<String>,
    working_directory: Option<PathBuf>,
}

impl CommandSpec {
    /// Starts a spec for the given executable with no arguments.
    pub fn new(executable: impl Into<String>) -> Self {
        Self { executable: executable.into(), arguments: Vec::new(), working_directory: None }
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.arguments.push(arg.into());
        self
    }

    /// Appends several arguments in order.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments.extend(args.into_iter().map(Into::into));
        self
    }

    /// Runs the command inside `dir`, restoring the current directory afterwards.
    #[must_use]
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    /// The executable name or path.
    #[must_use]
    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// The arguments, in order.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// The directory to run in, if any.
    #[must_use]
    pub fn working_directory(&self) -> Option<&Path> {
        self.working_directory.as_deref()
    }

    /// Same command with the working directory stripped.
    #[must_use]
    pub fn without_directory(&self) -> Self {
        Self { working_directory: None, ..self.clone() }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.executable)?;
        for arg in &self.arguments {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {arg:?}")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Outcome of one process run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Exit code reported by the process (`-1` when killed by a signal).
    pub exit_code: i32,
    /// Set to [`ErrorKind::CommandFailed`] for non-zero exits.
    pub error_kind: Option<ErrorKind>,
}

impl ExecutionResult {
    /// Builds a result from a raw exit code.
    #[must_use]
    pub fn from_exit_code(exit_code: i32) -> Self {
        let error_kind = (exit_code != 0).then_some(ErrorKind::CommandFailed);
        Self { exit_code, error_kind }
    }

    /// Whether the process exited with code zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.error_kind.is_none()
    }

    /// Converts a non-zero exit into [`Error::CommandFailed`].
    ///
    /// # Errors
    ///
    /// Returns `CommandFailed` when the exit code is non-zero.
    pub fn into_result(self, spec: &CommandSpec) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(Error::CommandFailed { command: spec.to_string(), exit_code: self.exit_code })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_argument_order() {
        let spec = CommandSpec::new("git").arg("clone").args(["url", "dest"]).in_dir("/tmp");
        assert_eq!(spec.executable(), "git");
        assert_eq!(spec.arguments(), ["clone", "url", "dest"]);
        assert_eq!(spec.working_directory(), Some(Path::new("/tmp")));
        assert_eq!(spec.without_directory().working_directory(), None);
    }

    #[test]
    fn display_quotes_arguments_with_spaces() {
        let spec = CommandSpec::new("git").args(["commit", "-m", "first commit"]);
        assert_eq!(spec.to_string(), r#"git commit -m "first commit""#);
    }

    #[test]
    fn non_zero_exit_is_command_failed() {
        let spec = CommandSpec::new("false");
        let result = ExecutionResult::from_exit_code(3);
        assert_eq!(result.error_kind, Some(ErrorKind::CommandFailed));

        let err = result.into_result(&spec).unwrap_err();
        assert!(matches!(err, Error::CommandFailed { exit_code: 3, .. }));
    }

    #[test]
    fn zero_exit_is_success() {
        let result = ExecutionResult::from_exit_code(0);
        assert!(result.success());
        assert!(result.into_result(&CommandSpec::new("true")).is_ok());
    }
}
