//! Live process runner using `std::process::Command`.

use std::io;
use std::process::{Command, Stdio};

use crate::command::{CommandSpec, ExecutionResult};
use crate::error::{Error, Result};
use crate::ports::process::ProcessRunner;

/// Live runner that spawns the executable with inherited stdio.
pub struct LiveProcessRunner;

impl ProcessRunner for LiveProcessRunner {
    fn run(&self, spec: &CommandSpec) -> Result<ExecutionResult> {
        tracing::debug!(command = %spec, "spawning");
        let status = Command::new(spec.executable())
            .args(spec.arguments())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => {
                    Error::CommandNotFound { executable: spec.executable().to_string() }
                }
                _ => Error::io(format!("failed to run `{}`", spec.executable()), source),
            })?;
        Ok(ExecutionResult::from_exit_code(status.code().unwrap_or(-1)))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn runs_true() {
        let result = LiveProcessRunner.run(&CommandSpec::new("true")).unwrap();
        assert_eq!(result.exit_code, 0);
        assert!(result.success());
    }

    #[test]
    fn captures_exit_code() {
        let spec = CommandSpec::new("sh").args(["-c", "exit 42"]);
        let result = LiveProcessRunner.run(&spec).unwrap();
        assert_eq!(result.exit_code, 42);
        assert_eq!(result.error_kind, Some(ErrorKind::CommandFailed));
    }

    #[test]
    fn missing_executable_is_command_not_found() {
        let spec = CommandSpec::new("reposcope-definitely-not-installed");
        let err = LiveProcessRunner.run(&spec).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CommandNotFound);
    }
}
