//! Recording adapter for the `ProcessRunner` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::command::{CommandSpec, ExecutionResult};
use crate::error::Result;
use crate::ports::ProcessRunner;

/// Records process runs while delegating to an inner implementation.
pub struct RecordingProcessRunner {
    inner: Box<dyn ProcessRunner>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingProcessRunner {
    /// Creates a new recording runner wrapping the given implementation.
    pub fn new(inner: Box<dyn ProcessRunner>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct RunInput<'a> {
    executable: &'a str,
    arguments: &'a [String],
}

impl ProcessRunner for RecordingProcessRunner {
    fn run(&self, spec: &CommandSpec) -> Result<ExecutionResult> {
        let result = self.inner.run(spec);
        let input = RunInput { executable: spec.executable(), arguments: spec.arguments() };
        record_result(&self.recorder, "process", "run", &input, &result);
        result
    }
}
