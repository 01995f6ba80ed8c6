//! Replaying adapter for the `ProcessRunner` port.

use std::io;
use std::sync::Mutex;

use super::replay_result;
use crate::cassette::replayer::CassetteReplayer;
use crate::command::{CommandSpec, ExecutionResult};
use crate::error::{Error, ErrorKind, Result};
use crate::ports::process::ProcessRunner;

/// Replays recorded process results from a cassette.
pub struct ReplayingProcessRunner {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingProcessRunner {
    /// Creates a new replaying runner from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl ProcessRunner for ReplayingProcessRunner {
    fn run(&self, spec: &CommandSpec) -> Result<ExecutionResult> {
        let output = {
            let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
            let interaction = replayer.next_interaction("process", "run");
            interaction.output.clone()
        };
        tracing::debug!(command = %spec, "replaying");
        replay_result(&output, |recorded| match recorded.kind {
            ErrorKind::CommandNotFound => {
                Error::CommandNotFound { executable: spec.executable().to_string() }
            }
            _ => Error::io(recorded.message, io::Error::other("replayed from cassette")),
        })
    }
}
