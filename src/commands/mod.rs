//! Command dispatch and handlers.

pub mod exec;
pub mod import;

use std::env;
use std::path::PathBuf;

use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::context::ServiceContext;
use crate::error::Result;

/// Records every process run into the given directory.
pub const RECORD_VAR: &str = "REPOSCOPE_RECORD";
/// Serves process runs from the given cassette instead of spawning them.
pub const REPLAY_VAR: &str = "REPOSCOPE_REPLAY";

/// Dispatch a parsed command to its handler.
///
/// `REPOSCOPE_REPLAY=<cassette>` replays recorded process runs;
/// `REPOSCOPE_RECORD=<dir>` records them. Otherwise everything is live.
///
/// # Errors
///
/// Returns the handler's error. An error finishing the recording is returned
/// only when the handler succeeded; otherwise it is logged.
pub fn dispatch(command: &Command) -> Result<()> {
    if let Ok(path) = env::var(REPLAY_VAR) {
        tracing::debug!(cassette = %path, "replaying process runs");
        let ctx = ServiceContext::replaying(&PathBuf::from(path))?;
        return dispatch_with_context(command, &ctx);
    }

    if let Ok(path) = env::var(RECORD_VAR) {
        let (ctx, session) = ServiceContext::recording_at(&PathBuf::from(path))?;
        let result = dispatch_with_context(command, &ctx);
        // Drop context first to release the recorder
        drop(ctx);
        return settle_recording(result, finish_recording(session));
    }

    dispatch_with_context(command, &ServiceContext::live())
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns the handler's error.
pub fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<()> {
    match command {
        Command::Import(args) => import::run(ctx, args),
        Command::Exec(args) => exec::run(ctx, args),
    }
}

/// The command's own error wins over a failure to save its recording.
fn settle_recording(result: Result<()>, finished: Result<()>) -> Result<()> {
    match (result, finished) {
        (Err(err), Err(finish_err)) => {
            tracing::error!(error = %finish_err, "failed to save recording");
            Err(err)
        }
        (Ok(()), finished) => finished,
        (result, Ok(())) => result,
    }
}

fn finish_recording(session: RecordingSession) -> Result<()> {
    let output_dir = session.finish()?;
    tracing::info!(dir = %output_dir.display(), "recording saved");
    Ok(())
}
