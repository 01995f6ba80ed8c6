//! Service context bundling all port trait objects.

use std::path::Path;

use crate::adapters::live::{
    LiveEnvironment, LiveFileSystem, LiveProcessRunner, LiveWorkingDirectory,
};
use crate::adapters::recording::RecordingProcessRunner;
use crate::adapters::replaying::ReplayingProcessRunner;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::error::{Error, Result};
use crate::ports::{Environment, FileSystem, ProcessRunner, WorkingDirectory};

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors wire up
/// different adapter implementations (live, recording, replaying).
pub struct ServiceContext {
    /// Runner for external commands.
    pub process: Box<dyn ProcessRunner>,
    /// The process-wide current directory.
    pub workdir: Box<dyn WorkingDirectory>,
    /// Filesystem for directory creation and file I/O.
    pub fs: Box<dyn FileSystem>,
    /// Process environment.
    pub env: Box<dyn Environment>,
}

impl ServiceContext {
    /// Creates a live context with real adapters for every port.
    #[must_use]
    pub fn live() -> Self {
        Self {
            process: Box::new(LiveProcessRunner),
            workdir: Box::new(LiveWorkingDirectory),
            fs: Box::new(LiveFileSystem),
            env: Box::new(LiveEnvironment),
        }
    }

    /// Creates a live context whose process runs are recorded into `dir`.
    ///
    /// The returned session must be finished after the context is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the recording directory cannot be created.
    pub fn recording_at(dir: &Path) -> Result<(Self, RecordingSession)> {
        let session = RecordingSession::new(dir)?;
        let process = RecordingProcessRunner::new(
            Box::new(LiveProcessRunner),
            std::sync::Arc::clone(&session.process),
        );
        let ctx = Self { process: Box::new(process), ..Self::live() };
        Ok((ctx, session))
    }

    /// Creates a context that serves process runs from a cassette file.
    ///
    /// Directory, filesystem and environment ports stay live, so directory
    /// scoping is still exercised for real.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the cassette cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read cassette file {}: {e}", path.display()))
        })?;
        let cassette = Cassette::from_yaml(&content).map_err(|e| {
            Error::Config(format!("failed to parse cassette file {}: {e}", path.display()))
        })?;
        let process = ReplayingProcessRunner::new(CassetteReplayer::new(&cassette));
        Ok(Self { process: Box::new(process), ..Self::live() })
    }
}
