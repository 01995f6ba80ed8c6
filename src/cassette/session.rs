//! Recording session owning the cassette recorders of one run.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;
use crate::error::{Error, Result};

/// File name of the process cassette inside a session directory.
pub const PROCESS_CASSETTE: &str = "process.cassette.yaml";

/// Owns the recorders for a recording session.
///
/// Only process runs are recorded; they are the one boundary that reaches
/// outside the machine. The cassette lands in `<dir>/process.cassette.yaml`.
pub struct RecordingSession {
    /// Recorder for process runs.
    pub process: Arc<Mutex<CassetteRecorder>>,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Start a session writing into `output_dir`.
    ///
    /// The directory path is made absolute up front so that scoped directory
    /// changes during the run do not move the cassette.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the current directory cannot be read or the
    /// output directory cannot be created.
    pub fn new(output_dir: &Path) -> Result<Self> {
        let output_dir = if output_dir.is_absolute() {
            output_dir.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|e| Error::io("failed to read current directory", e))?
                .join(output_dir)
        };
        std::fs::create_dir_all(&output_dir).map_err(|e| {
            Error::io(format!("failed to create cassette directory {}", output_dir.display()), e)
        })?;

        let name = format!("{}-process", Utc::now().format("%Y-%m-%dT%H-%M-%S"));
        let recorder =
            CassetteRecorder::new(output_dir.join(PROCESS_CASSETTE), name, commit_hash());
        Ok(Self { process: Arc::new(Mutex::new(recorder)), output_dir })
    }

    /// Finish all recorders and write cassette files to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter still holds a recorder or a cassette
    /// file cannot be written.
    pub fn finish(self) -> Result<PathBuf> {
        let recorder = Arc::try_unwrap(self.process)
            .map_err(|_| Error::Config("process recorder still has references".into()))?
            .into_inner()
            .map_err(|e| Error::Config(format!("process recorder lock poisoned: {e}")))?;
        recorder.finish()?;
        Ok(self.output_dir)
    }
}

/// Commit of the repository the tool runs in, or "unknown".
fn commit_hash() -> String {
    let hash = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string());

    hash.unwrap_or_else(|| {
        tracing::warn!("could not read git commit hash, using 'unknown'");
        "unknown".to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Cassette;
    use serde_json::json;

    #[test]
    fn session_writes_process_cassette() {
        let tmp = tempfile::tempdir().unwrap();
        let rec = tmp.path().join("rec");
        let session = RecordingSession::new(&rec).unwrap();
        assert!(rec.is_dir());

        session.process.lock().unwrap().record(
            "process",
            "run",
            json!({"executable": "git", "arguments": ["status"]}),
            json!({"Ok": {"exit_code": 0, "error_kind": null}}),
        );

        let dir = session.finish().unwrap();
        assert_eq!(dir, rec);
        let text = std::fs::read_to_string(dir.join(PROCESS_CASSETTE)).unwrap();
        let cassette = Cassette::from_yaml(&text).unwrap();
        assert_eq!(cassette.interactions.len(), 1);
        assert!(cassette.name.ends_with("-process"));
    }

    #[test]
    fn finish_fails_while_adapter_holds_recorder() {
        let tmp = tempfile::tempdir().unwrap();
        let session = RecordingSession::new(tmp.path()).unwrap();
        let _held = Arc::clone(&session.process);
        assert!(session.finish().is_err());
    }

    #[test]
    fn commit_hash_is_never_empty() {
        assert!(!commit_hash().is_empty());
    }
}
