//! Records interactions into a cassette file.

use std::io;
use std::path::PathBuf;

use chrono::Utc;

use super::format::{Cassette, Interaction};
use crate::error::{Error, Result};

/// Collects interactions in memory and writes them as one YAML cassette file.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    commit: String,
    interactions: Vec<Interaction>,
}

impl CassetteRecorder {
    /// Create a recorder that will write to `path` when finished.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        Self { path: path.into(), name: name.into(), commit: commit.into(), interactions: Vec::new() }
    }

    /// Append an interaction; its `seq` is its position in the cassette.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        let seq = self.interactions.len() as u64;
        self.interactions.push(Interaction {
            seq,
            port: port.into(),
            method: method.into(),
            input,
            output,
        });
    }

    /// Write the cassette YAML file, creating its parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the directory or file cannot be written.
    pub fn finish(self) -> Result<PathBuf> {
        let cassette = Cassette {
            name: self.name,
            recorded_at: Utc::now(),
            commit: self.commit,
            interactions: self.interactions,
        };
        let yaml = serde_yaml::to_string(&cassette)
            .map_err(|e| Error::io("failed to serialize cassette", io::Error::other(e)))?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::io(format!("failed to create {}", parent.display()), e)
            })?;
        }
        std::fs::write(&self.path, yaml)
            .map_err(|e| Error::io(format!("failed to write {}", self.path.display()), e))?;
        tracing::debug!(path = %self.path.display(), "cassette written");
        Ok(self.path)
    }
}
