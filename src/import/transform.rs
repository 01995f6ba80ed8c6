//! Placeholder substitution in checked-out files.
//!
//! A transform file is a JSON object mapping file names to replacement
//! tables:
//!
//! ```json
//! { "config/app.toml": { "DB_HOST": "localhost", "PORT": 5432 } }
//! ```
//!
//! Every `${DB_HOST}` in `config/app.toml` becomes `localhost`.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::ports::FileSystem;

/// Replacements for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTransform {
    /// File path relative to the clone root.
    pub file: PathBuf,
    /// `(placeholder, value)` pairs, in file order.
    pub replacements: Vec<(String, String)>,
}

/// All transforms from one transform file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformSet {
    /// Per-file transforms, in file order.
    pub files: Vec<FileTransform>,
}

/// What [`TransformSet::apply`] did.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TransformReport {
    /// Files that were rewritten.
    pub applied: Vec<PathBuf>,
    /// Files that did not exist and were skipped.
    pub skipped: Vec<PathBuf>,
}

impl TransformSet {
    /// Parses a transform file's JSON text.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error unless the text is an object of objects.
    pub fn parse(text: &str) -> Result<Self> {
        let root: Map<String, Value> = serde_json::from_str(text)
            .map_err(|e| Error::Config(format!("transform file is not a JSON object: {e}")))?;

        let mut files = Vec::with_capacity(root.len());
        for (file, table) in root {
            let Value::Object(table) = table else {
                return Err(Error::Config(format!(
                    "transforms for {file:?} must be an object of placeholder values"
                )));
            };
            let replacements = table
                .into_iter()
                .map(|(placeholder, value)| match value {
                    Value::String(s) => (placeholder, s),
                    other => (placeholder, other.to_string()),
                })
                .collect();
            files.push(FileTransform { file: PathBuf::from(file), replacements });
        }
        Ok(Self { files })
    }

    /// Reads and parses a transform file.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the file cannot be read or parsed.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self> {
        let text = fs.read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read transform file {}: {e}", path.display()))
        })?;
        Self::parse(&text)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Rewrites each listed file under `root`, replacing `${NAME}` with its value.
    ///
    /// Missing files are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if an existing file cannot be read or written.
    pub fn apply(&self, fs: &dyn FileSystem, root: &Path) -> Result<TransformReport> {
        let mut report = TransformReport::default();
        for transform in &self.files {
            let target = root.join(&transform.file);
            if !fs.exists(&target) {
                tracing::warn!(file = %target.display(), "transform target does not exist");
                report.skipped.push(target);
                continue;
            }

            let mut content = fs
                .read_to_string(&target)
                .map_err(|e| Error::io(format!("failed to read {}", target.display()), e))?;
            for (placeholder, value) in &transform.replacements {
                content = content.replace(&format!("${{{placeholder}}}"), value);
            }
            fs.write(&target, &content)
                .map_err(|e| Error::io(format!("failed to write {}", target.display()), e))?;

            tracing::info!(file = %target.display(), "applied transformations");
            report.applied.push(target);
        }
        Ok(report)
    }
}
