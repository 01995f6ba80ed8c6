//! JSON env files: a flat object whose pairs become environment variables.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::ports::FileSystem;

/// Resolves the env-file path, appending `.json` when the name lacks it.
#[must_use]
pub fn resolve_path(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == "json") {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_owned();
        name.push(".json");
        PathBuf::from(name)
    }
}

/// Loads `KEY=VALUE` pairs from a JSON object, in file order.
///
/// Strings are used verbatim; any other value uses its JSON text
/// (`3` becomes `"3"`, `true` becomes `"true"`).
///
/// # Errors
///
/// Returns a `Config` error if the file is missing, unreadable, or not a
/// JSON object.
pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Vec<(String, String)>> {
    let path = resolve_path(path);
    if !fs.exists(&path) {
        return Err(Error::Config(format!("env file {} is missing", path.display())));
    }
    let text = fs
        .read_to_string(&path)
        .map_err(|e| Error::Config(format!("failed to read env file {}: {e}", path.display())))?;
    let object: Map<String, Value> = serde_json::from_str(&text).map_err(|e| {
        Error::Config(format!("env file {} is not a JSON object: {e}", path.display()))
    })?;

    let pairs: Vec<(String, String)> = object
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (key, value)
        })
        .collect();
    tracing::info!(path = %path.display(), count = pairs.len(), "imported env file");
    Ok(pairs)
}
