//! Replaying adapters that serve recorded interactions.

pub mod process;

pub use process::ReplayingProcessRunner;

use std::io;

use crate::adapters::recording::RecordedError;
use crate::error::{Error, ErrorKind};

/// Decode an `{"Ok": v}` / `{"Err": e}` output recorded by `recording::record_result`.
///
/// `rebuild` turns a recorded error back into a typed [`Error`].
pub(crate) fn replay_result<T, F>(output: &serde_json::Value, rebuild: F) -> Result<T, Error>
where
    T: serde::de::DeserializeOwned,
    F: FnOnce(RecordedError) -> Error,
{
    if let Some(err) = output.get("Err") {
        let recorded: RecordedError = serde_json::from_value(err.clone()).unwrap_or_else(|_| {
            RecordedError { kind: ErrorKind::Io, message: err.to_string() }
        });
        return Err(rebuild(recorded));
    }
    let value = output.get("Ok").unwrap_or(output);
    serde_json::from_value(value.clone())
        .map_err(|e| Error::io("malformed cassette output", io::Error::other(e)))
}
