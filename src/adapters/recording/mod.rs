//! Recording adapters that capture interactions to cassettes.

pub mod process;

pub use process::RecordingProcessRunner;

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::cassette::recorder::CassetteRecorder;
use crate::error::{Error, ErrorKind};

/// Serialized form of an error inside a cassette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedError {
    /// Category of the error.
    pub kind: ErrorKind,
    /// Rendered error message.
    pub message: String,
}

impl From<&Error> for RecordedError {
    fn from(err: &Error) -> Self {
        Self { kind: err.kind(), message: err.to_string() }
    }
}

/// Record a `Result<T, Error>` interaction using the Ok/Err JSON convention.
///
/// Mirror of `replaying::replay_result`.
///
/// Convention:
/// - `Ok(v)` is serialized as `{"Ok": v}`
/// - `Err(e)` is serialized as `{"Err": {"kind": .., "message": ..}}`
pub(crate) fn record_result<T, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, Error>,
) where
    T: Serialize,
    I: Serialize,
{
    let input_json = serde_json::to_value(input).expect("failed to serialize recording input");

    let output_json = match result {
        Ok(v) => {
            let inner = serde_json::to_value(v).expect("failed to serialize Ok value");
            serde_json::json!({ "Ok": inner })
        }
        Err(e) => {
            let inner = serde_json::to_value(RecordedError::from(e))
                .expect("failed to serialize Err value");
            serde_json::json!({ "Err": inner })
        }
    };

    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(port, method, input_json, output_json);
}
