//! Cassettes: YAML files of recorded port interactions.

pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;
