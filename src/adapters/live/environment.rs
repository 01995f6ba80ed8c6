//! Live environment adapter.

use crate::ports::environment::Environment;

/// Writes to the real process environment.
pub struct LiveEnvironment;

impl Environment for LiveEnvironment {
    fn set(&self, key: &str, value: &str) {
        std::env::set_var(key, value);
    }
}
