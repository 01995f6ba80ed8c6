//! Process environment port.

/// Sets variables in the process environment.
///
/// Values live for the rest of the process and are inherited by every child
/// it spawns afterwards. They never reach the parent shell.
pub trait Environment: Send + Sync {
    /// Sets `key` to `value`.
    fn set(&self, key: &str, value: &str);
}
