//! Port implementations.
//!
//! `live` talks to the real system. `recording` wraps a live adapter and
//! captures every interaction to a cassette; `replaying` serves them back.

pub mod live;
pub mod recording;
pub mod replaying;
