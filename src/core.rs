//! Broker value types and re-exports of 3rd party types/crates used in public interface.

/// An alias for `chrono::DateTime<chrono::Utc>`
pub type DateTime = chrono::DateTime<chrono::Utc>;
pub use chrono::{Duration, Utc};

pub mod exchange;
pub mod queue;
pub mod route;
