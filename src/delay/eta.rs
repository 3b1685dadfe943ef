//! ETA resolution.
//!
//! A task's delivery time arrives in one of two forms: a relative countdown in
//! seconds, or an absolute instant. Absolute instants may come in as ISO-8601
//! strings; naive timestamps (no UTC offset) are assumed to be UTC.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::core::{DateTime, Utc};

/// Error type for ETA handling.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EtaError {
    /// An ETA string could not be parsed as an ISO-8601 timestamp.
    #[error("Malformed timestamp '{value}': {error}")]
    MalformedTimestamp { value: String, error: String },
}

/// When a task should be delivered: either seconds from now or an absolute
/// UTC instant.
///
/// # Examples
///
/// ```rust
/// use plus_tard::delay::eta::Eta;
///
/// let countdown = Eta::Countdown(30.0);
/// let absolute = Eta::parse("2024-08-25T00:00:00").unwrap();
/// assert!(Eta::parse("not a timestamp").is_err());
/// # drop((countdown, absolute));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Eta {
    /// Relative delay in seconds. May be negative (already due).
    Countdown(f64),
    /// Absolute delivery instant.
    At(DateTime),
}

/// Accepted naive timestamp layouts, tried in order after RFC 3339 fails.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

impl Eta {
    /// Parse an ISO-8601 timestamp string into an absolute ETA.
    ///
    /// Offset-carrying timestamps are converted to UTC; naive ones are
    /// assumed UTC. A bare date means midnight UTC of that day.
    pub fn parse(value: &str) -> Result<Self, EtaError> {
        if let Ok(aware) = chrono::DateTime::parse_from_rfc3339(value) {
            return Ok(Eta::At(aware.with_timezone(&Utc)));
        }
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
                return Ok(Eta::At(naive.and_utc()));
            }
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(|date| Eta::At(date.and_time(chrono::NaiveTime::MIN).and_utc()))
            .map_err(|error| EtaError::MalformedTimestamp {
                value: value.to_string(),
                error: error.to_string(),
            })
    }

    /// Seconds between `now` and this ETA. Negative when already due.
    pub fn delay_seconds(&self, now: DateTime) -> f64 {
        match self {
            Eta::Countdown(seconds) => *seconds,
            Eta::At(when) => {
                let delta = when.signed_duration_since(now);
                delta.num_milliseconds() as f64 / 1000.0
            }
        }
    }
}

impl From<DateTime> for Eta {
    fn from(when: DateTime) -> Self {
        Eta::At(when)
    }
}

impl From<f64> for Eta {
    fn from(seconds: f64) -> Self {
        Eta::Countdown(seconds)
    }
}
