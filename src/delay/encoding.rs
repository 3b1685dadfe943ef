//! Delay bucket encoding.
//!
//! The remaining delay is floor-quantized to whole seconds and rendered as a
//! fixed-width binary routing-key prefix, e.g. a 30 second countdown becomes
//! `0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.1.1.1.1.0`. Digits run
//! most-significant first, which is the order the broker-side wildcard
//! bindings match them in.

use crate::core::DateTime;
use crate::delay::eta::Eta;

/// Width of the delay bucket in bits. 2^28 seconds is roughly eight and a
/// half years, the horizon the standing bindings cover.
pub const DELAY_BITS: u32 = 28;

/// Largest delay (in seconds) the bucket can express.
const MAX_BUCKET: u32 = (1 << DELAY_BITS) - 1;

/// A positive delay quantized into the fixed-width time bucket.
///
/// Construction only succeeds for delays strictly greater than zero; anything
/// already due is "no delay" (`None`) and the caller keeps its original
/// route. The quantization floors, never rounds up: delivering late by under
/// a second is acceptable, delivering early is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DelayEncoding {
    bucket: u32,
}

impl DelayEncoding {
    /// Quantize a relative countdown in seconds.
    ///
    /// Returns `None` for zero, negative, or NaN countdowns. Delays beyond
    /// the bucket range saturate at the top of the range.
    pub fn from_countdown(seconds: f64) -> Option<Self> {
        if !(seconds > 0.0) {
            return None;
        }
        let bucket = (seconds.floor() as u64).min(MAX_BUCKET as u64) as u32;
        Some(Self { bucket })
    }

    /// Quantize the delay between `now` and an absolute delivery instant.
    pub fn from_eta(now: DateTime, eta: DateTime) -> Option<Self> {
        Self::resolve(now, &Eta::At(eta))
    }

    /// Resolve either ETA form against `now`.
    pub fn resolve(now: DateTime, eta: &Eta) -> Option<Self> {
        Self::from_countdown(eta.delay_seconds(now))
    }

    /// The quantized delay in seconds.
    pub fn bucket(&self) -> u32 {
        self.bucket
    }

    /// Render the bucket as dot-separated binary digits, most-significant
    /// bit first, zero-padded to [`DELAY_BITS`] digits.
    pub fn routing_prefix(&self) -> String {
        let digits = format!("{:0width$b}", self.bucket, width = DELAY_BITS as usize);
        let mut prefix = String::with_capacity(digits.len() * 2 - 1);
        for (i, digit) in digits.chars().enumerate() {
            if i > 0 {
                prefix.push('.');
            }
            prefix.push(digit);
        }
        prefix
    }

    /// Prepend the rendered bucket to an existing routing key.
    pub fn prepend_to(&self, routing_key: &str) -> String {
        format!("{}.{}", self.routing_prefix(), routing_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Utc;
    use chrono::TimeZone;

    #[test]
    fn test_countdown_30_reference_vector() {
        let encoding = DelayEncoding::from_countdown(30.0).unwrap();
        assert_eq!(
            encoding.routing_prefix(),
            "0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.1.1.1.1.0",
        );
        assert_eq!(
            encoding.prepend_to("testcelery"),
            "0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.1.1.1.1.0.testcelery",
        );
    }

    #[test]
    fn test_one_day_eta_reference_vector() {
        let now = Utc.with_ymd_and_hms(2024, 8, 24, 0, 0, 0).unwrap();
        let eta = Utc.with_ymd_and_hms(2024, 8, 25, 0, 0, 0).unwrap();
        let encoding = DelayEncoding::from_eta(now, eta).unwrap();
        assert_eq!(encoding.bucket(), 86400);
        assert_eq!(
            encoding.routing_prefix(),
            "0.0.0.0.0.0.0.0.0.0.0.1.0.1.0.1.0.0.0.1.1.0.0.0.0.0.0.0",
        );
    }

    #[test]
    fn test_non_positive_delay_is_no_delay() {
        assert!(DelayEncoding::from_countdown(0.0).is_none());
        assert!(DelayEncoding::from_countdown(-10.0).is_none());
        assert!(DelayEncoding::from_countdown(f64::NAN).is_none());

        let now = Utc.with_ymd_and_hms(2024, 8, 24, 0, 0, 0).unwrap();
        let past = Utc.with_ymd_and_hms(2024, 8, 23, 0, 0, 0).unwrap();
        assert!(DelayEncoding::from_eta(now, past).is_none());
        assert!(DelayEncoding::from_eta(now, now).is_none());
    }

    #[test]
    fn test_quantization_floors() {
        // 30.9 must land in the same bucket as 30, never 31: rounding up
        // would deliver early.
        assert_eq!(
            DelayEncoding::from_countdown(30.9).unwrap(),
            DelayEncoding::from_countdown(30.0).unwrap(),
        );
        // A sub-second delay floors to bucket zero but is still a delay.
        assert_eq!(DelayEncoding::from_countdown(0.5).unwrap().bucket(), 0);
    }

    #[test]
    fn test_prefix_depends_only_on_relative_offset() {
        let offsets = [
            (2024, 8, 24, 2024, 8, 25),
            (1999, 1, 1, 1999, 1, 2),
            (2038, 6, 15, 2038, 6, 16),
        ];
        let prefixes: Vec<String> = offsets
            .iter()
            .map(|&(y1, m1, d1, y2, m2, d2)| {
                let now = Utc.with_ymd_and_hms(y1, m1, d1, 0, 0, 0).unwrap();
                let eta = Utc.with_ymd_and_hms(y2, m2, d2, 0, 0, 0).unwrap();
                DelayEncoding::from_eta(now, eta).unwrap().routing_prefix()
            })
            .collect();
        assert_eq!(prefixes[0], prefixes[1]);
        assert_eq!(prefixes[0], prefixes[2]);
    }

    #[test]
    fn test_saturates_at_bucket_range() {
        let encoding = DelayEncoding::from_countdown(1e18).unwrap();
        assert_eq!(encoding.bucket(), (1 << DELAY_BITS) - 1);
        assert_eq!(
            encoding.routing_prefix(),
            "1.1.1.1.1.1.1.1.1.1.1.1.1.1.1.1.1.1.1.1.1.1.1.1.1.1.1.1",
        );
    }

    #[test]
    fn test_prefix_is_always_full_width() {
        for seconds in [0.5, 1.0, 30.0, 86400.0, 1e9] {
            let prefix = DelayEncoding::from_countdown(seconds).unwrap().routing_prefix();
            assert_eq!(prefix.split('.').count(), DELAY_BITS as usize);
        }
    }
}
