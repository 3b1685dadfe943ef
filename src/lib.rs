#![doc = include_str!("../README.md")]

pub mod core;
pub mod delay;

/// Re-exports to simplify importing this crate types.
pub mod prelude {
    pub use super::core::{
        exchange::{Exchange, ExchangeType},
        queue::Queue,
        route::Route,
        DateTime, Duration, Utc,
    };
    pub use super::delay::{
        encoding::{DelayEncoding, DELAY_BITS},
        eta::{Eta, EtaError},
        rewriter::{CapabilityProbe, ExchangeRewriter, ProbeOutcome},
    };
}
