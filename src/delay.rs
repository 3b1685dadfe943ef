//! Native delayed delivery.
//!
//! "Deliver at/after T" without broker-native scheduling support: the
//! remaining delay is quantized into a fixed-width binary time bucket and
//! pushed onto the front of the routing key, and the message is diverted to a
//! well-known topic exchange. Standing wildcard bindings on that exchange
//! (declared by the consuming client, not here) match the bucket digits
//! most-significant first, so nearby delivery times share a binding prefix
//! and a small number of bindings covers a multi-year horizon.
//!
//! Everything in this module is pure and synchronous; the only collaborator
//! is an injected broker capability probe.

pub mod encoding;
pub mod eta;
pub mod rewriter;

pub use encoding::{DelayEncoding, DELAY_BITS};
pub use eta::{Eta, EtaError};
pub use rewriter::{CapabilityProbe, ExchangeRewriter, ProbeOutcome, DELAYED_EXCHANGE_PREFIX};
