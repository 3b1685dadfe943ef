//! Publish-target rewriting.
//!
//! Once a delay encoding exists and the broker is known to support native
//! delayed delivery, the original route is swapped for the delayed topic
//! exchange with the bucket prefix glued onto the routing key. Every other
//! case passes the original route through untouched: rewriting failures must
//! never block delivery, at worst a task loses its delay optimization.

use tracing::{debug, warn};

use crate::core::exchange::{Exchange, ExchangeType};
use crate::core::route::Route;
use crate::core::DateTime;
use crate::delay::encoding::{DelayEncoding, DELAY_BITS};
use crate::delay::eta::Eta;

/// Name prefix of the delayed-delivery topic exchanges.
pub const DELAYED_EXCHANGE_PREFIX: &str = "celery_delayed_";

/// The exchange delayed messages are published to.
///
/// The numeric suffix is the highest bit level of the delay bucket
/// (`celery_delayed_27` for 28-bit buckets); it identifies the delayed
/// delivery topology generation and moves only if the bucket width does.
pub fn delayed_exchange() -> Exchange {
    Exchange::topic(format!("{}{}", DELAYED_EXCHANGE_PREFIX, DELAY_BITS - 1))
}

/// What a broker capability probe reports: whether the driver supports
/// native delayed delivery, plus the detected quorum queue if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub supported: bool,
    pub quorum_queue: Option<String>,
}

impl ProbeOutcome {
    pub fn supported() -> Self {
        Self {
            supported: true,
            quorum_queue: None,
        }
    }

    pub fn unsupported() -> Self {
        Self::default()
    }

    pub fn with_quorum_queue(mut self, name: impl Into<String>) -> Self {
        self.quorum_queue = Some(name.into());
        self
    }
}

/// Broker driver inspection, injected so unit tests never patch global state.
///
/// Implemented for any `Fn() -> ProbeOutcome`, so a closure over a connection
/// handle (or a canned answer) is enough. Probe results are not cached here;
/// memoization, if wanted, belongs to the implementation.
pub trait CapabilityProbe {
    fn probe(&self) -> ProbeOutcome;
}

impl<F> CapabilityProbe for F
where
    F: Fn() -> ProbeOutcome,
{
    fn probe(&self) -> ProbeOutcome {
        self()
    }
}

/// Rewrites publish targets for native delayed delivery.
///
/// Stateless apart from the injected probe; safe to share across threads and
/// call concurrently.
///
/// # Examples
///
/// ```rust
/// use plus_tard::prelude::*;
///
/// let rewriter = ExchangeRewriter::new(|| ProbeOutcome::supported());
/// let route = Route::Queue(
///     Queue::new("testcelery", "testcelery").with_exchange(Exchange::topic("testcelery")),
/// );
/// let rewritten = rewriter.plan(route, Utc::now(), Some(&Eta::Countdown(30.0)));
/// assert!(rewritten.routing_key().ends_with(".testcelery"));
/// ```
#[derive(Debug, Clone)]
pub struct ExchangeRewriter<P> {
    probe: P,
}

impl<P: CapabilityProbe> ExchangeRewriter<P> {
    pub fn new(probe: P) -> Self {
        Self { probe }
    }

    /// Per-publish entry point: resolve the ETA against `now`, then rewrite.
    ///
    /// `None` or an already-due ETA means nothing to delay; the route comes
    /// back unchanged and the probe is never consulted.
    pub fn plan(&self, route: Route, now: DateTime, eta: Option<&Eta>) -> Route {
        let delay = eta.and_then(|eta| DelayEncoding::resolve(now, eta));
        self.rewrite(route, delay.as_ref())
    }

    /// Rewrite `route` to target the delayed exchange, or pass it through.
    ///
    /// Pass-through cases: no delay, broker without native delayed delivery
    /// support, a queue with no exchange binding, or a direct exchange
    /// (warned, since wildcard matching cannot apply).
    pub fn rewrite(&self, route: Route, delay: Option<&DelayEncoding>) -> Route {
        let Some(delay) = delay else {
            return route;
        };

        let outcome = self.probe.probe();
        if !outcome.supported {
            return route;
        }

        let Some(exchange) = route.effective_exchange() else {
            // No binding means no routing key to extend.
            return route;
        };

        if exchange.kind() == ExchangeType::Direct {
            warn!(
                "Direct exchanges are not supported with native delayed delivery.\n\
                 {name} is a direct exchange but should be a topic exchange or a fanout exchange \
                 in order for native delayed delivery to work properly.\n\
                 If quorum queues are used, this task may block the worker process until the ETA arrives.",
                name = exchange.name(),
            );
            return route;
        }

        let routing_key = delay.prepend_to(route.routing_key());
        // Unbound pair routes carry their exchange type forward; queue routes
        // never did, so the rewritten route doesn't either.
        let exchange_type = match &route {
            Route::Exchange {
                exchange_type: Some(_),
                ..
            } => Some(ExchangeType::Topic),
            _ => None,
        };

        debug!(
            bucket = delay.bucket(),
            routing_key = %routing_key,
            quorum_queue = outcome.quorum_queue.as_deref().unwrap_or(""),
            "rewriting publish target for native delayed delivery"
        );

        Route::Exchange {
            exchange: delayed_exchange(),
            routing_key,
            exchange_type,
        }
    }
}
