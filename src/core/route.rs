//! Publish routes.
//!
//! A [`Route`] is what an external router hands the publishing client: either
//! a declared queue, or a bare exchange/routing-key pair for routes that were
//! never bound to a queue. The delayed-delivery rewriter consumes and produces
//! this same shape, so the publishing client needs no awareness that a rewrite
//! happened.

use serde::{Deserialize, Serialize};

use crate::core::exchange::{Exchange, ExchangeType};
use crate::core::queue::Queue;

/// The publish target chosen by a router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// Publish to a declared queue; exchange and routing key come from the
    /// queue's binding.
    Queue(Queue),
    /// Publish to an explicit exchange with an explicit routing key.
    ///
    /// `exchange_type` is the pass-through slot for unbound routes: routers
    /// that hand out a bare pair also forward the exchange type so the
    /// publishing client can declare the exchange on demand. It is `None`
    /// when the type travels inside `exchange` alone.
    Exchange {
        exchange: Exchange,
        routing_key: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        exchange_type: Option<ExchangeType>,
    },
}

impl Route {
    /// The routing key this route publishes with.
    pub fn routing_key(&self) -> &str {
        match self {
            Route::Queue(queue) => queue.routing_key(),
            Route::Exchange { routing_key, .. } => routing_key,
        }
    }

    /// The exchange this route ultimately publishes through, if known.
    ///
    /// A queue route without an exchange binding yields `None`.
    pub fn effective_exchange(&self) -> Option<&Exchange> {
        match self {
            Route::Queue(queue) => queue.exchange(),
            Route::Exchange { exchange, .. } => Some(exchange),
        }
    }
}

impl From<Queue> for Route {
    fn from(queue: Queue) -> Self {
        Route::Queue(queue)
    }
}
