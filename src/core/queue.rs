//! Queue value type.

use serde::{Deserialize, Serialize};

use crate::core::exchange::Exchange;

/// A declared queue with its routing key and, if bound, its exchange.
///
/// An unbound queue (no exchange) can still be routed to directly, but it
/// carries no exchange for delayed delivery to rewrite through.
///
/// # Examples
///
/// ```rust
/// use plus_tard::core::exchange::Exchange;
/// use plus_tard::core::queue::Queue;
///
/// let queue = Queue::new("testcelery", "testcelery")
///     .with_exchange(Exchange::topic("testcelery"));
/// assert_eq!(queue.routing_key(), "testcelery");
/// assert!(queue.exchange().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Queue {
    name: String,
    routing_key: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    exchange: Option<Exchange>,
}

impl Queue {
    pub fn new(name: impl Into<String>, routing_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            routing_key: routing_key.into(),
            exchange: None,
        }
    }

    /// Bind this queue to an exchange.
    pub fn with_exchange(mut self, exchange: Exchange) -> Self {
        self.exchange = Some(exchange);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn routing_key(&self) -> &str {
        &self.routing_key
    }

    pub fn exchange(&self) -> Option<&Exchange> {
        self.exchange.as_ref()
    }
}
