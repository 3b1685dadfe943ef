//! Exchange value types.
//!
//! Exchanges are modeled as immutable records with explicit equality: the
//! rewriter only ever reads them and constructs new ones, it never mutates an
//! exchange in place.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// AMQP exchange type.
///
/// Only `Topic` and `Fanout` exchanges can participate in native delayed
/// delivery; `Direct` exchanges have no wildcard matching to route the
/// time-bucket prefix through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeType {
    Direct,
    Topic,
    Fanout,
    Headers,
}

impl ExchangeType {
    /// The lowercase wire name of this exchange type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExchangeType::Direct => "direct",
            ExchangeType::Topic => "topic",
            ExchangeType::Fanout => "fanout",
            ExchangeType::Headers => "headers",
        }
    }
}

impl fmt::Display for ExchangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for exchange type parsing.
#[derive(Error, Debug)]
#[error("Unknown exchange type '{0}'")]
pub struct UnknownExchangeType(pub String);

impl FromStr for ExchangeType {
    type Err = UnknownExchangeType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "direct" => Ok(ExchangeType::Direct),
            "topic" => Ok(ExchangeType::Topic),
            "fanout" => Ok(ExchangeType::Fanout),
            "headers" => Ok(ExchangeType::Headers),
            other => Err(UnknownExchangeType(other.to_string())),
        }
    }
}

/// A named exchange with its type.
///
/// # Examples
///
/// ```rust
/// use plus_tard::core::exchange::{Exchange, ExchangeType};
///
/// let exchange = Exchange::topic("testcelery");
/// assert_eq!(exchange.name(), "testcelery");
/// assert_eq!(exchange.kind(), ExchangeType::Topic);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Exchange {
    name: String,
    #[serde(rename = "type")]
    kind: ExchangeType,
}

impl Exchange {
    pub fn new(name: impl Into<String>, kind: ExchangeType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Shorthand for a topic exchange.
    pub fn topic(name: impl Into<String>) -> Self {
        Self::new(name, ExchangeType::Topic)
    }

    /// Shorthand for a direct exchange.
    pub fn direct(name: impl Into<String>) -> Self {
        Self::new(name, ExchangeType::Direct)
    }

    /// Shorthand for a fanout exchange.
    pub fn fanout(name: impl Into<String>) -> Self {
        Self::new(name, ExchangeType::Fanout)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ExchangeType {
        self.kind
    }
}
