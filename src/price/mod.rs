//! Current-price lookup
//!
//! Fetches a live BTC/USD quote over HTTP. Failures never reach the user as
//! errors: the configured default price is used instead and a warning is
//! attached to the quote. Quotes are cached for a fixed window.

mod cache;
mod http;

pub use cache::{CachedPriceLookup, DEFAULT_TTL};
pub use http::{parse_price, HttpPriceSource, HttpSourceConfig, COINGECKO_SIMPLE_PRICE_URL};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Price fetch errors
#[derive(Debug, Error)]
pub enum PriceError {
    /// Connection, TLS, timeout or body read failure
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-success HTTP status
    #[error("price API returned status {0}")]
    Status(u16),
    /// Body is not valid JSON
    #[error("malformed response: {0}")]
    Malformed(String),
    /// The configured field is absent
    #[error("field {0} missing from response")]
    MissingField(String),
    /// The field is not a number
    #[error("field {field} is not a number: {value}")]
    NotNumeric { field: String, value: String },
    /// Zero or negative price
    #[error("price must be positive, got {0}")]
    NonPositive(Decimal),
}

/// Trait for price source implementations
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the current price in USD
    async fn fetch_price(&self) -> Result<Decimal, PriceError>;
}

/// Where a quote came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceOrigin {
    /// Live API response
    Live,
    /// Configured default after a failed fetch
    Fallback,
    /// Supplied by the user
    Manual,
}

/// A price with its provenance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    pub price: Decimal,
    pub origin: PriceOrigin,
    pub as_of: DateTime<Utc>,
    /// User-visible warning when the live quote was unavailable
    pub warning: Option<String>,
}

impl PriceQuote {
    pub fn live(price: Decimal) -> Self {
        Self {
            price,
            origin: PriceOrigin::Live,
            as_of: Utc::now(),
            warning: None,
        }
    }

    pub fn fallback(price: Decimal, error: &PriceError) -> Self {
        Self {
            price,
            origin: PriceOrigin::Fallback,
            as_of: Utc::now(),
            warning: Some(format!(
                "Failed to fetch BTC price: {error}. Using default price of ${price}."
            )),
        }
    }

    pub fn manual(price: Decimal) -> Self {
        Self {
            price,
            origin: PriceOrigin::Manual,
            as_of: Utc::now(),
            warning: None,
        }
    }
}
