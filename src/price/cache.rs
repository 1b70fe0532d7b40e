//! Time-bounded price cache with fallback

use super::{PriceQuote, PriceSource};
use rust_decimal::Decimal;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Default validity window for a cached quote
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

struct CachedQuote {
    quote: PriceQuote,
    stored_at: Instant,
}

/// Wraps a [`PriceSource`] and remembers its last outcome for `ttl`
///
/// Fallback outcomes are cached too, so a dead API is not hammered on every
/// render pass.
pub struct CachedPriceLookup<S> {
    source: S,
    ttl: Duration,
    cached: Mutex<Option<CachedQuote>>,
}

impl<S: PriceSource> CachedPriceLookup<S> {
    pub fn new(source: S) -> Self {
        Self::with_ttl(source, DEFAULT_TTL)
    }

    pub fn with_ttl(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            cached: Mutex::new(None),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Current price, or `fallback` with a warning when the source fails
    pub async fn current_price(&self, fallback: Decimal) -> PriceQuote {
        self.current_price_at(Instant::now(), fallback).await
    }

    /// Same as [`Self::current_price`] with an explicit clock reading
    pub async fn current_price_at(&self, now: Instant, fallback: Decimal) -> PriceQuote {
        let mut cached = self.cached.lock().await;

        if let Some(entry) = cached.as_ref() {
            if now.saturating_duration_since(entry.stored_at) < self.ttl {
                tracing::trace!(price = %entry.quote.price, "Price cache hit");
                return entry.quote.clone();
            }
        }

        let quote = match self.source.fetch_price().await {
            Ok(price) => PriceQuote::live(price),
            Err(e) => {
                tracing::warn!(error = %e, %fallback, "Price fetch failed, using default");
                PriceQuote::fallback(fallback, &e)
            }
        };

        *cached = Some(CachedQuote {
            quote: quote.clone(),
            stored_at: now,
        });
        quote
    }

    /// Forget the cached quote
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }
}
