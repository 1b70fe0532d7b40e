//! Price lookup against a local HTTP server

use crate::common::{dead_endpoint, serve};
use rust_decimal_macros::dec;
use schrodinger_model::price::{
    CachedPriceLookup, HttpPriceSource, HttpSourceConfig, PriceError, PriceOrigin, PriceSource,
};
use std::time::Duration;

fn source(endpoint: String) -> HttpPriceSource {
    HttpPriceSource::new(HttpSourceConfig {
        endpoint,
        field: "/bitcoin/usd".to_string(),
        timeout: Duration::from_secs(2),
    })
    .unwrap()
}

#[tokio::test]
async fn test_live_price() {
    let base = serve("200 OK", r#"{"bitcoin":{"usd":97250.5}}"#).await;
    let lookup = CachedPriceLookup::new(source(format!("{base}/price")));
    assert_eq!(lookup.source().endpoint(), format!("{base}/price"));

    let quote = lookup.current_price(dec!(100000)).await;
    assert_eq!(quote.origin, PriceOrigin::Live);
    assert_eq!(quote.price, dec!(97250.5));
    assert!(quote.warning.is_none());
}

#[tokio::test]
async fn test_malformed_json_falls_back() {
    let base = serve("200 OK", r#"{"bitcoin": {"usd": "#).await;
    let http = source(format!("{base}/price"));
    assert!(matches!(http.fetch_price().await, Err(PriceError::Malformed(_))));

    let quote = CachedPriceLookup::new(http).current_price(dec!(100000)).await;
    assert_eq!(quote.origin, PriceOrigin::Fallback);
    assert_eq!(quote.price, dec!(100000));
    assert!(quote.warning.unwrap().starts_with("Failed to fetch BTC price"));
}

#[tokio::test]
async fn test_error_status_falls_back() {
    let base = serve("429 Too Many Requests", r#"{"status":{"error_code":429}}"#).await;
    let http = source(format!("{base}/price"));
    assert!(matches!(http.fetch_price().await, Err(PriceError::Status(429))));

    let quote = CachedPriceLookup::new(http).current_price(dec!(64000)).await;
    assert_eq!(quote.price, dec!(64000));
    assert_eq!(quote.origin, PriceOrigin::Fallback);
}

#[tokio::test]
async fn test_connection_refused_falls_back() {
    let lookup = CachedPriceLookup::new(source(dead_endpoint().await));
    let quote = lookup.current_price(dec!(100000)).await;
    assert_eq!(quote.origin, PriceOrigin::Fallback);
    assert!(quote.warning.is_some());
}
