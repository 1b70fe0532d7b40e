//! HTTP price source (CoinGecko simple-price by default)

use super::{PriceError, PriceSource};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use std::time::Duration;

/// CoinGecko simple-price endpoint for BTC/USD
pub const COINGECKO_SIMPLE_PRICE_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin&vs_currencies=usd";

/// Configuration for the HTTP source
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// Full request URL
    pub endpoint: String,
    /// JSON pointer to the price field (e.g. `/bitcoin/usd`)
    pub field: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            endpoint: COINGECKO_SIMPLE_PRICE_URL.to_string(),
            field: "/bitcoin/usd".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Price source backed by a single HTTP GET
pub struct HttpPriceSource {
    config: HttpSourceConfig,
    client: Client,
}

impl HttpPriceSource {
    pub fn new(config: HttpSourceConfig) -> Result<Self, PriceError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

#[async_trait]
impl PriceSource for HttpPriceSource {
    async fn fetch_price(&self) -> Result<Decimal, PriceError> {
        tracing::debug!(url = %self.config.endpoint, "Fetching BTC price");

        let response = self.client.get(&self.config.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PriceError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let price = parse_price(&body, &self.config.field)?;
        tracing::info!(%price, "Fetched BTC price");
        Ok(price)
    }
}

/// Extract the price at JSON pointer `field` from a response body
pub fn parse_price(body: &str, field: &str) -> Result<Decimal, PriceError> {
    let json: Value =
        serde_json::from_str(body).map_err(|e| PriceError::Malformed(e.to_string()))?;
    let value = json
        .pointer(field)
        .ok_or_else(|| PriceError::MissingField(field.to_string()))?;

    let not_numeric = || PriceError::NotNumeric {
        field: field.to_string(),
        value: value.to_string(),
    };
    let price = match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Decimal::from(i)
            } else if let Some(u) = n.as_u64() {
                Decimal::from(u)
            } else {
                let f = n.as_f64().ok_or_else(not_numeric)?;
                Decimal::try_from(f).map_err(|_| not_numeric())?
            }
        }
        Value::String(s) => Decimal::from_str(s.trim()).map_err(|_| not_numeric())?,
        _ => return Err(not_numeric()),
    };

    if price <= Decimal::ZERO {
        return Err(PriceError::NonPositive(price));
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_coingecko_body() {
        let price = parse_price(r#"{"bitcoin":{"usd":97123.45}}"#, "/bitcoin/usd").unwrap();
        assert_eq!(price, dec!(97123.45));

        let price = parse_price(r#"{"bitcoin":{"usd":100000}}"#, "/bitcoin/usd").unwrap();
        assert_eq!(price, dec!(100000));
    }

    #[test]
    fn test_parse_string_price() {
        let price = parse_price(r#"{"data":{"amount":"64000.10"}}"#, "/data/amount").unwrap();
        assert_eq!(price, dec!(64000.10));
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(
            parse_price("<html>rate limited</html>", "/bitcoin/usd"),
            Err(PriceError::Malformed(_))
        ));
        assert!(matches!(
            parse_price(r#"{"bitcoin":{"usd":1"#, "/bitcoin/usd"),
            Err(PriceError::Malformed(_))
        ));
    }

    #[test]
    fn test_missing_and_bad_fields() {
        assert!(matches!(
            parse_price(r#"{"status":{"error_code":429}}"#, "/bitcoin/usd"),
            Err(PriceError::MissingField(_))
        ));
        assert!(matches!(
            parse_price(r#"{"bitcoin":{"usd":null}}"#, "/bitcoin/usd"),
            Err(PriceError::NotNumeric { .. })
        ));
        assert!(matches!(
            parse_price(r#"{"bitcoin":{"usd":0}}"#, "/bitcoin/usd"),
            Err(PriceError::NonPositive(_))
        ));
    }

    #[test]
    fn test_default_config() {
        let config = HttpSourceConfig::default();
        assert!(config.endpoint.contains("coingecko"));
        assert_eq!(config.field, "/bitcoin/usd");
    }
}
