//! Configuration types for schrodinger

use crate::price::{HttpSourceConfig, COINGECKO_SIMPLE_PRICE_URL};
use crate::scenario::ScenarioName;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub scenarios: ScenariosConfig,
    #[serde(default)]
    pub price: PriceConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Scenario document location and initial selection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScenariosConfig {
    #[serde(default = "default_scenarios_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub default: ScenarioName,
}

impl Default for ScenariosConfig {
    fn default() -> Self {
        Self {
            path: default_scenarios_path(),
            default: ScenarioName::default(),
        }
    }
}

fn default_scenarios_path() -> PathBuf {
    PathBuf::from("scenarios.json")
}

/// Price API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PriceConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// JSON pointer to the price inside the response
    #[serde(default = "default_field")]
    pub field: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            field: default_field(),
            timeout_secs: default_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

impl PriceConfig {
    pub fn source_config(&self) -> HttpSourceConfig {
        HttpSourceConfig {
            endpoint: self.endpoint.clone(),
            field: self.field.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

fn default_endpoint() -> String {
    COINGECKO_SIMPLE_PRICE_URL.to_string()
}

fn default_field() -> String {
    "/bitcoin/usd".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_cache_ttl_secs() -> u64 {
    300
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
