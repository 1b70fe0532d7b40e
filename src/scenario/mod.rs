//! Scenario catalog
//!
//! Loads the scenario document (named market scenarios with per-asset
//! defaults), resolves its `{{ placeholders }}` against `global_settings`
//! and validates it.

mod book;
mod cache;
mod groups;
pub mod numeric;

pub use book::{DocumentFormat, ScenarioBook};
pub use cache::ScenarioCache;
pub use groups::AssetGroup;

use crate::model::ValuationError;
use crate::template::ResolveError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Scenario document errors. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported scenario document format: {0:?} (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),
    #[error("malformed scenario document: {0}")]
    Malformed(String),
    #[error("scenario document is missing the `{0}` section")]
    MissingSection(&'static str),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("invalid scenario document: {0}")]
    Schema(#[from] serde_json::Error),
    #[error("unknown scenario '{0}' (expected Bearish, Base, Bullish or Hyper)")]
    UnknownScenario(String),
    #[error("scenario {0} is not defined")]
    MissingScenario(ScenarioName),
    #[error("scenario {scenario} has no defaults for {asset}")]
    MissingAsset {
        scenario: ScenarioName,
        asset: String,
    },
    #[error("scenario {scenario}: {source}")]
    Invalid {
        scenario: ScenarioName,
        #[source]
        source: ValuationError,
    },
    #[error("global settings: {0}")]
    InvalidSettings(#[source] ValuationError),
    #[error("global settings: default price must be positive, got {0}")]
    NonPositiveDefaultPrice(Decimal),
}

/// The four fixed market scenarios
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum ScenarioName {
    #[default]
    Bearish,
    Base,
    Bullish,
    Hyper,
}

impl ScenarioName {
    pub const ALL: [ScenarioName; 4] = [
        ScenarioName::Bearish,
        ScenarioName::Base,
        ScenarioName::Bullish,
        ScenarioName::Hyper,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioName::Bearish => "Bearish",
            ScenarioName::Base => "Base",
            ScenarioName::Bullish => "Bullish",
            ScenarioName::Hyper => "Hyper",
        }
    }
}

impl fmt::Display for ScenarioName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioName {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ScenarioError::UnknownScenario(s.to_string()))
    }
}

/// `global_settings` block
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GlobalSettings {
    /// Fixed coin supply
    #[serde(deserialize_with = "numeric::decimal")]
    pub supply: Decimal,
    /// Price used when the live quote is unavailable
    #[serde(deserialize_with = "numeric::decimal")]
    pub default_btc_price: Decimal,
    /// Any other shared setting referenced by placeholders
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Default assumptions for one asset, in document units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDefaults {
    /// Market cap in USD
    #[serde(deserialize_with = "numeric::decimal")]
    pub mcap: Decimal,
    /// Monetary premium, percent
    #[serde(deserialize_with = "numeric::decimal")]
    pub monetary_premium_pct: Decimal,
    /// Capture probability, percent
    #[serde(deserialize_with = "numeric::decimal")]
    pub probability_capture_pct: Decimal,
    #[serde(deserialize_with = "numeric::whole")]
    pub time_horizon_years: u32,
}

/// One market scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Annual discount rate, percent
    #[serde(deserialize_with = "numeric::decimal")]
    pub discount_rate_pct: Decimal,
    pub assets: BTreeMap<String, AssetDefaults>,
}
