//! Scenario document loading and validation

use super::{AssetDefaults, AssetGroup, GlobalSettings, Scenario, ScenarioError, ScenarioName};
use crate::model::{AssetParams, DiscountRate, PresentValueModel};
use crate::template::{Coercion, Context, Resolver};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Context variable replaced by the live price when one is supplied
pub const PRICE_VARIABLE: &str = "default_btc_price";

/// Scenario document syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ScenarioError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            _ => Err(ScenarioError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    fn parse(&self, content: &str) -> Result<Value, ScenarioError> {
        match self {
            Self::Json => {
                serde_json::from_str(content).map_err(|e| ScenarioError::Malformed(e.to_string()))
            }
            Self::Toml => toml::from_str(content).map_err(|e| ScenarioError::Malformed(e.to_string())),
        }
    }
}

#[derive(Deserialize)]
struct RawBook {
    global_settings: GlobalSettings,
    scenarios: BTreeMap<String, Scenario>,
}

/// Resolved, validated scenario document
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioBook {
    settings: GlobalSettings,
    scenarios: BTreeMap<ScenarioName, Scenario>,
}

impl ScenarioBook {
    /// Read and resolve the document at `path`.
    ///
    /// `current_price`, when given, replaces `default_btc_price` in the
    /// placeholder context (the `global_settings` block itself keeps the
    /// configured default).
    pub fn load(
        path: impl AsRef<Path>,
        current_price: Option<Decimal>,
    ) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let format = DocumentFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, format, current_price)
    }

    /// Resolve a document held in memory
    pub fn parse(
        content: &str,
        format: DocumentFormat,
        current_price: Option<Decimal>,
    ) -> Result<Self, ScenarioError> {
        let document = format.parse(content)?;

        let settings = document
            .get("global_settings")
            .and_then(Value::as_object)
            .ok_or(ScenarioError::MissingSection("global_settings"))?;
        if document.get("scenarios").and_then(Value::as_object).is_none() {
            return Err(ScenarioError::MissingSection("scenarios"));
        }

        let mut variables: BTreeMap<String, Value> = settings
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if let Some(price) = current_price {
            variables.insert(PRICE_VARIABLE.to_string(), Value::String(price.to_string()));
        }

        let context = Context::build(variables)?;
        let resolved = Resolver::new(context)
            .with_coercion(Coercion::Off)
            .resolve(&document)?;
        let raw: RawBook = serde_json::from_value(resolved)?;

        let book = Self::validate(raw)?;
        tracing::debug!(
            scenarios = book.scenarios.len(),
            supply = %book.settings.supply,
            live_price = current_price.is_some(),
            "Scenario document resolved"
        );
        Ok(book)
    }

    fn validate(raw: RawBook) -> Result<Self, ScenarioError> {
        let settings = raw.global_settings;
        PresentValueModel::new(settings.supply).map_err(ScenarioError::InvalidSettings)?;
        if settings.default_btc_price <= Decimal::ZERO {
            return Err(ScenarioError::NonPositiveDefaultPrice(
                settings.default_btc_price,
            ));
        }

        let mut scenarios = BTreeMap::new();
        for (key, scenario) in raw.scenarios {
            match key.parse::<ScenarioName>() {
                Ok(name) => {
                    scenarios.insert(name, scenario);
                }
                Err(_) => tracing::warn!(scenario = %key, "Ignoring unknown scenario"),
            }
        }

        for name in ScenarioName::ALL {
            let scenario = scenarios
                .get(&name)
                .ok_or(ScenarioError::MissingScenario(name))?;
            validate_scenario(name, scenario)?;
        }

        Ok(Self {
            settings,
            scenarios,
        })
    }

    pub fn settings(&self) -> &GlobalSettings {
        &self.settings
    }

    pub fn supply(&self) -> Decimal {
        self.settings.supply
    }

    /// Fallback price from `global_settings`
    pub fn default_price(&self) -> Decimal {
        self.settings.default_btc_price
    }

    pub fn scenario(&self, name: ScenarioName) -> Result<&Scenario, ScenarioError> {
        self.scenarios
            .get(&name)
            .ok_or(ScenarioError::MissingScenario(name))
    }

    /// Scenarios in selector order
    pub fn scenarios(&self) -> impl Iterator<Item = (ScenarioName, &Scenario)> {
        self.scenarios.iter().map(|(name, s)| (*name, s))
    }

    /// Model for this document's supply
    pub fn model(&self) -> Result<PresentValueModel, ScenarioError> {
        PresentValueModel::new(self.settings.supply).map_err(ScenarioError::InvalidSettings)
    }
}

impl AssetDefaults {
    /// Convert document units (USD, percent) into model parameters
    pub fn to_params(&self, name: &str) -> AssetParams {
        AssetParams {
            name: name.to_string(),
            market_cap: self.mcap,
            monetary_premium: self.monetary_premium_pct / Decimal::ONE_HUNDRED,
            capture_probability: self.probability_capture_pct / Decimal::ONE_HUNDRED,
            time_horizon_years: self.time_horizon_years,
        }
    }
}

impl Scenario {
    pub fn discount_rate(&self) -> Result<DiscountRate, crate::model::ValuationError> {
        DiscountRate::from_percent(self.discount_rate_pct)
    }
}

fn validate_scenario(name: ScenarioName, scenario: &Scenario) -> Result<(), ScenarioError> {
    let invalid = |source| ScenarioError::Invalid {
        scenario: name,
        source,
    };

    scenario.discount_rate().map_err(invalid)?;

    for asset in AssetGroup::tracked_assets() {
        let defaults = scenario
            .assets
            .get(asset)
            .ok_or_else(|| ScenarioError::MissingAsset {
                scenario: name,
                asset: asset.to_string(),
            })?;
        defaults.to_params(asset).validate().map_err(invalid)?;
    }

    for asset in scenario.assets.keys() {
        if AssetGroup::of(asset).is_none() {
            tracing::warn!(scenario = %name, asset = %asset, "Ignoring untracked asset");
        }
    }
    Ok(())
}
