//! User-adjustable model inputs
//!
//! Mirrors the dashboard controls: a scenario, a discount rate and four
//! sliders per tracked asset. Controls are seeded from a scenario's defaults
//! and every user edit is range-checked before it reaches the model.

use crate::expr::{self, ExprError};
use crate::model::{AssetParams, DiscountRate};
use crate::scenario::{AssetDefaults, AssetGroup, ScenarioBook, ScenarioError, ScenarioName};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const TRILLION: Decimal = dec!(1000000000000);

/// Rejected user input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown asset '{0}'")]
    UnknownAsset(String),
    #[error("unknown field '{0}' (expected mcap, mp, prob or time)")]
    UnknownField(String),
    #[error("{control} must be between {min} and {max}, got {value}")]
    OutOfRange {
        control: &'static str,
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },
    #[error("{control} must be a whole number, got {value}")]
    NotWholeNumber {
        control: &'static str,
        value: Decimal,
    },
    #[error("invalid value '{text}': {source}")]
    InvalidValue {
        text: String,
        #[source]
        source: ExprError,
    },
    #[error("invalid override '{0}' (expected <Asset>.<field>=<value>)")]
    InvalidOverride(String),
}

/// Inclusive slider range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub label: &'static str,
    pub min: Decimal,
    pub max: Decimal,
    pub step: Decimal,
}

impl Range {
    fn check(&self, value: Decimal) -> Result<Decimal, InputError> {
        if value < self.min || value > self.max {
            return Err(InputError::OutOfRange {
                control: self.label,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(value)
    }
}

pub const DISCOUNT_RATE_PCT: Range = Range {
    label: "Discount rate (%)",
    min: dec!(0),
    max: dec!(25),
    step: dec!(0.25),
};

pub const MARKET_CAP_TRILLIONS: Range = Range {
    label: "Mcap ($T)",
    min: dec!(0),
    max: dec!(500),
    step: dec!(10),
};

pub const MONETARY_PREMIUM_PCT: Range = Range {
    label: "Monetary premium (%)",
    min: dec!(0),
    max: dec!(100),
    step: dec!(5),
};

pub const PROBABILITY_PCT: Range = Range {
    label: "Probability (%)",
    min: dec!(0),
    max: dec!(100),
    step: dec!(5),
};

pub const TIME_HORIZON_YEARS: Range = Range {
    label: "Time horizon (yrs)",
    min: dec!(1),
    max: dec!(50),
    step: dec!(1),
};

/// Per-asset slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetField {
    MarketCap,
    MonetaryPremium,
    Probability,
    TimeHorizon,
}

impl AssetField {
    pub fn range(&self) -> &'static Range {
        match self {
            AssetField::MarketCap => &MARKET_CAP_TRILLIONS,
            AssetField::MonetaryPremium => &MONETARY_PREMIUM_PCT,
            AssetField::Probability => &PROBABILITY_PCT,
            AssetField::TimeHorizon => &TIME_HORIZON_YEARS,
        }
    }
}

impl FromStr for AssetField {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mcap" | "market_cap" => Ok(AssetField::MarketCap),
            "mp" | "premium" | "monetary_premium" => Ok(AssetField::MonetaryPremium),
            "prob" | "probability" => Ok(AssetField::Probability),
            "time" | "horizon" | "years" => Ok(AssetField::TimeHorizon),
            other => Err(InputError::UnknownField(other.to_string())),
        }
    }
}

impl fmt::Display for AssetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AssetField::MarketCap => "mcap",
            AssetField::MonetaryPremium => "mp",
            AssetField::Probability => "prob",
            AssetField::TimeHorizon => "time",
        })
    }
}

/// A single `<Asset>.<field>=<value>` edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override {
    pub asset: String,
    pub field: AssetField,
    pub value: Decimal,
}

impl FromStr for Override {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InputError::InvalidOverride(s.to_string());
        let (target, value) = s.split_once('=').ok_or_else(invalid)?;
        // Asset names may contain spaces and parentheses but never a dot
        let (asset, field) = target.trim().rsplit_once('.').ok_or_else(invalid)?;
        if asset.trim().is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            asset: asset.trim().to_string(),
            field: field.parse()?,
            value: parse_value(value)?,
        })
    }
}

/// Parse a control value, allowing arithmetic such as `2.5 * 4`
pub fn parse_value(text: &str) -> Result<Decimal, InputError> {
    expr::evaluate(text).map_err(|source| InputError::InvalidValue {
        text: text.trim().to_string(),
        source,
    })
}

/// Slider values for one asset, in display units
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetControl {
    pub name: String,
    pub group: AssetGroup,
    pub market_cap_trillions: Decimal,
    pub monetary_premium_pct: Decimal,
    pub probability_pct: Decimal,
    pub time_horizon_years: u32,
}

impl AssetControl {
    fn seeded(name: &str, group: AssetGroup, defaults: &AssetDefaults) -> Self {
        Self {
            name: name.to_string(),
            group,
            market_cap_trillions: defaults.mcap / TRILLION,
            monetary_premium_pct: defaults.monetary_premium_pct,
            probability_pct: defaults.probability_capture_pct,
            time_horizon_years: defaults.time_horizon_years,
        }
    }

    /// Set one slider, rejecting values outside its range
    pub fn set(&mut self, field: AssetField, value: Decimal) -> Result<(), InputError> {
        let range = field.range();
        let value = range.check(value)?;
        match field {
            AssetField::MarketCap => self.market_cap_trillions = value,
            AssetField::MonetaryPremium => self.monetary_premium_pct = value,
            AssetField::Probability => self.probability_pct = value,
            AssetField::TimeHorizon => {
                if !value.fract().is_zero() {
                    return Err(InputError::NotWholeNumber {
                        control: range.label,
                        value,
                    });
                }
                // Range-checked above
                self.time_horizon_years = value.to_u32().unwrap_or(1);
            }
        }
        Ok(())
    }

    /// Model parameters in base units
    pub fn to_params(&self) -> AssetParams {
        AssetParams {
            name: self.name.clone(),
            market_cap: self.market_cap_trillions * TRILLION,
            monetary_premium: self.monetary_premium_pct / Decimal::ONE_HUNDRED,
            capture_probability: self.probability_pct / Decimal::ONE_HUNDRED,
            time_horizon_years: self.time_horizon_years,
        }
    }
}

/// Full set of controls for one render pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Controls {
    pub scenario: ScenarioName,
    pub discount_rate_pct: Decimal,
    pub assets: Vec<AssetControl>,
}

impl Controls {
    /// Seed every control from `scenario`'s defaults
    pub fn seeded(book: &ScenarioBook, scenario: ScenarioName) -> Result<Self, ScenarioError> {
        let defaults = book.scenario(scenario)?;
        let mut assets = Vec::new();
        for group in AssetGroup::ALL {
            for name in group.assets() {
                let asset_defaults = defaults.assets.get(*name).ok_or_else(|| {
                    ScenarioError::MissingAsset {
                        scenario,
                        asset: name.to_string(),
                    }
                })?;
                assets.push(AssetControl::seeded(name, group, asset_defaults));
            }
        }

        Ok(Self {
            scenario,
            discount_rate_pct: defaults.discount_rate_pct,
            assets,
        })
    }

    pub fn set_discount_rate(&mut self, pct: Decimal) -> Result<(), InputError> {
        self.discount_rate_pct = DISCOUNT_RATE_PCT.check(pct)?;
        Ok(())
    }

    pub fn asset_mut(&mut self, name: &str) -> Result<&mut AssetControl, InputError> {
        self.assets
            .iter_mut()
            .find(|a| a.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| InputError::UnknownAsset(name.to_string()))
    }

    pub fn apply(&mut self, edit: &Override) -> Result<(), InputError> {
        self.asset_mut(&edit.asset)?.set(edit.field, edit.value)
    }

    pub fn discount_rate(&self) -> Result<DiscountRate, crate::model::ValuationError> {
        DiscountRate::from_percent(self.discount_rate_pct)
    }

    /// Model parameters in display order
    pub fn asset_params(&self) -> Vec<AssetParams> {
        self.assets.iter().map(AssetControl::to_params).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::DocumentFormat;
    use serde_json::json;

    fn book() -> ScenarioBook {
        let mut scenarios = serde_json::Map::new();
        for (i, name) in ScenarioName::ALL.iter().enumerate() {
            let mut assets = serde_json::Map::new();
            for asset in AssetGroup::tracked_assets() {
                assets.insert(
                    asset.to_string(),
                    json!({
                        "mcap": "20e12",
                        "monetary_premium_pct": 50,
                        "probability_capture_pct": 10 * (i + 1),
                        "time_horizon_years": 10
                    }),
                );
            }
            scenarios.insert(
                name.to_string(),
                json!({ "discount_rate_pct": 10, "assets": assets }),
            );
        }
        let doc = json!({
            "global_settings": { "supply": 21000000, "default_btc_price": 100000 },
            "scenarios": scenarios
        });
        ScenarioBook::parse(&doc.to_string(), DocumentFormat::Json, None).unwrap()
    }

    #[test]
    fn test_seeded_from_scenario() {
        let controls = Controls::seeded(&book(), ScenarioName::Bullish).unwrap();
        assert_eq!(controls.assets.len(), 7);
        assert_eq!(controls.assets[0].name, "Stocks");
        assert_eq!(controls.assets[0].group, AssetGroup::TraditionalFinance);
        assert_eq!(controls.assets[0].market_cap_trillions, dec!(20));
        assert_eq!(controls.assets[0].probability_pct, dec!(30));
        assert_eq!(controls.discount_rate_pct, dec!(10));
    }

    #[test]
    fn test_params_in_base_units() {
        let controls = Controls::seeded(&book(), ScenarioName::Base).unwrap();
        let params = controls.asset_params();
        assert_eq!(params[2].name, "Gold");
        assert_eq!(params[2].market_cap, dec!(20000000000000));
        assert_eq!(params[2].monetary_premium, dec!(0.5));
        assert_eq!(params[2].capture_probability, dec!(0.2));
    }

    #[test]
    fn test_override_parsing() {
        let edit: Override = "Crypto (ex-BTC).mp=45".parse().unwrap();
        assert_eq!(edit.asset, "Crypto (ex-BTC)");
        assert_eq!(edit.field, AssetField::MonetaryPremium);
        assert_eq!(edit.value, dec!(45));

        let edit: Override = " Real Estate.time = 2 * 10 ".parse().unwrap();
        assert_eq!(edit.asset, "Real Estate");
        assert_eq!(edit.value, dec!(20));

        assert!(matches!(
            "Gold=20".parse::<Override>(),
            Err(InputError::InvalidOverride(_))
        ));
        assert!(matches!(
            "Gold.weight=20".parse::<Override>(),
            Err(InputError::UnknownField(_))
        ));
        assert!(matches!(
            "Gold.mcap=lots".parse::<Override>(),
            Err(InputError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_apply_override() {
        let mut controls = Controls::seeded(&book(), ScenarioName::Base).unwrap();
        controls.apply(&"gold.mcap=30".parse().unwrap()).unwrap();
        let gold = controls.asset_params().into_iter().find(|p| p.name == "Gold").unwrap();
        assert_eq!(gold.market_cap, dec!(30000000000000));

        let err = controls.apply(&"Platinum.mcap=1".parse().unwrap()).unwrap_err();
        assert_eq!(err, InputError::UnknownAsset("Platinum".to_string()));
    }

    #[test]
    fn test_ranges_enforced() {
        let mut controls = Controls::seeded(&book(), ScenarioName::Base).unwrap();
        assert!(matches!(
            controls.set_discount_rate(dec!(30)),
            Err(InputError::OutOfRange { .. })
        ));
        assert!(controls.set_discount_rate(dec!(7.25)).is_ok());

        let gold = controls.asset_mut("Gold").unwrap();
        assert!(gold.set(AssetField::MarketCap, dec!(501)).is_err());
        assert!(gold.set(AssetField::Probability, dec!(-5)).is_err());
        assert!(gold.set(AssetField::TimeHorizon, dec!(0)).is_err());
        assert!(matches!(
            gold.set(AssetField::TimeHorizon, dec!(2.5)),
            Err(InputError::NotWholeNumber { .. })
        ));
        gold.set(AssetField::TimeHorizon, dec!(50)).unwrap();
        assert_eq!(gold.time_horizon_years, 50);
    }
}
