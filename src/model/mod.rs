//! Fair value model module
//!
//! Values Bitcoin as the present value of the monetary premium it is expected
//! to capture from other asset classes:
//!
//! ```text
//! captured      = market_cap * monetary_premium * capture_probability
//! present_value = captured / (1 + discount_rate) ^ time_horizon
//! fair_price    = sum(present_value) / supply
//! ```

mod present_value;
mod projection;
mod types;

pub use present_value::PresentValueModel;
pub use projection::{ProjectedPoint, ProjectionSeries};
pub use types::ValuationError;

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

/// Assumptions about one source asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetParams {
    /// Asset display name (e.g. "Gold")
    pub name: String,
    /// Total market value in USD
    pub market_cap: Decimal,
    /// Fraction of the market cap held as a store of value, 0..=1
    pub monetary_premium: Decimal,
    /// Probability that Bitcoin captures the premium, 0..=1
    pub capture_probability: Decimal,
    /// Years until the capture happens, at least 1
    pub time_horizon_years: u32,
}

impl AssetParams {
    /// Check the parameter invariants
    pub fn validate(&self) -> Result<(), ValuationError> {
        if self.market_cap.is_sign_negative() && !self.market_cap.is_zero() {
            return Err(ValuationError::NegativeMarketCap {
                asset: self.name.clone(),
                value: self.market_cap,
            });
        }
        check_fraction(&self.name, "monetary premium", self.monetary_premium)?;
        check_fraction(&self.name, "capture probability", self.capture_probability)?;
        if self.time_horizon_years == 0 {
            return Err(ValuationError::ZeroTimeHorizon {
                asset: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Value captured at the horizon, before discounting
    pub fn captured_value(&self) -> Option<Decimal> {
        self.market_cap
            .checked_mul(self.monetary_premium)?
            .checked_mul(self.capture_probability)
    }
}

fn check_fraction(asset: &str, field: &'static str, value: Decimal) -> Result<(), ValuationError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(ValuationError::FractionOutOfRange {
            asset: asset.to_string(),
            field,
            value,
        });
    }
    Ok(())
}

/// Annual discount rate, stored as a fraction (0.05 = 5%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct DiscountRate(Decimal);

impl DiscountRate {
    /// Rate from a fraction; must be greater than -1
    pub fn new(fraction: Decimal) -> Result<Self, ValuationError> {
        if fraction <= -Decimal::ONE {
            return Err(ValuationError::DiscountRateTooLow(fraction));
        }
        Ok(Self(fraction))
    }

    /// Rate from a percentage (7.5 = 7.5%)
    pub fn from_percent(percent: Decimal) -> Result<Self, ValuationError> {
        Self::new(percent / Decimal::ONE_HUNDRED)
    }

    pub fn as_fraction(&self) -> Decimal {
        self.0
    }

    pub fn as_percent(&self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }

    /// Compounding factor `(1 + rate) ^ years`
    pub fn growth_factor(&self, years: u32) -> Option<Decimal> {
        (Decimal::ONE + self.0).checked_powi(i64::from(years))
    }
}

/// One line of the per-asset breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetValuation {
    pub name: String,
    /// Value captured at the horizon
    pub captured_value: Decimal,
    /// Captured value discounted to today
    pub present_value: Decimal,
    /// Present value per coin of supply
    pub price_contribution: Decimal,
}

/// Output of a valuation pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Valuation {
    /// Sum of all present values
    pub fair_market_cap: Decimal,
    /// Fair market cap divided by supply
    pub fair_price: Decimal,
    /// Per-asset lines in input order
    pub breakdown: Vec<AssetValuation>,
}

impl Valuation {
    /// Percentage difference of the fair price over `current_price`.
    ///
    /// Zero when the current price is not positive.
    pub fn upside_pct(&self, current_price: Decimal) -> Decimal {
        if current_price <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.fair_price
            .checked_div(current_price)
            .and_then(|ratio| (ratio - Decimal::ONE).checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::MAX)
    }
}

/// Trait for fair value model implementations
pub trait FairValueModel: Send + Sync {
    /// Value the given assets at `discount_rate`
    fn compute(
        &self,
        assets: &[AssetParams],
        discount_rate: DiscountRate,
    ) -> Result<Valuation, ValuationError>;
}
