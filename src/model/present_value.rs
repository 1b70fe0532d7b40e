//! Discounted monetary-premium model

use super::{AssetParams, AssetValuation, DiscountRate, FairValueModel, Valuation, ValuationError};
use rust_decimal::Decimal;

/// Sums the discounted premium each asset is expected to hand over
#[derive(Debug, Clone)]
pub struct PresentValueModel {
    supply: Decimal,
}

impl PresentValueModel {
    /// Create a model for a fixed coin supply
    pub fn new(supply: Decimal) -> Result<Self, ValuationError> {
        if supply <= Decimal::ZERO {
            return Err(ValuationError::NonPositiveSupply(supply));
        }
        Ok(Self { supply })
    }

    pub fn supply(&self) -> Decimal {
        self.supply
    }

    fn value_asset(
        &self,
        asset: &AssetParams,
        discount_rate: DiscountRate,
    ) -> Result<AssetValuation, ValuationError> {
        asset.validate()?;
        let overflow = || ValuationError::Overflow(asset.name.clone());

        let captured_value = asset.captured_value().ok_or_else(overflow)?;
        let discount = discount_rate
            .growth_factor(asset.time_horizon_years)
            .filter(|factor| !factor.is_zero())
            .ok_or_else(overflow)?;
        let present_value = captured_value.checked_div(discount).ok_or_else(overflow)?;
        let price_contribution = present_value.checked_div(self.supply).ok_or_else(overflow)?;

        Ok(AssetValuation {
            name: asset.name.clone(),
            captured_value,
            present_value,
            price_contribution,
        })
    }
}

impl FairValueModel for PresentValueModel {
    fn compute(
        &self,
        assets: &[AssetParams],
        discount_rate: DiscountRate,
    ) -> Result<Valuation, ValuationError> {
        let breakdown = assets
            .iter()
            .map(|asset| self.value_asset(asset, discount_rate))
            .collect::<Result<Vec<_>, _>>()?;

        let fair_market_cap = breakdown
            .iter()
            .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.present_value))
            .ok_or_else(|| ValuationError::Overflow("fair market cap".to_string()))?;
        let fair_price = fair_market_cap
            .checked_div(self.supply)
            .ok_or_else(|| ValuationError::Overflow("fair price".to_string()))?;

        tracing::debug!(
            assets = assets.len(),
            discount_rate = %discount_rate.as_fraction(),
            %fair_market_cap,
            %fair_price,
            "Computed valuation"
        );

        Ok(Valuation {
            fair_market_cap,
            fair_price,
            breakdown,
        })
    }
}
