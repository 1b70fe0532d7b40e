//! Projected price path
//!
//! Grows today's fair price at the discount rate, one point per year up to the
//! longest time horizon in play.

use super::{AssetParams, DiscountRate, ValuationError};
use rust_decimal::Decimal;
use serde::Serialize;

/// Price projected for a given year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectedPoint {
    pub year: u32,
    pub price: Decimal,
}

/// Finite, restartable series of projected prices for years `0..=horizon`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionSeries {
    points: Vec<ProjectedPoint>,
}

impl ProjectionSeries {
    /// Project `fair_price` over the longest horizon among `assets` (one year when empty)
    pub fn for_assets(
        fair_price: Decimal,
        discount_rate: DiscountRate,
        assets: &[AssetParams],
    ) -> Result<Self, ValuationError> {
        let horizon = assets
            .iter()
            .map(|a| a.time_horizon_years)
            .max()
            .unwrap_or(1);
        Self::new(fair_price, discount_rate, horizon)
    }

    /// Project `fair_price` for years `0..=horizon`
    pub fn new(
        fair_price: Decimal,
        discount_rate: DiscountRate,
        horizon: u32,
    ) -> Result<Self, ValuationError> {
        let points = (0..=horizon)
            .map(|year| {
                discount_rate
                    .growth_factor(year)
                    .and_then(|factor| fair_price.checked_mul(factor))
                    .map(|price| ProjectedPoint { year, price })
                    .ok_or_else(|| ValuationError::Overflow(format!("projection year {year}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { points })
    }

    /// Last year of the series
    pub fn horizon(&self) -> u32 {
        self.points.last().map(|p| p.year).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProjectedPoint> {
        self.points.iter()
    }

    /// Highest projected price
    pub fn peak(&self) -> Decimal {
        self.points
            .iter()
            .map(|p| p.price)
            .max()
            .unwrap_or(Decimal::ZERO)
    }
}

impl<'a> IntoIterator for &'a ProjectionSeries {
    type Item = &'a ProjectedPoint;
    type IntoIter = std::slice::Iter<'a, ProjectedPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
