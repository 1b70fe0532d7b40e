//! Valuation types

use rust_decimal::Decimal;
use thiserror::Error;

/// Input validation and arithmetic errors raised before or during a valuation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValuationError {
    /// Supply must be strictly positive
    #[error("supply must be positive, got {0}")]
    NonPositiveSupply(Decimal),
    /// Discount rate at or below -100% leaves the discount factor undefined
    #[error("discount rate must be greater than -100%, got {0}")]
    DiscountRateTooLow(Decimal),
    /// Market cap below zero
    #[error("{asset}: market cap must not be negative, got {value}")]
    NegativeMarketCap { asset: String, value: Decimal },
    /// A fraction outside [0, 1]
    #[error("{asset}: {field} must be between 0 and 1, got {value}")]
    FractionOutOfRange {
        asset: String,
        field: &'static str,
        value: Decimal,
    },
    /// Time horizon of zero years
    #[error("{asset}: time horizon must be at least one year")]
    ZeroTimeHorizon { asset: String },
    /// Result exceeds the decimal range
    #[error("arithmetic overflow while valuing {0}")]
    Overflow(String),
}
