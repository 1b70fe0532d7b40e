//! Banner text chosen from the upside

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Severity of the banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Upside above 100%
    MassiveDiscount,
    /// Upside above 30%
    Undervalued,
    /// Downside beyond 10%
    AboveFairValue,
    NearFairValue,
}

/// Headline plus detail line for the current upside
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Narrative {
    pub tone: Tone,
    pub headline: String,
    pub detail: String,
}

impl Narrative {
    pub fn for_upside(upside_pct: Decimal) -> Self {
        let upside = super::render::cents(upside_pct);
        if upside_pct > dec!(100) {
            Self {
                tone: Tone::MassiveDiscount,
                headline: "Bitcoin is trading at a massive discount!".to_string(),
                detail: format!(
                    "Based on the model, BTC has a potential upside of {upside:.2}% compared to its fair value."
                ),
            }
        } else if upside_pct > dec!(30) {
            Self {
                tone: Tone::Undervalued,
                headline: "Bitcoin appears undervalued.".to_string(),
                detail: format!("Potential upside of {upside:.2}% from the current price."),
            }
        } else if upside_pct < dec!(-10) {
            Self {
                tone: Tone::AboveFairValue,
                headline: "Bitcoin is currently trading above its modeled fair value.".to_string(),
                detail: format!("Potential downside of {:.2}%.", upside.abs()),
            }
        } else {
            Self {
                tone: Tone::NearFairValue,
                headline: "BTC is trading close to its fair value.".to_string(),
                detail: format!("Deviation: {upside:.2}%."),
            }
        }
    }

    /// Short marker for plain-text output
    pub fn marker(&self) -> &'static str {
        match self.tone {
            Tone::MassiveDiscount => "[++]",
            Tone::Undervalued => "[+]",
            Tone::AboveFairValue => "[!]",
            Tone::NearFairValue => "[=]",
        }
    }
}
