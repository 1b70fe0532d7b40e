//! Render pass output
//!
//! A [`Dashboard`] is everything one recomputation produces: the headline
//! metrics, the banner, the per-asset breakdown and the projected path. It
//! renders as a text report or serializes to JSON.

mod narrative;
mod render;

pub use narrative::{Narrative, Tone};
pub use render::{cents, format_breakdown, format_chart, format_usd, market_cap_label, ABOUT};

use crate::controls::Controls;
use crate::model::{FairValueModel, ProjectionSeries, Valuation, ValuationError};
use crate::price::PriceQuote;
use crate::scenario::ScenarioName;
use rust_decimal::Decimal;
use serde::Serialize;

/// Result of one render pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub scenario: ScenarioName,
    pub discount_rate_pct: Decimal,
    pub price: PriceQuote,
    pub valuation: Valuation,
    pub upside_pct: Decimal,
    pub narrative: Narrative,
    pub projection: ProjectionSeries,
    pub warnings: Vec<String>,
}

impl Dashboard {
    /// Value the current controls against `price`
    pub fn build(
        model: &dyn FairValueModel,
        controls: &Controls,
        price: PriceQuote,
    ) -> Result<Self, ValuationError> {
        let rate = controls.discount_rate()?;
        let assets = controls.asset_params();
        let valuation = model.compute(&assets, rate)?;
        let projection = ProjectionSeries::for_assets(valuation.fair_price, rate, &assets)?;
        let upside_pct = valuation.upside_pct(price.price);
        let warnings = price.warning.iter().cloned().collect();

        Ok(Self {
            scenario: controls.scenario,
            discount_rate_pct: controls.discount_rate_pct,
            narrative: Narrative::for_upside(upside_pct),
            price,
            valuation,
            upside_pct,
            projection,
            warnings,
        })
    }

    pub fn format_table(&self, with_about: bool) -> String {
        let mut out = String::new();
        for warning in &self.warnings {
            out.push_str(&format!("WARNING: {warning}\n"));
        }

        out.push_str(&format!(
            r#"
══════════════════════════════════════════════════════
        SCHRÖDINGER'S COIN  ·  {} scenario
══════════════════════════════════════════════════════
"#,
            self.scenario
        ));
        if with_about {
            out.push_str(&format!("\n{ABOUT}\n"));
        }

        out.push_str(&format!(
            r#"
KEY METRICS
───────────────────────────────────────────────────────
Current BTC Price:  {} ({:?})
Discount Rate:      {:.2}%
Fair Market Cap:    {}
Fair BTC Price:     {}
Upside Potential:   {:.2}%

{} {}
    {}

BREAKDOWN
───────────────────────────────────────────────────────
{}
FUTURE MONETIZATION PATH
───────────────────────────────────────────────────────
{}══════════════════════════════════════════════════════
"#,
            format_usd(self.price.price),
            self.price.origin,
            self.discount_rate_pct,
            market_cap_label(self.valuation.fair_market_cap),
            format_usd(self.valuation.fair_price),
            cents(self.upside_pct),
            self.narrative.marker(),
            self.narrative.headline,
            self.narrative.detail,
            format_breakdown(&self.valuation.breakdown),
            format_chart(&self.projection, self.price.price),
        ));
        out
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
