//! Recompute loop state
//!
//! Every interaction runs a full pass: resolve the scenario document (cached
//! by content and price), look up the price (cached for the TTL), read the
//! controls and value them.

use crate::controls::{Controls, InputError};
use crate::dashboard::Dashboard;
use crate::model::ValuationError;
use crate::price::{CachedPriceLookup, PriceQuote, PriceSource};
use crate::scenario::{ScenarioBook, ScenarioCache, ScenarioError, ScenarioName};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors from a render pass
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Valuation(#[from] ValuationError),
}

/// Interactive valuation session
pub struct Session<S> {
    scenario_path: PathBuf,
    scenarios: ScenarioCache,
    prices: CachedPriceLookup<S>,
    fixed_price: Option<Decimal>,
    selected: ScenarioName,
    controls: Option<Controls>,
}

impl<S: PriceSource> Session<S> {
    pub fn new(scenario_path: impl Into<PathBuf>, prices: CachedPriceLookup<S>) -> Self {
        Self {
            scenario_path: scenario_path.into(),
            scenarios: ScenarioCache::new(),
            prices,
            fixed_price: None,
            selected: ScenarioName::default(),
            controls: None,
        }
    }

    /// Start on `scenario` instead of the default
    pub fn with_scenario(mut self, scenario: ScenarioName) -> Self {
        self.selected = scenario;
        self
    }

    /// Use `price` instead of querying the source
    pub fn with_fixed_price(mut self, price: Option<Decimal>) -> Self {
        self.fixed_price = price;
        self
    }

    pub fn selected(&self) -> ScenarioName {
        self.selected
    }

    pub fn scenario_cache(&self) -> &ScenarioCache {
        &self.scenarios
    }

    /// Switch scenario; controls are reseeded on the next pass
    pub fn select_scenario(&mut self, scenario: ScenarioName) {
        if scenario != self.selected {
            tracing::info!(from = %self.selected, to = %scenario, "Switching scenario");
        }
        self.selected = scenario;
        self.controls = None;
    }

    /// Drop user edits and reseed from the selected scenario
    pub fn reset(&mut self) {
        self.controls = None;
    }

    pub fn set_fixed_price(&mut self, price: Option<Decimal>) {
        self.fixed_price = price;
    }

    /// Resolve the document and price, seeding controls when needed
    pub async fn prepare(&mut self) -> Result<(Arc<ScenarioBook>, PriceQuote), SessionError> {
        let quote = match self.fixed_price {
            Some(price) => PriceQuote::manual(price),
            None => {
                let unpriced = self.scenarios.load(&self.scenario_path, None)?;
                self.prices.current_price(unpriced.default_price()).await
            }
        };
        let book = self.scenarios.load(&self.scenario_path, Some(quote.price))?;

        let stale = self
            .controls
            .as_ref()
            .map_or(true, |c| c.scenario != self.selected);
        if stale {
            self.controls = Some(Controls::seeded(&book, self.selected)?);
        }
        Ok((book, quote))
    }

    /// Controls for the selected scenario
    pub async fn controls_mut(&mut self) -> Result<&mut Controls, SessionError> {
        self.prepare().await?;
        self.controls
            .as_mut()
            .ok_or(SessionError::Scenario(ScenarioError::MissingScenario(self.selected)))
    }

    /// One full recomputation
    pub async fn render_pass(&mut self) -> Result<Dashboard, SessionError> {
        let (book, quote) = self.prepare().await?;
        let controls = self
            .controls
            .as_ref()
            .ok_or(ScenarioError::MissingScenario(self.selected))?;
        let model = book.model()?;
        Ok(Dashboard::build(&model, controls, quote)?)
    }
}
