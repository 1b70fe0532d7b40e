//! CLI interface for schrodinger
//!
//! Provides subcommands for:
//! - `value`: One valuation pass with optional overrides
//! - `scenarios`: List scenario defaults
//! - `price`: Fetch the current BTC price
//! - `interactive`: Line-oriented session that recomputes on every command
//! - `config`: Show configuration

mod interactive;
mod price;
mod scenarios;
mod value;

pub use interactive::{run as run_interactive, InteractiveArgs, SessionCommand};
pub use price::PriceArgs;
pub use scenarios::ScenariosArgs;
pub use value::{OutputFormat, ValueArgs};

use crate::config::Config;
use crate::controls::parse_value;
use crate::price::{CachedPriceLookup, HttpPriceSource};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

#[derive(Parser, Debug)]
#[command(name = "schrodinger")]
#[command(about = "Fair value of Bitcoin as a sink for other assets' monetary premium")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one valuation pass and print the dashboard
    Value(ValueArgs),
    /// List scenarios and their resolved defaults
    Scenarios(ScenariosArgs),
    /// Fetch the current BTC price
    Price(PriceArgs),
    /// Interactive session
    Interactive(InteractiveArgs),
    /// Show configuration
    Config,
}

/// HTTP price source behind the configured cache window
pub fn price_lookup(config: &Config) -> anyhow::Result<CachedPriceLookup<HttpPriceSource>> {
    let source = HttpPriceSource::new(config.price.source_config())?;
    Ok(CachedPriceLookup::with_ttl(source, config.price.cache_ttl()))
}

/// Parse a user-supplied price, which must be positive
pub fn parse_price(text: &str) -> anyhow::Result<Decimal> {
    let price = parse_value(text)?;
    anyhow::ensure!(price > Decimal::ZERO, "price must be positive, got {price}");
    Ok(price)
}
