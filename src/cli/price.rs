//! Price command implementation

use super::price_lookup;
use crate::config::Config;
use crate::dashboard::format_usd;
use crate::scenario::ScenarioBook;
use clap::Args;

#[derive(Args, Debug)]
pub struct PriceArgs {
    /// Print the raw decimal only
    #[arg(short, long)]
    pub quiet: bool,
}

impl PriceArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let book = ScenarioBook::load(&config.scenarios.path, None)?;
        let lookup = price_lookup(config)?;
        let quote = lookup.current_price(book.default_price()).await;

        if let Some(warning) = &quote.warning {
            eprintln!("WARNING: {warning}");
        }
        if self.quiet {
            println!("{}", quote.price);
        } else {
            println!("Current BTC Price: {}", format_usd(quote.price));
            println!("  Source: {:?} ({})", quote.origin, lookup.source().endpoint());
            println!("  As of:  {}", quote.as_of.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        Ok(())
    }
}
