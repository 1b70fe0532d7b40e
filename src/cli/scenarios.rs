//! Scenarios command implementation

use crate::config::Config;
use crate::controls::Controls;
use crate::scenario::{AssetGroup, ScenarioBook, ScenarioName};
use clap::Args;
use std::collections::BTreeMap;

#[derive(Args, Debug)]
pub struct ScenariosArgs {
    /// Only show this scenario
    #[arg(short, long)]
    pub scenario: Option<ScenarioName>,

    /// Print resolved scenarios as JSON
    #[arg(long)]
    pub json: bool,
}

impl ScenariosArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let book = ScenarioBook::load(&config.scenarios.path, None)?;
        let selected: Vec<ScenarioName> = match self.scenario {
            Some(name) => vec![name],
            None => ScenarioName::ALL.to_vec(),
        };

        if self.json {
            let mut out = BTreeMap::new();
            for name in &selected {
                out.insert(*name, book.scenario(*name)?);
            }
            println!("{}", serde_json::to_string_pretty(&out)?);
            return Ok(());
        }

        println!(
            "Supply: {}  Default BTC price: {}",
            book.supply(),
            crate::dashboard::format_usd(book.default_price())
        );
        for name in selected {
            let controls = Controls::seeded(&book, name)?;
            println!();
            println!("{name}  (discount rate {}%)", controls.discount_rate_pct);
            println!("───────────────────────────────────────────────────────");
            for group in AssetGroup::ALL {
                println!("  {}", group.label());
                for asset in controls.assets.iter().filter(|a| a.group == group) {
                    println!(
                        "    {:<16} mcap {:>7}T  mp {:>6}%  prob {:>6}%  time {:>3}y",
                        asset.name,
                        asset.market_cap_trillions.normalize(),
                        asset.monetary_premium_pct.normalize(),
                        asset.probability_pct.normalize(),
                        asset.time_horizon_years,
                    );
                }
            }
        }
        Ok(())
    }
}
