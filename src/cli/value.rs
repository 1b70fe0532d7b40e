//! Value command implementation

use super::{parse_price, price_lookup};
use crate::config::Config;
use crate::controls::{parse_value, Override};
use crate::scenario::ScenarioName;
use crate::session::Session;
use clap::{Args, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Args, Debug)]
pub struct ValueArgs {
    /// Scenario seeding the controls (Bearish, Base, Bullish, Hyper)
    #[arg(short, long)]
    pub scenario: Option<ScenarioName>,

    /// Discount rate in percent; arithmetic allowed
    #[arg(short = 'r', long)]
    pub discount_rate: Option<String>,

    /// Override one asset control, e.g. `Gold.prob=35` or `"Real Estate.mcap=300"`
    #[arg(long = "set", value_name = "ASSET.FIELD=VALUE")]
    pub overrides: Vec<Override>,

    /// Use this BTC price instead of querying the API
    #[arg(short, long)]
    pub price: Option<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Include the model explanation
    #[arg(long)]
    pub about: bool,
}

impl ValueArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let fixed_price = self.price.as_deref().map(parse_price).transpose()?;
        let mut session = Session::new(&config.scenarios.path, price_lookup(config)?)
            .with_scenario(self.scenario.unwrap_or(config.scenarios.default))
            .with_fixed_price(fixed_price);

        let controls = session.controls_mut().await?;
        if let Some(rate) = &self.discount_rate {
            controls.set_discount_rate(parse_value(rate)?)?;
        }
        for edit in &self.overrides {
            tracing::debug!(asset = %edit.asset, field = %edit.field, value = %edit.value, "Applying override");
            controls.apply(edit)?;
        }

        let dashboard = session.render_pass().await?;
        match self.format {
            OutputFormat::Table => print!("{}", dashboard.format_table(self.about)),
            OutputFormat::Json => {
                for warning in &dashboard.warnings {
                    eprintln!("WARNING: {warning}");
                }
                println!("{}", dashboard.to_json()?);
            }
        }
        Ok(())
    }
}
