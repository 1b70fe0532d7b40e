//! Interactive command implementation
//!
//! Reads one command per line. Every command that changes state triggers a
//! full recomputation and redraw.

use super::{parse_price, price_lookup};
use crate::config::Config;
use crate::controls::{
    parse_value, Override, DISCOUNT_RATE_PCT, MARKET_CAP_TRILLIONS, MONETARY_PREMIUM_PCT,
    PROBABILITY_PCT, TIME_HORIZON_YEARS,
};
use crate::price::PriceSource;
use crate::scenario::ScenarioName;
use crate::session::Session;
use clap::Args;
use rust_decimal::Decimal;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

#[derive(Args, Debug)]
pub struct InteractiveArgs {
    /// Initial scenario
    #[arg(short, long)]
    pub scenario: Option<ScenarioName>,

    /// Use this BTC price instead of querying the API
    #[arg(short, long)]
    pub price: Option<String>,
}

impl InteractiveArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let fixed_price = self.price.as_deref().map(parse_price).transpose()?;
        let session = Session::new(&config.scenarios.path, price_lookup(config)?)
            .with_scenario(self.scenario.unwrap_or(config.scenarios.default))
            .with_fixed_price(fixed_price);

        let stdin = BufReader::new(tokio::io::stdin());
        run(session, stdin, std::io::stdout()).await
    }
}

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Scenario(ScenarioName),
    Rate(Decimal),
    Set(Override),
    /// `None` returns to the live price
    Price(Option<Decimal>),
    Reset,
    Show,
    Help,
    Quit,
}

impl SessionCommand {
    pub fn parse(line: &str) -> anyhow::Result<Self> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(v, r)| (v, r.trim()))
            .unwrap_or((line, ""));

        let command = match verb.to_ascii_lowercase().as_str() {
            "scenario" | "s" => SessionCommand::Scenario(rest.parse()?),
            "rate" | "r" => SessionCommand::Rate(parse_value(rest)?),
            "set" => SessionCommand::Set(rest.parse()?),
            "price" | "p" if rest.eq_ignore_ascii_case("live") => SessionCommand::Price(None),
            "price" | "p" => SessionCommand::Price(Some(parse_price(rest)?)),
            "reset" => SessionCommand::Reset,
            "show" | "" => SessionCommand::Show,
            "help" | "h" | "?" => SessionCommand::Help,
            "quit" | "q" | "exit" => SessionCommand::Quit,
            other => anyhow::bail!("unknown command {other:?}, type `help`"),
        };
        Ok(command)
    }
}

fn help_text() -> String {
    let mut out = String::from(
        "Commands:
  scenario <Bearish|Base|Bullish|Hyper>   switch scenario and reseed every control
  rate <pct>                              set the discount rate
  set <Asset>.<field>=<value>             edit one asset (fields: mcap, mp, prob, time)
  price <usd|live>                        pin the BTC price or return to the live quote
  reset                                   restore the scenario defaults
  show                                    redraw
  help                                    this text
  quit
Ranges:
",
    );
    for range in [
        &DISCOUNT_RATE_PCT,
        &MARKET_CAP_TRILLIONS,
        &MONETARY_PREMIUM_PCT,
        &PROBABILITY_PCT,
        &TIME_HORIZON_YEARS,
    ] {
        out.push_str(&format!(
            "  {:<22} {} to {} (step {})\n",
            range.label, range.min, range.max, range.step
        ));
    }
    out
}

/// Drive `session` from `input` until EOF or `quit`
pub async fn run<S, R, W>(mut session: Session<S>, input: R, mut output: W) -> anyhow::Result<()>
where
    S: PriceSource,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    // Configuration problems surface here, before any input is read
    let dashboard = session.render_pass().await?;
    write!(output, "{}", dashboard.format_table(true))?;
    writeln!(output, "Type `help` for commands.")?;

    let mut lines = input.lines();
    loop {
        write!(output, "> ")?;
        output.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match SessionCommand::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(output, "error: {e}")?;
                continue;
            }
        };

        let applied = match command {
            SessionCommand::Quit => break,
            SessionCommand::Help => {
                write!(output, "{}", help_text())?;
                continue;
            }
            SessionCommand::Show => Ok(()),
            SessionCommand::Reset => {
                session.reset();
                Ok(())
            }
            SessionCommand::Scenario(name) => {
                session.select_scenario(name);
                Ok(())
            }
            SessionCommand::Price(price) => {
                session.set_fixed_price(price);
                Ok(())
            }
            SessionCommand::Rate(pct) => match session.controls_mut().await {
                Ok(controls) => controls.set_discount_rate(pct).map_err(anyhow::Error::from),
                Err(e) => Err(e.into()),
            },
            SessionCommand::Set(edit) => match session.controls_mut().await {
                Ok(controls) => controls.apply(&edit).map_err(anyhow::Error::from),
                Err(e) => Err(e.into()),
            },
        };
        if let Err(e) = applied {
            writeln!(output, "error: {e}")?;
            continue;
        }

        match session.render_pass().await {
            Ok(dashboard) => write!(output, "{}", dashboard.format_table(false))?,
            Err(e) => writeln!(output, "error: {e}")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::AssetField;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            SessionCommand::parse("scenario bullish").unwrap(),
            SessionCommand::Scenario(ScenarioName::Bullish)
        );
        assert_eq!(
            SessionCommand::parse("rate 7.5").unwrap(),
            SessionCommand::Rate(dec!(7.5))
        );
        assert_eq!(
            SessionCommand::parse("price live").unwrap(),
            SessionCommand::Price(None)
        );
        assert_eq!(
            SessionCommand::parse("p 85000").unwrap(),
            SessionCommand::Price(Some(dec!(85000)))
        );
        assert_eq!(SessionCommand::parse("  ").unwrap(), SessionCommand::Show);
        assert_eq!(SessionCommand::parse("exit").unwrap(), SessionCommand::Quit);
    }

    #[test]
    fn test_parse_set_with_spaced_asset() {
        let SessionCommand::Set(edit) = SessionCommand::parse("set Real Estate.mcap=2*150").unwrap()
        else {
            panic!("expected set");
        };
        assert_eq!(edit.asset, "Real Estate");
        assert_eq!(edit.field, AssetField::MarketCap);
        assert_eq!(edit.value, dec!(300));
    }

    #[test]
    fn test_parse_errors() {
        assert!(SessionCommand::parse("scenario sideways").is_err());
        assert!(SessionCommand::parse("rate lots").is_err());
        assert!(SessionCommand::parse("price -5").is_err());
        assert!(SessionCommand::parse("launch").is_err());
    }

    #[test]
    fn test_help_lists_ranges() {
        let help = help_text();
        assert!(help.contains("0 to 25 (step 0.25)"));
        assert!(help.contains("1 to 50"));
    }
}
