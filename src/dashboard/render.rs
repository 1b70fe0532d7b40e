//! Plain-text rendering helpers

use crate::model::{AssetValuation, ProjectionSeries};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Bar chart width in columns
pub const CHART_WIDTH: usize = 48;

pub const ABOUT: &str = "\
This model values Bitcoin as a sink for the monetary premium of other assets.
BTC is expected to absorb part of the market value that assets such as Gold,
Bonds and Real Estate hold purely as a store of value.

  Market Cap (Mcap)     Total value of the asset.
  Monetary Premium (MP) Share of the Mcap held for value preservation, not utility.
  Probability (Prob)    Chance that Bitcoin captures that premium.
  Time Horizon (Time)   Years until the capture happens.
  Discount Rate         Rate used to bring future value back to today.

Fair value is the sum of the present values of every premium Bitcoin is
expected to capture.";

/// Round half away from zero to two decimal places
pub fn cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `$1,234,567.89`
pub fn format_usd(value: Decimal) -> String {
    let rounded = cents(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{sign}${}.{fraction}", group_thousands(whole))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `$X.XXT` from one trillion up, `$X.XXB` below
pub fn market_cap_label(value: Decimal) -> String {
    if value >= dec!(1000000000000) {
        format!("${:.2}T", cents(value / dec!(1000000000000)))
    } else {
        format!("${:.2}B", cents(value / dec!(1000000000)))
    }
}

/// Per-asset present value table
pub fn format_breakdown(lines: &[AssetValuation]) -> String {
    let name_width = lines
        .iter()
        .map(|l| l.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Asset".len());

    let mut out = format!(
        "{:<name_width$}  {:>22}  {:>14}\n",
        "Asset", "Present Value", "Per Coin"
    );
    for line in lines {
        out.push_str(&format!(
            "{:<name_width$}  {:>22}  {:>14}\n",
            line.name,
            format_usd(line.present_value),
            format_usd(line.price_contribution),
        ));
    }
    out
}

/// Horizontal bars, one per year, with `|` at the current price
pub fn format_chart(series: &ProjectionSeries, current_price: Decimal) -> String {
    let scale = series.peak().max(current_price);
    let column = |price: Decimal| -> usize {
        if scale <= Decimal::ZERO || price <= Decimal::ZERO {
            return 0;
        }
        (price / scale * Decimal::from(CHART_WIDTH))
            .round()
            .to_usize()
            .unwrap_or(0)
            .min(CHART_WIDTH)
    };
    let marker = column(current_price);

    let mut out = String::new();
    for point in series {
        let filled = column(point.price);
        let bar: String = (0..=CHART_WIDTH)
            .map(|i| {
                if i == marker {
                    '|'
                } else if i < filled {
                    '#'
                } else {
                    ' '
                }
            })
            .collect();
        out.push_str(&format!(
            "Year {:>2} {} {}\n",
            point.year,
            bar,
            format_usd(point.price)
        ));
    }
    out.push_str(&format!(
        "{:>8}| current price {}\n",
        "",
        format_usd(current_price)
    ));
    out
}
