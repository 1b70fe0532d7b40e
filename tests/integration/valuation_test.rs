//! Valuation over the shipped scenario document

use crate::common::sample_scenarios;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schrodinger_model::controls::Controls;
use schrodinger_model::dashboard::{Dashboard, Tone};
use schrodinger_model::model::FairValueModel;
use schrodinger_model::price::PriceQuote;
use schrodinger_model::scenario::{AssetGroup, ScenarioBook, ScenarioError, ScenarioName};
use std::io::Write;

#[test]
fn test_sample_document_resolves() {
    let book = ScenarioBook::load(sample_scenarios(), None).unwrap();
    assert_eq!(book.supply(), dec!(21000000));
    assert_eq!(book.default_price(), dec!(100000));

    let hyper = book.scenario(ScenarioName::Hyper).unwrap();
    assert_eq!(hyper.discount_rate_pct, dec!(6.5));
    assert_eq!(hyper.assets["Real Estate"].mcap, dec!(412500000000000));

    let bearish = book.scenario(ScenarioName::Bearish).unwrap();
    assert_eq!(bearish.assets["Silver"].mcap, dec!(1600000000000));
    for asset in AssetGroup::tracked_assets() {
        assert!(bearish.assets.contains_key(asset), "{asset} missing");
    }
}

#[test]
fn test_fair_price_rises_with_scenario_optimism() {
    let book = ScenarioBook::load(sample_scenarios(), None).unwrap();
    let model = book.model().unwrap();

    let prices: Vec<Decimal> = ScenarioName::ALL
        .into_iter()
        .map(|name| {
            let controls = Controls::seeded(&book, name).unwrap();
            model
                .compute(&controls.asset_params(), controls.discount_rate().unwrap())
                .unwrap()
                .fair_price
        })
        .collect();

    assert!(prices.windows(2).all(|w| w[0] < w[1]), "{prices:?}");
}

#[test]
fn test_dashboard_over_sample_document() {
    let book = ScenarioBook::load(sample_scenarios(), Some(dec!(95000))).unwrap();
    let controls = Controls::seeded(&book, ScenarioName::Base).unwrap();
    let dashboard =
        Dashboard::build(&book.model().unwrap(), &controls, PriceQuote::manual(dec!(95000)))
            .unwrap();

    assert_eq!(dashboard.valuation.breakdown.len(), 7);
    assert_eq!(dashboard.valuation.breakdown[0].name, "Stocks");
    assert_eq!(dashboard.projection.horizon(), 20);
    assert_eq!(
        dashboard.valuation.fair_price,
        dashboard.valuation.fair_market_cap / book.supply()
    );

    let expected = dashboard.valuation.upside_pct(dec!(95000));
    assert_eq!(dashboard.upside_pct, expected);
    if expected > dec!(100) {
        assert_eq!(dashboard.narrative.tone, Tone::MassiveDiscount);
    }
}

#[test]
fn test_toml_document_with_price_placeholder() {
    let mut doc = String::from(
        r#"
[global_settings]
supply = "21 * 10 ** 6"
default_btc_price = 100000
bull_price = "{{ default_btc_price }} * 2"

[scenarios.Base]
discount_rate_pct = 10
"#,
    );
    for name in ScenarioName::ALL {
        if name != ScenarioName::Base {
            doc.push_str(&format!("\n[scenarios.{name}]\ndiscount_rate_pct = 10\n"));
        }
    }
    for name in ScenarioName::ALL {
        for asset in AssetGroup::tracked_assets() {
            doc.push_str(&format!(
                "\n[scenarios.{name}.assets.\"{asset}\"]\nmcap = \"{{{{ bull_price }}}} * 10 ** 6\"\nmonetary_premium_pct = 50\nprobability_capture_pct = 10\ntime_horizon_years = 10\n"
            ));
        }
    }

    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(doc.as_bytes()).unwrap();
    file.flush().unwrap();

    let book = ScenarioBook::load(file.path(), None).unwrap();
    assert_eq!(book.supply(), dec!(21000000));
    let gold = &book.scenario(ScenarioName::Base).unwrap().assets["Gold"];
    assert_eq!(gold.mcap, dec!(200000000000));

    let priced = ScenarioBook::load(file.path(), Some(dec!(50000))).unwrap();
    let gold = &priced.scenario(ScenarioName::Base).unwrap().assets["Gold"];
    assert_eq!(gold.mcap, dec!(100000000000));
}

#[test]
fn test_cyclic_document_is_fatal() {
    let doc = r#"{
        "global_settings": {"supply": "{{ a }}", "a": "{{ supply }}", "default_btc_price": 1},
        "scenarios": {}
    }"#;
    let err = ScenarioBook::parse(doc, schrodinger_model::scenario::DocumentFormat::Json, None)
        .unwrap_err();
    assert!(matches!(err, ScenarioError::Resolve(_)), "{err}");
    assert!(err.to_string().contains("->"));
}
