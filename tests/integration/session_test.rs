//! Recompute passes through both caches

use crate::common::{sample_scenarios, StubSource};
use rust_decimal_macros::dec;
use schrodinger_model::controls::{AssetField, Override};
use schrodinger_model::price::{CachedPriceLookup, PriceOrigin};
use schrodinger_model::scenario::ScenarioName;
use schrodinger_model::session::{Session, SessionError};

#[tokio::test]
async fn test_repeated_passes_hit_both_caches() {
    let source = StubSource::new(Some(dec!(90000)));
    let mut session = Session::new(sample_scenarios(), CachedPriceLookup::new(source.clone()));

    let first = session.render_pass().await.unwrap();
    let second = session.render_pass().await.unwrap();

    assert_eq!(first.valuation, second.valuation);
    assert_eq!(first.price.origin, PriceOrigin::Live);
    assert_eq!(source.calls(), 1);
    // Unpriced and priced resolutions, each resolved once
    assert_eq!(session.scenario_cache().stats(), (2, 2));
}

#[tokio::test]
async fn test_default_scenario_and_fallback_price() {
    let source = StubSource::new(None);
    let mut session = Session::new(sample_scenarios(), CachedPriceLookup::new(source));

    let dashboard = session.render_pass().await.unwrap();
    assert_eq!(dashboard.scenario, ScenarioName::Bearish);
    assert_eq!(dashboard.price.price, dec!(100000));
    assert_eq!(dashboard.warnings.len(), 1);
}

#[tokio::test]
async fn test_edits_persist_until_scenario_switch() {
    let source = StubSource::new(Some(dec!(90000)));
    let mut session = Session::new(sample_scenarios(), CachedPriceLookup::new(source))
        .with_scenario(ScenarioName::Base);

    let seeded = session.render_pass().await.unwrap();

    let controls = session.controls_mut().await.unwrap();
    controls
        .apply(&Override {
            asset: "gold".to_string(),
            field: AssetField::Probability,
            value: dec!(100),
        })
        .unwrap();
    let edited = session.render_pass().await.unwrap();
    assert!(edited.valuation.fair_price > seeded.valuation.fair_price);

    let again = session.render_pass().await.unwrap();
    assert_eq!(again.valuation, edited.valuation);

    session.select_scenario(ScenarioName::Hyper);
    session.select_scenario(ScenarioName::Base);
    let reseeded = session.render_pass().await.unwrap();
    assert_eq!(reseeded.valuation, seeded.valuation);
}

#[tokio::test]
async fn test_reset_restores_defaults() {
    let source = StubSource::new(Some(dec!(90000)));
    let mut session = Session::new(sample_scenarios(), CachedPriceLookup::new(source))
        .with_fixed_price(Some(dec!(50000)));

    let seeded = session.render_pass().await.unwrap();
    assert_eq!(seeded.price.origin, PriceOrigin::Manual);

    session
        .controls_mut()
        .await
        .unwrap()
        .set_discount_rate(dec!(0))
        .unwrap();
    assert_ne!(session.render_pass().await.unwrap().valuation, seeded.valuation);

    session.reset();
    assert_eq!(session.render_pass().await.unwrap().valuation, seeded.valuation);
}

#[tokio::test]
async fn test_out_of_range_edit_is_rejected() {
    let source = StubSource::new(Some(dec!(90000)));
    let mut session = Session::new(sample_scenarios(), CachedPriceLookup::new(source));

    let controls = session.controls_mut().await.unwrap();
    assert!(controls.set_discount_rate(dec!(30)).is_err());
    assert!(controls.apply(&"Gold.time=0".parse().unwrap()).is_err());
}

#[tokio::test]
async fn test_missing_document_is_fatal() {
    let source = StubSource::new(Some(dec!(90000)));
    let mut session = Session::new("/nonexistent/scenarios.json", CachedPriceLookup::new(source));
    assert!(matches!(
        session.render_pass().await,
        Err(SessionError::Scenario(_))
    ));
}
