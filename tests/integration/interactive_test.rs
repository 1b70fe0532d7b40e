//! Line-oriented session

use crate::common::{sample_scenarios, StubSource};
use rust_decimal_macros::dec;
use schrodinger_model::cli::run_interactive;
use schrodinger_model::price::CachedPriceLookup;
use schrodinger_model::session::Session;

async fn transcript(input: &str) -> String {
    let session = Session::new(
        sample_scenarios(),
        CachedPriceLookup::new(StubSource::new(Some(dec!(90000)))),
    );
    let mut output = Vec::new();
    run_interactive(session, input.as_bytes(), &mut output)
        .await
        .unwrap();
    String::from_utf8(output).unwrap()
}

#[tokio::test]
async fn test_commands_redraw() {
    let out = transcript("rate 7\nset Real Estate.mcap=300\nscenario hyper\nquit\n").await;

    assert!(out.contains("Bearish scenario"));
    assert!(out.contains("Discount Rate:      7.00%"));
    assert!(out.contains("Hyper scenario"));
    assert!(!out.contains("error:"));
}

#[tokio::test]
async fn test_bad_input_keeps_session_alive() {
    let out = transcript("launch\nrate 99\nset Gold.colour=3\nhelp\n").await;

    assert_eq!(out.matches("error:").count(), 3);
    assert!(out.contains("Commands:"));
    // Only the initial render happened
    assert_eq!(out.matches("KEY METRICS").count(), 1);
}
