//! schrodinger-model: fair value of Bitcoin as a sink for monetary premium
//!
//! This library provides the core components for:
//! - Arithmetic expression evaluation for configuration values
//! - Placeholder resolution over a shared variable context
//! - Scenario documents (JSON or TOML) with resolved, validated defaults
//! - Live BTC price lookup with caching and fallback
//! - Present-value valuation and projected price path
//! - Slider-style controls and the dashboard they feed
//! - CLI and interactive session

pub mod cli;
pub mod config;
pub mod controls;
pub mod dashboard;
pub mod expr;
pub mod model;
pub mod price;
pub mod scenario;
pub mod session;
pub mod telemetry;
pub mod template;
