//! Integration tests

mod common;
mod interactive_test;
mod price_test;
mod session_test;
mod valuation_test;
