//! Serde helpers for numeric schema fields
//!
//! Numeric fields accept a JSON/TOML number or arithmetic text such as
//! `"18e12"` or `"100000 * 1.5"`. Text in any other field is left alone.

use crate::expr;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::{self, Deserializer, Visitor};
use std::fmt;

struct DecimalVisitor;

impl<'de> Visitor<'de> for DecimalVisitor {
    type Value = Decimal;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or an arithmetic expression")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
        Decimal::try_from(v).map_err(|e| E::custom(format!("{v}: {e}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
        expr::evaluate(v).map_err(|e| E::custom(format!("'{v}': {e}")))
    }
}

/// Deserialize a decimal from a number or an expression
pub fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(DecimalVisitor)
}

/// Deserialize a non-negative whole number from a number or an expression
pub fn whole<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = decimal(deserializer)?;
    if !value.fract().is_zero() {
        return Err(de::Error::custom(format!("expected a whole number, got {value}")));
    }
    value
        .to_u32()
        .ok_or_else(|| de::Error::custom(format!("{value} is out of range")))
}
