//! Document walker

use super::placeholder::substitute;
use super::{Context, ResolveError};
use crate::expr;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{Number, Value};

/// What to do with a string once its placeholders are substituted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Coercion {
    /// Evaluate every string as arithmetic; keep the text when that fails
    #[default]
    Expressions,
    /// Substitute only. Numeric fields are evaluated later by the schema.
    Off,
}

/// Substitutes context variables throughout a nested document
#[derive(Debug, Clone)]
pub struct Resolver {
    context: Context,
    coercion: Coercion,
}

impl Resolver {
    pub fn new(context: Context) -> Self {
        Self {
            context,
            coercion: Coercion::default(),
        }
    }

    pub fn with_coercion(mut self, coercion: Coercion) -> Self {
        self.coercion = coercion;
        self
    }

    /// Resolve every string in `value`.
    ///
    /// Mappings and sequences are walked recursively; other scalars are
    /// returned unchanged.
    pub fn resolve(&self, value: &Value) -> Result<Value, ResolveError> {
        match value {
            Value::String(s) => self.resolve_str(s),
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| Ok((k.clone(), self.resolve(v)?)))
                .collect::<Result<serde_json::Map<_, _>, _>>()
                .map(Value::Object),
            other => Ok(other.clone()),
        }
    }

    /// Resolve a single template string
    pub fn resolve_str(&self, text: &str) -> Result<Value, ResolveError> {
        let substituted = substitute(text, |name| self.context.text(name))?;
        Ok(coerce(substituted, self.coercion))
    }
}

pub(super) fn coerce(text: String, coercion: Coercion) -> Value {
    match coercion {
        Coercion::Off => Value::String(text),
        Coercion::Expressions => match expr::evaluate(&text) {
            Ok(number) => decimal_to_value(number).unwrap_or(Value::String(text)),
            Err(_) => Value::String(text),
        },
    }
}

/// Integral decimals become JSON integers, others JSON floats
fn decimal_to_value(number: Decimal) -> Option<Value> {
    if number.fract().is_zero() {
        if let Some(int) = number.to_i64() {
            return Some(Value::Number(Number::from(int)));
        }
    }
    number
        .to_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
}
