//! Arithmetic expression evaluation
//!
//! Scenario documents may write numbers as text such as `"18e12"` or
//! `"{{ default_btc_price }} * 1.5"`. This module evaluates that text with a
//! small recursive-descent parser: decimal literals, `+ - * /`, `**` (or `^`)
//! and parentheses. Nothing else is accepted.

mod lexer;
mod parser;

pub use parser::{BinaryOp, Expr};

use rust_decimal::Decimal;
use thiserror::Error;

/// Expression parsing and evaluation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    /// Input contained nothing to evaluate
    #[error("empty expression")]
    Empty,
    /// A character outside the grammar
    #[error("unexpected character '{ch}' at offset {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    /// A numeric literal that does not fit a decimal
    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),
    /// A token in the wrong place
    #[error("unexpected token at offset {0}")]
    UnexpectedToken(usize),
    /// Input ended in the middle of an expression
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    /// Parentheses nested deeper than the parser allows
    #[error("expression nested deeper than {0} levels")]
    TooDeep(usize),
    /// More binary operators than the parser allows
    #[error("expression has more than {0} operators")]
    TooLong(usize),
    /// Division by zero
    #[error("division by zero")]
    DivisionByZero,
    /// Power with no real decimal result (e.g. negative base, fractional exponent)
    #[error("invalid power {base} ** {exponent}")]
    InvalidPower { base: Decimal, exponent: Decimal },
    /// Result exceeds the decimal range
    #[error("arithmetic overflow")]
    Overflow,
}

/// Parse and evaluate `input` in one step
pub fn evaluate(input: &str) -> Result<Decimal, ExprError> {
    Expr::parse(input)?.eval()
}
