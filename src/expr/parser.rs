//! Recursive-descent parser and evaluator
//!
//! Grammar:
//!
//! ```text
//! expr  := term (('+' | '-') term)*
//! term  := unary (('*' | '/') unary)*
//! unary := ('+' | '-') unary | power
//! power := atom (('**' | '^') unary)?
//! atom  := NUMBER | '(' expr ')'
//! ```

use super::lexer::{tokenize, Token, TokenKind};
use super::ExprError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};

/// Maximum nesting of parentheses and unary operators
const MAX_DEPTH: usize = 64;

/// Maximum number of binary operators in one expression
const MAX_OPERATORS: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Parsed arithmetic expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(Decimal),
    Neg(Box<Expr>),
    Binary(Box<Expr>, BinaryOp, Box<Expr>),
}

impl Expr {
    /// Parse `input` into an expression tree
    pub fn parse(input: &str) -> Result<Self, ExprError> {
        let tokens = tokenize(input)?;
        if tokens.is_empty() {
            return Err(ExprError::Empty);
        }

        let mut parser = Parser {
            tokens: &tokens,
            cursor: 0,
            depth: 0,
            operators: 0,
        };
        let expr = parser.expr()?;

        match parser.peek() {
            Some(token) => Err(ExprError::UnexpectedToken(token.pos)),
            None => Ok(expr),
        }
    }

    /// Evaluate with checked decimal arithmetic
    pub fn eval(&self) -> Result<Decimal, ExprError> {
        match self {
            Expr::Number(value) => Ok(*value),
            Expr::Neg(inner) => Ok(-inner.eval()?),
            Expr::Binary(lhs, op, rhs) => {
                let a = lhs.eval()?;
                let b = rhs.eval()?;
                match op {
                    BinaryOp::Add => a.checked_add(b).ok_or(ExprError::Overflow),
                    BinaryOp::Sub => a.checked_sub(b).ok_or(ExprError::Overflow),
                    BinaryOp::Mul => a.checked_mul(b).ok_or(ExprError::Overflow),
                    BinaryOp::Div => {
                        if b.is_zero() {
                            return Err(ExprError::DivisionByZero);
                        }
                        a.checked_div(b).ok_or(ExprError::Overflow)
                    }
                    BinaryOp::Pow => power(a, b),
                }
            }
        }
    }
}

fn power(base: Decimal, exponent: Decimal) -> Result<Decimal, ExprError> {
    if exponent.fract().is_zero() {
        let exp = exponent.to_i64().ok_or(ExprError::Overflow)?;
        if base.is_zero() && exp < 0 {
            return Err(ExprError::DivisionByZero);
        }
        return base
            .checked_powi(exp)
            .map_or_else(|| out_of_range(base, exponent), Ok);
    }

    if base.is_sign_negative() && !base.is_zero() {
        return Err(ExprError::InvalidPower { base, exponent });
    }
    if base.is_zero() {
        return if exponent.is_sign_positive() {
            Ok(Decimal::ZERO)
        } else {
            Err(ExprError::DivisionByZero)
        };
    }
    base.checked_powd(exponent)
        .map_or_else(|| out_of_range(base, exponent), Ok)
}

/// Result of a power too small or too large for a decimal.
///
/// Magnitudes below the smallest representable decimal flush to zero.
fn out_of_range(base: Decimal, exponent: Decimal) -> Result<Decimal, ExprError> {
    let shrinking = base.abs() < Decimal::ONE;
    if shrinking == exponent.is_sign_positive() {
        Ok(Decimal::ZERO)
    } else {
        Err(ExprError::Overflow)
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    cursor: usize,
    depth: usize,
    operators: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.cursor).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn descend(&mut self) -> Result<(), ExprError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExprError::TooDeep(MAX_DEPTH));
        }
        Ok(())
    }

    fn count_operator(&mut self) -> Result<(), ExprError> {
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            return Err(ExprError::TooLong(MAX_OPERATORS));
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.term()?;
        while let Some(token) = self.peek() {
            let op = match token.kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.cursor += 1;
            self.count_operator()?;
            let rhs = self.term()?;
            lhs = Expr::Binary(Box::new(lhs), op, Box::new(rhs));
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.unary()?;
        while let Some(token) = self.peek() {
            let op = match token.kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => break,
            };
            self.cursor += 1;
            self.count_operator()?;
            let rhs = self.unary()?;
            lhs = Expr::Binary(Box::new(lhs), op, Box::new(rhs));
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, ExprError> {
        match self.peek().map(|t| t.kind) {
            Some(TokenKind::Minus) => {
                self.cursor += 1;
                self.descend()?;
                let inner = self.unary()?;
                self.depth -= 1;
                Ok(Expr::Neg(Box::new(inner)))
            }
            Some(TokenKind::Plus) => {
                self.cursor += 1;
                self.descend()?;
                let inner = self.unary()?;
                self.depth -= 1;
                Ok(inner)
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, ExprError> {
        let base = self.atom()?;
        if let Some(Token {
            kind: TokenKind::Pow,
            ..
        }) = self.peek()
        {
            self.cursor += 1;
            self.descend()?;
            let exponent = self.unary()?;
            self.depth -= 1;
            return Ok(Expr::Binary(
                Box::new(base),
                BinaryOp::Pow,
                Box::new(exponent),
            ));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Expr, ExprError> {
        let token = self.next().ok_or(ExprError::UnexpectedEnd)?;
        match token.kind {
            TokenKind::Number(value) => Ok(Expr::Number(value)),
            TokenKind::LParen => {
                self.descend()?;
                let inner = self.expr()?;
                self.depth -= 1;
                match self.next() {
                    Some(Token {
                        kind: TokenKind::RParen,
                        ..
                    }) => Ok(inner),
                    Some(other) => Err(ExprError::UnexpectedToken(other.pos)),
                    None => Err(ExprError::UnexpectedEnd),
                }
            }
            _ => Err(ExprError::UnexpectedToken(token.pos)),
        }
    }
}
