//! Tokenizer for arithmetic expressions

use super::ExprError;
use rust_decimal::Decimal;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TokenKind {
    Number(Decimal),
    Plus,
    Minus,
    Star,
    Slash,
    Pow,
    LParen,
    RParen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Token {
    pub kind: TokenKind,
    /// Byte offset in the source text
    pub pos: usize,
}

pub(super) fn tokenize(input: &str) -> Result<Vec<Token>, ExprError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        let kind = match c {
            b' ' | b'\t' | b'\r' | b'\n' => {
                i += 1;
                continue;
            }
            b'0'..=b'9' | b'.' => {
                let (value, end) = lex_number(input, i)?;
                tokens.push(Token {
                    kind: TokenKind::Number(value),
                    pos: i,
                });
                i = end;
                continue;
            }
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' if bytes.get(i + 1) == Some(&b'*') => {
                tokens.push(Token {
                    kind: TokenKind::Pow,
                    pos: i,
                });
                i += 2;
                continue;
            }
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'^' => TokenKind::Pow,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            _ => {
                let ch = input[i..].chars().next().unwrap_or('\u{FFFD}');
                return Err(ExprError::UnexpectedChar { ch, pos: i });
            }
        };
        tokens.push(Token { kind, pos: i });
        i += 1;
    }

    Ok(tokens)
}

/// Lex a decimal literal starting at `start`, returning its value and end offset.
///
/// Accepts `12`, `1_000`, `0.5`, `.5`, `18e12`, `5E-2`.
fn lex_number(input: &str, start: usize) -> Result<(Decimal, usize), ExprError> {
    let bytes = input.as_bytes();
    let mut i = start;
    let mut seen_digit = false;
    let mut seen_dot = false;

    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => seen_digit = true,
            b'_' if seen_digit => {}
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        i += 1;
    }

    let mut scientific = false;
    if seen_digit && i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        scientific = true;
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return Err(ExprError::InvalidNumber(input[start..i].to_string()));
        }
    }

    let literal = &input[start..i];
    if !seen_digit {
        return Err(ExprError::InvalidNumber(literal.to_string()));
    }

    let cleaned = literal.replace('_', "").to_ascii_lowercase();
    let parsed = if scientific {
        Decimal::from_scientific(&cleaned)
    } else {
        Decimal::from_str(&cleaned)
    };

    parsed
        .map(|value| (value, i))
        .map_err(|_| ExprError::InvalidNumber(literal.to_string()))
}
