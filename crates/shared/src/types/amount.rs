//! Decimal amount helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Upstream reports carry balances as strings; they are parsed straight into
//! `rust_decimal::Decimal`.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parses an upstream balance string.
///
/// Thousands separators and surrounding whitespace are tolerated. Anything
/// that still does not parse yields zero, which callers treat as "no balance".
#[must_use]
pub fn parse_amount(raw: &str) -> Decimal {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .unwrap_or(Decimal::ZERO)
}

/// Returns true if `|value| < tolerance`.
#[must_use]
pub fn within_tolerance(value: Decimal, tolerance: Decimal) -> bool {
    value.abs() < tolerance
}
