//! Monetary amount validation
//!
//! Amounts are `Decimal`s in major units (e.g. dollars) with at most two
//! decimal places. Decimal checks are exact; the `f64` entry points accept a
//! small tolerance after scaling by 100 to absorb binary representation error
//! (e.g. `0.30 * 100 == 30.000000000000004`).

use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use super::result::{Error, Result};

/// Number of decimal places an amount may carry
pub const MAX_DECIMAL_PLACES: u32 = 2;

/// Minor units (cents) per major unit
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Allowed distance from a whole number of cents for `f64` amounts
pub const AMOUNT_TOLERANCE: f64 = 1e-7;

/// True when the amount has no fractional part finer than one cent.
/// Trailing zeros don't count: `20.570` passes.
pub fn has_cent_precision(amount: Decimal) -> bool {
    amount.round_dp(MAX_DECIMAL_PLACES) == amount
}

/// A valid amount is strictly positive with at most two decimal places
pub fn is_amount_valid(amount: Decimal) -> bool {
    amount > Decimal::ZERO && has_cent_precision(amount)
}

/// Float version of [`has_cent_precision`], within [`AMOUNT_TOLERANCE`]
pub fn has_cent_precision_f64(amount: f64) -> bool {
    if !amount.is_finite() {
        return false;
    }
    let scaled = amount * MINOR_UNITS_PER_MAJOR as f64;
    (scaled - scaled.round()).abs() <= AMOUNT_TOLERANCE
}

/// Float version of [`is_amount_valid`]; NaN and infinities are invalid
pub fn is_amount_valid_f64(amount: f64) -> bool {
    amount > 0.0 && has_cent_precision_f64(amount)
}

/// Convert a float amount to an exact two-decimal `Decimal`
///
/// Fails when the float is not a valid amount.
pub fn amount_from_f64(amount: f64) -> Result<Decimal> {
    if !is_amount_valid_f64(amount) {
        return Err(Error::invalid_argument(format!("Invalid amount: {}", amount)));
    }
    Decimal::from_f64(amount)
        .map(|d| d.round_dp(MAX_DECIMAL_PLACES).normalize())
        .ok_or_else(|| Error::invalid_argument(format!("Amount out of range: {}", amount)))
}

/// Parse a decimal string such as `"100.30"` (no validity check beyond syntax)
pub fn parse_amount(value: &str) -> Result<Decimal> {
    Decimal::from_str(value.trim())
        .map_err(|_| Error::invalid_argument(format!("Invalid amount: {}", value)))
}

/// Amount in integer minor units, or `None` if it has sub-cent precision or
/// does not fit in an `i64`
pub fn to_cents(amount: Decimal) -> Option<i64> {
    if !has_cent_precision(amount) {
        return None;
    }
    amount
        .checked_mul(Decimal::from(MINOR_UNITS_PER_MAJOR))?
        .to_i64()
}

/// Build an amount from integer minor units
pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, MAX_DECIMAL_PLACES)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_valid_decimal_amounts() {
        assert!(is_amount_valid(dec("100")));
        assert!(is_amount_valid(dec("3000.87")));
        assert!(is_amount_valid(dec("300.3")));
        assert!(is_amount_valid(dec("0.30")));
        assert!(is_amount_valid(dec("1000000")));
        assert!(is_amount_valid(dec("20.570")));
        assert!(is_amount_valid(dec("0.01")));
    }

    #[test]
    fn test_invalid_decimal_amounts() {
        assert!(!is_amount_valid(dec("100.1200007")));
        assert!(!is_amount_valid(dec("0.123")));
        assert!(!is_amount_valid(dec("0.001")));
        assert!(!is_amount_valid(dec("-50")));
        assert!(!is_amount_valid(Decimal::ZERO));
    }

    #[test]
    fn test_float_amounts() {
        assert!(is_amount_valid_f64(100.0));
        assert!(is_amount_valid_f64(3000.87));
        assert!(is_amount_valid_f64(0.30));
        assert!(is_amount_valid_f64(20.57));
        assert!(!is_amount_valid_f64(100.1200007));
        assert!(!is_amount_valid_f64(0.123));
        assert!(!is_amount_valid_f64(0.0));
        assert!(!is_amount_valid_f64(-50.0));
        assert!(!is_amount_valid_f64(f64::NAN));
        assert!(!is_amount_valid_f64(f64::INFINITY));
    }

    #[test]
    fn test_amount_from_f64() {
        assert_eq!(amount_from_f64(0.30).unwrap(), dec("0.30"));
        assert_eq!(amount_from_f64(3000.87).unwrap(), dec("3000.87"));
        assert!(amount_from_f64(0.123).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 100.30 ").unwrap(), dec("100.3"));
        assert!(parse_amount("ten").is_err());
    }

    #[test]
    fn test_cents() {
        assert_eq!(to_cents(dec("100.30")), Some(10030));
        assert_eq!(to_cents(dec("0.01")), Some(1));
        assert_eq!(to_cents(dec("0.001")), None);
        assert_eq!(from_cents(10030), dec("100.30"));
    }
}
