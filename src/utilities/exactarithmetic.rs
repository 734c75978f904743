//! Exact arithmetic for budget shares.
//!
//! Budgets are human-entered decimal fractions such as `0.01`. Summing and
//! dividing them as binary floats drifts (`0.1 + 0.2 != 0.3`), so every
//! computation on shares happens on exact rationals and only the final value
//! is rounded back to an `f64`.

use rug::{ops::Pow, Float, Integer, Rational};

use crate::error::{AllocError, Result};

/// Mantissa bits of an `f64`; shares leave the exact domain at this precision.
const PLAIN_PRECISION: u32 = 53;

/// Converts a plain value to an exact rational.
///
/// The value is read through its shortest round-trip decimal representation,
/// so `0.01` becomes exactly `1/100` rather than the binary approximation the
/// `f64` actually stores.
/// ## Errors
/// Returns `NonFiniteValue` for NaN and infinities.
pub fn to_exact(value: f64) -> Result<Rational> {
    if !value.is_finite() {
        return Err(AllocError::NonFiniteValue(value));
    }
    // Display for f64 never uses exponent notation.
    let text = value.to_string();
    let (whole, fraction) = match text.find('.') {
        Some(dot) => (&text[..dot], &text[dot + 1..]),
        None => (&text[..], ""),
    };
    let digits = format!("{}{}", whole, fraction);
    let numerator = Integer::from_str_radix(&digits, 10)
        .map_err(|_| AllocError::NonFiniteValue(value))?;
    let denominator = Integer::from(10).pow(fraction.len() as u32);
    Ok(Rational::from((numerator, denominator)))
}

/// Rounds an exact rational to the nearest plain value.
pub fn to_plain(value: &Rational) -> f64 {
    Float::with_val(PLAIN_PRECISION, value).to_f64()
}

/// Exact sum of the given rationals.
pub fn exact_sum<'a, I>(values: I) -> Rational
where
    I: IntoIterator<Item = &'a Rational>,
{
    let mut total = Rational::new();
    for v in values {
        total += v;
    }
    total
}

/// Splits `remaining` evenly across `count` recipients.
///
/// Returns `None` when there is nobody to split across.
pub fn equal_share(remaining: &Rational, count: usize) -> Option<Rational> {
    if count == 0 {
        return None;
    }
    Some(remaining.clone() / Rational::from(count as u64))
}
