//! Money calculation utilities using rust_decimal for precision
//!
//! All settlement math is done using `Decimal` internally, then converted to
//! `f64` for storage/serialization. Settlement amounts are whole currency
//! units; only profit rates keep one decimal place.

use rust_decimal::prelude::*;

/// Settlement amounts are reported in whole currency units
pub const AMOUNT_PLACES: u32 = 0;

/// Profit rates are reported with one decimal place
pub const RATE_PLACES: u32 = 1;

/// Convert f64 to Decimal for calculation
///
/// Input values should be validated finite at the boundary. If NaN/Infinity
/// somehow reaches here, logs an error and returns ZERO to avoid silent data
/// corruption in monetary calculations.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64, rounded to whole currency units (half-up)
#[inline]
pub fn to_amount(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(AMOUNT_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        // Decimal values always fit in f64
        .expect("rounded Decimal is always representable as f64")
}

/// Convert Decimal back to f64, rounded to one decimal place (half-up)
#[inline]
pub fn to_rate(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(RATE_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .expect("rounded Decimal is always representable as f64")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_decimal_precision() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let sum_f64 = 0.1_f64 + 0.2_f64;
        assert_ne!(sum_f64, 0.3);

        let sum_dec = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(sum_dec, Decimal::new(3, 1));
    }

    #[test]
    fn test_accumulation_precision() {
        // Sum 0.01 one hundred thousand times
        let mut total = Decimal::ZERO;
        for _ in 0..100_000 {
            total += to_decimal(0.01);
        }
        assert_eq!(to_amount(total), 1000.0);
    }

    #[test]
    fn test_amount_rounds_half_up() {
        assert_eq!(to_amount(to_decimal(299.5)), 300.0);
        assert_eq!(to_amount(to_decimal(299.4)), 299.0);
    }

    #[test]
    fn test_rate_rounds_to_one_place() {
        assert_eq!(to_rate(to_decimal(33.3333)), 33.3);
        assert_eq!(to_rate(to_decimal(66.6666)), 66.7);
        assert_eq!(to_rate(to_decimal(40.05)), 40.1);
    }
}
