//! Money helpers.
//!
//! Prices move through the store as [`Decimal`] major units; the helpers
//! here cover the two places that need something else: display strings and
//! the minor-unit integers the backend expects for subtotals.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Formatter, Money, Params, Position, iso};

/// Format a major-unit amount for display, e.g. `ETB 1,234.00`.
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    let mut amount = amount.round_dp(2);
    amount.rescale(2);

    let money = Money::from_decimal(amount, iso::ETB);
    let params = Params {
        code: Some("ETB"),
        positions: &[Position::Code, Position::Space, Position::Amount],
        ..Params::default()
    };

    Formatter::money(&money, params)
}

/// Convert a major-unit amount to integer minor units (cents), rounding
/// half-away-from-zero at the second decimal place.
///
/// The cart total is a decimal, so callers sending a subtotal to the
/// backend (order creation, discount validation) must go through this
/// conversion explicitly.
#[must_use]
pub fn minor_units(amount: Decimal) -> i64 {
    (amount * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn formats_with_code_and_thousands_separator() {
        assert_eq!(format_price(Decimal::from(1234)), "ETB 1,234.00");
    }

    #[test]
    fn formats_fractional_amounts_to_two_places() -> TestResult {
        assert_eq!(format_price("99.5".parse()?), "ETB 99.50");
        assert_eq!(format_price("0.005".parse()?), "ETB 0.00");

        Ok(())
    }

    #[test]
    fn minor_units_scales_major_amounts() {
        assert_eq!(minor_units(Decimal::from(100)), 10_000);
        assert_eq!(minor_units(Decimal::ZERO), 0);
    }

    #[test]
    fn minor_units_rounds_half_away_from_zero() -> TestResult {
        assert_eq!(minor_units("12.345".parse()?), 1235);
        assert_eq!(minor_units("12.344".parse()?), 1234);

        Ok(())
    }
}
