use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Price value - uses Decimal for precision
pub type Price = Decimal;

/// Quantity value - uses Decimal for precision
pub type Quantity = Decimal;

/// Cash amount (balances, P&L, fees)
pub type Money = Decimal;

/// Calendar date a journal record refers to (`YYYY-MM-DD` on the wire)
pub type TradeDate = NaiveDate;

/// Largest magnitude accepted for any quantity, price or cash amount (one trillion).
/// Products and running totals of values within this bound stay inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Round a percentage or ratio for display (2 decimal places, half away from zero)
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `part / whole * 100`, or zero when `whole` is zero or the ratio leaves `Decimal`'s range
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percent_of_zero_whole() {
        assert_eq!(percent_of(dec!(5), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_round2_midpoint() {
        assert_eq!(round2(dec!(25.345)), dec!(25.35));
        assert_eq!(round2(dec!(-2.655)), dec!(-2.66));
    }

    #[test]
    fn test_max_amount_is_one_trillion() {
        assert_eq!(MAX_AMOUNT, Decimal::from(1_000_000_000_000i64));
    }

    #[test]
    fn test_percent_of_tiny_whole() {
        let tiny = Decimal::new(1, 28);
        assert_eq!(percent_of(MAX_AMOUNT, tiny), Decimal::ZERO);
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(round2(percent_of(dec!(6.75), dec!(175.50))), dec!(3.85));
    }
}
