//! # Money and Tax Arithmetic
//!
//! Published money figures round to two decimal places, midpoint away from
//! zero, matching what the register prints. Intermediate arithmetic keeps
//! full precision — [`round_money`] is applied once per published figure,
//! never re-fed into further computation of the same total.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Round a currency amount to cents for display or the wire.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// A tax rate configuration error.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TaxRateError {
    /// The percentage string did not parse as a decimal number.
    #[error("invalid tax percentage: {0:?}")]
    Unparseable(String),
    /// Negative rates are not a thing the register supports.
    #[error("tax percentage must not be negative: {0}")]
    Negative(Decimal),
}

/// Sales tax rate, stored as a fraction (8.25% ⇒ 0.0825).
///
/// The two kiosk surfaces publish different rates, so the rate is
/// configuration carried in `AppConfig` / passed into `Cart::totals` — never
/// a universal constant baked into the math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String)]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// Build a rate from a percentage figure (`8.25` ⇒ 8.25%).
    pub fn from_percent(percent: Decimal) -> Result<Self, TaxRateError> {
        if percent.is_sign_negative() {
            return Err(TaxRateError::Negative(percent));
        }
        Ok(Self(percent / Decimal::ONE_HUNDRED))
    }

    /// Parse a percentage string, e.g. `"6.25"`.
    pub fn parse_percent(s: &str) -> Result<Self, TaxRateError> {
        let percent: Decimal = s
            .trim()
            .parse()
            .map_err(|_| TaxRateError::Unparseable(s.to_string()))?;
        Self::from_percent(percent)
    }

    /// The rate as a fraction.
    pub fn fraction(&self) -> Decimal {
        self.0
    }

    /// Tax owed on a subtotal, rounded to cents.
    pub fn tax_on(&self, subtotal: Decimal) -> Decimal {
        round_money(subtotal * self.0)
    }
}

/// The published money figures for one order.
///
/// Each field is already rounded to cents; `total` is the exact sum of the
/// published `subtotal`, `tax`, and `tip` so the receipt always adds up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderTotals {
    /// Sum of line unit prices × quantities.
    #[schema(value_type = String)]
    pub subtotal: Decimal,
    /// Sales tax on the subtotal.
    #[schema(value_type = String)]
    pub tax: Decimal,
    /// Gratuity, zero when none was given.
    #[schema(value_type = String)]
    pub tip: Decimal,
    /// subtotal + tax + tip.
    #[schema(value_type = String)]
    pub total: Decimal,
}

impl OrderTotals {
    /// Compute published totals from a raw (unrounded) subtotal.
    pub fn compute(raw_subtotal: Decimal, rate: TaxRate, tip: Option<Decimal>) -> Self {
        let subtotal = round_money(raw_subtotal);
        let tax = rate.tax_on(subtotal);
        let tip = round_money(tip.unwrap_or(Decimal::ZERO));
        Self {
            subtotal,
            tax,
            tip,
            total: subtotal + tax + tip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn round_money_half_up() {
        assert_eq!(round_money(dec!(1.2705)), dec!(1.27));
        assert_eq!(round_money(dec!(1.275)), dec!(1.28));
        assert_eq!(round_money(dec!(1.2)), dec!(1.20));
    }

    #[test]
    fn tax_rate_from_percent() {
        let rate = TaxRate::from_percent(dec!(8.25)).unwrap();
        assert_eq!(rate.fraction(), dec!(0.0825));
    }

    #[test]
    fn tax_rate_parse_percent() {
        let rate = TaxRate::parse_percent("6.25").unwrap();
        assert_eq!(rate.fraction(), dec!(0.0625));
        assert!(TaxRate::parse_percent("six").is_err());
        assert_eq!(
            TaxRate::parse_percent("-1"),
            Err(TaxRateError::Negative(dec!(-1)))
        );
    }

    #[test]
    fn totals_published_example() {
        // One $7.70 line, quantity 2, at 8.25%.
        let rate = TaxRate::from_percent(dec!(8.25)).unwrap();
        let totals = OrderTotals::compute(dec!(7.70) * Decimal::TWO, rate, None);
        assert_eq!(totals.subtotal, dec!(15.40));
        assert_eq!(totals.tax, dec!(1.27));
        assert_eq!(totals.total, dec!(16.67));
        assert_eq!(totals.tip, Decimal::ZERO);
    }

    #[test]
    fn totals_include_tip() {
        let rate = TaxRate::from_percent(dec!(6.25)).unwrap();
        let totals = OrderTotals::compute(dec!(10.00), rate, Some(dec!(2)));
        assert_eq!(totals.subtotal, dec!(10.00));
        assert_eq!(totals.tax, dec!(0.63));
        assert_eq!(totals.tip, dec!(2.00));
        assert_eq!(totals.total, dec!(12.63));
    }

    #[test]
    fn totals_invariants() {
        let rate = TaxRate::from_percent(dec!(8.25)).unwrap();
        for raw in [dec!(0.01), dec!(3.333), dec!(99.999), dec!(1234.56)] {
            let t = OrderTotals::compute(raw, rate, Some(dec!(1.50)));
            assert!(t.subtotal >= Decimal::ZERO);
            assert!(t.total >= t.subtotal);
            assert_eq!(t.total, t.subtotal + t.tax + t.tip);
        }
    }
}
