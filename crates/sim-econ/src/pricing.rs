//! Pricing and recruiting formulas.
//!
//! Contract amounts go through `Decimal` so that the floor is taken on the exact
//! product of quantity, unit price and markup. Candidate formulas are plain `f64`
//! curves rounded to whole units.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors produced by pricing helpers.
#[derive(Debug, Error, PartialEq)]
pub enum EconError {
    /// Markups must be finite and non-negative.
    #[error("invalid markup: {0}")]
    InvalidMarkup(f64),
    /// Monetary values must be non-negative.
    #[error("invalid price or cost value")]
    InvalidPrice,
    /// Result does not fit the money type.
    #[error("amount overflows")]
    Overflow,
}

/// `floor(quantity × unit_price × (1 + markup))`, the magnitude of a contract.
///
/// Example:
/// assert_eq!(contract_amount(10, 12, 0.10), Ok(132));
pub fn contract_amount(quantity: u64, unit_price: i64, markup: f64) -> Result<i64, EconError> {
    if !markup.is_finite() || markup < 0.0 {
        return Err(EconError::InvalidMarkup(markup));
    }
    if unit_price < 0 {
        return Err(EconError::InvalidPrice);
    }
    let margin = Decimal::from_f64(markup).ok_or(EconError::InvalidMarkup(markup))?;
    let gross = Decimal::from(quantity)
        .checked_mul(Decimal::from(unit_price))
        .ok_or(EconError::Overflow)?;
    let total = gross
        .checked_mul(Decimal::ONE + margin)
        .ok_or(EconError::Overflow)?;
    total.floor().to_i64().ok_or(EconError::Overflow)
}

/// Units worth roughly `target_value` at `unit_price`, never less than one.
pub fn units_for_value(target_value: f64, unit_price: i64) -> u64 {
    let price = unit_price.max(1) as f64;
    let units = (target_value / price).floor();
    if units.is_finite() && units >= 1.0 {
        units.min(u64::MAX as f64) as u64
    } else {
        1
    }
}

/// Expected skill before noise: `5 × recruitment level + 2 × log10(company value + 1)`.
pub fn base_skill(max_recruitment_level: u32, company_value: i64) -> f64 {
    let value = company_value.max(0) as f64;
    f64::from(max_recruitment_level) * 5.0 + (value + 1.0).log10() * 2.0
}

/// Skill after a noise draw in `[-0.4, 0.6)`, scaled by 20 and clamped to 1..=100.
pub fn noisy_skill(base: f64, noise: f64) -> u32 {
    (base + noise * 20.0).round().clamp(1.0, 100.0) as u32
}

/// Daily salary: `round(50 + 2 × skill + sqrt(company value) / 10)`.
pub fn salary(skill_level: u32, company_value: i64) -> i64 {
    let value = company_value.max(0) as f64;
    (50.0 + f64::from(skill_level) * 2.0 + value.sqrt() / 10.0).round() as i64
}

/// One-time hiring fee: `salary × (5 + round(skill / 10))`.
pub fn hiring_fee(salary: i64, skill_level: u32) -> i64 {
    let multiplier = 5 + (f64::from(skill_level) / 10.0).round() as i64;
    salary * multiplier
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn contract_amount_floors() {
        assert_eq!(contract_amount(10, 12, 0.10), Ok(132));
        assert_eq!(contract_amount(3, 7, 0.19), Ok(24)); // 24.99
        assert_eq!(contract_amount(0, 500, 0.05), Ok(0));
    }

    #[test]
    fn contract_amount_rejects_bad_markup() {
        assert!(contract_amount(1, 1, f64::NAN).is_err());
        assert!(contract_amount(1, 1, -0.1).is_err());
        assert_eq!(contract_amount(1, -5, 0.1), Err(EconError::InvalidPrice));
    }

    #[test]
    fn units_never_below_one() {
        assert_eq!(units_for_value(0.0, 40), 1);
        assert_eq!(units_for_value(99.0, 40), 2);
        assert_eq!(units_for_value(500.0, 0), 500);
    }

    #[test]
    fn candidate_curve_at_starting_value() {
        // company value 12_500, one level-1 HR department
        let base = base_skill(1, 12_500);
        assert!((base - 13.19).abs() < 0.01, "{base}");
        assert_eq!(noisy_skill(base, 0.0), 13);
        assert_eq!(noisy_skill(base, -0.4), 5);
        assert_eq!(noisy_skill(0.0, -0.4), 1);
        assert_eq!(noisy_skill(200.0, 0.6), 100);
        let s = salary(13, 12_500);
        assert_eq!(s, 87); // 50 + 26 + 11.18
        assert_eq!(hiring_fee(s, 13), 87 * 6);
    }

    proptest! {
        #[test]
        fn amount_grows_with_quantity(q in 1u64..10_000, price in 1i64..5_000, m in 0.05f64..0.20) {
            let a = contract_amount(q, price, m).unwrap();
            let b = contract_amount(q + 1, price, m).unwrap();
            prop_assert!(b > a);
            prop_assert!(a >= q as i64 * price);
        }

        #[test]
        fn skill_in_range(level in 0u32..20, value in 0i64..10_000_000, noise in -0.4f64..0.6) {
            let s = noisy_skill(base_skill(level, value), noise);
            prop_assert!((1..=100).contains(&s));
        }
    }
}
