//! Input validation.
//!
//! Turns a [`RawInput`] into a [`CalculationInput`], coercing text and numbers
//! to decimals and applying the per-field bounds. Every field is checked; the
//! result lists all violations rather than the first one.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use crate::error::{ValidationErrors, ViolationKind};
use crate::types::{CalculationInput, Currency, Field, RawInput, RawValue};

/// Validates a raw input record.
///
/// A missing currency defaults to EUR. Numeric fields must be present,
/// coercible to a finite decimal, and within the field's bounds.
///
/// # Errors
///
/// Returns one violation per invalid field, in form order.
pub fn validate(raw: &RawInput) -> Result<CalculationInput, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let currency = coerce_currency(raw.get(Field::Currency))
        .map_err(|kind| errors.push(Field::Currency, kind))
        .ok();

    let mut numbers = [Decimal::ZERO; 5];
    for (slot, field) in numbers.iter_mut().zip(Field::NUMERIC) {
        match coerce_number(raw.get(field)).and_then(|v| check_bounds(field, v)) {
            Ok(value) => *slot = value,
            Err(kind) => errors.push(field, kind),
        }
    }

    let Some(currency) = currency.filter(|_| errors.is_empty()) else {
        debug!(invalid_fields = errors.len(), "input rejected");
        return Err(errors);
    };

    let [av_purchase_value, fulfillment_cost, returns_per_year, customer_terms, referrals] =
        numbers;
    CalculationInput::new(
        currency,
        av_purchase_value,
        fulfillment_cost,
        returns_per_year,
        customer_terms,
        referrals,
    )
}

/// Checks a coerced value against the field's bounds.
///
/// The lower bound is reported when both could apply.
pub fn check_bounds(field: Field, value: Decimal) -> Result<Decimal, ViolationKind> {
    match field.bounds().into_iter().find(|b| !b.admits(value)) {
        Some(bound) => Err(ViolationKind::OutOfRange(bound)),
        None => Ok(value),
    }
}

/// Coerces a raw value to a decimal.
///
/// Text is trimmed and may use plain or scientific notation. A number is
/// coerced through its shortest scientific spelling, so `1e-40` is rejected
/// the same way whether it arrives as a number or as text. Missing or blank
/// values, unparsable text, non-finite numbers, and magnitudes outside the
/// decimal's 28-digit scale are not numbers. A blank value is never read as 0.
pub fn coerce_number(value: Option<&RawValue>) -> Result<Decimal, ViolationKind> {
    match value {
        None => Err(ViolationKind::NotANumber),
        Some(RawValue::Number(n)) => decimal_from_f64(*n),
        Some(RawValue::Text(text)) => parse_decimal(text),
    }
}

fn coerce_currency(value: Option<&RawValue>) -> Result<Currency, ViolationKind> {
    match value {
        None => Ok(Currency::default()),
        Some(RawValue::Text(code)) => Currency::from_code(code).ok_or(ViolationKind::InvalidEnum),
        Some(RawValue::Number(_)) => Err(ViolationKind::InvalidEnum),
    }
}

fn decimal_from_f64(n: f64) -> Result<Decimal, ViolationKind> {
    if !n.is_finite() {
        return Err(ViolationKind::NotANumber);
    }
    parse_decimal(&format!("{n:e}"))
}

fn parse_decimal(text: &str) -> Result<Decimal, ViolationKind> {
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);

    // Decimal's parser tolerates separators that a number field would not.
    let well_formed = digits.starts_with(|c: char| c.is_ascii_digit() || c == '.')
        && digits
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !well_formed {
        return Err(ViolationKind::NotANumber);
    }

    let number = trimmed.strip_prefix('+').unwrap_or(trimmed);
    Decimal::from_str(number)
        .or_else(|_| Decimal::from_scientific(number))
        .map_err(|_| ViolationKind::NotANumber)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Bound;
    use rust_decimal_macros::dec;

    fn sample() -> RawInput {
        RawInput::new()
            .with(Field::Currency, "EUR")
            .with(Field::AvPurchaseValue, "1000")
            .with(Field::FulfillmentCost, "20")
            .with(Field::ReturnsPerYear, "8")
            .with(Field::CustomerTerms, "5")
            .with(Field::Referrals, "1")
    }

    #[test]
    fn test_valid_text_input() {
        let input = validate(&sample()).unwrap();
        assert_eq!(input.currency(), Currency::EUR);
        assert_eq!(input.av_purchase_value(), dec!(1000));
        assert_eq!(input.fulfillment_cost(), dec!(20));
        assert_eq!(input.returns_per_year(), dec!(8));
        assert_eq!(input.customer_terms(), dec!(5));
        assert_eq!(input.referrals(), dec!(1));
    }

    #[test]
    fn test_valid_numeric_input() {
        let raw = RawInput::new()
            .with(Field::AvPurchaseValue, 49.5)
            .with(Field::FulfillmentCost, 12)
            .with(Field::ReturnsPerYear, 0.5)
            .with(Field::CustomerTerms, 2)
            .with(Field::Referrals, 0);
        let input = validate(&raw).unwrap();
        assert_eq!(input.av_purchase_value(), dec!(49.5));
        assert_eq!(input.returns_per_year(), dec!(0.5));
    }

    #[test]
    fn test_missing_currency_defaults_to_eur() {
        let mut raw = sample();
        raw.clear(Field::Currency);
        assert_eq!(validate(&raw).unwrap().currency(), Currency::EUR);
    }

    #[test]
    fn test_currency_rejections() {
        let raw = sample().with(Field::Currency, "JPY");
        let errors = validate(&raw).unwrap_err();
        assert_eq!(errors.get(Field::Currency), Some(ViolationKind::InvalidEnum));

        let raw = sample().with(Field::Currency, 840);
        let errors = validate(&raw).unwrap_err();
        assert_eq!(errors.get(Field::Currency), Some(ViolationKind::InvalidEnum));
    }

    #[test]
    fn test_not_a_number() {
        for text in ["", "   ", "abc", "12abc", "1,000", "1_000", "+-3", "NaN", "Infinity"] {
            assert_eq!(
                coerce_number(Some(&RawValue::from(text))),
                Err(ViolationKind::NotANumber),
                "{text:?} should not coerce"
            );
        }
        assert_eq!(coerce_number(None), Err(ViolationKind::NotANumber));
        assert_eq!(
            coerce_number(Some(&RawValue::Number(f64::NAN))),
            Err(ViolationKind::NotANumber)
        );
        assert_eq!(
            coerce_number(Some(&RawValue::Number(f64::INFINITY))),
            Err(ViolationKind::NotANumber)
        );
    }

    #[test]
    fn test_coercion_forms() {
        assert_eq!(coerce_number(Some(&RawValue::from(" 42 "))), Ok(dec!(42)));
        assert_eq!(coerce_number(Some(&RawValue::from("+3"))), Ok(dec!(3)));
        assert_eq!(coerce_number(Some(&RawValue::from("-1"))), Ok(dec!(-1)));
        assert_eq!(coerce_number(Some(&RawValue::from("0.25"))), Ok(dec!(0.25)));
        assert_eq!(coerce_number(Some(&RawValue::from("1e3"))), Ok(dec!(1000)));
    }

    #[test]
    fn test_numbers_and_text_agree_on_tiny_magnitudes() {
        for n in [1e-40, -1e-40, 1e-30] {
            let text = format!("{n:e}");
            assert_eq!(
                coerce_number(Some(&RawValue::Number(n))),
                coerce_number(Some(&RawValue::from(text.as_str()))),
                "{n:e}"
            );
        }
        assert_eq!(
            coerce_number(Some(&RawValue::Number(1e-40))),
            Err(ViolationKind::NotANumber)
        );
        assert_eq!(coerce_number(Some(&RawValue::Number(0.1))), Ok(dec!(0.1)));
        assert_eq!(coerce_number(Some(&RawValue::Number(0.0))), Ok(dec!(0)));
        assert_eq!(coerce_number(Some(&RawValue::Number(1e6))), Ok(dec!(1000000)));
    }

    #[test]
    fn test_fulfillment_cost_bounds() {
        for (value, ok) in [("0", false), ("1", true), ("99", true), ("100", false)] {
            let raw = sample().with(Field::FulfillmentCost, value);
            assert_eq!(validate(&raw).is_ok(), ok, "fulfillmentCost = {value}");
        }

        let errors = validate(&sample().with(Field::FulfillmentCost, "0")).unwrap_err();
        assert_eq!(
            errors.get(Field::FulfillmentCost),
            Some(ViolationKind::OutOfRange(Bound::Min(dec!(1))))
        );
        let errors = validate(&sample().with(Field::FulfillmentCost, "100")).unwrap_err();
        assert_eq!(
            errors.get(Field::FulfillmentCost),
            Some(ViolationKind::OutOfRange(Bound::Max(dec!(99))))
        );
    }

    #[test]
    fn test_negative_returns_only_flags_that_field() {
        let errors = validate(&sample().with(Field::ReturnsPerYear, "-1")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(Field::ReturnsPerYear),
            Some(ViolationKind::OutOfRange(Bound::Min(dec!(0))))
        );
    }

    #[test]
    fn test_all_violations_reported() {
        let raw = RawInput::new()
            .with(Field::Currency, "XXX")
            .with(Field::AvPurchaseValue, "0.5")
            .with(Field::FulfillmentCost, "abc")
            .with(Field::CustomerTerms, "0");
        let errors = validate(&raw).unwrap_err();
        let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                Field::Currency,
                Field::AvPurchaseValue,
                Field::FulfillmentCost,
                Field::ReturnsPerYear,
                Field::CustomerTerms,
                Field::Referrals,
            ]
        );
        assert_eq!(errors.get(Field::ReturnsPerYear), Some(ViolationKind::NotANumber));
        assert_eq!(errors.get(Field::FulfillmentCost), Some(ViolationKind::NotANumber));
    }
}
