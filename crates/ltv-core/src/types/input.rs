//! Raw and validated calculation inputs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Currency, Field};
use crate::error::{LtvError, LtvResult, ValidationErrors};
use crate::validation;

/// A value as it arrives from the user, before coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// A number already typed as such (JSON/TOML numbers).
    Number(f64),
    /// Free text, as typed into a field.
    Text(String),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{n}"),
            RawValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<i32> for RawValue {
    fn from(n: i32) -> Self {
        RawValue::Number(f64::from(n))
    }
}

/// The candidate record submitted for validation.
///
/// Every slot is optional; a missing currency takes the default (EUR), a
/// missing number fails validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInput {
    /// Currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<RawValue>,
    /// Average purchase value.
    #[serde(default, alias = "av_purchase_value", skip_serializing_if = "Option::is_none")]
    pub av_purchase_value: Option<RawValue>,
    /// Fulfillment cost in percent.
    #[serde(default, alias = "fulfillment_cost", skip_serializing_if = "Option::is_none")]
    pub fulfillment_cost: Option<RawValue>,
    /// Repeat purchases per year.
    #[serde(default, alias = "returns_per_year", skip_serializing_if = "Option::is_none")]
    pub returns_per_year: Option<RawValue>,
    /// Customer lifetime in years.
    #[serde(default, alias = "customer_terms", skip_serializing_if = "Option::is_none")]
    pub customer_terms: Option<RawValue>,
    /// Referrals per customer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrals: Option<RawValue>,
}

impl RawInput {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON document keyed by field.
    pub fn from_json_str(content: &str) -> LtvResult<Self> {
        serde_json::from_str(content).map_err(|e| LtvError::parse(e.to_string()))
    }

    /// Parses a TOML document keyed by field.
    pub fn from_toml_str(content: &str) -> LtvResult<Self> {
        toml::from_str(content).map_err(|e| LtvError::parse(e.to_string()))
    }

    /// Sets a field, returning the updated record.
    pub fn with(mut self, field: Field, value: impl Into<RawValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Sets a field.
    pub fn set(&mut self, field: Field, value: impl Into<RawValue>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Clears a field.
    pub fn clear(&mut self, field: Field) {
        *self.slot_mut(field) = None;
    }

    /// Returns the raw value of a field.
    pub fn get(&self, field: Field) -> Option<&RawValue> {
        match field {
            Field::Currency => self.currency.as_ref(),
            Field::AvPurchaseValue => self.av_purchase_value.as_ref(),
            Field::FulfillmentCost => self.fulfillment_cost.as_ref(),
            Field::ReturnsPerYear => self.returns_per_year.as_ref(),
            Field::CustomerTerms => self.customer_terms.as_ref(),
            Field::Referrals => self.referrals.as_ref(),
        }
    }

    /// Copies every field set in `other` over this record.
    pub fn merge(&mut self, other: RawInput) {
        for field in Field::ALL {
            if let Some(value) = other.get(field) {
                self.set(field, value.clone());
            }
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<RawValue> {
        match field {
            Field::Currency => &mut self.currency,
            Field::AvPurchaseValue => &mut self.av_purchase_value,
            Field::FulfillmentCost => &mut self.fulfillment_cost,
            Field::ReturnsPerYear => &mut self.returns_per_year,
            Field::CustomerTerms => &mut self.customer_terms,
            Field::Referrals => &mut self.referrals,
        }
    }
}

/// A calculation input that satisfies every field constraint.
///
/// Only obtainable through [`CalculationInput::new`] or
/// [`validation::validate`], so holding one proves the bounds hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    currency: Currency,
    av_purchase_value: Decimal,
    fulfillment_cost: Decimal,
    returns_per_year: Decimal,
    customer_terms: Decimal,
    referrals: Decimal,
}

impl CalculationInput {
    /// Creates a validated input, checking every bound.
    ///
    /// # Errors
    ///
    /// Returns every out-of-range field at once.
    pub fn new(
        currency: Currency,
        av_purchase_value: Decimal,
        fulfillment_cost: Decimal,
        returns_per_year: Decimal,
        customer_terms: Decimal,
        referrals: Decimal,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for (field, value) in [
            (Field::AvPurchaseValue, av_purchase_value),
            (Field::FulfillmentCost, fulfillment_cost),
            (Field::ReturnsPerYear, returns_per_year),
            (Field::CustomerTerms, customer_terms),
            (Field::Referrals, referrals),
        ] {
            if let Err(kind) = validation::check_bounds(field, value) {
                errors.push(field, kind);
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            currency,
            av_purchase_value,
            fulfillment_cost,
            returns_per_year,
            customer_terms,
            referrals,
        })
    }

    /// Display currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Average purchase value.
    pub fn av_purchase_value(&self) -> Decimal {
        self.av_purchase_value
    }

    /// Fulfillment cost, in percent.
    pub fn fulfillment_cost(&self) -> Decimal {
        self.fulfillment_cost
    }

    /// Repeat purchases per year.
    pub fn returns_per_year(&self) -> Decimal {
        self.returns_per_year
    }

    /// Customer lifetime in years.
    pub fn customer_terms(&self) -> Decimal {
        self.customer_terms
    }

    /// Referrals per customer.
    pub fn referrals(&self) -> Decimal {
        self.referrals
    }

    /// Returns the value of a numeric field, `None` for the currency.
    pub fn value(&self, field: Field) -> Option<Decimal> {
        match field {
            Field::Currency => None,
            Field::AvPurchaseValue => Some(self.av_purchase_value),
            Field::FulfillmentCost => Some(self.fulfillment_cost),
            Field::ReturnsPerYear => Some(self.returns_per_year),
            Field::CustomerTerms => Some(self.customer_terms),
            Field::Referrals => Some(self.referrals),
        }
    }
}

impl TryFrom<&RawInput> for CalculationInput {
    type Error = ValidationErrors;

    fn try_from(raw: &RawInput) -> Result<Self, Self::Error> {
        validation::validate(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_json_camel_case() {
        let raw = RawInput::from_json_str(
            r#"{"currency": "GBP", "avPurchaseValue": 1000, "fulfillmentCost": "20"}"#,
        )
        .unwrap();
        assert_eq!(raw.get(Field::Currency), Some(&RawValue::Text("GBP".into())));
        assert_eq!(raw.get(Field::AvPurchaseValue), Some(&RawValue::Number(1000.0)));
        assert_eq!(raw.get(Field::FulfillmentCost), Some(&RawValue::Text("20".into())));
        assert_eq!(raw.get(Field::Referrals), None);
    }

    #[test]
    fn test_toml_snake_case_alias() {
        let raw = RawInput::from_toml_str(
            "currency = \"USD\"\nav_purchase_value = 250.5\nreturns_per_year = 3\n",
        )
        .unwrap();
        assert_eq!(raw.get(Field::AvPurchaseValue), Some(&RawValue::Number(250.5)));
        assert_eq!(raw.get(Field::ReturnsPerYear), Some(&RawValue::Number(3.0)));
    }

    #[test]
    fn test_bad_document() {
        assert!(matches!(
            RawInput::from_json_str("{not json"),
            Err(LtvError::Parse { .. })
        ));
    }

    #[test]
    fn test_merge_overrides() {
        let mut base = RawInput::new()
            .with(Field::AvPurchaseValue, "10")
            .with(Field::Referrals, "1");
        base.merge(RawInput::new().with(Field::Referrals, "2"));
        assert_eq!(base.get(Field::AvPurchaseValue), Some(&RawValue::from("10")));
        assert_eq!(base.get(Field::Referrals), Some(&RawValue::from("2")));
    }

    #[test]
    fn test_new_checks_bounds() {
        let errors = CalculationInput::new(
            Currency::EUR,
            dec!(0),
            dec!(100),
            dec!(8),
            dec!(5),
            dec!(1),
        )
        .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(Field::AvPurchaseValue));
        assert!(errors.contains(Field::FulfillmentCost));
    }
}
