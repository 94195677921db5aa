//! The six fields of the calculator form.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Bound;

/// A field of the calculation input, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Currency code selector.
    Currency,
    /// Average value of one purchase.
    AvPurchaseValue,
    /// Share of gross revenue spent on fulfillment, in percent.
    FulfillmentCost,
    /// Repeat purchases per customer per year.
    ReturnsPerYear,
    /// Years a customer stays active.
    CustomerTerms,
    /// New customers referred per customer.
    Referrals,
}

impl Field {
    /// All fields, in form order.
    pub const ALL: [Field; 6] = [
        Field::Currency,
        Field::AvPurchaseValue,
        Field::FulfillmentCost,
        Field::ReturnsPerYear,
        Field::CustomerTerms,
        Field::Referrals,
    ];

    /// The numeric fields, in form order.
    pub const NUMERIC: [Field; 5] = [
        Field::AvPurchaseValue,
        Field::FulfillmentCost,
        Field::ReturnsPerYear,
        Field::CustomerTerms,
        Field::Referrals,
    ];

    /// Returns the form key (camelCase) used in documents and CSV headers.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Field::Currency => "currency",
            Field::AvPurchaseValue => "avPurchaseValue",
            Field::FulfillmentCost => "fulfillmentCost",
            Field::ReturnsPerYear => "returnsPerYear",
            Field::CustomerTerms => "customerTerms",
            Field::Referrals => "referrals",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Field::Currency => "Currency",
            Field::AvPurchaseValue => "Average Purchase Value",
            Field::FulfillmentCost => "Fulfillment Cost",
            Field::ReturnsPerYear => "Customer Returns Per Year",
            Field::CustomerTerms => "Customer Terms In Years",
            Field::Referrals => "Referrals Per Customer",
        }
    }

    /// Returns the example value shown in an empty field.
    #[must_use]
    pub fn placeholder(&self) -> &'static str {
        match self {
            Field::Currency => "EUR",
            Field::AvPurchaseValue => "1000",
            Field::FulfillmentCost => "20",
            Field::ReturnsPerYear => "8",
            Field::CustomerTerms => "5",
            Field::Referrals => "1",
        }
    }

    /// Unit shown after the value, if any.
    #[must_use]
    pub fn unit(&self) -> Option<&'static str> {
        match self {
            Field::FulfillmentCost => Some("%"),
            _ => None,
        }
    }

    /// Returns true for the five numeric fields.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Field::Currency)
    }

    /// Inclusive bounds on the field's value, lower bound first.
    ///
    /// Empty for [`Field::Currency`].
    #[must_use]
    pub fn bounds(&self) -> Vec<Bound> {
        match self {
            Field::Currency => Vec::new(),
            Field::AvPurchaseValue | Field::CustomerTerms => vec![Bound::Min(Decimal::ONE)],
            Field::FulfillmentCost => vec![
                Bound::Min(Decimal::ONE),
                Bound::Max(Decimal::from(99)),
            ],
            Field::ReturnsPerYear | Field::Referrals => vec![Bound::Min(Decimal::ZERO)],
        }
    }

    /// Describes the accepted values, e.g. `>= 1 and <= 99`.
    #[must_use]
    pub fn constraint(&self) -> String {
        if !self.is_numeric() {
            return "one of USD, EUR, GBP".to_string();
        }
        self.bounds()
            .iter()
            .map(|b| match b {
                Bound::Min(v) => format!(">= {v}"),
                Bound::Max(v) => format!("<= {v}"),
            })
            .collect::<Vec<_>>()
            .join(" and ")
    }

    /// Looks a field up by its form key or its snake_case name.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL.into_iter().find(|f| {
            f.key().eq_ignore_ascii_case(key) || f.snake_key() == key.to_ascii_lowercase()
        })
    }

    fn snake_key(&self) -> &'static str {
        match self {
            Field::Currency => "currency",
            Field::AvPurchaseValue => "av_purchase_value",
            Field::FulfillmentCost => "fulfillment_cost",
            Field::ReturnsPerYear => "returns_per_year",
            Field::CustomerTerms => "customer_terms",
            Field::Referrals => "referrals",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
