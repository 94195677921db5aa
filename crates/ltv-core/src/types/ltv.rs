//! Customer lifetime value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A computed customer lifetime value.
///
/// Displays without trailing zeros, so a value computed as `65600.0`
/// prints as `65600`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerLtv(Decimal);

impl CustomerLtv {
    /// Wraps a computed value.
    #[must_use]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the raw computed value.
    #[must_use]
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Display label, `$` followed by the value.
    ///
    /// The `$` is literal and does not follow the input currency.
    #[must_use]
    pub fn label(&self) -> String {
        format!("${self}")
    }
}

impl fmt::Display for CustomerLtv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}
