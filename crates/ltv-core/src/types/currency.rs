//! Currency type with ISO 4217 codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LtvError;

/// ISO 4217 currency codes accepted by the calculator.
///
/// The currency is a display label only; it never enters the arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// United States Dollar
    USD,
    /// Euro
    #[default]
    EUR,
    /// British Pound Sterling
    GBP,
}

impl Currency {
    /// All accepted currencies, in selector order.
    pub const ALL: [Currency; 3] = [Currency::USD, Currency::EUR, Currency::GBP];

    /// Returns the ISO 4217 3-letter code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    /// Returns the currency symbol.
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
        }
    }

    /// Parses a currency from a string code.
    ///
    /// Surrounding whitespace is ignored and matching is case-insensitive.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            _ => None,
        }
    }
}

impl FromStr for Currency {
    type Err = LtvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| {
            LtvError::parse(format!("unsupported currency '{s}', use USD, EUR, or GBP"))
        })
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code() {
        assert_eq!(Currency::USD.code(), "USD");
        assert_eq!(Currency::EUR.code(), "EUR");
        assert_eq!(Currency::GBP.code(), "GBP");
    }

    #[test]
    fn test_currency_symbol() {
        assert_eq!(Currency::USD.symbol(), "$");
        assert_eq!(Currency::EUR.symbol(), "€");
        assert_eq!(Currency::GBP.symbol(), "£");
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Currency::from_code("usd"), Some(Currency::USD));
        assert_eq!(Currency::from_code(" EUR "), Some(Currency::EUR));
        assert_eq!(Currency::from_code("gbp"), Some(Currency::GBP));
        assert_eq!(Currency::from_code("JPY"), None);
        assert_eq!(Currency::from_code(""), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("GBP".parse::<Currency>().unwrap(), Currency::GBP);
        assert!("XXX".parse::<Currency>().is_err());
    }

    #[test]
    fn test_default_is_euro() {
        assert_eq!(Currency::default(), Currency::EUR);
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&Currency::GBP).unwrap();
        assert_eq!(json, "\"GBP\"");
        let parsed: Currency = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Currency::GBP);
    }
}
