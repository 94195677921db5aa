//! Error types for the LTV calculator.
//!
//! Validation failures are per-field and recoverable: the caller corrects the
//! offending fields and submits again. [`LtvError`] wraps them together with the
//! few failures that can happen outside validation.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::types::Field;

/// A specialized Result type for LTV operations.
pub type LtvResult<T> = Result<T, LtvError>;

/// The main error type for LTV operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LtvError {
    /// One or more fields failed validation.
    #[error("Invalid input:\n{0}")]
    Validation(ValidationErrors),

    /// A calculation step left the range of the decimal type.
    #[error("Arithmetic overflow while computing {step}")]
    Overflow {
        /// Name of the calculation step that overflowed.
        step: &'static str,
    },

    /// A document or value could not be parsed.
    #[error("Parse error: {reason}")]
    Parse {
        /// Description of what went wrong.
        reason: String,
    },
}

impl LtvError {
    /// Creates a parse error.
    #[must_use]
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse {
            reason: reason.into(),
        }
    }

    /// Returns the field violations if this is a validation error.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for LtvError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// An inclusive bound on a numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Bound {
    /// Value must be greater than or equal to this.
    Min(Decimal),
    /// Value must be less than or equal to this.
    Max(Decimal),
}

impl Bound {
    /// Returns the bound's limit value.
    pub fn value(&self) -> Decimal {
        match self {
            Bound::Min(v) | Bound::Max(v) => *v,
        }
    }

    /// Returns true if `value` satisfies this bound.
    pub fn admits(&self, value: Decimal) -> bool {
        match self {
            Bound::Min(min) => value >= *min,
            Bound::Max(max) => value <= *max,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Min(v) => write!(f, "greater than or equal to {v}"),
            Bound::Max(v) => write!(f, "less than or equal to {v}"),
        }
    }
}

/// The kind of constraint a field violated.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "bound", rename_all = "snake_case")]
pub enum ViolationKind {
    /// The value could not be coerced to a number.
    #[error("Expected a number")]
    NotANumber,

    /// The number is outside the field's accepted range.
    #[error("Number must be {0}")]
    OutOfRange(Bound),

    /// The value is not one of the accepted codes.
    #[error("Expected one of USD, EUR, GBP")]
    InvalidEnum,
}

/// A constraint violation tagged with the field it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// The offending field.
    pub field: Field,
    /// What went wrong.
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.kind)
    }
}

/// Every field violation found in one validation pass.
///
/// Holds at most one violation per field, in field declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Records a violation, replacing any earlier one for the same field.
    pub fn push(&mut self, field: Field, kind: ViolationKind) {
        match self.0.iter_mut().find(|e| e.field == field) {
            Some(existing) => existing.kind = kind,
            None => {
                self.0.push(FieldError { field, kind });
                self.0.sort_by_key(|e| e.field);
            }
        }
    }

    /// Returns the violation recorded for `field`, if any.
    pub fn get(&self, field: Field) -> Option<ViolationKind> {
        self.0.iter().find(|e| e.field == field).map(|e| e.kind)
    }

    /// Returns true if `field` has a violation.
    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    /// Iterates over the violations.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Number of invalid fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no field is invalid.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Single-line rendering, for tabular output.
    pub fn summary(&self) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
