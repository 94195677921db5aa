//! The calculator's interaction state.
//!
//! A [`Session`] holds the single "current LTV" slot of an interaction loop.
//! It starts [`LtvState::Empty`] and moves to [`LtvState::Computed`] on the
//! first valid submission. Later valid submissions replace the computed value;
//! invalid ones leave the state as it was.

use serde::Serialize;
use tracing::debug;

use crate::calculator::customer_ltv;
use crate::error::LtvResult;
use crate::types::{CalculationInput, CustomerLtv, RawInput};
use crate::validation::validate;

/// State of the calculator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LtvState {
    /// Nothing computed yet.
    #[default]
    Empty,
    /// The last valid submission and its result.
    Computed {
        /// The input the value was computed from.
        input: CalculationInput,
        /// The computed value.
        ltv: CustomerLtv,
    },
}

impl LtvState {
    /// Returns the computed value, if any.
    pub fn ltv(&self) -> Option<CustomerLtv> {
        match self {
            LtvState::Empty => None,
            LtvState::Computed { ltv, .. } => Some(*ltv),
        }
    }

    /// Returns the input of the last valid submission, if any.
    pub fn input(&self) -> Option<&CalculationInput> {
        match self {
            LtvState::Empty => None,
            LtvState::Computed { input, .. } => Some(input),
        }
    }

    /// Returns true once a value has been computed.
    pub fn is_computed(&self) -> bool {
        matches!(self, LtvState::Computed { .. })
    }
}

/// Owns the current state and runs submissions against it.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: LtvState,
}

impl Session {
    /// Creates a session in the `Empty` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &LtvState {
        &self.state
    }

    /// The current LTV, if one has been computed.
    pub fn ltv(&self) -> Option<CustomerLtv> {
        self.state.ltv()
    }

    /// Validates `raw` and, if valid, computes and stores its LTV.
    ///
    /// # Errors
    ///
    /// Returns [`LtvError::Validation`](crate::LtvError::Validation) with every
    /// invalid field, or an overflow error from the calculator. On error the
    /// state is unchanged.
    pub fn submit(&mut self, raw: &RawInput) -> LtvResult<CustomerLtv> {
        let input = validate(raw)?;
        let ltv = customer_ltv(&input)?;
        debug!(currency = %input.currency(), ltv = %ltv, "submission computed");
        self.state = LtvState::Computed { input, ltv };
        Ok(ltv)
    }

    /// Display text: `$<ltv>` once computed, empty before.
    pub fn label(&self) -> String {
        self.ltv().map(|ltv| ltv.label()).unwrap_or_default()
    }
}
