//! # LTV Core
//!
//! Input validation and customer lifetime value (LTV) calculation.
//!
//! The crate models the calculator as a small pipeline:
//!
//! - **Types**: [`Currency`], [`Field`], [`RawInput`] and the validated [`CalculationInput`]
//! - **Validation**: coercion of raw text/numbers into decimals with per-field bounds,
//!   reporting every invalid field at once
//! - **Calculator**: the five-step derivation from a validated input to a [`CustomerLtv`]
//! - **Session**: the `Empty` / `Computed` state owned by an interaction loop
//!
//! ## Example
//!
//! ```rust
//! use ltv_core::prelude::*;
//!
//! let raw = RawInput::new()
//!     .with(Field::Currency, "EUR")
//!     .with(Field::AvPurchaseValue, "1000")
//!     .with(Field::FulfillmentCost, "20")
//!     .with(Field::ReturnsPerYear, "8")
//!     .with(Field::CustomerTerms, "5")
//!     .with(Field::Referrals, "1");
//!
//! let mut session = Session::new();
//! let ltv = session.submit(&raw).unwrap();
//! assert_eq!(ltv.to_string(), "65600");
//! assert_eq!(session.label(), "$65600");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::struct_field_names)]

pub mod calculator;
pub mod error;
pub mod session;
pub mod types;
pub mod validation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calculator::{customer_ltv, LtvBreakdown};
    pub use crate::error::{
        Bound, FieldError, LtvError, LtvResult, ValidationErrors, ViolationKind,
    };
    pub use crate::session::{LtvState, Session};
    pub use crate::types::{CalculationInput, Currency, CustomerLtv, Field, RawInput, RawValue};
    pub use crate::validation::validate;
}

// Re-export commonly used types at crate root
pub use error::{LtvError, LtvResult, ValidationErrors};
pub use session::Session;
pub use types::{CalculationInput, Currency, CustomerLtv, Field, RawInput, RawValue};
