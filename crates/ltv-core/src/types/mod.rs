//! Domain types for the LTV calculator.
//!
//! - [`Currency`]: accepted ISO currency codes
//! - [`Field`]: the six form fields with labels, placeholders and bounds
//! - [`RawInput`] / [`RawValue`]: unvalidated user input
//! - [`CalculationInput`]: input that passed validation
//! - [`CustomerLtv`]: the computed lifetime value

mod currency;
mod field;
mod input;
mod ltv;

pub use currency::Currency;
pub use field::Field;
pub use input::{CalculationInput, RawInput, RawValue};
pub use ltv::CustomerLtv;
