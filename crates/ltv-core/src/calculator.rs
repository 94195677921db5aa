//! Customer lifetime value calculation.
//!
//! The derivation, from a validated [`CalculationInput`]:
//!
//! ```text
//! fulfillmentCostMultiplier    = 1 - fulfillmentCost / 100
//! totalCustomerReturns         = returnsPerYear * customerTerms
//! totalGrossValue              = avPurchaseValue + avPurchaseValue * totalCustomerReturns
//! avReferralRevenuePerCustomer = totalGrossValue * referrals
//! totalGrossValueWithReferrals = totalGrossValue + avReferralRevenuePerCustomer
//! totalNetValueWithReferrals   = totalGrossValueWithReferrals * fulfillmentCostMultiplier
//! ```
//!
//! No rounding is applied. The currency does not take part.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{LtvError, LtvResult};
use crate::types::{CalculationInput, CustomerLtv};

/// Every intermediate value of one LTV derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LtvBreakdown {
    /// Share of gross value kept after fulfillment, `1 - cost / 100`.
    pub fulfillment_cost_multiplier: Decimal,
    /// Purchases after the first one over the customer's lifetime.
    pub total_customer_returns: Decimal,
    /// Gross value of one customer's purchases.
    pub total_gross_value: Decimal,
    /// Gross value brought in by the customer's referrals.
    pub av_referral_revenue_per_customer: Decimal,
    /// Gross value including referrals.
    pub total_gross_value_with_referrals: Decimal,
    /// Net value after fulfillment cost; the customer LTV.
    pub total_net_value_with_referrals: Decimal,
}

impl LtvBreakdown {
    /// Runs the derivation.
    ///
    /// # Errors
    ///
    /// Returns [`LtvError::Overflow`] if an intermediate value leaves the
    /// decimal range. Inputs within roughly 28 significant digits never do.
    pub fn compute(input: &CalculationInput) -> LtvResult<Self> {
        let fulfillment_cost_multiplier = step(
            "fulfillmentCostMultiplier",
            input
                .fulfillment_cost()
                .checked_div(Decimal::ONE_HUNDRED)
                .and_then(|share| Decimal::ONE.checked_sub(share)),
        )?;
        let total_customer_returns = step(
            "totalCustomerReturns",
            input.returns_per_year().checked_mul(input.customer_terms()),
        )?;
        let total_gross_value = step(
            "totalGrossValue",
            input
                .av_purchase_value()
                .checked_mul(total_customer_returns)
                .and_then(|repeat| input.av_purchase_value().checked_add(repeat)),
        )?;
        let av_referral_revenue_per_customer = step(
            "avReferralRevenuePerCustomer",
            total_gross_value.checked_mul(input.referrals()),
        )?;
        let total_gross_value_with_referrals = step(
            "totalGrossValueWithReferrals",
            total_gross_value.checked_add(av_referral_revenue_per_customer),
        )?;
        let total_net_value_with_referrals = step(
            "totalNetValueWithReferrals",
            total_gross_value_with_referrals.checked_mul(fulfillment_cost_multiplier),
        )?;

        Ok(Self {
            fulfillment_cost_multiplier,
            total_customer_returns,
            total_gross_value,
            av_referral_revenue_per_customer,
            total_gross_value_with_referrals,
            total_net_value_with_referrals,
        })
    }

    /// The resulting customer LTV.
    pub fn customer_ltv(&self) -> CustomerLtv {
        CustomerLtv::new(self.total_net_value_with_referrals)
    }

    /// Named steps in derivation order, for display.
    pub fn steps(&self) -> [(&'static str, Decimal); 6] {
        [
            ("Fulfillment Cost Multiplier", self.fulfillment_cost_multiplier),
            ("Total Customer Returns", self.total_customer_returns),
            ("Total Gross Value", self.total_gross_value),
            ("Referral Revenue Per Customer", self.av_referral_revenue_per_customer),
            ("Gross Value With Referrals", self.total_gross_value_with_referrals),
            ("Net Value With Referrals", self.total_net_value_with_referrals),
        ]
    }
}

/// Computes the customer LTV of a validated input.
///
/// # Errors
///
/// See [`LtvBreakdown::compute`].
pub fn customer_ltv(input: &CalculationInput) -> LtvResult<CustomerLtv> {
    LtvBreakdown::compute(input).map(|b| b.customer_ltv())
}

fn step(name: &'static str, value: Option<Decimal>) -> LtvResult<Decimal> {
    value.ok_or(LtvError::Overflow { step: name })
}
