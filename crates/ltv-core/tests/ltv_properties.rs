//! Property tests for validation and the LTV derivation.

use ltv_core::prelude::*;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ============================================================================
// Strategies
// ============================================================================

/// Decimals >= 1 with up to two fractional digits.
fn at_least_one() -> impl Strategy<Value = Decimal> {
    (100i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Decimals >= 0 with one fractional digit.
fn non_negative() -> impl Strategy<Value = Decimal> {
    (0i64..500).prop_map(|tenths| Decimal::new(tenths, 1))
}

fn fulfillment_cost() -> impl Strategy<Value = Decimal> {
    (1i64..=99).prop_map(Decimal::from)
}

fn valid_input() -> impl Strategy<Value = CalculationInput> {
    (
        prop_oneof![Just(Currency::USD), Just(Currency::EUR), Just(Currency::GBP)],
        at_least_one(),
        fulfillment_cost(),
        non_negative(),
        at_least_one(),
        non_negative(),
    )
        .prop_map(|(currency, av, cost, returns, terms, refs)| {
            CalculationInput::new(currency, av, cost, returns, terms, refs).unwrap()
        })
}

fn with_av(input: &CalculationInput, av: Decimal) -> CalculationInput {
    CalculationInput::new(
        input.currency(),
        av,
        input.fulfillment_cost(),
        input.returns_per_year(),
        input.customer_terms(),
        input.referrals(),
    )
    .unwrap()
}

fn with_cost(input: &CalculationInput, cost: Decimal) -> CalculationInput {
    CalculationInput::new(
        input.currency(),
        input.av_purchase_value(),
        cost,
        input.returns_per_year(),
        input.customer_terms(),
        input.referrals(),
    )
    .unwrap()
}

fn to_raw(input: &CalculationInput) -> RawInput {
    let mut raw = RawInput::new().with(Field::Currency, input.currency().code());
    for field in Field::NUMERIC {
        if let Some(value) = input.value(field) {
            raw.set(field, value.to_string());
        }
    }
    raw
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn multiplier_stays_within_range(input in valid_input()) {
        let b = LtvBreakdown::compute(&input).unwrap();
        prop_assert!(b.fulfillment_cost_multiplier >= dec!(0.01));
        prop_assert!(b.fulfillment_cost_multiplier <= dec!(0.99));
    }

    #[test]
    fn ltv_increases_with_purchase_value(input in valid_input(), bump in at_least_one()) {
        let lower = customer_ltv(&input).unwrap();
        let higher = customer_ltv(&with_av(&input, input.av_purchase_value() + bump)).unwrap();
        prop_assert!(higher > lower);
    }

    #[test]
    fn ltv_decreases_with_fulfillment_cost(input in valid_input(), cost in 1i64..99) {
        let cheaper = customer_ltv(&with_cost(&input, Decimal::from(cost))).unwrap();
        let dearer = customer_ltv(&with_cost(&input, Decimal::from(cost + 1))).unwrap();
        prop_assert!(dearer < cheaper);
    }

    #[test]
    fn results_are_non_negative(input in valid_input()) {
        prop_assert!(customer_ltv(&input).unwrap().value() >= Decimal::ZERO);
    }

    #[test]
    fn text_submission_matches_direct_calculation(input in valid_input()) {
        let mut session = Session::new();
        let submitted = session.submit(&to_raw(&input)).unwrap();
        prop_assert_eq!(submitted, customer_ltv(&input).unwrap());
        prop_assert_eq!(session.submit(&to_raw(&input)).unwrap(), submitted);
    }

    #[test]
    fn out_of_range_cost_is_rejected(cost in prop_oneof![-1000i64..1, 100i64..1000]) {
        let raw = RawInput::new()
            .with(Field::AvPurchaseValue, "1000")
            .with(Field::FulfillmentCost, cost.to_string())
            .with(Field::ReturnsPerYear, "8")
            .with(Field::CustomerTerms, "5")
            .with(Field::Referrals, "1");
        let errors = validate(&raw).unwrap_err();
        prop_assert_eq!(errors.len(), 1);
        prop_assert!(matches!(
            errors.get(Field::FulfillmentCost),
            Some(ViolationKind::OutOfRange(_))
        ));
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn minimum_bounds_give_finite_non_negative_result() {
    let raw = RawInput::new()
        .with(Field::AvPurchaseValue, 1)
        .with(Field::FulfillmentCost, 1)
        .with(Field::ReturnsPerYear, 0)
        .with(Field::CustomerTerms, 1)
        .with(Field::Referrals, 0);
    let ltv = Session::new().submit(&raw).unwrap();
    assert!(ltv.value() >= Decimal::ZERO);
}

#[test]
fn reference_scenario_from_json() {
    let raw = RawInput::from_json_str(
        r#"{
            "currency": "EUR",
            "avPurchaseValue": 1000,
            "fulfillmentCost": 20,
            "returnsPerYear": 8,
            "customerTerms": 5,
            "referrals": 1
        }"#,
    )
    .unwrap();
    let mut session = Session::new();
    session.submit(&raw).unwrap();
    assert_eq!(session.label(), "$65600");
}

#[test]
fn invalid_field_leaves_ltv_unset() {
    let raw = RawInput::new()
        .with(Field::AvPurchaseValue, "1000")
        .with(Field::FulfillmentCost, "20")
        .with(Field::ReturnsPerYear, "-1")
        .with(Field::CustomerTerms, "5")
        .with(Field::Referrals, "1");
    let mut session = Session::new();
    let err = session.submit(&raw).unwrap_err();
    let errors = err.validation_errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors.contains(Field::ReturnsPerYear));
    for field in [Field::Currency, Field::AvPurchaseValue, Field::FulfillmentCost] {
        assert!(!errors.contains(field));
    }
    assert_eq!(session.ltv(), None);
}
