use loan_calc_core::affordability::{dsr, AffordabilityInput, AffordabilityPolicy, RiskTier};
use loan_calc_core::time_value;
use loan_calc_core::LoanCalcError;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn household() -> AffordabilityInput {
    AffordabilityInput {
        monthly_income: dec!(50_000),
        other_income: Decimal::ZERO,
        monthly_expenses: dec!(15_000),
        existing_debt_payments: dec!(5_000),
        annual_rate_percent: dec!(8),
        term_months: 60,
    }
}

// ===========================================================================
// Reference scenario
// ===========================================================================

#[test]
fn test_reference_household_max_loan() {
    let r = dsr::assess_affordability(&household(), &AffordabilityPolicy::default()).unwrap();
    assert_eq!(r.disposable_income, dec!(30_000));
    assert_eq!(r.max_monthly_payment, dec!(15_000));

    // Inverse annuity at 8%/12 over 60 months
    let expected =
        time_value::annuity_present_value(time_value::monthly_rate(dec!(8)), 60, dec!(15_000))
            .unwrap();
    assert_eq!(r.max_loan_amount, expected);
    assert_eq!(r.max_loan_amount.round_dp(2), dec!(739776.50));
}

#[test]
fn test_max_loan_services_max_payment() {
    // Amortising the max loan must give back the max payment.
    let r = dsr::assess_affordability(&household(), &AffordabilityPolicy::default()).unwrap();
    let terms = loan_calc_core::LoanTerms::new(r.max_loan_amount, dec!(8), 60);
    let loan = loan_calc_core::amortization::compute_schedule(&terms).unwrap();
    assert!((loan.monthly_payment - r.max_monthly_payment).abs() < dec!(0.0001));
}

#[test]
fn test_json_input_defaults_optional_fields() {
    let input: AffordabilityInput = serde_json::from_str(
        r#"{"monthly_income":"40000","monthly_expenses":"10000","annual_rate_percent":"6","term_months":120}"#,
    )
    .unwrap();
    assert_eq!(input.other_income, Decimal::ZERO);
    assert_eq!(input.existing_debt_payments, Decimal::ZERO);
    let r = dsr::assess_affordability(&input, &AffordabilityPolicy::default()).unwrap();
    assert_eq!(r.current_dsr, Decimal::ZERO);
}

#[test]
fn test_risk_tier_serializes_snake_case() {
    let r = dsr::assess_affordability(&household(), &AffordabilityPolicy::default()).unwrap();
    let v = serde_json::to_value(&r).unwrap();
    assert_eq!(v["risk_tier"], "medium");
    assert_eq!(v["advisory"], RiskTier::Medium.advisory());
}

#[test]
fn test_debt_over_cap_projects_to_the_cap() {
    let mut input = household();
    input.existing_debt_payments = dec!(27_500);
    let r = dsr::assess_affordability(&input, &AffordabilityPolicy::default()).unwrap();
    assert_eq!(r.max_monthly_payment, dec!(-7_500));
    assert_eq!(r.max_loan_amount, Decimal::ZERO);
    assert_eq!(r.current_dsr, dec!(55));
    assert_eq!(r.projected_dsr, dec!(40));
    assert_eq!(r.risk_tier, RiskTier::Medium);
}

#[test]
fn test_stricter_cap_over_debt_is_low_risk() {
    let policy = AffordabilityPolicy {
        max_debt_service_ratio: dec!(0.30),
        ..AffordabilityPolicy::default()
    };
    let mut input = household();
    input.existing_debt_payments = dec!(30_000);
    let r = dsr::assess_affordability(&input, &policy).unwrap();
    assert_eq!(r.projected_dsr, dec!(30));
    assert_eq!(r.risk_tier, RiskTier::Low);
}

// ===========================================================================
// Overflow
// ===========================================================================

#[test]
fn test_huge_income_at_zero_rate_is_an_error() {
    let mut input = household();
    input.monthly_income = Decimal::from_i128_with_scale(10_i128.pow(28), 0);
    input.annual_rate_percent = Decimal::ZERO;
    input.term_months = 600;
    let err = dsr::assess_affordability(&input, &AffordabilityPolicy::default()).unwrap_err();
    assert!(matches!(err, LoanCalcError::InvalidInput { .. }));
}

#[test]
fn test_max_income_plus_other_income_is_an_error() {
    let mut input = household();
    input.monthly_income = Decimal::MAX;
    input.other_income = Decimal::MAX;
    let err = dsr::assess_affordability(&input, &AffordabilityPolicy::default()).unwrap_err();
    match err {
        LoanCalcError::InvalidInput { field, .. } => assert_eq!(field, "other_income"),
    }
}

// ===========================================================================
// Invariants
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_max_loan_never_negative(
        income in 1i64..=500_000,
        debts in 0i64..=500_000,
        expenses in 0i64..=500_000,
        rate_bp in 0i64..=3000,
        term in 1u32..=480,
    ) {
        let input = AffordabilityInput {
            monthly_income: Decimal::from(income),
            other_income: Decimal::ZERO,
            monthly_expenses: Decimal::from(expenses),
            existing_debt_payments: Decimal::from(debts),
            annual_rate_percent: Decimal::new(rate_bp, 2),
            term_months: term,
        };
        let r = dsr::assess_affordability(&input, &AffordabilityPolicy::default()).unwrap();
        prop_assert!(r.max_loan_amount >= Decimal::ZERO);
        if r.max_monthly_payment <= Decimal::ZERO {
            prop_assert_eq!(r.max_loan_amount, Decimal::ZERO);
        }
        // Existing debt cancels out: projected DSR always lands on the cap.
        prop_assert!((r.projected_dsr - dec!(40)).abs() < dec!(0.0000001));
    }
}
