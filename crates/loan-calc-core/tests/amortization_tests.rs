use loan_calc_core::amortization::purchase::{self, FinancedPurchaseInput};
use loan_calc_core::amortization::schedule::{self, LoanInput};
use loan_calc_core::{LoanCalcError, LoanCategory, LoanTerms};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Known answers
// ===========================================================================

#[test]
fn test_personal_loan_300k_12pct_36m() {
    let terms = LoanTerms::new(dec!(300_000), dec!(12), 36);
    let r = schedule::compute_schedule(&terms).unwrap();

    // Standard annuity formula: 9964.2929...
    assert_eq!(r.monthly_payment.round_dp(2), dec!(9964.29));
    assert_eq!(r.total_payment.round_dp(2), dec!(358714.55));
    assert_eq!(r.total_interest.round_dp(2), dec!(58714.55));
    assert_eq!(r.total_interest, r.total_payment - r.principal);
    assert_eq!(r.total_payment, r.monthly_payment * dec!(36));
}

#[test]
fn test_home_loan_through_purchase() {
    let input = FinancedPurchaseInput {
        category: LoanCategory::Home,
        purchase_price: dec!(3_000_000),
        down_payment: dec!(600_000),
        annual_rate_percent: dec!(3.5),
        term_months: 300,
    };
    let out = purchase::finance_purchase(&input).unwrap();
    assert_eq!(out.result.loan.schedule.len(), 300);
    assert_eq!(out.result.loan.monthly_payment.round_dp(2), dec!(12014.97));
}

#[test]
fn test_zero_rate_payment_is_exact_division() {
    let terms = LoanTerms::new(dec!(500_000), Decimal::ZERO, 48);
    let r = schedule::compute_schedule(&terms).unwrap();
    assert_eq!(r.monthly_payment, dec!(500_000) / dec!(48));
    assert_eq!(r.total_interest, Decimal::ZERO);
}

#[test]
fn test_envelope_serializes_decimals_as_strings() {
    let input = LoanInput {
        category: LoanCategory::Personal,
        terms: LoanTerms::new(dec!(1200), Decimal::ZERO, 12),
    };
    let out = schedule::amortize(&input).unwrap();
    let v = serde_json::to_value(&out).unwrap();
    let payment: Decimal = v["result"]["monthly_payment"].as_str().unwrap().parse().unwrap();
    assert_eq!(payment, dec!(100));
    assert_eq!(v["result"]["schedule"].as_array().unwrap().len(), 12);
}

#[test]
fn test_invalid_input_is_reported_not_panicked() {
    let terms = LoanTerms::new(dec!(1000), dec!(5000), 600);
    match schedule::compute_schedule(&terms).unwrap_err() {
        LoanCalcError::InvalidInput { field, .. } => assert_eq!(field, "annual_rate_percent"),
    }
}

// ===========================================================================
// Schedule invariants
// ===========================================================================

fn principal_strategy() -> impl Strategy<Value = Decimal> {
    (1u64..=5_000_000_00).prop_map(|cents| Decimal::new(cents as i64, 2))
}

fn rate_strategy() -> impl Strategy<Value = Decimal> {
    // 0.00% .. 30.00% p.a., zero included on purpose
    prop_oneof![Just(Decimal::ZERO), (1i64..=3000).prop_map(|bp| Decimal::new(bp, 2))]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_schedule_invariants(
        principal in principal_strategy(),
        rate in rate_strategy(),
        term in 1u32..=600,
    ) {
        let terms = LoanTerms::new(principal, rate, term);
        let r = schedule::compute_schedule(&terms).unwrap();

        prop_assert_eq!(r.schedule.len(), term as usize);
        prop_assert_eq!(r.schedule.last().unwrap().remaining_balance, Decimal::ZERO);

        let mut prev = principal;
        for (i, e) in r.schedule.iter().enumerate() {
            prop_assert_eq!(e.month, i as u32 + 1);
            prop_assert!(e.remaining_balance >= Decimal::ZERO);
            prop_assert!(e.remaining_balance <= prev);
            prev = e.remaining_balance;
        }

        let repaid: Decimal = r.schedule.iter().map(|e| e.principal_portion).sum();
        let tolerance = dec!(0.01) * Decimal::from(term);
        prop_assert!((repaid - principal).abs() <= tolerance);

        prop_assert!(r.total_interest >= Decimal::ZERO);
        prop_assert_eq!(r.total_interest.is_zero(), rate.is_zero());
    }

    #[test]
    fn prop_zero_rate_payment_is_principal_over_term(
        principal in principal_strategy(),
        term in 1u32..=600,
    ) {
        let r = schedule::compute_schedule(&LoanTerms::new(principal, Decimal::ZERO, term)).unwrap();
        prop_assert_eq!(r.monthly_payment, principal / Decimal::from(term));
    }
}
