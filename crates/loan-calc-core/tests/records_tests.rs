use loan_calc_core::amortization::compute_schedule;
use loan_calc_core::records::{
    summarize_records, InMemoryLoanStore, JsonFileLoanStore, LoanRecordStore, SavedLoanRecord,
};
use loan_calc_core::{LoanCategory, LoanTerms};
use rust_decimal_macros::dec;

fn save(store: &dyn LoanRecordStore, label: &str, category: LoanCategory) -> String {
    let terms = LoanTerms::new(dec!(300_000), dec!(12), 36);
    let result = compute_schedule(&terms).unwrap();
    let record = SavedLoanRecord::from_result(label, category, &terms, &result);
    let id = record.id.clone();
    store.append(record).unwrap();
    id
}

/// Contract every backend must satisfy.
fn exercise_store(store: &dyn LoanRecordStore) {
    assert!(store.list().unwrap().is_empty());

    let personal = save(store, "Personal A", LoanCategory::Personal);
    let car = save(store, "Car B", LoanCategory::Car);
    let listed = store.list().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, personal);
    assert_eq!(listed[1].id, car);

    assert!(store.remove(&personal).unwrap());
    assert!(!store.remove(&personal).unwrap());
    let listed = store.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].category, LoanCategory::Car);

    save(store, "Home C", LoanCategory::Home);
    store.clear().unwrap();
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_memory_store_contract() {
    exercise_store(&InMemoryLoanStore::new());
}

#[test]
fn test_json_file_store_contract() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileLoanStore::open(dir.path().join("saved_loans.json"));
    assert_eq!(store.backend_name(), "json_file");
    exercise_store(&store);
}

#[test]
fn test_summary_over_stored_records() {
    let store = InMemoryLoanStore::new();
    save(&store, "a", LoanCategory::Personal);
    save(&store, "b", LoanCategory::Personal);
    let summary = summarize_records(&store.list().unwrap());
    assert_eq!(summary.count, 2);
    assert_eq!(summary.total_amount, dec!(600_000));
    assert_eq!(summary.total_monthly_payment.round_dp(2), dec!(19928.59));
}
