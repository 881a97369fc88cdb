#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::PERSONAL_KEY;
use rust_decimal_macros::dec;

fn spent(person: &str, amount: Decimal, date: &str) -> Purchase {
    Purchase::new(
        "Item".into(),
        amount,
        date.into(),
        person.into(),
        "Visa".into(),
    )
}

fn limit(person: &str, amount: Decimal) -> PersonLimit {
    PersonLimit::new(person.into(), amount)
}

// ── summarize ─────────────────────────────────────────────────

#[test]
fn test_summary_two_people() {
    let purchases = vec![
        spent("A", dec!(100), "2024-01-01"),
        spent("B", dec!(50), "2024-01-02"),
    ];
    let limits = vec![limit("A", dec!(200)), limit("B", dec!(800))];
    let summary = summarize(&purchases, &limits).unwrap();

    assert_eq!(summary.len(), 2);
    assert_eq!(
        summary["A"],
        PersonSummary {
            total_spent: dec!(100),
            limit: dec!(200),
            remaining: dec!(100),
        }
    );
    assert_eq!(
        summary["B"],
        PersonSummary {
            total_spent: dec!(50),
            limit: dec!(800),
            remaining: dec!(750),
        }
    );
}

#[test]
fn test_summary_missing_limit_is_zero() {
    let purchases = vec![spent("C", dec!(25.50), "2024-01-01")];
    let summary = summarize(&purchases, &[]).unwrap();
    let c = summary["C"];
    assert_eq!(c.limit, Decimal::ZERO);
    assert_eq!(c.remaining, dec!(-25.50));
    assert!(c.is_over_limit());
}

#[test]
fn test_summary_limit_without_purchases() {
    let summary = summarize(&Vec::<Purchase>::new(), &[limit("D", dec!(300))]).unwrap();
    let d = summary["D"];
    assert_eq!(d.total_spent, Decimal::ZERO);
    assert_eq!(d.remaining, dec!(300));
    assert!(!d.is_over_limit());
}

#[test]
fn test_summary_union_of_people() {
    let purchases = vec![spent("A", dec!(1), "2024-01-01")];
    let limits = vec![limit("B", dec!(10))];
    let summary = summarize(&purchases, &limits).unwrap();
    let people: Vec<&str> = summary.keys().map(|k| k.as_str()).collect();
    assert_eq!(people, vec!["A", "B"]);
}

#[test]
fn test_summary_sums_per_person() {
    let purchases = vec![
        spent("A", dec!(10.10), "2024-01-01"),
        spent("A", dec!(20.20), "2024-01-02"),
        spent("B", dec!(5), "2024-01-03"),
        spent("A", dec!(0.70), "2024-01-04"),
    ];
    let summary = summarize(&purchases, &[limit("A", dec!(30))]).unwrap();
    assert_eq!(summary["A"].total_spent, dec!(31.00));
    assert_eq!(summary["A"].remaining, dec!(-1.00));
    assert_eq!(summary["B"].total_spent, dec!(5));
}

#[test]
fn test_summary_rounds_amounts_to_cents() {
    let purchases = vec![
        spent("A", dec!(0.005), "2024-01-01"),
        spent("A", dec!(0.015), "2024-01-01"),
    ];
    // Ties go to the even cent: 0.005 -> 0.00, 0.015 -> 0.02
    assert_eq!(summarize(&purchases, &[]).unwrap()["A"].total_spent, dec!(0.02));
}

#[test]
fn test_summary_order_independent() {
    let purchases = vec![
        spent("A", dec!(19.99), "2024-01-01"),
        spent("B", dec!(0.01), "2024-02-01"),
        spent("A", dec!(1000.50), "2024-03-01"),
        spent("C", dec!(7.77), "2024-03-02"),
        spent("B", dec!(33.33), "2024-03-03"),
    ];
    let limits = vec![limit("A", dec!(500)), limit("B", dec!(50))];
    let expected = summarize(&purchases, &limits).unwrap();

    let mut rotated = purchases.clone();
    for _ in 0..purchases.len() {
        rotated.rotate_left(1);
        assert_eq!(summarize(&rotated, &limits).unwrap(), expected);
    }
    let mut reversed = purchases.clone();
    reversed.reverse();
    assert_eq!(summarize(&reversed, &limits).unwrap(), expected);
}

#[test]
fn test_summary_ignores_personal_limit() {
    let limits = vec![PersonLimit::new(PERSONAL_KEY.into(), dec!(1000)), limit("A", dec!(5))];
    let summary = summarize(&Vec::<Purchase>::new(), &limits).unwrap();
    assert_eq!(summary.len(), 1);
    assert!(summary.contains_key("A"));
}

#[test]
fn test_summary_empty() {
    assert!(summarize(&Vec::<Purchase>::new(), &[]).unwrap().is_empty());
}

// ── personal_report ───────────────────────────────────────────

#[test]
fn test_personal_report_all_months() {
    let purchases = vec![
        spent("A", dec!(100), "2024-01-10"),
        spent("B", dec!(50), "2024-02-10"),
    ];
    let report = personal_report(&purchases, dec!(400), None).unwrap();
    assert_eq!(report.total_spent, dec!(150));
    assert_eq!(report.remaining, dec!(250));
}

#[test]
fn test_personal_report_single_month() {
    let purchases = vec![
        spent("A", dec!(100), "2024-01-10"),
        spent("A", dec!(50), "2024-02-10"),
        spent("A", dec!(25), "2024-02-20"),
    ];
    let report = personal_report(&purchases, dec!(60), Some("2024-02")).unwrap();
    assert_eq!(report.total_spent, dec!(75));
    assert_eq!(report.remaining, dec!(-15));
    assert!(report.is_over_limit());
}

#[test]
fn test_personal_report_without_limit() {
    let report = personal_report(&[], Decimal::ZERO, None).unwrap();
    assert_eq!(report, PersonSummary::default());
}

// ── overflow ──────────────────────────────────────────────────

#[test]
fn test_summary_overflow_is_an_error() {
    let purchases = vec![
        spent("A", Decimal::MAX, "2024-01-01"),
        spent("A", Decimal::MAX, "2024-01-02"),
    ];
    let err = summarize(&purchases, &[]).unwrap_err();
    assert!(matches!(err, LedgerError::Overflow(_)));
}

#[test]
fn test_personal_report_overflow_is_an_error() {
    let purchases = vec![
        spent("A", Decimal::MAX, "2024-01-01"),
        spent("B", Decimal::MAX, "2024-01-02"),
    ];
    assert!(matches!(
        personal_report(&purchases, dec!(100), None),
        Err(LedgerError::Overflow(_))
    ));
    assert!(matches!(
        personal_report(&purchases, dec!(100), Some("2024-01")),
        Err(LedgerError::Overflow(_))
    ));
}
