#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

fn dated(id: i64, date: &str) -> Purchase {
    let mut p = Purchase::new(
        "Item".into(),
        dec!(10),
        date.into(),
        "Ana".into(),
        "Visa".into(),
    );
    p.id = Some(id);
    p
}

// ── month_bucket ──────────────────────────────────────────────

#[test]
fn test_bucket_iso_date() {
    assert_eq!(month_bucket("2024-03-15").as_deref(), Some("2024-03"));
}

#[test]
fn test_bucket_day_first_date() {
    assert_eq!(month_bucket("15/03/2024").as_deref(), Some("2024-03"));
}

#[test]
fn test_bucket_first_and_last_day() {
    assert_eq!(month_bucket("2024-02-01").as_deref(), Some("2024-02"));
    assert_eq!(month_bucket("2024-02-29").as_deref(), Some("2024-02"));
}

#[test]
fn test_bucket_trims_whitespace() {
    assert_eq!(month_bucket(" 2023-12-31 ").as_deref(), Some("2023-12"));
}

#[test]
fn test_bucket_invalid_dates() {
    assert_eq!(month_bucket(""), None);
    assert_eq!(month_bucket("yesterday"), None);
    assert_eq!(month_bucket("2024-02-30"), None);
    assert_eq!(month_bucket("2024-13-01"), None);
}

// ── sorted_months ─────────────────────────────────────────────

#[test]
fn test_sorted_months_most_recent_first() {
    let purchases = vec![
        dated(1, "2024-01-10"),
        dated(2, "2024-03-02"),
        dated(3, "2023-12-25"),
    ];
    assert_eq!(
        sorted_months(&purchases),
        vec!["2024-03", "2024-01", "2023-12"]
    );
}

#[test]
fn test_sorted_months_dedupes() {
    let purchases = vec![
        dated(1, "2024-03-01"),
        dated(2, "2024-03-31"),
        dated(3, "2024-02-14"),
    ];
    assert_eq!(sorted_months(&purchases), vec!["2024-03", "2024-02"]);
}

#[test]
fn test_sorted_months_skips_bad_dates() {
    let purchases = vec![dated(1, "not a date"), dated(2, "2024-05-05")];
    assert_eq!(sorted_months(&purchases), vec!["2024-05"]);
}

#[test]
fn test_sorted_months_empty() {
    assert!(sorted_months(&[]).is_empty());
}

#[test]
fn test_sorted_months_across_years() {
    let purchases = vec![
        dated(1, "2023-11-01"),
        dated(2, "2025-01-01"),
        dated(3, "2024-12-01"),
    ];
    assert_eq!(
        sorted_months(&purchases),
        vec!["2025-01", "2024-12", "2023-11"]
    );
}

// ── in_month ──────────────────────────────────────────────────

#[test]
fn test_in_month_selects_bucket() {
    let purchases = vec![
        dated(1, "2024-03-01"),
        dated(2, "2024-04-01"),
        dated(3, "2024-03-20"),
        dated(4, "garbage"),
    ];
    let ids: Vec<i64> = in_month(&purchases, "2024-03")
        .iter()
        .filter_map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![1, 3]);
}
