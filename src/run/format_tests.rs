#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_separators() {
    assert_eq!(format_amount(dec!(1234.56)), "$1,234.56");
    assert_eq!(format_amount(dec!(1234567.89)), "$1,234,567.89");
    assert_eq!(format_amount(dec!(999.99)), "$999.99");
}

#[test]
fn test_format_amount_pads_cents() {
    assert_eq!(format_amount(dec!(0)), "$0.00");
    assert_eq!(format_amount(dec!(5)), "$5.00");
    assert_eq!(format_amount(dec!(1.5)), "$1.50");
}

#[test]
fn test_format_amount_negative_remaining() {
    assert_eq!(format_amount(dec!(-42.50)), "-$42.50");
    assert_eq!(format_amount(dec!(-99999.01)), "-$99,999.01");
}

#[test]
fn test_format_amount_rounds_half_even() {
    assert_eq!(format_amount(dec!(2.345)), "$2.34");
    assert_eq!(format_amount(dec!(2.355)), "$2.36");
}

#[test]
fn test_format_amount_no_negative_zero() {
    assert_eq!(format_amount(dec!(-0.001)), "$0.00");
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_and_exact() {
    assert_eq!(truncate("Dinner", 10), "Dinner");
    assert_eq!(truncate("Dinner", 6), "Dinner");
}

#[test]
fn test_truncate_long_description() {
    assert_eq!(truncate("Supermarket weekly run", 8), "Superma…");
}

#[test]
fn test_truncate_multibyte() {
    assert_eq!(truncate("Pão de açúcar", 4), "Pão…");
}

#[test]
fn test_truncate_edges() {
    assert_eq!(truncate("abc", 0), "");
    assert_eq!(truncate("abc", 1), "…");
    assert_eq!(truncate("", 3), "");
}
