#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::util::*;
use crate::report::DailyCategoryTotal;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 5), "hell…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_accented() {
    assert_eq!(truncate("Alimentação", 6), "Alime…");
    assert_eq!(truncate("Estética", 8), "Estética");
}

#[test]
fn test_truncate_one_char() {
    assert_eq!(truncate("hello", 1), "…");
}

// ── format_brl ──────────────────────────────────────────────

#[test]
fn test_format_brl_basic() {
    assert_eq!(format_brl(dec!(1234.56)), "R$ 1.234,56");
}

#[test]
fn test_format_brl_small() {
    assert_eq!(format_brl(dec!(45.9)), "R$ 45,90");
}

#[test]
fn test_format_brl_zero() {
    assert_eq!(format_brl(dec!(0)), "R$ 0,00");
}

#[test]
fn test_format_brl_negative() {
    assert_eq!(format_brl(dec!(-1500)), "-R$ 1.500,00");
}

#[test]
fn test_format_brl_millions() {
    assert_eq!(format_brl(dec!(1234567.89)), "R$ 1.234.567,89");
}

// ── chart helpers ───────────────────────────────────────────

#[test]
fn test_to_cents() {
    assert_eq!(to_cents(dec!(45.90)), 4590);
    assert_eq!(to_cents(dec!(0.004)), 0);
    assert_eq!(to_cents(dec!(-3)), 0);
}

#[test]
fn test_percent_of() {
    assert_eq!(percent_of(dec!(1), dec!(3)), 33);
    assert_eq!(percent_of(dec!(2), dec!(3)), 67);
    assert_eq!(percent_of(dec!(5), dec!(0)), 0);
}

fn daily(day: u32, category: &str, amount: rust_decimal::Decimal) -> DailyCategoryTotal {
    DailyCategoryTotal {
        date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
        category: category.into(),
        amount,
    }
}

#[test]
fn test_group_by_day() {
    let rows = vec![
        daily(1, "Alimentação", dec!(10)),
        daily(1, "Transporte", dec!(5)),
        daily(3, "Alimentação", dec!(2)),
    ];
    let days = group_by_day(&rows);
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].1.len(), 2);
    assert_eq!(days[1].0, NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
}

#[test]
fn test_legend_is_sorted_and_distinct() {
    let rows = vec![
        daily(1, "Transporte", dec!(1)),
        daily(2, "Alimentação", dec!(1)),
        daily(3, "Transporte", dec!(1)),
    ];
    assert_eq!(legend(&rows), vec!["Alimentação", "Transporte"]);
}
