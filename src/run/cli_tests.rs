#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_build_expense_with_flags() {
    let txn = build_transaction(&args(&[
        "expense",
        "05.03.2024",
        "45,90",
        "alimentação",
        "--desc",
        "Ifood",
        "--payment",
        "pix",
        "--recurring",
        "sim",
    ]))
    .unwrap();
    assert_eq!(txn.kind, TransactionType::Expense);
    assert_eq!(txn.date, day(2024, 3, 5));
    assert_eq!(txn.amount, dec!(45.90));
    assert_eq!(txn.category, "Alimentação");
    assert_eq!(txn.description, "Ifood");
    assert_eq!(txn.payment_method, Some(PaymentMethod::Pix));
    assert_eq!(txn.recurring, Some(true));
}

#[test]
fn test_build_expense_defaults() {
    let txn = build_transaction(&args(&["gasto", "2024-03-05", "10", "Compras"])).unwrap();
    assert_eq!(txn.payment_method, Some(PaymentMethod::Credit));
    assert_eq!(txn.recurring, Some(false));
    assert!(txn.description.is_empty());
}

#[test]
fn test_build_income_ignores_expense_flags() {
    let txn = build_transaction(&args(&[
        "income",
        "2024-03-01",
        "5000",
        "Salário",
        "--payment",
        "pix",
    ]))
    .unwrap();
    assert_eq!(txn.kind, TransactionType::Income);
    assert!(txn.payment_method.is_none());
    assert!(txn.recurring.is_none());
}

#[test]
fn test_build_rejects_bad_input() {
    assert!(build_transaction(&args(&["expense", "2024-03-05", "10"])).is_err());
    assert!(build_transaction(&args(&["loan", "2024-03-05", "10", "Compras"])).is_err());
    assert!(build_transaction(&args(&["expense", "2024-03-05", "abc", "Compras"])).is_err());
    assert!(build_transaction(&args(&["income", "2024-03-05", "10", "Compras"])).is_err());
    assert!(build_transaction(&args(&[
        "expense",
        "2024-03-05",
        "10",
        "Compras",
        "--payment",
        "cheque"
    ]))
    .is_err());
}

#[test]
fn test_parse_period_forms() {
    let today = day(2024, 2, 10);
    let default = parse_period(&[], today).unwrap();
    assert_eq!((default.start, default.end), (day(2024, 2, 1), day(2024, 2, 29)));

    let month = parse_period(&["2024-03"], today).unwrap();
    assert_eq!(month.end, day(2024, 3, 31));

    let custom = parse_period(&["01.03.2024", "2024-03-15"], today).unwrap();
    assert_eq!((custom.start, custom.end), (day(2024, 3, 1), day(2024, 3, 15)));

    assert!(parse_period(&["2024-03-15", "2024-03-01"], today).is_err());
    assert!(parse_period(&["a", "b", "c"], today).is_err());
}

#[test]
fn test_positionals_skip_flag_values() {
    let a = args(&["out.csv", "--month", "2024-03"]);
    assert_eq!(positionals(&a), vec!["out.csv"]);
    assert_eq!(flag_value(&a, "--month"), Some("2024-03"));
    assert_eq!(flag_value(&a, "--desc"), None);
}
