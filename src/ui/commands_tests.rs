#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::app::{App, Screen};
use super::commands::*;
use crate::db::Database;
use crate::ledger::Ledger;
use crate::models::{PaymentMethod, Transaction, TransactionType};
use crate::sync::fake::FakeContentApi;
use crate::sync::SnapshotSync;

fn setup() -> (App, Ledger) {
    let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
    let mut ledger = Ledger::new(Database::open_in_memory().unwrap(), None);
    for (day, amount) in [(1, dec!(10)), (20, dec!(5))] {
        ledger
            .record(&Transaction::expense(
                NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
                amount,
                "Alimentação".into(),
                String::new(),
                PaymentMethod::Pix,
                false,
            ))
            .unwrap();
    }
    ledger
        .record(&Transaction::expense(
            NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
            dec!(7),
            "Compras".into(),
            String::new(),
            PaymentMethod::Debit,
            false,
        ))
        .unwrap();
    (App::starting_on(today, false), ledger)
}

#[test]
fn test_find_closest_suggests_long_name() {
    assert_eq!(find_closest("dashbord"), "dashboard");
    assert_eq!(find_closest("nxt-month"), "next-month");
}

#[test]
fn test_unknown_command_sets_suggestion() {
    let (mut app, mut ledger) = setup();
    handle_command("exprot", &mut app, &mut ledger).unwrap();
    assert_eq!(
        app.status_message,
        "Unknown command: :exprot. Did you mean :export?"
    );
}

#[test]
fn test_range_rebuilds_report() {
    let (mut app, mut ledger) = setup();
    handle_command("range 01.03.2024 15.03.2024", &mut app, &mut ledger).unwrap();
    assert_eq!(app.screen, Screen::Dashboard);
    assert_eq!(app.report.total_expenses, dec!(10));
    assert_eq!(app.report.expense_count, 1);
}

#[test]
fn test_range_rejects_reversed_dates() {
    let (mut app, mut ledger) = setup();
    let before = app.range;
    handle_command("range 15.03.2024 01.03.2024", &mut app, &mut ledger).unwrap();
    assert_eq!(app.range, before);
    assert!(app.status_message.contains("after"));
}

#[test]
fn test_month_navigation() {
    let (mut app, mut ledger) = setup();
    handle_command("month 2024-03", &mut app, &mut ledger).unwrap();
    assert_eq!(app.report.total_expenses, dec!(15));

    handle_command("next-month", &mut app, &mut ledger).unwrap();
    assert_eq!(app.range.start, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
    assert_eq!(app.range.end, NaiveDate::from_ymd_opt(2024, 4, 30).unwrap());
    assert_eq!(app.report.total_expenses, dec!(7));

    handle_command("prev-month", &mut app, &mut ledger).unwrap();
    handle_command("prev-month", &mut app, &mut ledger).unwrap();
    assert!(app.report.is_empty());
}

#[test]
fn test_add_switches_form_type() {
    let (mut app, mut ledger) = setup();
    app.screen = Screen::Dashboard;
    handle_command("add income", &mut app, &mut ledger).unwrap();
    assert_eq!(app.screen, Screen::AddTransaction);
    assert_eq!(app.form.kind, TransactionType::Income);
}

#[test]
fn test_push_without_remote() {
    let (mut app, mut ledger) = setup();
    handle_command("push", &mut app, &mut ledger).unwrap();
    assert!(app.status_message.starts_with("No remote configured"));
    assert!(!app.status_is_error);
}

#[test]
fn test_failed_push_flags_status_as_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gastos.db");
    let api = FakeContentApi::empty();
    *api.put_status.borrow_mut() = Some(409);
    let sync = SnapshotSync::new(
        path.clone(),
        "main".into(),
        "Update gastos.db".into(),
        Box::new(api.clone()),
    );
    let mut ledger = Ledger::new(Database::open(&path).unwrap(), Some(sync));
    let mut app = App::starting_on(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(), true);

    handle_command("push", &mut app, &mut ledger).unwrap();
    assert!(app.status_is_error);

    // Any later plain message clears the flag.
    handle_command("month 2024-04", &mut app, &mut ledger).unwrap();
    assert!(!app.status_is_error);
    assert_eq!(app.status_message, "Período: 01.04.2024 – 30.04.2024");
}

#[test]
fn test_export_current_period() {
    let (mut app, mut ledger) = setup();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("march.csv");
    handle_command(
        &format!("export {}", path.display()),
        &mut app,
        &mut ledger,
    )
    .unwrap();
    assert!(app.status_message.starts_with("Exported 2 transactions"));
    assert_eq!(std::fs::read_to_string(path).unwrap().lines().count(), 3);
}

#[test]
fn test_quit() {
    let (mut app, mut ledger) = setup();
    handle_command("q", &mut app, &mut ledger).unwrap();
    assert!(!app.running);
}
