#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::models::PaymentMethod;

fn sample() -> Vec<Transaction> {
    let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    let mut lunch = Transaction::expense(
        day,
        dec!(45.9),
        "Alimentação".into(),
        "Ifood, jantar".into(),
        PaymentMethod::Pix,
        false,
    );
    lunch.id = Some(1);
    let mut salary = Transaction::income(day, dec!(5000), "Salário".into(), String::new());
    salary.id = Some(2);
    vec![lunch, salary]
}

#[test]
fn test_write_records_layout() {
    let mut buf = Vec::new();
    let count = write_records(&sample(), &mut buf).unwrap();
    assert_eq!(count, 2);

    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "id,date,type,amount,category,description,payment_method,recurring"
    );
    assert_eq!(
        lines[1],
        "1,2024-03-05,Expense,45.90,Alimentação,\"Ifood, jantar\",PIX,No"
    );
    assert_eq!(lines[2], "2,2024-03-05,Income,5000.00,Salário,,,");
}

#[test]
fn test_write_csv_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    assert_eq!(write_csv(&sample(), &path).unwrap(), 2);

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(&records[0][5], "Ifood, jantar");
}

#[test]
fn test_write_empty_has_header_only() {
    let mut buf = Vec::new();
    assert_eq!(write_records(&[], &mut buf).unwrap(), 0);
    assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 1);
}
