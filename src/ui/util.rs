use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::report::DailyCategoryTotal;

/// Format a decimal amount as Brazilian reais.
/// e.g. `1234567.89` → `"R$ 1.234.567,89"`
pub(crate) fn format_brl(val: Decimal) -> String {
    let abs = val.abs().round_dp(2);
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_dots: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(".");

    if val < Decimal::ZERO {
        format!("-R$ {with_dots},{dec_part}")
    } else {
        format!("R$ {with_dots},{dec_part}")
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// The result is guaranteed to be at most `max` characters (counting "…" as one).
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Bar charts take unsigned integers, so amounts are charted in cents.
/// Negative amounts chart as zero.
pub(crate) fn to_cents(val: Decimal) -> u64 {
    (val.round_dp(2) * Decimal::ONE_HUNDRED).to_u64().unwrap_or(0)
}

/// Whole-number percentage of `part` in `total`; 0 when `total` is not positive.
pub(crate) fn percent_of(part: Decimal, total: Decimal) -> u32 {
    if total <= Decimal::ZERO {
        return 0;
    }
    (part * Decimal::ONE_HUNDRED / total)
        .round()
        .to_u32()
        .unwrap_or(0)
}

/// Regroups the (date, category) table by day, keeping both orders.
pub(crate) fn group_by_day(rows: &[DailyCategoryTotal]) -> Vec<(NaiveDate, Vec<&DailyCategoryTotal>)> {
    let mut days: Vec<(NaiveDate, Vec<&DailyCategoryTotal>)> = Vec::new();
    for row in rows {
        match days.last_mut() {
            Some((date, bucket)) if *date == row.date => bucket.push(row),
            _ => days.push((row.date, vec![row])),
        }
    }
    days
}

/// Distinct categories, sorted, used to give each a stable colour.
pub(crate) fn legend(rows: &[DailyCategoryTotal]) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for row in rows {
        if !names.contains(&row.category.as_str()) {
            names.push(&row.category);
        }
    }
    names.sort_unstable();
    names
}
