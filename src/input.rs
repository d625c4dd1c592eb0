//! Parsing of user-typed values shared by the entry form, commands and CLI.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::report::{month_period, DateRange};

/// Accepts the form's `DD.MM.YYYY` plus a few common spellings.
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    for fmt in &["%d.%m.%Y", "%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    anyhow::bail!("Could not parse date '{s}' (use DD.MM.YYYY or YYYY-MM-DD)")
}

/// Parses an amount typed either as `1234.56` or in Brazilian notation
/// (`R$ 1.234,56`, `1.500`). Without a comma, dots that split the digits
/// into thousands groups are separators, so `1.500` is fifteen hundred.
/// The result is rounded to cents.
pub(crate) fn parse_amount(s: &str) -> Result<Decimal> {
    let cleaned: String = s
        .trim()
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        anyhow::bail!("Amount is empty");
    }
    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else if is_thousands_grouped(&cleaned) {
        cleaned.replace('.', "")
    } else {
        cleaned
    };
    let amount = Decimal::from_str(&normalized)
        .with_context(|| format!("Failed to parse '{s}' as an amount"))?;
    Ok(amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// `1.500`, `-12.345.678`: a 1-3 digit lead group, then dot-separated
/// groups of exactly three digits.
fn is_thousands_grouped(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let mut groups = digits.split('.');
    let lead_ok = groups
        .next()
        .is_some_and(|g| (1..=3).contains(&g.len()) && g.chars().all(|c| c.is_ascii_digit()));
    let mut rest = groups.peekable();
    lead_ok
        && rest.peek().is_some()
        && rest.all(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit()))
}

/// `YYYY-MM` → that whole month.
pub(crate) fn parse_month(s: &str) -> Result<DateRange> {
    let s = s.trim();
    let first = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{s}' (use YYYY-MM)"))?;
    month_period(first.year(), first.month())
        .with_context(|| format!("Invalid month '{s}'"))
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
