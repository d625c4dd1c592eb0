//! Read-side aggregation behind the dashboard: date-range filtering, totals
//! and the chart tables. Everything here is pure over a slice of rows.

use anyhow::Result;
use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::{Transaction, TransactionType};

/// An inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DateRange {
    pub(crate) start: NaiveDate,
    pub(crate) end: NaiveDate,
}

impl DateRange {
    pub(crate) fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            anyhow::bail!("Start date {start} is after end date {end}");
        }
        Ok(Self { start, end })
    }

    pub(crate) fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The whole month `n` months away from the month `start` falls in.
    pub(crate) fn shift_months(&self, n: i32) -> Option<Self> {
        let first = self.start.with_day(1)?;
        let moved = if n >= 0 {
            first.checked_add_months(Months::new(n.unsigned_abs()))?
        } else {
            first.checked_sub_months(Months::new(n.unsigned_abs()))?
        };
        month_period(moved.year(), moved.month())
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} – {}",
            self.start.format("%d.%m.%Y"),
            self.end.format("%d.%m.%Y")
        )
    }
}

/// First through last calendar day of the given month.
pub(crate) fn month_period(year: i32, month: u32) -> Option<DateRange> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = start.checked_add_months(Months::new(1))?.pred_opt()?;
    Some(DateRange { start, end })
}

/// The reporting period used when none was chosen: the month containing `today`.
pub(crate) fn default_period(today: NaiveDate) -> DateRange {
    let start = today.with_day(1).unwrap_or(today);
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .unwrap_or(today);
    DateRange { start, end }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DailyCategoryTotal {
    pub(crate) date: NaiveDate,
    pub(crate) category: String,
    pub(crate) amount: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryTotal {
    pub(crate) category: String,
    pub(crate) amount: Decimal,
}

pub(crate) fn filter_by_range(rows: &[Transaction], range: &DateRange) -> Vec<Transaction> {
    rows.iter()
        .filter(|t| range.contains(t.date))
        .cloned()
        .collect()
}

pub(crate) fn of_type(rows: &[Transaction], kind: TransactionType) -> Vec<Transaction> {
    rows.iter().filter(|t| t.kind == kind).cloned().collect()
}

/// Total amount of one transaction type. Zero for an empty set.
pub(crate) fn sum_by_type(rows: &[Transaction], kind: TransactionType) -> Decimal {
    rows.iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum::<Decimal>()
        .round_dp(2)
}

/// One entry per distinct (date, category), date ascending then category
/// ascending.
pub(crate) fn group_by_date_and_category(rows: &[Transaction]) -> Vec<DailyCategoryTotal> {
    let mut groups: BTreeMap<(NaiveDate, &str), Decimal> = BTreeMap::new();
    for t in rows {
        *groups.entry((t.date, t.category.as_str())).or_default() += t.amount;
    }
    groups
        .into_iter()
        .map(|((date, category), amount)| DailyCategoryTotal {
            date,
            category: category.to_string(),
            amount: amount.round_dp(2),
        })
        .collect()
}

/// Whole-period totals per category, largest first (ties by name).
pub(crate) fn group_by_category(rows: &[Transaction]) -> Vec<CategoryTotal> {
    let mut groups: BTreeMap<&str, Decimal> = BTreeMap::new();
    for t in rows {
        *groups.entry(t.category.as_str()).or_default() += t.amount;
    }
    let mut totals: Vec<CategoryTotal> = groups
        .into_iter()
        .map(|(category, amount)| CategoryTotal {
            category: category.to_string(),
            amount: amount.round_dp(2),
        })
        .collect();
    // Stable sort keeps the BTreeMap name order among equal amounts.
    totals.sort_by(|a, b| b.amount.cmp(&a.amount));
    totals
}

/// Everything the dashboard shows for one range.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DashboardReport {
    pub(crate) range: DateRange,
    pub(crate) total_expenses: Decimal,
    pub(crate) total_income: Decimal,
    pub(crate) expense_count: usize,
    pub(crate) income_count: usize,
    pub(crate) daily_expenses: Vec<DailyCategoryTotal>,
    pub(crate) daily_income: Vec<DailyCategoryTotal>,
    pub(crate) expenses_by_category: Vec<CategoryTotal>,
    pub(crate) income_by_category: Vec<CategoryTotal>,
}

impl DashboardReport {
    pub(crate) fn build(rows: &[Transaction], range: DateRange) -> Self {
        let in_range = filter_by_range(rows, &range);
        let expenses = of_type(&in_range, TransactionType::Expense);
        let income = of_type(&in_range, TransactionType::Income);

        Self {
            range,
            total_expenses: sum_by_type(&expenses, TransactionType::Expense),
            total_income: sum_by_type(&income, TransactionType::Income),
            expense_count: expenses.len(),
            income_count: income.len(),
            daily_expenses: group_by_date_and_category(&expenses),
            daily_income: group_by_date_and_category(&income),
            expenses_by_category: group_by_category(&expenses),
            income_by_category: group_by_category(&income),
        }
    }

    pub(crate) fn net(&self) -> Decimal {
        self.total_income - self.total_expenses
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.expense_count == 0 && self.income_count == 0
    }
}
