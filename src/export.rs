use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::models::{recurring_as_str, Transaction};

const HEADER: [&str; 8] = [
    "id",
    "date",
    "type",
    "amount",
    "category",
    "description",
    "payment_method",
    "recurring",
];

/// Writes `rows` to a CSV file, returning how many records were written.
pub(crate) fn write_csv(rows: &[Transaction], path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_records(rows, file)
}

pub(crate) fn write_records<W: Write>(rows: &[Transaction], out: W) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(HEADER)?;
    for t in rows {
        wtr.write_record([
            t.id.map(|id| id.to_string()).unwrap_or_default(),
            t.date.format("%Y-%m-%d").to_string(),
            t.kind.as_str().to_string(),
            format!("{:.2}", t.amount),
            t.category.clone(),
            t.description.clone(),
            t.payment_method
                .map(|p| p.as_str().to_string())
                .unwrap_or_default(),
            t.recurring
                .map(|r| recurring_as_str(r).to_string())
                .unwrap_or_default(),
        ])?;
    }
    wtr.flush().context("Failed to write CSV")?;
    Ok(rows.len())
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
