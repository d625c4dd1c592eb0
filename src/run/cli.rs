use anyhow::{Context, Result};
use chrono::Local;
use std::path::Path;

use crate::input::{parse_amount, parse_date, parse_month};
use crate::ledger::{Ledger, SyncStatus};
use crate::models::{
    categories_for, find_category, parse_recurring, PaymentMethod, Transaction, TransactionType,
};
use crate::report::{default_period, filter_by_range, DashboardReport, DateRange};

pub(crate) fn as_cli(args: &[String], ledger: &mut Ledger) -> Result<()> {
    match args[1].as_str() {
        "add" | "a" => cli_add(&args[2..], ledger),
        "list" | "ls" => cli_list(&args[2..], ledger),
        "summary" | "s" => cli_summary(&args[2..], ledger),
        "push" => cli_push(ledger),
        "export" => cli_export(&args[2..], ledger),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("gastui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("gastui: expense and income tracker with a synced SQLite snapshot");
    println!();
    println!("Usage: gastui [command]");
    println!();
    println!("Commands:");
    println!("  (none)                              Launch interactive TUI");
    println!("  add <expense|income> <date> <amount> <category>");
    println!("    --desc <text>                     Description");
    println!("    --payment <method>                Crédito, PIX, Dinheiro, Débito (expenses)");
    println!("    --recurring <yes|no>              Recurring expense (default: no)");
    println!("  list [YYYY-MM | <start> <end>]      List transactions, newest first");
    println!("  summary [YYYY-MM | <start> <end>]   Totals and category breakdown");
    println!("  push                                Upload the database to the remote now");
    println!("  export [path]                       Export transactions to CSV");
    println!("    --month <YYYY-MM>                 Only this month (default: everything)");
    println!("  --help, -h                          Show this help");
    println!("  --version, -V                       Show version");
    println!();
    println!("Dates: DD.MM.YYYY or YYYY-MM-DD. Amounts: 45.90, 45,90, 1.500 or R$ 1.234,56");
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Arguments that are neither a `--flag` nor the value following one.
fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            iter.next();
        } else {
            out.push(arg.as_str());
        }
    }
    out
}

pub(crate) fn parse_period(args: &[&str], today: chrono::NaiveDate) -> Result<DateRange> {
    match args {
        [] => Ok(default_period(today)),
        [month] => parse_month(month),
        [start, end] => DateRange::new(parse_date(start)?, parse_date(end)?),
        _ => anyhow::bail!("Expected YYYY-MM or <start> <end>"),
    }
}

pub(crate) fn build_transaction(args: &[String]) -> Result<Transaction> {
    let usage = "Usage: gastui add <expense|income> <date> <amount> <category> [--desc <text>]";
    let pos = positionals(args);
    let [kind, date, amount, category] = pos.as_slice() else {
        anyhow::bail!(usage);
    };

    let kind = TransactionType::parse(kind)
        .with_context(|| format!("Unknown type '{kind}' (use expense or income)"))?;
    let date = parse_date(date)?;
    let amount = parse_amount(amount)?;
    let category = find_category(kind, category).with_context(|| {
        format!(
            "Unknown {} category '{category}'. Choose one of: {}",
            kind.label(),
            categories_for(kind).join(", ")
        )
    })?;
    let description = flag_value(args, "--desc").unwrap_or("").trim().to_string();

    Ok(match kind {
        TransactionType::Expense => {
            let payment = match flag_value(args, "--payment") {
                Some(p) => PaymentMethod::parse(p)
                    .with_context(|| format!("Unknown payment method '{p}'"))?,
                None => PaymentMethod::Credit,
            };
            let recurring = match flag_value(args, "--recurring") {
                Some(r) => parse_recurring(r)
                    .with_context(|| format!("Expected yes or no for --recurring, got '{r}'"))?,
                None => false,
            };
            Transaction::expense(
                date,
                amount,
                category.to_string(),
                description,
                payment,
                recurring,
            )
        }
        TransactionType::Income => {
            Transaction::income(date, amount, category.to_string(), description)
        }
    })
}

fn cli_add(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let txn = build_transaction(args)?;
    let outcome = ledger.record(&txn)?;
    match outcome.sync {
        SyncStatus::Failed(_) => eprintln!("{}", outcome.describe()),
        _ => println!("{}", outcome.describe()),
    }
    Ok(())
}

fn cli_list(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let range = parse_period(&positionals(args), Local::now().date_naive())?;
    let rows = filter_by_range(&ledger.transactions(None)?, &range);

    println!("gastui: {range}");
    if rows.is_empty() {
        println!("No transactions");
        return Ok(());
    }

    println!(
        "{:<5} {:<10} {:<8} {:>12}  {:<14} {:<10} Description",
        "ID", "Date", "Type", "Amount", "Category", "Payment"
    );
    println!("{}", "─".repeat(78));
    for t in &rows {
        println!(
            "{:<5} {:<10} {:<8} {:>12.2}  {:<14} {:<10} {}",
            t.id.unwrap_or(0),
            t.date.format("%d.%m.%Y"),
            t.kind.label(),
            t.amount,
            t.category,
            t.payment_method.map(|p| p.as_str()).unwrap_or("-"),
            t.description,
        );
    }
    Ok(())
}

fn cli_summary(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let range = parse_period(&positionals(args), Local::now().date_naive())?;
    let report = DashboardReport::build(&ledger.transactions(None)?, range);

    println!("gastui: {range}");
    println!("{}", "─".repeat(40));
    println!("  Receitas:  R$ {:.2} ({})", report.total_income, report.income_count);
    println!("  Gastos:    R$ {:.2} ({})", report.total_expenses, report.expense_count);
    println!("  Saldo:     R$ {:.2}", report.net());

    for (title, totals) in [
        ("Gastos por Categoria:", &report.expenses_by_category),
        ("Receitas por Categoria:", &report.income_by_category),
    ] {
        if totals.is_empty() {
            continue;
        }
        println!();
        println!("{title}");
        for t in totals {
            println!("  {:<24} R$ {:.2}", t.category, t.amount);
        }
    }

    Ok(())
}

fn cli_push(ledger: &mut Ledger) -> Result<()> {
    let outcome = ledger
        .push_now()
        .ok_or_else(|| anyhow::anyhow!("No remote configured (set GASTUI_GITHUB_REPO)"))?
        .context("Push failed")?;
    match outcome.replaced_sha {
        Some(sha) => println!("Pushed {} bytes (replaced {sha})", outcome.bytes),
        None => println!("Pushed {} bytes (new file)", outcome.bytes),
    }
    Ok(())
}

fn cli_export(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let month = flag_value(args, "--month");
    let mut rows = ledger.transactions(None)?;
    if let Some(m) = month {
        rows = filter_by_range(&rows, &parse_month(m)?);
    }

    let output_path = positionals(args)
        .first()
        .map(|a| crate::run::shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/gastui-export-{}.csv", month.unwrap_or("all"))
        });

    let count = crate::export::write_csv(&rows, Path::new(&output_path))?;
    if count == 0 {
        println!("No transactions to export");
    } else {
        println!("Exported {count} transactions to {output_path}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
