use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::Local;

use super::app::{App, Screen};
use crate::input::{parse_date, parse_month};
use crate::ledger::Ledger;
use crate::models::TransactionType;
use crate::report::{default_period, filter_by_range, DateRange};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Ledger) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit gastui", cmd_quit, r);
    register_command!("quit", "Quit gastui", cmd_quit, r);
    register_command!("a", "Go to Add Transaction", cmd_add, r);
    register_command!(
        "add",
        "Go to Add Transaction (e.g. :add income)",
        cmd_add,
        r
    );
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!(
        "range",
        "Set period (e.g. :range 01.03.2024 15.03.2024)",
        cmd_range,
        r
    );
    register_command!(
        "month",
        "Set month (e.g. :month 2024-03, empty = current)",
        cmd_month,
        r
    );
    register_command!("m", "Set month (e.g. :m 2024-03)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!("push", "Push the database to the remote now", cmd_push, r);
    register_command!("sync", "Push the database to the remote now", cmd_push, r);
    register_command!(
        "export",
        "Export the current period to CSV (e.g. :export ~/gastos.csv)",
        cmd_export,
        r
    );
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, ledger)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

pub(crate) fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    if !args.is_empty() {
        match TransactionType::parse(args) {
            Some(kind) if kind != app.form.kind => {
                app.form.kind = kind;
                app.form.category_index = 0;
                app.form.field_index = 0;
            }
            Some(_) => {}
            None => {
                app.set_status(format!("Unknown type: {args}. Use expense or income"));
                return Ok(());
            }
        }
    }
    app.screen = Screen::AddTransaction;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh_dashboard(ledger)?;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_range(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    if parts.len() != 2 {
        app.set_status("Usage: :range <start> <end> (DD.MM.YYYY or YYYY-MM-DD)");
        return Ok(());
    }

    let range = match (parse_date(parts[0]), parse_date(parts[1])) {
        (Ok(start), Ok(end)) => DateRange::new(start, end),
        (Err(e), _) | (_, Err(e)) => Err(e),
    };
    match range {
        Ok(range) => {
            app.screen = Screen::Dashboard;
            app.set_range(range, ledger)?;
        }
        Err(e) => app.set_status(format!("{e}")),
    }
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let range = if args.is_empty() {
        default_period(Local::now().date_naive())
    } else {
        match parse_month(args) {
            Ok(range) => range,
            Err(_) => {
                app.set_status("Invalid month format. Use YYYY-MM (e.g. 2024-03)");
                return Ok(());
            }
        }
    };
    app.screen = Screen::Dashboard;
    app.set_range(range, ledger)
}

fn cmd_next_month(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    advance_month(app, ledger, 1)
}

fn cmd_prev_month(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    advance_month(app, ledger, -1)
}

fn advance_month(app: &mut App, ledger: &mut Ledger, delta: i32) -> anyhow::Result<()> {
    if let Some(range) = app.range.shift_months(delta) {
        app.set_range(range, ledger)?;
    }
    Ok(())
}

fn cmd_push(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    match ledger.push_now() {
        None => app.set_status("No remote configured (set GASTUI_GITHUB_REPO)"),
        Some(Ok(outcome)) => app.set_status(format!("Pushed {} bytes", outcome.bytes)),
        Some(Err(e)) => {
            log::error!("manual push failed: {e}");
            app.set_error(format!("Push FAILED: {e}"));
        }
    }
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!(
            "{home}/gastui-export-{}.csv",
            app.range.start.format("%Y-%m")
        )
    } else {
        crate::run::shellexpand(args)
    };

    let rows = filter_by_range(&ledger.transactions(None)?, &app.range);
    let count = crate::export::write_csv(&rows, std::path::Path::new(&path))?;
    if count == 0 {
        app.set_status(format!("No transactions in {}", app.range));
    } else {
        app.set_status(format!("Exported {count} transactions to {path}"));
    }
    Ok(())
}
