use anyhow::Result;
use chrono::{Local, NaiveDate};

use super::form::EntryForm;
use crate::ledger::Ledger;
use crate::report::{default_period, DashboardReport, DateRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    AddTransaction,
    Dashboard,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::AddTransaction, Self::Dashboard]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AddTransaction => write!(f, "Adicionar Transação"),
            Self::Dashboard => write!(f, "Dashboard"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    /// Set by `set_error`; the status bar renders the message in red.
    pub(crate) status_is_error: bool,
    pub(crate) show_help: bool,
    pub(crate) has_remote: bool,

    // Add Transaction
    pub(crate) form: EntryForm,

    // Dashboard
    pub(crate) range: DateRange,
    pub(crate) report: DashboardReport,
    pub(crate) transaction_count: i64,
}

impl App {
    pub(crate) fn new(has_remote: bool) -> Self {
        Self::starting_on(Local::now().date_naive(), has_remote)
    }

    pub(crate) fn starting_on(today: NaiveDate, has_remote: bool) -> Self {
        let range = default_period(today);
        Self {
            running: true,
            screen: Screen::AddTransaction,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            status_is_error: false,
            show_help: false,
            has_remote,

            form: EntryForm::new(today),

            report: DashboardReport::build(&[], range),
            range,
            transaction_count: 0,
        }
    }

    /// Re-reads every row and rebuilds the report for the current range.
    pub(crate) fn refresh_dashboard(&mut self, ledger: &Ledger) -> Result<()> {
        let rows = ledger.transactions(None)?;
        self.report = DashboardReport::build(&rows, self.range);
        self.transaction_count = ledger.db.get_transaction_count()?;
        Ok(())
    }

    pub(crate) fn set_range(&mut self, range: DateRange, ledger: &Ledger) -> Result<()> {
        self.range = range;
        self.refresh_dashboard(ledger)?;
        self.set_status(format!("Período: {range}"));
        Ok(())
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
        self.status_is_error = false;
    }

    pub(crate) fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
        self.status_is_error = true;
    }

    pub(crate) fn clear_status(&mut self) {
        self.status_message.clear();
        self.status_is_error = false;
    }
}
