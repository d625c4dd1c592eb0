use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::ledger::{Ledger, SyncStatus};
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::form::FormField;

pub(crate) fn as_tui(ledger: &mut Ledger) -> Result<()> {
    let mut app = App::new(ledger.has_remote());
    app.refresh_dashboard(ledger)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, ledger);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    ledger: &mut Ledger,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| crate::ui::render::render(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            let handled = match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, ledger),
                InputMode::Command => handle_command_input(key, app, ledger),
                InputMode::Editing => handle_editing_input(key, app),
            };
            // A bad row or a failed query aborts this interaction only.
            if let Err(e) = handled {
                log::error!("{e:#}");
                app.input_mode = InputMode::Normal;
                app.set_error(format!("Error: {e:#}"));
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if app.screen == Screen::AddTransaction {
                save_entry(app, ledger)?;
            }
        }
        KeyCode::Char('1') => switch_screen(app, ledger, Screen::AddTransaction)?,
        KeyCode::Char('2') => switch_screen(app, ledger, Screen::Dashboard)?,
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, ledger, screens[next])?;
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, ledger, screens[prev])?;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => app.clear_status(),
        KeyCode::Char('H') => commands::handle_command("prev-month", app, ledger)?,
        KeyCode::Char('L') => commands::handle_command("next-month", app, ledger)?,
        _ if app.screen == Screen::AddTransaction => handle_form_key(key, app, ledger)?,
        KeyCode::Char('r') => {
            app.refresh_dashboard(ledger)?;
            app.set_status("Refreshed");
        }
        _ => {}
    }
    Ok(())
}

fn handle_form_key(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.form.next_field(),
        KeyCode::Char('k') | KeyCode::Up => app.form.prev_field(),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Char('+') => app.form.cycle(1),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('-') => app.form.cycle(-1),
        KeyCode::Char(' ') => app.form.cycle(1),
        KeyCode::Enter => match app.form.field() {
            FormField::Save => save_entry(app, ledger)?,
            field if field.is_text() => {
                app.command_input = app.form.text_of(field);
                app.input_mode = InputMode::Editing;
            }
            _ => app.form.next_field(),
        },
        _ => {}
    }
    Ok(())
}

fn save_entry(app: &mut App, ledger: &mut Ledger) -> Result<()> {
    let txn = match app.form.to_transaction() {
        Ok(txn) => txn,
        Err(e) => {
            app.set_status(format!("{e}"));
            return Ok(());
        }
    };
    let outcome = ledger.record(&txn)?;
    app.form.reset_after_save();
    app.refresh_dashboard(ledger)?;
    match outcome.sync {
        SyncStatus::Failed(_) => app.set_error(outcome.describe()),
        _ => app.set_status(outcome.describe()),
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, ledger)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let field = app.form.field();
            let value = std::mem::take(&mut app.command_input);
            app.input_mode = InputMode::Normal;
            match app.form.set_text(field, &value) {
                Ok(()) => {
                    app.clear_status();
                    app.form.next_field();
                }
                Err(e) => app.set_status(format!("{e}")),
            }
        }
        KeyCode::Esc => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
            app.set_status("Edit cancelled");
        }
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn switch_screen(app: &mut App, ledger: &mut Ledger, screen: Screen) -> Result<()> {
    app.screen = screen;
    if screen == Screen::Dashboard {
        app.refresh_dashboard(ledger)?;
    }
    Ok(())
}
