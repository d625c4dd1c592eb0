use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::TransactionType;
use crate::ui::app::{App, InputMode};
use crate::ui::form::{EntryForm, FormField};
use crate::ui::theme;
use crate::ui::util::format_brl;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.form;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(64), Constraint::Min(0)])
        .split(area);

    let title = match form.kind {
        TransactionType::Expense => " Novo Gasto ",
        TransactionType::Income => " Nova Receita ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ));

    let editing = app.input_mode == InputMode::Editing;
    let mut lines = vec![Line::from("")];
    for (i, field) in form.fields().iter().enumerate() {
        let selected = i == form.field_index;
        lines.push(field_line(form, *field, selected, editing.then_some(&app.command_input)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        hint(form.field(), editing),
        theme::dim_style(),
    )));

    f.render_widget(Paragraph::new(lines).block(block), chunks[0]);
}

fn field_line<'a>(
    form: &EntryForm,
    field: FormField,
    selected: bool,
    edit_buffer: Option<&'a String>,
) -> Line<'a> {
    if field == FormField::Save {
        let style = if selected {
            theme::selected_style().add_modifier(Modifier::BOLD)
        } else {
            theme::income_style()
        };
        return Line::from(vec![Span::raw("  "), Span::styled(field.label(), style)]);
    }

    let value = match (selected, edit_buffer) {
        (true, Some(buffer)) if field.is_text() => format!("{buffer}█"),
        _ => display_value(form, field),
    };
    let label_style = if selected {
        theme::selected_style()
    } else {
        theme::dim_style()
    };
    let value_style = match field {
        FormField::Kind if form.kind == TransactionType::Income => theme::income_style(),
        FormField::Kind => theme::expense_style(),
        _ => theme::normal_style(),
    };

    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:<20}", field.label()), label_style),
        Span::raw(" "),
        Span::styled(value, value_style),
    ])
}

fn display_value(form: &EntryForm, field: FormField) -> String {
    match field {
        FormField::Kind => format!("◀ {} ▶", form.kind.label()),
        FormField::Date => form.text_of(FormField::Date),
        FormField::Amount => form.amount.map(format_brl).unwrap_or_else(|| "—".into()),
        FormField::Category => format!("◀ {} ▶", form.category()),
        FormField::Description if form.description.is_empty() => "—".into(),
        FormField::Description => form.description.clone(),
        FormField::Payment => format!("◀ {} ▶", form.payment().as_str()),
        FormField::Recurring => {
            format!("◀ {} ▶", if form.recurring { "Sim" } else { "Não" })
        }
        FormField::Save => String::new(),
    }
}

fn hint(field: FormField, editing: bool) -> &'static str {
    if editing {
        return "  Enter confirm | Esc cancel";
    }
    match field {
        FormField::Save => "  Enter save | j/k move | Tab dashboard",
        f if f.is_text() => "  Enter edit | j/k move | Tab dashboard",
        _ => "  h/l or ←/→ change | j/k move | Enter next",
    }
}
