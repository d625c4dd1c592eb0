use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::report::{CategoryTotal, DailyCategoryTotal};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_brl, group_by_day, legend, percent_of, to_cents, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),      // Summary cards
            Constraint::Percentage(55), // Daily charts
            Constraint::Min(6),         // Category shares
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);

    let report = &app.report;
    if report.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            format!("Nenhuma transação em {}. Use :range ou H/L", report.range),
            theme::dim_style(),
        )))
        .centered()
        .block(chart_block(" Gráficos "));
        f.render_widget(msg, chunks[1].union(chunks[2]));
        return;
    }

    let daily = halves(chunks[1]);
    render_daily_chart(f, daily[0], " Gastos por Dia ", &report.daily_expenses);
    render_daily_chart(f, daily[1], " Receitas por Dia ", &report.daily_income);

    let shares = halves(chunks[2]);
    render_share_chart(
        f,
        shares[0],
        " Gastos por Categoria ",
        &report.expenses_by_category,
        report.total_expenses,
        &legend(&report.daily_expenses),
    );
    render_share_chart(
        f,
        shares[1],
        " Receitas por Categoria ",
        &report.income_by_category,
        report.total_income,
        &legend(&report.daily_income),
    );
}

fn halves(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area)
}

fn chart_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ))
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let report = &app.report;
    let net = report.net();

    render_card(
        f,
        cards[0],
        "Gastos",
        report.total_expenses,
        theme::RED,
        format!("{} lançamentos", report.expense_count),
    );
    render_card(
        f,
        cards[1],
        "Receitas",
        report.total_income,
        theme::GREEN,
        format!("{} lançamentos", report.income_count),
    );
    render_card(
        f,
        cards[2],
        "Saldo",
        net,
        if net >= Decimal::ZERO {
            theme::GREEN
        } else {
            theme::RED
        },
        format!("{}", report.range),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: Color,
    subtitle: String,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            format_brl(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn color_of(names: &[&str], category: &str) -> Color {
    theme::category_color(names.iter().position(|n| *n == category).unwrap_or(0))
}

/// One group per day, one bar per category that day.
fn render_daily_chart(f: &mut Frame, area: Rect, title: &str, rows: &[DailyCategoryTotal]) {
    if rows.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled("Sem dados", theme::dim_style())))
            .centered()
            .block(chart_block(title));
        f.render_widget(msg, area);
        return;
    }

    let names = legend(rows);
    let legend_line = Line::from(
        names
            .iter()
            .flat_map(|name| {
                [
                    Span::styled("■ ", Style::default().fg(color_of(&names, name))),
                    Span::styled(format!("{name}  "), theme::dim_style()),
                ]
            })
            .collect::<Vec<_>>(),
    );

    let mut chart = BarChart::default()
        .block(chart_block(title).title_bottom(legend_line))
        .bar_width(2)
        .bar_gap(0)
        .group_gap(1);

    for (date, items) in group_by_day(rows) {
        let bars: Vec<Bar> = items
            .iter()
            .map(|row| {
                Bar::default()
                    .value(to_cents(row.amount))
                    .text_value(String::new())
                    .style(Style::default().fg(color_of(&names, &row.category)))
            })
            .collect();
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(date.format("%d").to_string()))
                .bars(&bars),
        );
    }

    f.render_widget(chart, area);
}

fn render_share_chart(
    f: &mut Frame,
    area: Rect,
    title: &str,
    totals: &[CategoryTotal],
    grand_total: Decimal,
    names: &[&str],
) {
    if totals.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled("Sem dados", theme::dim_style())))
            .centered()
            .block(chart_block(title));
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = totals
        .iter()
        .map(|t| {
            Bar::default()
                .value(to_cents(t.amount))
                .label(Line::from(truncate(&t.category, 12)))
                .text_value(format!(
                    "{} ({}%)",
                    format_brl(t.amount),
                    percent_of(t.amount, grand_total)
                ))
                .style(Style::default().fg(color_of(names, &t.category)))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(color_of(names, &t.category)),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(chart_block(title))
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(0);

    f.render_widget(chart, area);
}
