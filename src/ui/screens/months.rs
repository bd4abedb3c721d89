use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::evaluate::{format_euro, format_percent};
use crate::ui::app::App;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let header_cells = ["Mese", "Incasso", "Spese", "Spese / Incasso"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .months
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i == app.month_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            if !row.has_data {
                return Row::new(vec![
                    Cell::from(row.month.display_name()),
                    Cell::from(Span::styled("—", theme::dim_style())),
                    Cell::from(Span::styled("—", theme::dim_style())),
                    Cell::from(""),
                ])
                .style(style);
            }

            let ratio_style = if row.ratio > rust_decimal::Decimal::ONE_HUNDRED {
                theme::over_style()
            } else {
                theme::ok_style()
            };

            Row::new(vec![
                Cell::from(row.month.display_name()),
                Cell::from(format!("€ {}", format_euro(row.revenue))),
                Cell::from(format!("€ {}", format_euro(row.expenses))),
                Cell::from(Span::styled(format_percent(row.ratio), ratio_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(18),
        Constraint::Length(18),
        Constraint::Min(16),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Anno {} ", app.year),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}
