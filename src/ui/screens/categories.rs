use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::evaluate::{format_euro, format_limit, format_percent};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let header_cells = ["Categoria", "Voce", "Valore", "% Incasso", "Limite"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .categories
        .iter()
        .enumerate()
        .skip(app.category_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, row)| {
            let style = if i == app.category_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let value = match &row.raw {
                Some(_) => format!("€ {}", format_euro(row.value)),
                None => "—".to_string(),
            };
            let over = row.limit.is_some_and(|limit| row.ratio > limit);
            let ratio_style = if over {
                theme::over_style()
            } else {
                theme::ok_style()
            };
            let limit = row
                .limit
                .map(format_limit)
                .unwrap_or_else(|| "—".to_string());

            Row::new(vec![
                Cell::from(truncate(&row.category.label(), 26)),
                Cell::from(row.category.bucket().as_str()),
                Cell::from(value),
                Cell::from(Span::styled(format_percent(row.ratio), ratio_style)),
                Cell::from(Span::styled(limit, theme::dim_style())),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(28),
        Constraint::Length(9),
        Constraint::Length(16),
        Constraint::Length(11),
        Constraint::Min(8),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" {} {} ", app.selected_month().display_name(), app.year),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}
