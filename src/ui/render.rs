use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use super::app::{App, InputMode, Popup, Screen};
use super::commands;
use super::theme;
use super::toast::ToastHost;
use super::util::{centered_rect, stack_top_right, truncate};
use crate::report::{Report, ReportLine};

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 3;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app);
    render_screen(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
    render_command_bar(f, chunks[3], app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }

    match &app.popup {
        Some(Popup::Report { report, is_warning }) => {
            render_report_popup(f, f.area(), report, *is_warning)
        }
        Some(Popup::Alert(message)) => render_alert_popup(f, f.area(), message),
        None => {}
    }

    if let Some(host) = &app.toast_host {
        render_toasts(f, chunks[1], host);
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let num = format!("{}", i + 1);
            if *s == app.screen {
                Line::from(vec![
                    Span::styled(format!("{num}:"), Style::default().fg(theme::TEXT_DIM)),
                    Span::styled(
                        format!("{s}"),
                        Style::default()
                            .fg(theme::ACCENT)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(
                    format!("{num}:{s}"),
                    Style::default().fg(theme::TEXT_DIM),
                ))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(theme::OVERLAY)))
        .style(Style::default().bg(theme::HEADER_BG));

    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::Months => super::screens::months::render(f, area, app),
        Screen::Categories => super::screens::categories::render(f, area, app),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
        InputMode::Command => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::GREEN)
            .add_modifier(Modifier::BOLD),
    };

    let info = format!(
        " {} | {} {} | voce {}",
        app.screen,
        app.selected_month().display_name(),
        app.year,
        if app.speech_enabled { "on" } else { "off" }
    );

    let right = match app.screen {
        Screen::Months => " Enter check | H/L year | m mute | ? help ",
        Screen::Categories => " Enter check | :set value | ? help ",
    };

    let available = area.width as usize;
    let used = mode_label.chars().count() + info.chars().count() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Normal => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, Enter to check the month, ? for help",
                    theme::dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    theme::command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let mut help_text = vec![
        Line::from(Span::styled(
            " ThresholdUI Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", theme::section_style())),
        Line::from(Span::styled(
            "  j/k or Up/Down   Move cursor           1-2        Switch tabs",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  Tab/Shift-Tab    Cycle tabs            g/G        Top/Bottom",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  H/L              Prev/Next year        Ctrl-q     Quit",
            theme::normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Actions", theme::section_style())),
        Line::from(Span::styled(
            "  Enter            Check selected month  :          Command mode",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  m                Toggle speech         x          Dismiss toast",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  Enter/Esc/o      Close report",
            theme::normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Commands", theme::section_style())),
    ];

    // Build command list dynamically from COMMANDS registry
    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        if name.len() <= 2 {
            continue;
        }
        if seen.insert(cmd.description) {
            cmd_lines.push((name, cmd.description));
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<12} {desc}"),
            theme::normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        Style::default().fg(theme::TEXT_DIM),
    )));

    let popup_area = centered_rect(area, 80, help_text.len() as u16 + 2);
    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup_area);
}

fn report_lines(report: &Report) -> Vec<Line<'_>> {
    let mut lines = Vec::with_capacity(report.lines.len() + 4);
    for line in &report.lines {
        match line {
            ReportLine::Field { label, value } => lines.push(Line::from(vec![
                Span::styled(format!(" {:<17}", format!("{label}:")), theme::dim_style()),
                Span::styled(value.as_str(), theme::normal_style()),
            ])),
            ReportLine::Warning {
                title,
                ratio,
                limit,
                advice,
            } => {
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::styled(format!(" ⚠ {title}: "), theme::over_style()),
                    Span::styled(ratio.as_str(), theme::over_style()),
                    Span::styled(format!(" (limite {limit})"), theme::dim_style()),
                ]));
                if let Some(advice) = advice {
                    lines.push(Line::from(Span::styled(
                        format!("   {advice}"),
                        theme::dim_style().add_modifier(Modifier::ITALIC),
                    )));
                }
            }
            ReportLine::Separator => {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    " ".to_string() + &"─".repeat(40),
                    Style::default().fg(theme::OVERLAY),
                )));
            }
            ReportLine::Total { value, over } => lines.push(Line::from(vec![
                Span::styled(" Totale spese su incasso: ", theme::normal_style()),
                Span::styled(
                    value.as_str(),
                    if *over {
                        theme::over_style()
                    } else {
                        theme::ok_style().add_modifier(Modifier::BOLD)
                    },
                ),
            ])),
            ReportLine::Praise => {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    " ✔ Tutto entro i limiti. Ottimo lavoro!",
                    theme::ok_style().add_modifier(Modifier::BOLD),
                )));
            }
        }
    }
    lines
}

fn ok_button() -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled("[ OK ]", theme::selected_style())).centered(),
    ]
}

fn render_report_popup(f: &mut Frame, area: Rect, report: &Report, is_warning: bool) {
    let mut lines = report_lines(report);
    lines.extend(ok_button());

    let accent = if is_warning { theme::RED } else { theme::GREEN };
    let popup_area = centered_rect(area, 64, lines.len() as u16 + 2);
    f.render_widget(Clear, popup_area);
    let popup = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .title(Span::styled(
                format!(" {} ", report.title),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(popup, popup_area);
}

fn render_alert_popup(f: &mut Frame, area: Rect, message: &str) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!(" {message}"), theme::normal_style())),
    ];
    lines.extend(ok_button());

    let popup_area = centered_rect(area, 64, lines.len() as u16 + 3);
    f.render_widget(Clear, popup_area);
    let popup = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::YELLOW))
            .title(Span::styled(
                " Attenzione ",
                Style::default()
                    .fg(theme::YELLOW)
                    .add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(popup, popup_area);
}

fn render_toasts(f: &mut Frame, area: Rect, host: &ToastHost) {
    let toasts = host.toasts();
    let slots = stack_top_right(area, toasts.len(), TOAST_WIDTH, TOAST_HEIGHT);
    for (toast, slot) in toasts.iter().zip(slots) {
        let color = theme::toast_color(toast.kind);
        let text = truncate(&toast.message, slot.width.saturating_sub(6) as usize);
        f.render_widget(Clear, slot);
        let widget = Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" {} ", toast.kind.icon()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(text, theme::normal_style()),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .style(Style::default().bg(theme::HEADER_BG)),
        );
        f.render_widget(widget, slot);
    }
}
