use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::db::Database;
use crate::models::Month;
use crate::report::{MutedSpeaker, Speaker, SystemSpeaker};
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::toast::ToastKind;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

/// Redraw interval while idle, so toasts expire on time.
const TICK: Duration = Duration::from_millis(200);

pub(crate) fn as_tui(config: &Config, db: &mut Database) -> Result<()> {
    let mut speech_missing = false;
    let speaker: Box<dyn Speaker> = if config.speech {
        let system = SystemSpeaker::detect();
        speech_missing = !system.is_available();
        Box::new(system)
    } else {
        Box::new(MutedSpeaker)
    };
    let mut app = App::new(config.year, speaker, config.speech);
    app.refresh_all(db)?;
    if speech_missing {
        app.notify("Nessun motore vocale trovato", ToastKind::Warning);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, db);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %format!("{e:#}"), "tui exited with error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &mut Database,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab + status + command bars, table borders and header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                handle_key(key, app, db)?;
            }
        }
        app.tick(Instant::now());
    }
    Ok(())
}

pub(super) fn handle_key(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    if app.popup.is_some() {
        if matches!(
            key.code,
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('o') | KeyCode::Char('O')
        ) {
            app.close_popup();
        }
        return Ok(());
    }
    if app.show_help {
        app.show_help = false;
        return Ok(());
    }
    match app.input_mode {
        InputMode::Normal => handle_normal_input(key, app, db),
        InputMode::Command => handle_command_input(key, app, db),
    }
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
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
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app, db)?,
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app, db)?,
        KeyCode::Char('g') => handle_goto_top(app, db)?,
        KeyCode::Char('G') => handle_goto_bottom(app, db)?,
        KeyCode::Char('1') => switch_screen(app, db, Screen::Months)?,
        KeyCode::Char('2') => switch_screen(app, db, Screen::Categories)?,
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, db, screens[next])?;
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, db, screens[prev])?;
        }
        KeyCode::Enter => {
            let month = app.selected_month();
            app.check_month(db, month);
        }
        KeyCode::Esc => app.set_status(""),
        KeyCode::Char('H') => change_year(app, db, -1)?,
        KeyCode::Char('L') => change_year(app, db, 1)?,
        KeyCode::Char('m') => commands::handle_command("mute", app, db)?,
        KeyCode::Char('x') => {
            if let Some(host) = app.toast_host.as_mut() {
                host.dismiss_latest();
            }
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            if let Err(e) = commands::handle_command(&input, app, db) {
                tracing::error!(command = %input, error = %format!("{e:#}"), "command failed");
                app.set_status(format!("Error: {e:#}"));
                app.notify("Operazione non riuscita", ToastKind::Danger);
            }
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
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
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

// ── Helpers ──────────────────────────────────────────────────

fn switch_screen(app: &mut App, db: &mut Database, screen: Screen) -> Result<()> {
    app.screen = screen;
    match screen {
        Screen::Months => app.refresh_months(db)?,
        Screen::Categories => app.refresh_categories(db)?,
    }
    app.set_status(format!("{screen}"));
    Ok(())
}

fn change_year(app: &mut App, db: &mut Database, delta: i32) -> Result<()> {
    app.year += delta;
    app.refresh_all(db)?;
    app.notify(format!("Anno {}", app.year), ToastKind::Info);
    Ok(())
}

fn select_month_index(app: &mut App, db: &mut Database, index: usize) -> Result<()> {
    if index != app.month_index {
        if let Some(month) = Month::from_index(index as u32 + 1) {
            app.select_month(month);
            app.refresh_categories(db)?;
        }
    }
    Ok(())
}

fn handle_move_down(app: &mut App, db: &mut Database) -> Result<()> {
    match app.screen {
        Screen::Months => {
            let next = (app.month_index + 1).min(Month::all().len() - 1);
            select_month_index(app, db, next)?;
        }
        Screen::Categories => {
            let len = app.categories.len();
            scroll_down(
                &mut app.category_index,
                &mut app.category_scroll,
                len,
                app.visible_rows,
            );
        }
    }
    Ok(())
}

fn handle_move_up(app: &mut App, db: &mut Database) -> Result<()> {
    match app.screen {
        Screen::Months => {
            let prev = app.month_index.saturating_sub(1);
            select_month_index(app, db, prev)?;
        }
        Screen::Categories => scroll_up(&mut app.category_index, &mut app.category_scroll),
    }
    Ok(())
}

fn handle_goto_top(app: &mut App, db: &mut Database) -> Result<()> {
    match app.screen {
        Screen::Months => select_month_index(app, db, 0)?,
        Screen::Categories => scroll_to_top(&mut app.category_index, &mut app.category_scroll),
    }
    Ok(())
}

fn handle_goto_bottom(app: &mut App, db: &mut Database) -> Result<()> {
    match app.screen {
        Screen::Months => select_month_index(app, db, Month::all().len() - 1)?,
        Screen::Categories => {
            let len = app.categories.len();
            scroll_to_bottom(
                &mut app.category_index,
                &mut app.category_scroll,
                len,
                app.visible_rows,
            );
        }
    }
    Ok(())
}
