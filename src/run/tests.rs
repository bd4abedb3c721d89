#![allow(clippy::unwrap_used)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::cli::TextPresenter;
use super::tui::handle_key;
use crate::db::Database;
use crate::evaluate::ThresholdEvaluator;
use crate::models::{Month, ThresholdTable};
use crate::report::{self, MutedSpeaker};
use crate::ui::app::{App, InputMode, Popup, Screen};
use crate::ui::toast::ToastKind;

fn setup() -> (App, Database) {
    let db = Database::open_in_memory().unwrap();
    let mut app = App::new(2025, Box::new(MutedSpeaker), false);
    app.select_month(Month::Marzo);
    app.refresh_all(&db).unwrap();
    (app, db)
}

fn press(app: &mut App, db: &mut Database, code: KeyCode) {
    handle_key(KeyEvent::new(code, KeyModifiers::NONE), app, db).unwrap();
}

fn type_command(app: &mut App, db: &mut Database, text: &str) {
    press(app, db, KeyCode::Char(':'));
    for c in text.chars() {
        press(app, db, KeyCode::Char(c));
    }
    press(app, db, KeyCode::Enter);
}

#[test]
fn test_month_navigation_keys() {
    let (mut app, mut db) = setup();
    press(&mut app, &mut db, KeyCode::Char('j'));
    assert_eq!(app.selected_month(), Month::Aprile);
    press(&mut app, &mut db, KeyCode::Up);
    press(&mut app, &mut db, KeyCode::Up);
    assert_eq!(app.selected_month(), Month::Febbraio);
    press(&mut app, &mut db, KeyCode::Char('G'));
    assert_eq!(app.selected_month(), Month::Dicembre);
    press(&mut app, &mut db, KeyCode::Char('j'));
    assert_eq!(app.selected_month(), Month::Dicembre);
    press(&mut app, &mut db, KeyCode::Char('g'));
    assert_eq!(app.selected_month(), Month::Gennaio);
}

#[test]
fn test_category_navigation_keys() {
    let (mut app, mut db) = setup();
    press(&mut app, &mut db, KeyCode::Char('2'));
    assert_eq!(app.screen, Screen::Categories);
    press(&mut app, &mut db, KeyCode::Char('j'));
    press(&mut app, &mut db, KeyCode::Char('j'));
    assert_eq!(app.category_index, 2);
    assert_eq!(app.selected_month(), Month::Marzo);
    press(&mut app, &mut db, KeyCode::Char('G'));
    assert_eq!(app.category_index, app.categories.len() - 1);
    press(&mut app, &mut db, KeyCode::Tab);
    assert_eq!(app.screen, Screen::Months);
}

#[test]
fn test_enter_opens_blocking_report() {
    let (mut app, mut db) = setup();
    press(&mut app, &mut db, KeyCode::Enter);
    assert!(matches!(app.popup, Some(Popup::Report { .. })));

    // Keys other than the close keys are swallowed.
    press(&mut app, &mut db, KeyCode::Char('j'));
    press(&mut app, &mut db, KeyCode::Char(':'));
    assert_eq!(app.selected_month(), Month::Marzo);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.popup.is_some());

    press(&mut app, &mut db, KeyCode::Char('o'));
    assert!(app.popup.is_none());
    press(&mut app, &mut db, KeyCode::Enter);
    press(&mut app, &mut db, KeyCode::Esc);
    assert!(app.popup.is_none());
}

#[test]
fn test_command_mode_runs_command() {
    let (mut app, mut db) = setup();
    type_command(&mut app, &mut db, "set marzo spese canone 1.500,00");
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.command_input.is_empty());
    assert_eq!(
        db.get_value("2025_marzo_spese_canone").unwrap().as_deref(),
        Some("1.500,00")
    );
}

#[test]
fn test_command_mode_escape_and_backspace() {
    let (mut app, mut db) = setup();
    press(&mut app, &mut db, KeyCode::Char(':'));
    press(&mut app, &mut db, KeyCode::Char('q'));
    press(&mut app, &mut db, KeyCode::Backspace);
    assert_eq!(app.input_mode, InputMode::Normal);
    press(&mut app, &mut db, KeyCode::Char(':'));
    press(&mut app, &mut db, KeyCode::Char('q'));
    press(&mut app, &mut db, KeyCode::Esc);
    assert!(app.running);
}

#[test]
fn test_year_keys() {
    let (mut app, mut db) = setup();
    press(&mut app, &mut db, KeyCode::Char('L'));
    assert_eq!(app.year, 2026);
    press(&mut app, &mut db, KeyCode::Char('H'));
    press(&mut app, &mut db, KeyCode::Char('H'));
    assert_eq!(app.year, 2024);
}

#[test]
fn test_mute_and_dismiss_keys() {
    let (mut app, mut db) = setup();
    press(&mut app, &mut db, KeyCode::Char('m'));
    assert!(app.speech_enabled);
    app.notify("ciao", ToastKind::Info);
    assert_eq!(app.toast_host.as_ref().unwrap().toasts().len(), 2);
    press(&mut app, &mut db, KeyCode::Char('x'));
    press(&mut app, &mut db, KeyCode::Char('x'));
    assert!(app.toast_host.as_ref().unwrap().is_empty());
}

#[test]
fn test_help_overlay_swallows_next_key() {
    let (mut app, mut db) = setup();
    press(&mut app, &mut db, KeyCode::Char('?'));
    assert!(app.show_help);
    press(&mut app, &mut db, KeyCode::Char('j'));
    assert!(!app.show_help);
    assert_eq!(app.selected_month(), Month::Marzo);
}

#[test]
fn test_ctrl_q_quits() {
    let (mut app, mut db) = setup();
    handle_key(
        KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        &mut app,
        &mut db,
    )
    .unwrap();
    assert!(!app.running);
}

#[test]
fn test_text_presenter_prints_report() {
    let db = Database::open_in_memory().unwrap();
    db.set_monthly_totals(2025, 3, "10.000,00", "7.000,00").unwrap();
    db.set_value("2025_marzo_spese_staff-cucina", "3.400,00").unwrap();
    let table = ThresholdTable::default();
    let result =
        ThresholdEvaluator::new(&table, 2025).evaluate(Month::Marzo, &db, &db.year_page(2025));

    let mut presenter = TextPresenter { out: Vec::new() };
    report::dispatch(&result, &mut presenter, &mut MutedSpeaker);
    let text = String::from_utf8(presenter.out).unwrap();
    assert!(text.starts_with("Attenzione!"));
    assert!(text.contains("Marzo 2025"));
    assert!(text.contains("! Spese del Personale: 34,00% (limite 33%)"));
}
