use anyhow::Result;
use rust_decimal::Decimal;
use std::time::Instant;

use super::toast::{ToastHost, ToastKind};
use crate::db::Database;
use crate::evaluate::{parse_euro, ratio_of, store_key, ThresholdEvaluator};
use crate::models::*;
use crate::report::{self, MutedSpeaker, Presenter, Report, Speaker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Months,
    Categories,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Months, Self::Categories]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Months => write!(f, "Mesi"),
            Self::Categories => write!(f, "Categorie"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
        }
    }
}

/// Blocking dialog; every key except the close keys is swallowed while open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Popup {
    Report { report: Report, is_warning: bool },
    Alert(String),
}

/// One line of the yearly table.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MonthRow {
    pub(crate) month: Month,
    pub(crate) revenue: Decimal,
    pub(crate) expenses: Decimal,
    pub(crate) ratio: Decimal,
    pub(crate) has_data: bool,
}

/// Stored value of one category for the selected month.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryRow {
    pub(crate) category: Category,
    pub(crate) raw: Option<String>,
    pub(crate) value: Decimal,
    pub(crate) ratio: Decimal,
    pub(crate) limit: Option<Decimal>,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    pub(crate) year: i32,
    pub(crate) month_index: usize,
    pub(crate) months: Vec<MonthRow>,

    pub(crate) categories: Vec<CategoryRow>,
    pub(crate) category_index: usize,
    pub(crate) category_scroll: usize,

    pub(crate) popup: Option<Popup>,
    /// Created on the first notification.
    pub(crate) toast_host: Option<ToastHost>,

    pub(crate) speech_enabled: bool,
    speaker: Box<dyn Speaker>,
    pub(crate) thresholds: ThresholdTable,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(year: i32, speaker: Box<dyn Speaker>, speech_enabled: bool) -> Self {
        let month_index = chrono::Datelike::month0(&chrono::Local::now()) as usize;
        Self {
            running: true,
            screen: Screen::Months,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            year,
            month_index,
            months: Vec::new(),

            categories: Vec::new(),
            category_index: 0,
            category_scroll: 0,

            popup: None,
            toast_host: None,

            speech_enabled,
            speaker,
            thresholds: ThresholdTable::default(),

            visible_rows: 20,
        }
    }

    pub(crate) fn selected_month(&self) -> Month {
        Month::from_index(self.month_index as u32 + 1).unwrap_or(Month::Gennaio)
    }

    pub(crate) fn select_month(&mut self, month: Month) {
        self.month_index = usize::from(month.index()) - 1;
        self.category_index = 0;
        self.category_scroll = 0;
    }

    pub(crate) fn refresh_months(&mut self, db: &Database) -> Result<()> {
        let cells = db.get_year_cells(self.year)?;
        self.months = Month::all()
            .iter()
            .zip(cells)
            .map(|(&month, c)| {
                let revenue = parse_euro(Some(&c.revenue));
                let expenses = parse_euro(Some(&c.expenses));
                MonthRow {
                    month,
                    revenue,
                    expenses,
                    ratio: ratio_of(expenses, revenue),
                    has_data: !c.revenue.trim().is_empty() || !c.expenses.trim().is_empty(),
                }
            })
            .collect();
        Ok(())
    }

    pub(crate) fn refresh_categories(&mut self, db: &Database) -> Result<()> {
        let month = self.selected_month();
        let revenue = self
            .months
            .get(self.month_index)
            .map(|r| r.revenue)
            .unwrap_or(Decimal::ZERO);
        let mut rows = Vec::with_capacity(Category::all().len());
        for &category in Category::all() {
            let key = store_key(self.year, month, category.bucket(), category.as_str());
            let raw = db.get_value(&key)?;
            let value = parse_euro(raw.as_deref());
            rows.push(CategoryRow {
                category,
                raw,
                value,
                ratio: ratio_of(value, revenue),
                limit: self.thresholds.limit_for(category),
            });
        }
        self.categories = rows;
        if self.category_index >= self.categories.len() {
            self.category_index = self.categories.len().saturating_sub(1);
        }
        Ok(())
    }

    pub(crate) fn refresh_all(&mut self, db: &Database) -> Result<()> {
        self.refresh_months(db)?;
        self.refresh_categories(db)?;
        Ok(())
    }

    /// Evaluate `month` and open the report popup, speaking the alerts
    /// unless muted.
    pub(crate) fn check_month(&mut self, db: &Database, month: Month) -> EvaluationResult {
        let result = ThresholdEvaluator::new(&self.thresholds, self.year).evaluate(
            month,
            db,
            &db.year_page(self.year),
        );
        let mut speaker = std::mem::replace(&mut self.speaker, Box::new(MutedSpeaker));
        if self.speech_enabled {
            report::dispatch(&result, self, speaker.as_mut());
        } else {
            report::dispatch(&result, self, &mut MutedSpeaker);
        }
        self.speaker = speaker;
        result
    }

    pub(crate) fn alert(&mut self, message: impl Into<String>) {
        self.popup = Some(Popup::Alert(message.into()));
    }

    pub(crate) fn close_popup(&mut self) {
        self.popup = None;
    }

    pub(crate) fn notify(&mut self, message: impl Into<String>, kind: ToastKind) {
        let message = message.into();
        tracing::debug!(%message, ?kind, "toast");
        self.toast_host
            .get_or_insert_with(ToastHost::new)
            .push(message, kind, Instant::now());
    }

    /// Expire old toasts; true when something was removed.
    pub(crate) fn tick(&mut self, now: Instant) -> bool {
        self.toast_host
            .as_mut()
            .is_some_and(|host| host.prune(now) > 0)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

impl Presenter for App {
    fn present(&mut self, report: Report, is_warning: bool) {
        self.set_status(report.title);
        self.popup = Some(Popup::Report { report, is_warning });
    }
}
