use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use super::app::{App, Screen};
use super::toast::ToastKind;
use crate::db::Database;
use crate::evaluate::store_key;
use crate::models::{Bucket, Category, Month};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit ThresholdUI", cmd_quit, r);
    register_command!("quit", "Quit ThresholdUI", cmd_quit, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "check",
        "Check thresholds (e.g. :check marzo)",
        cmd_check,
        r
    );
    register_command!("c", "Check thresholds of the selected month", cmd_check, r);
    register_command!(
        "set",
        "Store a value (e.g. :set marzo fatture alimentari 2.600,00)",
        cmd_set,
        r
    );
    register_command!(
        "unset",
        "Remove a stored value (e.g. :unset marzo spese canone)",
        cmd_unset,
        r
    );
    register_command!(
        "totals",
        "Set revenue and expenses (e.g. :totals marzo 10.000,00 7.000,00)",
        cmd_totals,
        r
    );
    register_command!(
        "month",
        "Select month (e.g. :month mar, :month next)",
        cmd_month,
        r
    );
    register_command!("m", "Select month (e.g. :m 3)", cmd_month, r);
    register_command!("year", "Select year (e.g. :year 2024)", cmd_year, r);
    register_command!("mute", "Toggle spoken alerts", cmd_mute, r);
    register_command!(
        "import",
        "Import invoices CSV into this year (e.g. :import ~/fatture.csv)",
        cmd_import,
        r
    );
    register_command!("months", "Go to Months", cmd_months, r);
    register_command!("categories", "Go to Categories", cmd_categories, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        tracing::debug!(command = cmd_name, args, "command");
        (cmd.run)(args, app, db)?;
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Argument parsing shared with the CLI ─────────────────────

/// A `set` request: `<month> <spese|fatture> <category> <value…>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SetArgs {
    pub(crate) month: Month,
    pub(crate) bucket: Bucket,
    pub(crate) category: Category,
    pub(crate) value: String,
}

impl SetArgs {
    pub(crate) fn key(&self, year: i32) -> String {
        store_key(year, self.month, self.bucket, self.category.as_str())
    }
}

pub(crate) fn parse_set_args(args: &str) -> Result<SetArgs, String> {
    let mut parts = args.split_whitespace();
    let (Some(month), Some(bucket), Some(category)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err("Usage: set <month> <spese|fatture> <category> <value>".into());
    };
    let value = parts.collect::<Vec<_>>().join(" ");
    if value.is_empty() {
        return Err("Missing value".into());
    }
    let (month, bucket, category) = parse_entry(month, bucket, category)?;
    Ok(SetArgs {
        month,
        bucket,
        category,
        value,
    })
}

/// An `unset` request: `<month> <spese|fatture> <category>`; returns the store key.
pub(crate) fn parse_unset_args(args: &str, year: i32) -> Result<String, String> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    let [month, bucket, category] = parts.as_slice() else {
        return Err("Usage: unset <month> <spese|fatture> <category>".into());
    };
    let (month, bucket, category) = parse_entry(month, bucket, category)?;
    Ok(store_key(year, month, bucket, category.as_str()))
}

fn parse_entry(month: &str, bucket: &str, category: &str) -> Result<(Month, Bucket, Category), String> {
    Ok((
        Month::parse(month).ok_or_else(|| invalid_month(month))?,
        Bucket::parse(bucket).ok_or_else(|| format!("Unknown bucket: {bucket}"))?,
        Category::parse(category).ok_or_else(|| format!("Unknown category: {category}"))?,
    ))
}

/// A `totals` request: `<month> <revenue> <expenses>`.
pub(crate) fn parse_totals_args(args: &str) -> Result<(Month, String, String), String> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    let [month, revenue, expenses] = parts.as_slice() else {
        return Err("Usage: totals <month> <revenue> <expenses>".into());
    };
    let month = Month::parse(month).ok_or_else(|| invalid_month(month))?;
    Ok((month, revenue.to_string(), expenses.to_string()))
}

pub(crate) fn invalid_month(input: &str) -> String {
    format!("Mese non valido: '{input}'. Usa il nome (es. marzo), l'abbreviazione o il numero 1-12.")
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_months(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Months;
    app.refresh_months(db)?;
    Ok(())
}

fn cmd_categories(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Categories;
    app.refresh_categories(db)?;
    Ok(())
}

fn cmd_check(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let month = if args.is_empty() {
        app.selected_month()
    } else {
        match Month::parse(args) {
            Some(m) => m,
            None => {
                app.alert(invalid_month(args));
                return Ok(());
            }
        }
    };
    app.select_month(month);
    app.refresh_categories(db)?;
    app.check_month(db, month);
    Ok(())
}

fn cmd_set(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let set = match parse_set_args(args) {
        Ok(s) => s,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };
    if set.bucket != set.category.bucket() {
        app.notify(
            format!(
                "{} viene letta da '{}', non da '{}'",
                set.category.label(),
                set.category.bucket(),
                set.bucket
            ),
            ToastKind::Warning,
        );
    }
    db.set_value(&set.key(app.year), &set.value)?;
    app.select_month(set.month);
    app.refresh_categories(db)?;
    app.notify(
        format!(
            "Salvato {} {}: {}",
            set.category.label(),
            set.month.display_name(),
            set.value
        ),
        ToastKind::Success,
    );
    Ok(())
}

fn cmd_unset(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let key = match parse_unset_args(args, app.year) {
        Ok(k) => k,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };
    if db.delete_value(&key)? {
        app.refresh_categories(db)?;
        app.notify(format!("Rimosso {key}"), ToastKind::Info);
    } else {
        app.set_status(format!("Nessun valore per {key}"));
    }
    Ok(())
}

fn cmd_totals(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let (month, revenue, expenses) = match parse_totals_args(args) {
        Ok(t) => t,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };
    db.set_monthly_totals(app.year, month.index(), &revenue, &expenses)?;
    app.select_month(month);
    app.refresh_all(db)?;
    app.notify(
        format!("Totali di {} salvati", month.display_name()),
        ToastKind::Success,
    );
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let month = match args {
        "next" => Some(app.selected_month().next()),
        "prev" => Some(app.selected_month().prev()),
        _ => Month::parse(args),
    };
    match month {
        Some(month) => {
            app.select_month(month);
            app.refresh_categories(db)?;
            app.set_status(format!("{} {}", month.display_name(), app.year));
        }
        None => app.alert(invalid_month(args)),
    }
    Ok(())
}

fn cmd_year(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    match crate::config::parse_year(args) {
        Ok(year) => {
            app.year = year;
            app.refresh_all(db)?;
            app.notify(format!("Anno {year}"), ToastKind::Info);
        }
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_mute(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.speech_enabled = !app.speech_enabled;
    let msg = if app.speech_enabled {
        "Avvisi vocali attivi"
    } else {
        "Avvisi vocali disattivati"
    };
    app.notify(msg, ToastKind::Info);
    Ok(())
}

fn cmd_import(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: import <file.csv>");
        return Ok(());
    }
    let path = shellexpand(args);
    match crate::import::import_invoices(Path::new(&path), app.year, db) {
        Ok(summary) => {
            app.refresh_all(db)?;
            app.notify(
                format!(
                    "Importate {} fatture ({} totali aggiornati)",
                    summary.invoices,
                    summary.entries.len()
                ),
                ToastKind::Success,
            );
        }
        Err(e) => {
            tracing::warn!(path = %path, error = %format!("{e:#}"), "invoice import failed");
            app.notify(format!("Import fallito: {e:#}"), ToastKind::Danger);
        }
    }
    Ok(())
}
