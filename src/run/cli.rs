use anyhow::Result;
use std::io::Write;
use std::path::Path;

use crate::config::Config;
use crate::db::Database;
use crate::evaluate::{format_euro, format_limit, parse_euro, ThresholdEvaluator};
use crate::models::{Category, Month, ThresholdTable};
use crate::report::{self, MutedSpeaker, Presenter, Report, Speaker, SystemSpeaker};
use crate::ui::commands::{
    invalid_month, parse_set_args, parse_totals_args, parse_unset_args, shellexpand,
};

pub(crate) fn as_cli(args: &[String], config: &Config, db: &mut Database) -> Result<()> {
    match args[0].as_str() {
        "check" | "c" => cli_check(&args[1..], config, db),
        "set" => cli_set(&args[1..], config, db),
        "unset" => cli_unset(&args[1..], config, db),
        "totals" => cli_totals(&args[1..], config, db),
        "get" => cli_get(&args[1..], config, db),
        "categories" => cli_categories(),
        "import-invoices" => cli_import(&args[1..], config, db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("thresholdui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("ThresholdUI - monthly expense thresholds for restaurant budgets");
    println!();
    println!("Usage: thresholdui [--year <YYYY>] [--mute] [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                   Launch interactive TUI");
    println!("  check [month]                            Check thresholds (default: current month)");
    println!("  set <month> <spese|fatture> <cat> <val>  Store a category value");
    println!("  unset <month> <spese|fatture> <cat>      Remove a stored value");
    println!("  totals <month> <revenue> <expenses>      Set the month's revenue and expenses");
    println!("  get <month>                              Show stored values of a month");
    println!("  categories                               List categories and limits");
    println!("  import-invoices <file.csv>               Total invoices per month into 'fatture'");
    println!("  --help, -h                               Show this help");
    println!("  --version, -V                            Show version");
    println!();
    println!("Months: gennaio..dicembre, gen..dic, or 1-12. Amounts: 1.234,56");
}

/// Prints the report as plain text.
pub(crate) struct TextPresenter<W: Write> {
    pub(crate) out: W,
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn present(&mut self, report: Report, _is_warning: bool) {
        if let Err(e) = self.out.write_all(report.to_plain_text().as_bytes()) {
            tracing::warn!(error = %e, "failed to print report");
        }
    }
}

fn month_arg(args: &[String]) -> Result<Month> {
    match args.first() {
        None => Month::from_index(chrono::Datelike::month(&chrono::Local::now()))
            .ok_or_else(|| anyhow::anyhow!("Could not determine the current month")),
        Some(arg) => Month::parse(arg).ok_or_else(|| anyhow::anyhow!(invalid_month(arg))),
    }
}

fn cli_check(args: &[String], config: &Config, db: &mut Database) -> Result<()> {
    let month = month_arg(args)?;
    let table = ThresholdTable::default();
    let result =
        ThresholdEvaluator::new(&table, config.year).evaluate(month, &*db, &db.year_page(config.year));

    let mut speaker: Box<dyn Speaker> = if config.speech {
        Box::new(SystemSpeaker::detect())
    } else {
        Box::new(MutedSpeaker)
    };
    let mut presenter = TextPresenter {
        out: std::io::stdout().lock(),
    };
    report::dispatch(&result, &mut presenter, speaker.as_mut());
    Ok(())
}

fn cli_set(args: &[String], config: &Config, db: &mut Database) -> Result<()> {
    let set = parse_set_args(&args.join(" ")).map_err(|msg| anyhow::anyhow!(msg))?;
    if set.bucket != set.category.bucket() {
        eprintln!(
            "Warning: {} is read from '{}', not '{}'",
            set.category,
            set.category.bucket(),
            set.bucket
        );
    }
    let key = set.key(config.year);
    db.set_value(&key, &set.value)?;
    println!("{key} = {}", set.value);
    Ok(())
}

fn cli_unset(args: &[String], config: &Config, db: &mut Database) -> Result<()> {
    let key = parse_unset_args(&args.join(" "), config.year).map_err(|msg| anyhow::anyhow!(msg))?;
    if db.delete_value(&key)? {
        println!("Removed {key}");
    } else {
        println!("No value stored for {key}");
    }
    Ok(())
}

fn cli_totals(args: &[String], config: &Config, db: &mut Database) -> Result<()> {
    let (month, revenue, expenses) =
        parse_totals_args(&args.join(" ")).map_err(|msg| anyhow::anyhow!(msg))?;
    db.set_monthly_totals(config.year, month.index(), &revenue, &expenses)?;
    println!(
        "{} {}: incasso € {}, spese € {}",
        month.display_name(),
        config.year,
        format_euro(parse_euro(Some(&revenue))),
        format_euro(parse_euro(Some(&expenses)))
    );
    Ok(())
}

fn cli_get(args: &[String], config: &Config, db: &mut Database) -> Result<()> {
    let month = month_arg(args)?;
    println!("{} {}", month.display_name(), config.year);
    println!("{}", "─".repeat(56));

    let cells = db
        .get_monthly_cells(config.year, month.index())?
        .unwrap_or_default();
    println!("  {:<28} € {}", "Incasso", format_euro(parse_euro(Some(&cells.revenue))));
    println!("  {:<28} € {}", "Spese totali", format_euro(parse_euro(Some(&cells.expenses))));
    println!();

    let prefix = format!("{}_{}_", config.year, month.as_str());
    let values = db.values_with_prefix(&prefix)?;
    if values.is_empty() {
        println!("  No stored values");
        return Ok(());
    }
    for (key, value) in &values {
        let rest = key.strip_prefix(&prefix).unwrap_or(key);
        let (bucket, id) = rest.split_once('_').unwrap_or(("", rest));
        println!(
            "  {:<28} {:<8} € {}",
            crate::evaluate::category_label(id),
            bucket,
            format_euro(parse_euro(Some(value)))
        );
    }
    Ok(())
}

fn cli_categories() -> Result<()> {
    let table = ThresholdTable::default();
    println!("{:<18} {:<28} {:<8} Limite", "ID", "Categoria", "Voce");
    println!("{}", "─".repeat(64));
    for &cat in Category::all() {
        let limit = table
            .limit_for(cat)
            .map(format_limit)
            .unwrap_or_else(|| "—".into());
        println!(
            "{:<18} {:<28} {:<8} {limit}",
            cat.as_str(),
            cat.label(),
            cat.bucket().as_str()
        );
    }
    println!();
    for group in [&table.personnel, &table.financing] {
        let members: Vec<&str> = group.group.members().iter().map(|c| c.as_str()).collect();
        println!(
            "{} ({}): {}",
            group.group.label(),
            format_limit(group.limit),
            members.join(", ")
        );
    }
    Ok(())
}

fn cli_import(args: &[String], config: &Config, db: &mut Database) -> Result<()> {
    let Some(file_path) = args.first() else {
        anyhow::bail!("Usage: thresholdui import-invoices <file.csv>");
    };
    let expanded = shellexpand(file_path);
    let path = Path::new(&expanded);
    if !path.exists() {
        anyhow::bail!("File not found: {file_path}");
    }

    let summary = crate::import::import_invoices(path, config.year, db)?;
    println!(
        "Imported {} invoices for {} ({} from other years skipped)",
        summary.invoices, config.year, summary.skipped_other_years
    );
    for (key, value) in &summary.entries {
        println!("  {key:<40} {value}");
    }
    Ok(())
}
