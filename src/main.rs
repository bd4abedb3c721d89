mod config;
mod db;
mod evaluate;
mod import;
mod models;
mod report;
mod run;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config, rest) = config::Config::load(&args)?;
    if let Err(e) = config::init_logging(&config) {
        eprintln!("Warning: {e:#}");
    }
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        year = config.year,
        speech = config.speech,
        data_dir = %config.data_dir.display(),
        "starting"
    );

    let mut db = db::Database::open(&config.db_path)?;

    if rest.is_empty() {
        run::as_tui(&config, &mut db)
    } else {
        run::as_cli(&rest, &config, &mut db)
    }
}
