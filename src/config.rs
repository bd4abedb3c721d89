use anyhow::{Context, Result};
use chrono::Datelike;
use std::path::PathBuf;

/// Runtime settings resolved from the command line and the platform data
/// directory.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) db_path: PathBuf,
    pub(crate) log_path: PathBuf,
    pub(crate) year: i32,
    pub(crate) speech: bool,
}

impl Config {
    /// Pull the global `--year` / `--mute` flags out of `args` and resolve
    /// paths. The remaining arguments are returned for command dispatch.
    pub(crate) fn load(args: &[String]) -> Result<(Self, Vec<String>)> {
        let (flags, rest) = GlobalFlags::extract(args)?;
        let data_dir = data_dir()?;
        let config = Self {
            db_path: data_dir.join("thresholdui.db"),
            log_path: data_dir.join("thresholdui.log"),
            data_dir,
            year: flags.year.unwrap_or_else(current_year),
            speech: !flags.mute,
        };
        Ok((config, rest))
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct GlobalFlags {
    pub(crate) year: Option<i32>,
    pub(crate) mute: bool,
}

impl GlobalFlags {
    pub(crate) fn extract(args: &[String]) -> Result<(Self, Vec<String>)> {
        let mut flags = Self::default();
        let mut rest = Vec::with_capacity(args.len());
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--year" | "-y" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--year needs a value, e.g. --year 2025"))?;
                    flags.year = Some(parse_year(value)?);
                }
                "--mute" => flags.mute = true,
                _ => rest.push(arg.clone()),
            }
        }
        Ok((flags, rest))
    }
}

pub(crate) fn parse_year(s: &str) -> Result<i32> {
    let year: i32 = s
        .trim()
        .parse()
        .with_context(|| format!("Invalid year: {s}"))?;
    if !(1900..=9999).contains(&year) {
        anyhow::bail!("Year out of range: {year}");
    }
    Ok(year)
}

pub(crate) fn current_year() -> i32 {
    chrono::Local::now().year()
}

fn data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "thresholdui", "ThresholdUI")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir().to_path_buf();
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir)
}

/// Send `tracing` output to the log file; the terminal belongs to the UI.
/// Filter with `THRESHOLDUI_LOG` (default `info`).
pub(crate) fn init_logging(config: &Config) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
        .with_context(|| format!("Failed to open log file: {}", config.log_path.display()))?;
    let filter = tracing_subscriber::EnvFilter::try_from_env("THRESHOLDUI_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_flags() {
        let (flags, rest) =
            GlobalFlags::extract(&args(&["check", "marzo", "--year", "2024", "--mute"])).unwrap();
        assert_eq!(flags.year, Some(2024));
        assert!(flags.mute);
        assert_eq!(rest, args(&["check", "marzo"]));
    }

    #[test]
    fn test_extract_no_flags() {
        let (flags, rest) = GlobalFlags::extract(&args(&["get", "1"])).unwrap();
        assert_eq!(flags, GlobalFlags::default());
        assert_eq!(rest.len(), 2);
    }

    #[test]
    fn test_year_flag_requires_value() {
        assert!(GlobalFlags::extract(&args(&["check", "--year"])).is_err());
        assert!(GlobalFlags::extract(&args(&["-y", "abc"])).is_err());
    }

    #[test]
    fn test_parse_year_range() {
        assert_eq!(parse_year(" 2025 ").unwrap(), 2025);
        assert!(parse_year("42").is_err());
        assert!(parse_year("20255").is_err());
    }
}
