use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::{Datelike, NaiveDate};

use procat_core::utils::time_utils::previous_month_start;

const DEFAULT_DB_PATH: &str = "./data/procat.db";
const DEFAULT_OUTPUT_DIR: &str = "./reports";

/// Runtime configuration read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub output_dir: PathBuf,
    /// `text` or `json`.
    pub log_format: String,
}

impl Config {
    /// Reads `PROCAT_DB_PATH`, `PROCAT_OUTPUT_DIR` and `PROCAT_LOG_FORMAT`,
    /// after loading a `.env` file when one exists.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            db_path: std::env::var("PROCAT_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.into()),
            output_dir: std::env::var("PROCAT_OUTPUT_DIR")
                .unwrap_or_else(|_| DEFAULT_OUTPUT_DIR.into())
                .into(),
            log_format: std::env::var("PROCAT_LOG_FORMAT").unwrap_or_else(|_| "text".into()),
        }
    }
}

/// Month and year to report on: `MONTH YEAR` from the command line, or the
/// month before `today` when no arguments are given.
pub fn parse_period(args: &[String], today: NaiveDate) -> anyhow::Result<(u32, i32)> {
    match args {
        [] => {
            let last = previous_month_start(today);
            Ok((last.month(), last.year()))
        }
        [month, year] => {
            let month = month
                .parse::<u32>()
                .with_context(|| format!("MONTH must be a number, got '{month}'"))?;
            let year = year
                .parse::<i32>()
                .with_context(|| format!("YEAR must be a number, got '{year}'"))?;
            Ok((month, year))
        }
        _ => bail!("usage: procat-reporter [MONTH YEAR]"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn defaults_to_previous_month() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(parse_period(&[], today).unwrap(), (12, 2024));
    }

    #[test]
    fn reads_month_and_year() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(parse_period(&args(&["4", "2025"]), today).unwrap(), (4, 2025));
    }

    #[test]
    fn rejects_malformed_arguments() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert!(parse_period(&args(&["April", "2025"]), today).is_err());
        assert!(parse_period(&args(&["4"]), today).is_err());
    }
}
