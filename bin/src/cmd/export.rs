//! Export command implementation.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use equilens::EngineConfig;
use equilens_data::DashboardData;
use equilens_eval::{DailyReturn, ExportConfig, build_document, test_period_metrics};
use tracing::info;

/// Parse a date string in YYYY-MM-DD format.
pub(crate) fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .with_context(|| format!("invalid date `{date_str}` (expected YYYY-MM-DD)"))
}

/// Build a dashboard document from daily returns and write it as JSON.
pub(crate) fn export_document(
    input: &Path,
    train_end: &str,
    valid_end: &str,
    output: Option<&Path>,
    config: &EngineConfig,
) -> Result<()> {
    let text = fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let days: Vec<DailyReturn> =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", input.display()))?;

    let mut export = ExportConfig::new(parse_date(train_end)?, parse_date(valid_end)?);
    export.mode = config.rebase_mode;

    let document = build_document(&days, &export)?;
    let metrics = test_period_metrics(&document, export.mode, config.trading_days_per_year);

    let data = DashboardData {
        metrics,
        equity_curve: &document,
    };
    let json = serde_json::to_string_pretty(&data)?;

    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), points = document.len(), "wrote dashboard document");
            println!("Wrote {} points to {}", document.len(), path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_date() {
        let date = parse_date("2024-01-15").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date("01/15/2024").is_err());
        assert!(parse_date("2024-13-01").is_err());
    }
}
