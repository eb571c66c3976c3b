//! Engine configuration.

use std::{fs, path::Path};

use equilens_eval::MetricsConfig;
use equilens_traits::{PeriodSelection, RebaseMode, Result, stats::TRADING_DAYS_PER_YEAR};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Deployment-wide settings of a [`Session`](crate::Session).
///
/// Every field has a default, so `{}` is a valid configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Convention of the document's cumulative series.
    pub rebase_mode: RebaseMode,
    /// Annualization constant.
    pub trading_days_per_year: usize,
    /// Period shown right after the document is loaded.
    pub default_period: PeriodSelection,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rebase_mode: RebaseMode::Compounding,
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
            default_period: PeriodSelection::Test,
        }
    }
}

impl EngineConfig {
    /// Read a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading engine config");
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Same configuration with a different rebase mode.
    #[must_use]
    pub const fn with_rebase_mode(mut self, mode: RebaseMode) -> Self {
        self.rebase_mode = mode;
        self
    }

    /// Metrics settings derived from this configuration.
    #[must_use]
    pub const fn metrics_config(&self) -> MetricsConfig {
        MetricsConfig {
            trading_days_per_year: self.trading_days_per_year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.trading_days_per_year, 252);
        assert_eq!(config.default_period, PeriodSelection::Test);
    }

    #[test]
    fn test_partial_json() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"rebase_mode": "additive", "default_period": "valid_test"}"#)
                .unwrap();
        assert_eq!(config.rebase_mode, RebaseMode::Additive);
        assert_eq!(config.default_period, PeriodSelection::ValidTest);
        assert_eq!(config.trading_days_per_year, 252);
    }

    #[test]
    fn test_with_rebase_mode() {
        let config = EngineConfig::default().with_rebase_mode(RebaseMode::Additive);
        assert_eq!(config.rebase_mode, RebaseMode::Additive);
        assert_eq!(config.metrics_config().trading_days_per_year, 252);
    }

    #[test]
    fn test_missing_file() {
        assert!(EngineConfig::from_path("/nonexistent/equilens.json").is_err());
    }
}
