//! Performance metrics from a cumulative-return series.
//!
//! This module computes the four dashboard statistics:
//! - Annualized return: geometric, from the final cumulative value
//! - Maximum drawdown: worst decline from a running peak of the growth series
//! - Sharpe ratio: mean over population standard deviation of daily returns
//! - Information ratio: the same ratio over strategy-minus-benchmark returns
//!
//! Inputs are cumulative returns in the compounding convention (growth
//! factor minus one) that have already been filtered and re-based, so index 0
//! reads `0`.

use std::fmt;

use equilens_data::SummaryMetrics;
use equilens_traits::{
    Date,
    stats::{TRADING_DAYS_PER_YEAR, annualized_ratio, growth_returns},
};
use serde::{Deserialize, Serialize};

/// Configuration for metrics calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Number of trading days per year for annualization
    pub trading_days_per_year: usize,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
        }
    }
}

/// The four summary statistics shown on the dashboard.
///
/// Every field is `0.0` when there is not enough data to compute it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Annualized return
    pub annualized_return: f64,
    /// Maximum drawdown (non-positive)
    pub max_drawdown: f64,
    /// Annualized Sharpe ratio
    pub sharpe_ratio: f64,
    /// Annualized information ratio
    pub information_ratio: f64,
}

impl Metrics {
    /// Formatted view for display.
    #[must_use]
    pub const fn display(&self) -> MetricsDisplay<'_> {
        MetricsDisplay(self)
    }
}

impl From<Metrics> for SummaryMetrics {
    fn from(m: Metrics) -> Self {
        Self {
            annualized_return: Some(m.annualized_return),
            max_drawdown: Some(m.max_drawdown),
            sharpe_ratio: Some(m.sharpe_ratio),
            information_ratio: Some(m.information_ratio),
        }
    }
}

/// Format a fraction as a percentage with two decimals (`0.1234` -> `12.34%`).
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Format a ratio with four decimals.
#[must_use]
pub fn format_ratio(value: f64) -> String {
    format!("{value:.4}")
}

/// Display adapter for [`Metrics`].
///
/// Returns and drawdowns print as percentages, ratios with four decimals.
#[derive(Debug, Clone, Copy)]
pub struct MetricsDisplay<'a>(&'a Metrics);

impl fmt::Display for MetricsDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;
        writeln!(f, "Annualized Return:  {}", format_percent(m.annualized_return))?;
        writeln!(f, "Max Drawdown:       {}", format_percent(m.max_drawdown))?;
        writeln!(f, "Sharpe Ratio:       {}", format_ratio(m.sharpe_ratio))?;
        write!(f, "Information Ratio:  {}", format_ratio(m.information_ratio))
    }
}

/// Computes [`Metrics`] from re-based cumulative returns.
#[derive(Debug, Clone, Default)]
pub struct MetricsCalculator {
    config: MetricsConfig,
}

impl MetricsCalculator {
    /// Create a calculator with the given configuration.
    #[must_use]
    pub const fn new(config: MetricsConfig) -> Self {
        Self { config }
    }

    /// The calculator's configuration.
    #[must_use]
    pub const fn config(&self) -> &MetricsConfig {
        &self.config
    }

    /// Compute all four metrics.
    ///
    /// # Arguments
    ///
    /// * `dates` - Date labels of the visible range; their count sets the
    ///   number of years
    /// * `strategy` - Re-based cumulative strategy returns
    /// * `benchmark` - Re-based cumulative benchmark returns; the information
    ///   ratio is `0` unless this has the same length as `strategy`
    ///
    /// # Returns
    ///
    /// [`Metrics::default`] (all zero) for fewer than two strategy points.
    ///
    /// # Example
    ///
    /// ```
    /// use equilens_eval::MetricsCalculator;
    /// use equilens_traits::Date;
    ///
    /// let dates: Vec<Date> = (1..=3)
    ///     .map(|d| Date::from_ymd_opt(2024, 1, d).unwrap())
    ///     .collect();
    /// let metrics = MetricsCalculator::default().compute(&dates, &[0.0, -0.5, 0.0], None);
    /// assert_eq!(metrics.max_drawdown, -0.5);
    /// ```
    #[must_use]
    pub fn compute(&self, dates: &[Date], strategy: &[f64], benchmark: Option<&[f64]>) -> Metrics {
        if strategy.len() < 2 {
            return Metrics::default();
        }

        let periods = self.config.trading_days_per_year;
        let strategy_daily = daily_returns(strategy);

        let total = strategy[strategy.len() - 1];
        let annualized_return = annualized_return(total, dates.len(), periods);
        let max_drawdown = max_drawdown(strategy);
        let sharpe_ratio = annualized_ratio(&strategy_daily, periods);

        let information_ratio = match benchmark {
            Some(bench) if bench.len() == strategy.len() => {
                let active: Vec<f64> = strategy_daily
                    .iter()
                    .zip(daily_returns(bench))
                    .map(|(s, b)| s - b)
                    .collect();
                annualized_ratio(&active, periods)
            }
            _ => 0.0,
        };

        Metrics {
            annualized_return,
            max_drawdown,
            sharpe_ratio,
            information_ratio,
        }
    }
}

/// Period-over-period returns of a cumulative series.
///
/// `daily[i - 1] = (1 + cum[i]) / (1 + cum[i - 1]) - 1`.
#[must_use]
pub fn daily_returns(cumulative: &[f64]) -> Vec<f64> {
    let growth: Vec<f64> = cumulative.iter().map(|c| 1.0 + c).collect();
    growth_returns(&growth)
}

/// Geometric annualization of a total return over `n_periods` trading days.
///
/// Returns `0` when there are no periods and `-1` once the growth factor has
/// reached zero or below.
#[must_use]
pub fn annualized_return(total: f64, n_periods: usize, periods_per_year: usize) -> f64 {
    let years = n_periods as f64 / periods_per_year as f64;
    if years <= 0.0 {
        return 0.0;
    }
    let growth = 1.0 + total;
    if growth <= 0.0 {
        return -1.0;
    }
    growth.powf(1.0 / years) - 1.0
}

/// Maximum drawdown of a cumulative series.
///
/// Walks the growth series `1 + cum[i]` keeping a running peak; the result is
/// the most negative `(value - peak) / peak` seen, or `0` if the series never
/// falls below a previous high.
#[must_use]
pub fn max_drawdown(cumulative: &[f64]) -> f64 {
    let mut mdd = 0.0;
    let mut peak = f64::NEG_INFINITY;

    for &c in cumulative {
        let value = 1.0 + c;
        if value > peak {
            peak = value;
        }
        let dd = (value - peak) / peak;
        if dd < mdd {
            mdd = dd;
        }
    }

    mdd
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dates(n: usize) -> Vec<Date> {
        let start = Date::from_ymd_opt(2022, 1, 3).unwrap();
        (0..n)
            .map(|i| start + chrono::Duration::days(i as i64))
            .collect()
    }

    #[test]
    fn test_degenerate_input() {
        let calc = MetricsCalculator::default();
        assert_eq!(calc.compute(&[], &[], None), Metrics::default());
        assert_eq!(calc.compute(&dates(1), &[0.0], Some(&[0.0][..])), Metrics::default());
    }

    #[test]
    fn test_max_drawdown_increasing() {
        assert_eq!(max_drawdown(&[0.0, 0.01, 0.03, 0.1]), 0.0);
    }

    #[test]
    fn test_max_drawdown_halving() {
        assert_eq!(max_drawdown(&[0.0, -0.5, 0.0]), -0.5);
        assert_relative_eq!(max_drawdown(&[0.0, 0.2, -0.1, 0.5, 0.2]), -0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_annualized_return() {
        // One full year of data returns the total unchanged.
        assert_relative_eq!(annualized_return(0.1, 252, 252), 0.1, epsilon = 1e-12);
        // Half a year compounds up.
        assert_relative_eq!(annualized_return(0.1, 126, 252), 0.21, epsilon = 1e-12);
        assert_eq!(annualized_return(0.1, 0, 252), 0.0);
        assert_eq!(annualized_return(-1.0, 10, 252), -1.0);
    }

    #[test]
    fn test_sharpe_constant_daily_returns() {
        // Growth 1, 2, 4, 8: every daily return is exactly 1.0.
        let calc = MetricsCalculator::default();
        let m = calc.compute(&dates(4), &[0.0, 1.0, 3.0, 7.0], None);
        assert_eq!(m.sharpe_ratio, 0.0);

        // Breaking the pattern by a little brings the ratio back.
        let m = calc.compute(&dates(4), &[0.0, 1.0, 3.0, 7.5], None);
        assert!(m.sharpe_ratio > 0.0);
    }

    #[test]
    fn test_sharpe_linear_cumulative_is_not_constant() {
        // Linear cumulative returns have shrinking daily returns.
        let m = MetricsCalculator::default().compute(&dates(4), &[0.0, 0.01, 0.02, 0.03], None);
        assert!(m.sharpe_ratio > 0.0);
    }

    #[test]
    fn test_sharpe_value() {
        let cum = [0.0, 0.01, -0.005, 0.02];
        let daily = daily_returns(&cum);
        let mean = daily.iter().sum::<f64>() / 3.0;
        let var = daily.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / 3.0;
        let expected = mean / var.sqrt() * 252f64.sqrt();

        let m = MetricsCalculator::default().compute(&dates(4), &cum, None);
        assert_relative_eq!(m.sharpe_ratio, expected, epsilon = 1e-10);
    }

    #[test]
    fn test_information_ratio_identical_benchmark() {
        let cum = [0.0, 0.01, -0.02, 0.04, 0.03];
        let m = MetricsCalculator::default().compute(&dates(5), &cum, Some(&cum[..]));
        assert_eq!(m.information_ratio, 0.0);
    }

    #[test]
    fn test_information_ratio_requires_equal_length() {
        let m = MetricsCalculator::default().compute(
            &dates(3),
            &[0.0, 0.02, 0.01],
            Some(&[0.0, 0.01][..]),
        );
        assert_eq!(m.information_ratio, 0.0);
    }

    #[test]
    fn test_information_ratio_sign() {
        let strategy = [0.0, 0.02, 0.03, 0.06, 0.07];
        let benchmark = [0.0, 0.01, 0.015, 0.02, 0.03];
        let m = MetricsCalculator::default().compute(&dates(5), &strategy, Some(&benchmark[..]));
        assert!(m.information_ratio > 0.0);
    }

    #[test]
    fn test_custom_trading_days() {
        let calc = MetricsCalculator::new(MetricsConfig {
            trading_days_per_year: 250,
        });
        let m = calc.compute(&dates(250), &[0.0, 0.1], None);
        assert_relative_eq!(m.annualized_return, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_deterministic() {
        let calc = MetricsCalculator::default();
        let s = [0.0, 0.013, -0.021, 0.007, 0.031];
        let b = [0.0, 0.004, -0.01, 0.0, 0.012];
        let a = calc.compute(&dates(5), &s, Some(&b[..]));
        let c = calc.compute(&dates(5), &s, Some(&b[..]));
        assert_eq!(a.annualized_return.to_bits(), c.annualized_return.to_bits());
        assert_eq!(a.sharpe_ratio.to_bits(), c.sharpe_ratio.to_bits());
        assert_eq!(a.information_ratio.to_bits(), c.information_ratio.to_bits());
    }

    #[test]
    fn test_display_format() {
        let m = Metrics {
            annualized_return: 0.123_456,
            max_drawdown: -0.05,
            sharpe_ratio: 1.234_567,
            information_ratio: -0.5,
        };
        let text = m.display().to_string();
        assert!(text.contains("12.35%"));
        assert!(text.contains("-5.00%"));
        assert!(text.contains("1.2346"));
        assert!(text.contains("-0.5000"));
    }
}
