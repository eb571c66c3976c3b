//! Performance broken down by market regime and dataset segment.
//!
//! Each cell of the table restricts the document's daily returns to one
//! regime (or all regimes) and one segment, then reports annualized returns,
//! volatility, risk-adjusted ratios and win rates. Unlike the dashboard
//! metrics, volatilities here use the sample standard deviation and the
//! Sharpe ratio is annualized return over annualized volatility.

use equilens_data::EquityCurveDocument;
use equilens_traits::{Regime, Segment, stats::sample_std};
use serde::{Deserialize, Serialize};

/// Statistics for one (regime, segment) cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellStats {
    /// Annualized strategy return
    pub strategy_return: f64,
    /// Annualized benchmark return
    pub benchmark_return: f64,
    /// Strategy minus benchmark annualized return
    pub outperformance: f64,
    /// Annualized strategy volatility
    pub strategy_volatility: f64,
    /// Annualized benchmark volatility
    pub benchmark_volatility: f64,
    /// Strategy return over volatility; `None` with zero volatility
    pub strategy_sharpe: Option<f64>,
    /// Benchmark return over volatility; `None` with zero volatility
    pub benchmark_sharpe: Option<f64>,
    /// Outperformance over annualized tracking error; `None` with zero error
    pub information_ratio: Option<f64>,
    /// Fraction of days with a positive strategy return
    pub strategy_win_rate: f64,
    /// Fraction of days with a positive benchmark return
    pub benchmark_win_rate: f64,
    /// Fraction of days the strategy beat the benchmark
    pub beat_benchmark_rate: f64,
}

/// One row of the breakdown table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRow {
    /// Regime filter; `None` means every regime.
    pub regime: Option<Regime>,
    /// Segment filter.
    pub segment: Segment,
    /// Number of days in the cell.
    pub observations: usize,
    /// Statistics, absent with fewer than two observations.
    pub stats: Option<CellStats>,
}

/// Compute the full regime x segment table.
///
/// Rows are ordered Bull, Bear, Choppy, then all regimes; within each, Train,
/// Valid, Test.
#[must_use]
pub fn regime_breakdown(document: &EquityCurveDocument, trading_days: usize) -> Vec<BreakdownRow> {
    let strategy = pct_change(document.strategy());
    let benchmark = pct_change(document.benchmark());

    let regimes = [
        Some(Regime::Bull),
        Some(Regime::Bear),
        Some(Regime::Choppy),
        None,
    ];
    let segments = [Segment::Train, Segment::Valid, Segment::Test];

    let mut rows = Vec::with_capacity(regimes.len() * segments.len());
    for regime in regimes {
        for segment in &segments {
            let mask: Vec<usize> = (0..document.len())
                .filter(|&i| &document.segments()[i] == segment)
                .filter(|&i| regime.is_none_or(|r| document.regime_at(i) == r))
                .collect();

            let s: Vec<f64> = mask.iter().map(|&i| strategy[i]).collect();
            let b: Vec<f64> = mask.iter().map(|&i| benchmark[i]).collect();

            rows.push(BreakdownRow {
                regime,
                segment: segment.clone(),
                observations: mask.len(),
                stats: cell_stats(&s, &b, trading_days),
            });
        }
    }
    rows
}

/// Daily returns of a cumulative series, with `0` on the first point.
///
/// A return touching an undefined point counts as flat.
fn pct_change(cumulative: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(cumulative.len());
    if cumulative.is_empty() {
        return out;
    }
    out.push(0.0);
    out.extend(
        cumulative
            .windows(2)
            .map(|w| (1.0 + w[1]) / (1.0 + w[0]) - 1.0)
            .map(|r| if r.is_finite() { r } else { 0.0 }),
    );
    out
}

fn annualize_geometric(returns: &[f64], trading_days: usize) -> f64 {
    let growth: f64 = returns.iter().map(|r| 1.0 + r).product();
    growth.powf(trading_days as f64 / returns.len() as f64) - 1.0
}

fn fraction(count: usize, total: usize) -> f64 {
    count as f64 / total as f64
}

fn cell_stats(strategy: &[f64], benchmark: &[f64], trading_days: usize) -> Option<CellStats> {
    let n = strategy.len();
    if n < 2 {
        return None;
    }
    let scale = (trading_days as f64).sqrt();

    let strategy_return = annualize_geometric(strategy, trading_days);
    let benchmark_return = annualize_geometric(benchmark, trading_days);
    let outperformance = strategy_return - benchmark_return;

    let strategy_volatility = sample_std(strategy)? * scale;
    let benchmark_volatility = sample_std(benchmark)? * scale;

    let diff: Vec<f64> = strategy.iter().zip(benchmark).map(|(s, b)| s - b).collect();
    let tracking_error = sample_std(&diff)? * scale;

    let ratio = |num: f64, den: f64| (den != 0.0).then(|| num / den);

    Some(CellStats {
        strategy_return,
        benchmark_return,
        outperformance,
        strategy_volatility,
        benchmark_volatility,
        strategy_sharpe: ratio(strategy_return, strategy_volatility),
        benchmark_sharpe: ratio(benchmark_return, benchmark_volatility),
        information_ratio: ratio(outperformance, tracking_error),
        strategy_win_rate: fraction(strategy.iter().filter(|&&r| r > 0.0).count(), n),
        benchmark_win_rate: fraction(benchmark.iter().filter(|&&r| r > 0.0).count(), n),
        beat_benchmark_rate: fraction(
            strategy.iter().zip(benchmark).filter(|(s, b)| s > b).count(),
            n,
        ),
    })
}
