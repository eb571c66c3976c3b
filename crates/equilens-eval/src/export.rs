//! Building dashboard documents from daily returns.
//!
//! A backtest produces one strategy and one benchmark return per day. This
//! module turns those into the cumulative curves, benchmark moving averages,
//! regime labels and segment labels a dashboard document carries, and
//! computes the Test-period summary metrics shipped with it.

use equilens_data::{EquityCurveDocument, SummaryMetrics};
use equilens_traits::{
    Date, EquilensError, PeriodSelection, RebaseMode, Regime, Result, Segment,
    stats::{mean, sample_std},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    metrics::{Metrics, annualized_return, max_drawdown},
    period::select,
};

/// One day of backtest output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyReturn {
    /// Trading date.
    pub date: Date,
    /// Strategy return for the day; missing counts as flat.
    #[serde(default)]
    pub strategy: Option<f64>,
    /// Benchmark return for the day; missing counts as flat.
    #[serde(default)]
    pub benchmark: Option<f64>,
}

/// Export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Last date (inclusive) of the Train segment.
    pub train_end: Date,
    /// Last date (inclusive) of the Valid segment.
    pub valid_end: Date,
    /// Cumulation convention of the exported curves.
    pub mode: RebaseMode,
    /// Floor applied to every daily return so growth never reaches zero.
    pub return_floor: f64,
    /// Window of the short benchmark moving average.
    pub short_window: usize,
    /// Window of the long benchmark moving average.
    pub long_window: usize,
}

impl ExportConfig {
    /// Configuration with the given segment boundaries and default settings.
    #[must_use]
    pub const fn new(train_end: Date, valid_end: Date) -> Self {
        Self {
            train_end,
            valid_end,
            mode: RebaseMode::Compounding,
            return_floor: -0.9,
            short_window: 20,
            long_window: 60,
        }
    }

    /// Segment label of a date.
    #[must_use]
    pub fn segment_for(&self, date: Date) -> Segment {
        if date <= self.train_end {
            Segment::Train
        } else if date <= self.valid_end {
            Segment::Valid
        } else {
            Segment::Test
        }
    }
}

/// Cumulate daily returns into a curve that starts from the first day.
///
/// Compounding gives `prod(1 + r) - 1`, additive gives `sum(r)`.
#[must_use]
pub fn cumulate(returns: &[f64], mode: RebaseMode) -> Vec<f64> {
    match mode {
        RebaseMode::Compounding => returns
            .iter()
            .scan(1.0, |growth, r| {
                *growth *= 1.0 + r;
                Some(*growth - 1.0)
            })
            .collect(),
        RebaseMode::Additive => returns
            .iter()
            .scan(0.0, |sum, r| {
                *sum += r;
                Some(*sum)
            })
            .collect(),
    }
}

/// Trailing mean over `window` points, absent until the window is full.
#[must_use]
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    (0..values.len())
        .map(|i| {
            (i + 1 >= window)
                .then(|| values[i + 1 - window..=i].iter().sum::<f64>() / window as f64)
        })
        .collect()
}

/// Trend regime from the benchmark level and its moving averages.
///
/// Bull when the level and the short average are both above the long
/// average, Bear when both are below, Choppy otherwise or while an average
/// is still warming up.
#[must_use]
pub fn classify_regime(level: f64, short_ma: Option<f64>, long_ma: Option<f64>) -> Regime {
    let (Some(short), Some(long)) = (short_ma, long_ma) else {
        return Regime::Choppy;
    };
    if level > long && short > long {
        Regime::Bull
    } else if level < long && short < long {
        Regime::Bear
    } else {
        Regime::Choppy
    }
}

/// Build a validated document from daily returns.
///
/// # Errors
///
/// Returns [`EquilensError::InvalidDate`] when `train_end` is after
/// `valid_end`, or a validation error when dates are out of order.
pub fn build_document(days: &[DailyReturn], config: &ExportConfig) -> Result<EquityCurveDocument> {
    if config.train_end > config.valid_end {
        return Err(EquilensError::InvalidDate(format!(
            "train end {} is after valid end {}",
            config.train_end, config.valid_end
        )));
    }

    let clip = |r: Option<f64>| r.filter(|r| r.is_finite()).unwrap_or(0.0).max(config.return_floor);
    let strategy_daily: Vec<f64> = days.iter().map(|d| clip(d.strategy)).collect();
    let benchmark_daily: Vec<f64> = days.iter().map(|d| clip(d.benchmark)).collect();

    let strategy = cumulate(&strategy_daily, config.mode);
    let benchmark = cumulate(&benchmark_daily, config.mode);
    let ma_short = rolling_mean(&benchmark, config.short_window);
    let ma_long = rolling_mean(&benchmark, config.long_window);

    let regimes = benchmark
        .iter()
        .zip(ma_short.iter().zip(&ma_long))
        .map(|(&level, (&short, &long))| classify_regime(level, short, long))
        .collect();
    let segments = days.iter().map(|d| config.segment_for(d.date)).collect();
    let dates = days.iter().map(|d| d.date).collect();

    let document = EquityCurveDocument::new(
        dates,
        strategy,
        benchmark,
        Some(ma_short),
        Some(ma_long),
        segments,
        Some(regimes),
    )?;

    info!(
        points = document.len(),
        mode = %config.mode,
        train_end = %config.train_end,
        valid_end = %config.valid_end,
        "built equity curve document"
    );

    Ok(document)
}

/// Summary metrics of the Test period, as shipped for the initial display.
///
/// Computed from the daily returns of the Test points, including the first
/// Test day's own return:
/// - annualized return from `prod(1 + r)` over the Test day count
/// - max drawdown of `cumprod(1 + r)` against its running peak
/// - Sharpe and information ratio as mean over sample standard deviation,
///   scaled by `sqrt(trading_days)`; `0` without deviation
///
/// All metrics are zero when the document has no Test points.
#[must_use]
pub fn test_period_metrics(
    document: &EquityCurveDocument,
    mode: RebaseMode,
    trading_days: usize,
) -> SummaryMetrics {
    let test: Vec<usize> = select(document, PeriodSelection::Test);
    if test.is_empty() {
        return Metrics::default().into();
    }

    let strategy_daily = point_returns(document.strategy(), mode);
    let benchmark_daily = point_returns(document.benchmark(), mode);
    let strategy: Vec<f64> = test.iter().map(|&i| strategy_daily[i]).collect();
    let active: Vec<f64> = test
        .iter()
        .map(|&i| strategy_daily[i] - benchmark_daily[i])
        .collect();

    let equity = cumulate(&strategy, RebaseMode::Compounding);
    let total = equity.last().copied().unwrap_or(0.0);

    Metrics {
        annualized_return: annualized_return(total, strategy.len(), trading_days),
        max_drawdown: max_drawdown(&equity),
        sharpe_ratio: sample_ratio(&strategy, trading_days),
        information_ratio: sample_ratio(&active, trading_days),
    }
    .into()
}

/// Recover each point's own daily return from a cumulative series built by
/// [`cumulate`]. The first point's return is its cumulative value; undefined
/// points count as flat.
fn point_returns(cumulative: &[f64], mode: RebaseMode) -> Vec<f64> {
    let mut previous = 0.0;
    cumulative
        .iter()
        .map(|&c| {
            if !c.is_finite() {
                return 0.0;
            }
            let r = match mode {
                RebaseMode::Compounding => (1.0 + c) / (1.0 + previous) - 1.0,
                RebaseMode::Additive => c - previous,
            };
            previous = c;
            if r.is_finite() { r } else { 0.0 }
        })
        .collect()
}

fn sample_ratio(values: &[f64], trading_days: usize) -> f64 {
    match (mean(values), sample_std(values)) {
        (Some(m), Some(s)) if s > 0.0 => m / s * (trading_days as f64).sqrt(),
        _ => 0.0,
    }
}
