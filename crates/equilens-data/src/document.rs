//! Equity-curve document schema.
//!
//! A dashboard document is a JSON record with an optional `metrics` block and
//! an `equity_curve` block of index-aligned arrays:
//!
//! ```json
//! {
//!   "metrics": { "annualized_return": 0.12, "sharpe_ratio": 1.4 },
//!   "equity_curve": {
//!     "dates": ["2021-01-04", "2021-01-05"],
//!     "strategy": [0.0, 0.01],
//!     "benchmark": [0.0, 0.004],
//!     "bench_ma20": [null, null],
//!     "segments": ["Valid", "Test"],
//!     "regimes": [0, 1]
//!   }
//! }
//! ```
//!
//! Parsing goes through [`RawEquityCurve`], where every series is optional,
//! and is then validated into an immutable [`EquityCurveDocument`].

use equilens_traits::{Date, EquilensError, Regime, Result, Segment};
use serde::{Deserialize, Serialize};

/// Summary metrics shipped with a document for the initial display.
///
/// Every field is optional; the block may be stale or missing entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    /// Annualized return of the strategy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annualized_return: Option<f64>,
    /// Maximum drawdown (non-positive fraction).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_drawdown: Option<f64>,
    /// Annualized Sharpe ratio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sharpe_ratio: Option<f64>,
    /// Annualized information ratio against the benchmark.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub information_ratio: Option<f64>,
}

impl SummaryMetrics {
    /// Whether no metric is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.annualized_return.is_none()
            && self.max_drawdown.is_none()
            && self.sharpe_ratio.is_none()
            && self.information_ratio.is_none()
    }
}

/// The `equity_curve` block as found on the wire, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEquityCurve {
    /// Date labels.
    #[serde(default)]
    pub dates: Option<Vec<Date>>,
    /// Cumulative strategy returns; `null` entries are undefined points.
    #[serde(default)]
    pub strategy: Option<Vec<Option<f64>>>,
    /// Cumulative benchmark returns; `null` entries are undefined points.
    #[serde(default)]
    pub benchmark: Option<Vec<Option<f64>>>,
    /// 20-point moving average of the cumulative benchmark.
    #[serde(default)]
    pub bench_ma20: Option<Vec<Option<f64>>>,
    /// 60-point moving average of the cumulative benchmark.
    #[serde(default)]
    pub bench_ma60: Option<Vec<Option<f64>>>,
    /// Train/Valid/Test labels.
    #[serde(default)]
    pub segments: Option<Vec<Segment>>,
    /// Regime codes.
    #[serde(default)]
    pub regimes: Option<Vec<Regime>>,
}

/// A full dashboard document as found on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDashboard {
    /// Optional initial-display metrics.
    #[serde(default)]
    pub metrics: Option<SummaryMetrics>,
    /// The equity-curve arrays.
    #[serde(default)]
    pub equity_curve: Option<RawEquityCurve>,
}

/// A validated, immutable equity curve.
///
/// All present series have exactly [`len`](Self::len) entries and dates are
/// non-decreasing. Optional series stay optional: a missing moving average is
/// `None`, and a missing regime array reads as [`Regime::Choppy`] everywhere.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityCurveDocument {
    dates: Vec<Date>,
    strategy: Vec<f64>,
    benchmark: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bench_ma20: Option<Vec<Option<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bench_ma60: Option<Vec<Option<f64>>>,
    segments: Vec<Segment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    regimes: Option<Vec<Regime>>,
}

impl EquityCurveDocument {
    /// Number of points in the curve.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the curve has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Date labels.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Cumulative strategy returns. Undefined points read as `NaN`.
    #[must_use]
    pub fn strategy(&self) -> &[f64] {
        &self.strategy
    }

    /// Cumulative benchmark returns. Undefined points read as `NaN`.
    #[must_use]
    pub fn benchmark(&self) -> &[f64] {
        &self.benchmark
    }

    /// 20-point benchmark moving average, if the document carries one.
    #[must_use]
    pub fn bench_ma20(&self) -> Option<&[Option<f64>]> {
        self.bench_ma20.as_deref()
    }

    /// 60-point benchmark moving average, if the document carries one.
    #[must_use]
    pub fn bench_ma60(&self) -> Option<&[Option<f64>]> {
        self.bench_ma60.as_deref()
    }

    /// Segment labels.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Regime labels, if the document carries them.
    #[must_use]
    pub fn regimes(&self) -> Option<&[Regime]> {
        self.regimes.as_deref()
    }

    /// Regime at `index`, defaulting to [`Regime::Choppy`] without regime data.
    #[must_use]
    pub fn regime_at(&self, index: usize) -> Regime {
        self.regimes
            .as_ref()
            .and_then(|r| r.get(index).copied())
            .unwrap_or_default()
    }

    /// Build a document from owned series, validating lengths and date order.
    ///
    /// # Errors
    ///
    /// Returns [`EquilensError::LengthMismatch`] if any present series differs
    /// in length from `dates`, or [`EquilensError::UnorderedDates`] if dates
    /// decrease anywhere.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        dates: Vec<Date>,
        strategy: Vec<f64>,
        benchmark: Vec<f64>,
        bench_ma20: Option<Vec<Option<f64>>>,
        bench_ma60: Option<Vec<Option<f64>>>,
        segments: Vec<Segment>,
        regimes: Option<Vec<Regime>>,
    ) -> Result<Self> {
        let n = dates.len();
        check_len("strategy", n, strategy.len())?;
        check_len("benchmark", n, benchmark.len())?;
        check_len("segments", n, segments.len())?;
        if let Some(ma) = &bench_ma20 {
            check_len("bench_ma20", n, ma.len())?;
        }
        if let Some(ma) = &bench_ma60 {
            check_len("bench_ma60", n, ma.len())?;
        }
        if let Some(r) = &regimes {
            check_len("regimes", n, r.len())?;
        }

        if let Some(index) = dates.windows(2).position(|w| w[1] < w[0]) {
            return Err(EquilensError::UnorderedDates {
                index: index + 1,
                previous: dates[index].to_string(),
                current: dates[index + 1].to_string(),
            });
        }

        Ok(Self {
            dates,
            strategy,
            benchmark,
            bench_ma20,
            bench_ma60,
            segments,
            regimes,
        })
    }
}

impl TryFrom<RawEquityCurve> for EquityCurveDocument {
    type Error = EquilensError;

    fn try_from(raw: RawEquityCurve) -> Result<Self> {
        let required = |name: &str| EquilensError::MissingSeries(name.to_string());

        Self::new(
            raw.dates.ok_or_else(|| required("dates"))?,
            undefined_as_nan(raw.strategy.ok_or_else(|| required("strategy"))?),
            undefined_as_nan(raw.benchmark.ok_or_else(|| required("benchmark"))?),
            raw.bench_ma20,
            raw.bench_ma60,
            raw.segments.ok_or_else(|| required("segments"))?,
            raw.regimes,
        )
    }
}

fn undefined_as_nan(values: Vec<Option<f64>>) -> Vec<f64> {
    values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect()
}

fn check_len(field: &str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(EquilensError::LengthMismatch {
            field: field.to_string(),
            expected,
            actual,
        })
    }
}

/// A document ready to be written back to disk.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData<'a> {
    /// Summary metrics for the initial display.
    pub metrics: SummaryMetrics,
    /// The equity curve.
    pub equity_curve: &'a EquityCurveDocument,
}
