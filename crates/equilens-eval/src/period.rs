//! Period selection and the filtered, re-based curve handed to renderers.

use equilens_data::EquityCurveDocument;
use equilens_traits::{Date, PeriodSelection, RebaseMode, Regime, Segment};
use serde::Serialize;
use tracing::debug;

use crate::rebase::{rebase_optional, rebase_value};

/// Indices of the points belonging to `period`, in ascending order.
///
/// An empty result means the period has no data; callers treat it as a no-op
/// and keep whatever they were showing.
///
/// # Examples
///
/// ```rust,ignore
/// let indices = select(&document, PeriodSelection::Test);
/// if indices.is_empty() {
///     return; // keep the previous display
/// }
/// ```
#[must_use]
pub fn select(document: &EquityCurveDocument, period: PeriodSelection) -> Vec<usize> {
    document
        .segments()
        .iter()
        .enumerate()
        .filter(|(_, segment)| period.contains(segment))
        .map(|(i, _)| i)
        .collect()
}

/// A document restricted to one period and re-based to its first point.
///
/// `strategy` and `benchmark` both read `0` at index 0. Moving averages are
/// re-based with the benchmark's base and keep their gaps. Regimes are always
/// present, defaulting to [`Regime::Choppy`] when the document has none.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredCurve {
    /// Period this curve was built for.
    pub period: PeriodSelection,
    /// Positions of the selected points in the source document.
    pub indices: Vec<usize>,
    /// Date labels.
    pub dates: Vec<Date>,
    /// Re-based cumulative strategy returns.
    pub strategy: Vec<f64>,
    /// Re-based cumulative benchmark returns.
    pub benchmark: Vec<f64>,
    /// Re-based 20-point benchmark moving average.
    pub ma20: Option<Vec<Option<f64>>>,
    /// Re-based 60-point benchmark moving average.
    pub ma60: Option<Vec<Option<f64>>>,
    /// Segment labels.
    pub segments: Vec<Segment>,
    /// Regime labels.
    pub regimes: Vec<Regime>,
}

impl FilteredCurve {
    /// Filter and re-base `document` for `period`.
    ///
    /// Returns `None` when the period selects nothing.
    #[must_use]
    pub fn build(
        document: &EquityCurveDocument,
        period: PeriodSelection,
        mode: RebaseMode,
    ) -> Option<Self> {
        let indices = select(document, period);
        let &first = indices.first()?;

        let strategy = document.strategy();
        let benchmark = document.benchmark();
        let strategy_base = strategy[first];
        let benchmark_base = benchmark[first];

        let pick = |values: &[f64], base: f64| -> Vec<f64> {
            indices
                .iter()
                .map(|&i| rebase_value(values[i], base, mode))
                .collect()
        };
        let pick_ma = |ma: &[Option<f64>]| -> Vec<Option<f64>> {
            let picked: Vec<Option<f64>> = indices.iter().map(|&i| ma[i]).collect();
            rebase_optional(&picked, benchmark_base, mode)
        };

        let curve = Self {
            period,
            dates: indices.iter().map(|&i| document.dates()[i]).collect(),
            strategy: pick(strategy, strategy_base),
            benchmark: pick(benchmark, benchmark_base),
            ma20: document.bench_ma20().map(pick_ma),
            ma60: document.bench_ma60().map(pick_ma),
            segments: indices
                .iter()
                .map(|&i| document.segments()[i].clone())
                .collect(),
            regimes: indices.iter().map(|&i| document.regime_at(i)).collect(),
            indices,
        };

        debug!(
            period = %period,
            points = curve.len(),
            first_index = first,
            mode = %mode,
            "built filtered curve"
        );

        Some(curve)
    }

    /// Number of points.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the curve has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn document() -> EquityCurveDocument {
        let dates = (4..9)
            .map(|d| Date::from_ymd_opt(2021, 1, d).unwrap())
            .collect();
        EquityCurveDocument::new(
            dates,
            vec![0.0, 0.02, 0.01, 0.05, 0.03],
            vec![0.0, 0.01, 0.01, 0.02, 0.015],
            Some(vec![None, None, Some(0.01), Some(0.012), Some(0.015)]),
            None,
            vec![
                Segment::Train,
                Segment::Train,
                Segment::Valid,
                Segment::Test,
                Segment::Test,
            ],
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_select_periods() {
        let doc = document();
        assert_eq!(select(&doc, PeriodSelection::All), vec![0, 1, 2, 3, 4]);
        assert_eq!(select(&doc, PeriodSelection::Test), vec![3, 4]);
        assert_eq!(select(&doc, PeriodSelection::ValidTest), vec![2, 3, 4]);
    }

    #[test]
    fn test_select_no_match() {
        let doc = EquityCurveDocument::new(
            vec![Date::from_ymd_opt(2021, 1, 4).unwrap()],
            vec![0.0],
            vec![0.0],
            None,
            None,
            vec![Segment::Train],
            None,
        )
        .unwrap();
        assert!(select(&doc, PeriodSelection::Test).is_empty());
        assert!(FilteredCurve::build(&doc, PeriodSelection::Test, RebaseMode::Compounding).is_none());
    }

    #[test]
    fn test_build_test_period_compounding() {
        let curve =
            FilteredCurve::build(&document(), PeriodSelection::Test, RebaseMode::Compounding)
                .unwrap();
        assert_eq!(curve.indices, vec![3, 4]);
        assert_eq!(curve.strategy[0], 0.0);
        assert_abs_diff_eq!(curve.strategy[1], -0.019048, epsilon = 5e-7);
        assert_eq!(curve.benchmark[0], 0.0);
        assert_abs_diff_eq!(curve.benchmark[1], 1.015 / 1.02 - 1.0, epsilon = 1e-15);
        assert_eq!(curve.regimes, vec![Regime::Choppy, Regime::Choppy]);
        assert!(curve.ma60.is_none());
    }

    #[test]
    fn test_moving_average_uses_benchmark_base() {
        let curve =
            FilteredCurve::build(&document(), PeriodSelection::ValidTest, RebaseMode::Additive)
                .unwrap();
        // Benchmark base at index 2 is 0.01.
        let ma20 = curve.ma20.unwrap();
        assert_abs_diff_eq!(ma20[0].unwrap(), 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(ma20[1].unwrap(), 0.002, epsilon = 1e-15);
        assert_abs_diff_eq!(ma20[2].unwrap(), 0.005, epsilon = 1e-15);
    }

    #[test]
    fn test_gaps_survive_filtering() {
        let curve =
            FilteredCurve::build(&document(), PeriodSelection::All, RebaseMode::Compounding)
                .unwrap();
        let ma20 = curve.ma20.unwrap();
        assert!(ma20[0].is_none());
        assert!(ma20[1].is_none());
        assert!(ma20[2].is_some());
    }
}
