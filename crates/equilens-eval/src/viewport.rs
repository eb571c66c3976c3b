//! Metrics for a zoomed or panned sub-range of a filtered curve.
//!
//! A zoomed range shows returns measured from the zoomed start, so the slice
//! is re-based a second time on top of the period-level re-basing.

use equilens_traits::RebaseMode;
use tracing::debug;

use crate::{
    metrics::{Metrics, MetricsCalculator},
    period::FilteredCurve,
    rebase::rebase_from_start,
};

/// Inclusive index range reported by a renderer after a viewport change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportRange {
    /// First visible index.
    pub start: usize,
    /// Last visible index (inclusive).
    pub end: usize,
}

impl ViewportRange {
    /// Create a range from index bounds.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Build a range from fractional axis bounds.
    ///
    /// The lower bound is floored and the upper bound ceiled before clamping,
    /// so a partially visible point counts as visible.
    #[must_use]
    pub fn from_axis(min: f64, max: f64) -> Self {
        let to_index = |v: f64| if v.is_finite() && v > 0.0 { v as usize } else { 0 };
        Self {
            start: to_index(min.floor()),
            end: if max.is_finite() {
                to_index(max.ceil())
            } else {
                usize::MAX
            },
        }
    }

    /// Clamp to `[0, len - 1]`.
    ///
    /// Returns `None` for an empty series or an inverted range.
    #[must_use]
    pub fn clamp(self, len: usize) -> Option<Self> {
        let last = len.checked_sub(1)?;
        let start = self.start.min(last);
        let end = self.end.min(last);
        (start <= end).then_some(Self { start, end })
    }
}

/// Recompute metrics for the visible part of `curve`.
///
/// Bounds are clamped to the curve, the dates and both series are sliced to
/// the inclusive range, re-based on the value at the new start (compounding
/// convention) and handed to `calculator`. The curve itself is not modified.
///
/// Returns `None` when the clamped range is empty; callers keep the metrics
/// they are showing.
#[must_use]
pub fn recompute_for_range(
    curve: &FilteredCurve,
    range: ViewportRange,
    calculator: &MetricsCalculator,
) -> Option<Metrics> {
    let ViewportRange { start, end } = range.clamp(curve.len())?;

    let dates = &curve.dates[start..=end];
    let strategy = rebase_from_start(&curve.strategy[start..=end], RebaseMode::Compounding);
    let benchmark = rebase_from_start(&curve.benchmark[start..=end], RebaseMode::Compounding);

    debug!(start, end, points = dates.len(), "recomputing viewport metrics");

    Some(calculator.compute(dates, &strategy, Some(&benchmark)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use equilens_data::EquityCurveDocument;
    use equilens_traits::{Date, PeriodSelection, Segment};

    fn curve() -> FilteredCurve {
        let dates = (1..=6)
            .map(|d| Date::from_ymd_opt(2023, 3, d).unwrap())
            .collect();
        let doc = EquityCurveDocument::new(
            dates,
            vec![0.0, 0.1, 0.21, 0.1, 0.32, 0.452],
            vec![0.0, 0.05, 0.05, 0.1, 0.1, 0.2],
            None,
            None,
            vec![Segment::Test; 6],
            None,
        )
        .unwrap();
        FilteredCurve::build(&doc, PeriodSelection::All, RebaseMode::Compounding).unwrap()
    }

    #[test]
    fn test_clamp() {
        assert_eq!(ViewportRange::new(2, 10).clamp(5), Some(ViewportRange::new(2, 4)));
        assert_eq!(ViewportRange::new(7, 10).clamp(5), Some(ViewportRange::new(4, 4)));
        assert_eq!(ViewportRange::new(3, 1).clamp(5), None);
        assert_eq!(ViewportRange::new(0, 0).clamp(0), None);
    }

    #[test]
    fn test_from_axis() {
        assert_eq!(ViewportRange::from_axis(-0.4, 2.2), ViewportRange::new(0, 3));
        assert_eq!(ViewportRange::from_axis(1.7, 1.9), ViewportRange::new(1, 2));
        assert_eq!(ViewportRange::from_axis(f64::NAN, f64::INFINITY).end, usize::MAX);
    }

    #[test]
    fn test_full_range_matches_period_metrics() {
        let c = curve();
        let calc = MetricsCalculator::default();
        let zoomed = recompute_for_range(&c, ViewportRange::new(0, 99), &calc).unwrap();
        let full = calc.compute(&c.dates, &c.strategy, Some(&c.benchmark));
        assert_relative_eq!(zoomed.annualized_return, full.annualized_return, epsilon = 1e-12);
        assert_relative_eq!(zoomed.max_drawdown, full.max_drawdown, epsilon = 1e-12);
        assert_relative_eq!(zoomed.sharpe_ratio, full.sharpe_ratio, epsilon = 1e-9);
    }

    #[test]
    fn test_sub_range_rebased_from_zoom_start() {
        let c = curve();
        let calc = MetricsCalculator::default();
        // Growth 1.21 -> 1.1 -> 1.32: drawdown from the zoom start is -1/11.
        let m = recompute_for_range(&c, ViewportRange::new(2, 4), &calc).unwrap();
        assert_relative_eq!(m.max_drawdown, 1.1 / 1.21 - 1.0, epsilon = 1e-12);
        // Total over the zoom is 1.32 / 1.21 - 1 over three dates.
        let expected = (1.32_f64 / 1.21).powf(252.0 / 3.0) - 1.0;
        assert_relative_eq!(m.annualized_return, expected, max_relative = 1e-9);
    }

    #[test]
    fn test_single_point_range() {
        let m = recompute_for_range(&curve(), ViewportRange::new(3, 3), &MetricsCalculator::default())
            .unwrap();
        assert_eq!(m, Metrics::default());
    }

    #[test]
    fn test_inverted_range_is_noop() {
        assert!(
            recompute_for_range(&curve(), ViewportRange::new(4, 2), &MetricsCalculator::default())
                .is_none()
        );
    }

    #[test]
    fn test_curve_unchanged() {
        let c = curve();
        let before = c.clone();
        let _ = recompute_for_range(&c, ViewportRange::new(1, 3), &MetricsCalculator::default());
        assert_eq!(c, before);
    }
}
