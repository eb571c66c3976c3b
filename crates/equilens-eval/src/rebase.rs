//! Re-basing cumulative-return series to a new origin.
//!
//! After re-basing, the point whose value equals `base` reads exactly `0`.
//! Degenerate inputs never fault: an unusable base or value yields `0`.

use equilens_traits::RebaseMode;

/// Re-express a single cumulative value relative to `base`.
///
/// - [`RebaseMode::Compounding`]: `(1 + value) / (1 + base) - 1`, or `0` when
///   `1 + base` is zero or `base` is not finite.
/// - [`RebaseMode::Additive`]: `value - base`, or `0` when `value` or `base`
///   is not finite.
///
/// # Examples
///
/// ```
/// use equilens_eval::rebase_value;
/// use equilens_traits::RebaseMode;
///
/// let r = rebase_value(0.03, 0.05, RebaseMode::Compounding);
/// assert!((r - (1.03 / 1.05 - 1.0)).abs() < 1e-15);
/// assert_eq!(rebase_value(0.03, 0.05, RebaseMode::Additive), 0.03 - 0.05);
/// ```
#[must_use]
pub fn rebase_value(value: f64, base: f64, mode: RebaseMode) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    match mode {
        RebaseMode::Compounding => {
            let base_growth = 1.0 + base;
            if !base.is_finite() || base_growth == 0.0 {
                0.0
            } else {
                (1.0 + value) / base_growth - 1.0
            }
        }
        RebaseMode::Additive => {
            if base.is_finite() {
                value - base
            } else {
                0.0
            }
        }
    }
}

/// Re-base a whole series against `base`.
#[must_use]
pub fn rebase(values: &[f64], base: f64, mode: RebaseMode) -> Vec<f64> {
    values.iter().map(|&v| rebase_value(v, base, mode)).collect()
}

/// Re-base a series with gaps; absent entries stay absent.
///
/// Used for the benchmark moving averages, which are re-based with the
/// benchmark's base rather than their own first value.
#[must_use]
pub fn rebase_optional(values: &[Option<f64>], base: f64, mode: RebaseMode) -> Vec<Option<f64>> {
    values
        .iter()
        .map(|v| v.map(|v| rebase_value(v, base, mode)))
        .collect()
}

/// Re-base a series on its own first value.
///
/// Returns an empty vector for empty input.
#[must_use]
pub fn rebase_from_start(values: &[f64], mode: RebaseMode) -> Vec<f64> {
    values
        .first()
        .map_or_else(Vec::new, |&base| rebase(values, base, mode))
}
