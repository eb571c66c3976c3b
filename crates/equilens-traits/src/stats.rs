//! Statistical utility functions over return series.
//!
//! Everything here is a plain reduction over a slice: sums, means and
//! variances are order independent, so callers may split work freely as long
//! as they feed the same values.

use ndarray::ArrayView1;

/// Trading days per year used to annualize daily statistics.
pub const TRADING_DAYS_PER_YEAR: usize = 252;

/// Arithmetic mean, `None` for an empty slice.
///
/// # Examples
///
/// ```
/// use equilens_traits::stats::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean(&[]), None);
/// ```
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    ArrayView1::from(values).mean()
}

/// Population standard deviation (N denominator), `None` for an empty slice.
///
/// A slice of identical values yields exactly `0.0`.
#[must_use]
pub fn population_std(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(ArrayView1::from(values).std(0.0))
}

/// Sample standard deviation (N-1 denominator), `None` below two values.
#[must_use]
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    Some(ArrayView1::from(values).std(1.0))
}

/// Annualized mean-over-volatility ratio of a daily series.
///
/// Computes `mean / population_std * sqrt(periods_per_year)`. Returns `0.0`
/// when the series is empty or its standard deviation is exactly zero.
///
/// # Examples
///
/// ```
/// use equilens_traits::stats::annualized_ratio;
///
/// // Constant returns have no volatility.
/// assert_eq!(annualized_ratio(&[0.01, 0.01, 0.01], 252), 0.0);
/// assert!(annualized_ratio(&[0.01, 0.02, 0.00], 252) > 0.0);
/// ```
#[must_use]
pub fn annualized_ratio(values: &[f64], periods_per_year: usize) -> f64 {
    let (Some(mean), Some(std)) = (mean(values), population_std(values)) else {
        return 0.0;
    };
    if std == 0.0 {
        return 0.0;
    }
    mean / std * (periods_per_year as f64).sqrt()
}

/// Period-over-period returns of a growth-factor series.
///
/// `returns[i - 1] = growth[i] / growth[i - 1] - 1`; the output has one
/// element fewer than the input.
#[must_use]
pub fn growth_returns(growth: &[f64]) -> Vec<f64> {
    growth.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_basic() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 2.5);
        assert!(mean(&[]).is_none());
    }

    #[test]
    fn test_population_vs_sample_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(population_std(&values).unwrap(), 2.0);
        assert_relative_eq!(
            sample_std(&values).unwrap(),
            (32.0_f64 / 7.0).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_std_degenerate() {
        assert!(population_std(&[]).is_none());
        assert_eq!(population_std(&[3.5]).unwrap(), 0.0);
        assert!(sample_std(&[3.5]).is_none());
    }

    #[test]
    fn test_constant_values_have_exact_zero_std() {
        let values = [0.0123; 50];
        assert_eq!(population_std(&values).unwrap(), 0.0);
    }

    #[test]
    fn test_annualized_ratio() {
        let values = [0.01, -0.01, 0.02, 0.0];
        let expected = mean(&values).unwrap() / population_std(&values).unwrap() * 252f64.sqrt();
        assert_relative_eq!(annualized_ratio(&values, 252), expected);
        assert_eq!(annualized_ratio(&[], 252), 0.0);
    }

    #[test]
    fn test_growth_returns() {
        let returns = growth_returns(&[1.0, 2.0, 4.0, 2.0]);
        assert_eq!(returns, vec![1.0, 1.0, -0.5]);
        assert!(growth_returns(&[1.0]).is_empty());
    }
}
