use serde::{Deserialize, Serialize};

/// Descriptive statistics summarizing a sample.
///
/// Central tendency and dispersion measures for a set of `f64` values.
/// Variance and standard deviation use the sample (n − 1) denominator;
/// for a single observation they are `NaN`, the same convention the
/// surrounding pipeline inherits from its source data tooling.
///
/// # Examples
///
/// ```
/// use anketa_stats::descriptive::DescriptiveStats;
///
/// let stats = DescriptiveStats::from_values(&[4.0, 5.0, 3.0, 4.0, 5.0]).unwrap();
/// assert_eq!(stats.count, 5);
/// assert_eq!(stats.mean, 4.2);
/// assert_eq!(stats.median, 4.0);
/// assert_eq!(stats.min, 3.0);
/// assert_eq!(stats.max, 5.0);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DescriptiveStats {
    /// Number of observations.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median; the mean of the two middle values for even counts.
    pub median: f64,
    /// Sample standard deviation (n − 1 denominator).
    pub std_dev: f64,
    /// Sample variance (n − 1 denominator).
    pub variance: f64,
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` — if the sample contains at least one value
    /// * `None` — if the sample is empty
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let count = sorted_values.len();
        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let n = count as f64;
        let mean = sorted_values.iter().sum::<f64>() / n;
        let median = median_of_sorted(sorted_values);
        let variance = if count > 1 {
            sorted_values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)
        } else {
            f64::NAN
        };
        let std_dev = variance.sqrt();

        Some(Self {
            count,
            mean,
            median,
            std_dev,
            variance,
            min,
            max,
        })
    }
}

/// Median of a sorted sample; averages the two middle values for even counts.
///
/// Returns `NaN` for an empty slice.
#[must_use]
pub fn median_of_sorted(sorted_values: &[f64]) -> f64 {
    let n = sorted_values.len();
    if n == 0 {
        return f64::NAN;
    }
    if n % 2 == 1 {
        sorted_values[n / 2]
    } else {
        f64::midpoint(sorted_values[n / 2 - 1], sorted_values[n / 2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_variance_uses_n_minus_one() {
        let stats = DescriptiveStats::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0])
            .unwrap();
        // Sum of squared deviations is 32, mean 5.0 → 32 / 7
        assert!((stats.variance - 32.0 / 7.0).abs() < 1e-12);
        assert!((stats.std_dev - (32.0 / 7.0f64).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_even_count_median_averages_middles() {
        let stats = DescriptiveStats::from_values(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(stats.median, 2.5);
    }

    #[test]
    fn test_single_observation() {
        let stats = DescriptiveStats::from_values(&[7.0]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 7.0);
        assert_eq!(stats.median, 7.0);
        assert!(stats.variance.is_nan());
        assert!(stats.std_dev.is_nan());
    }

    #[test]
    fn test_empty_sample() {
        assert!(DescriptiveStats::from_values(&[]).is_none());
    }
}
