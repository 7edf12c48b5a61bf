//! Shapiro–Wilk normality test.
//!
//! Implements Royston's AS R94 approximation: Blom plotting-position scores
//! give the expected normal order statistics, the two outermost weights come
//! from Royston's polynomial fits, and the W statistic is mapped to a
//! p-value through a normalizing transform (exact for n = 3). This is the
//! same approximation family used by mainstream statistics toolkits, so
//! p-values agree with them to the accuracy of the published fit.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

/// Minimum sample size the test is defined for.
pub const MIN_OBSERVATIONS: usize = 3;

/// Error raised when the Shapiro–Wilk statistic cannot be computed.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ShapiroWilkError {
    /// Fewer than [`MIN_OBSERVATIONS`] values were supplied.
    #[display("Shapiro-Wilk requires at least 3 observations, got {actual}")]
    TooFewObservations { actual: usize },
    /// Every value is identical, so the statistic's denominator is zero.
    #[display("all observations are identical; normality is undefined")]
    ZeroRange,
}

/// Result of a Shapiro–Wilk test.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ShapiroWilk {
    /// The W statistic in (0, 1]; values near 1 are consistent with
    /// normality.
    pub statistic: f64,
    /// Upper-tail p-value; small values reject normality.
    pub p_value: f64,
    /// Sample size.
    pub n: usize,
}

/// Runs the Shapiro–Wilk test on a sample.
///
/// The caller passes non-missing observations only. Samples larger than
/// ~5000 remain computable but the p-value approximation loses accuracy,
/// the usual caveat for this test.
///
/// # Examples
///
/// ```
/// use anketa_stats::shapiro::shapiro_wilk;
///
/// // A symmetric, bell-ish sample keeps the null comfortably.
/// let sample = [2.0, 3.0, 3.5, 4.0, 4.0, 4.5, 5.0, 6.0];
/// let result = shapiro_wilk(&sample).unwrap();
/// assert!(result.statistic > 0.9);
/// assert!(result.p_value > 0.05);
/// ```
///
/// ```
/// use anketa_stats::shapiro::{shapiro_wilk, ShapiroWilkError};
///
/// let too_few = [1.0, 2.0];
/// assert!(matches!(
///     shapiro_wilk(&too_few),
///     Err(ShapiroWilkError::TooFewObservations { actual: 2 })
/// ));
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn shapiro_wilk(values: &[f64]) -> Result<ShapiroWilk, ShapiroWilkError> {
    let n = values.len();
    if n < MIN_OBSERVATIONS {
        return Err(ShapiroWilkError::TooFewObservations { actual: n });
    }

    let mut x = values.to_vec();
    x.sort_by(f64::total_cmp);
    if x[n - 1] - x[0] <= 0.0 {
        return Err(ShapiroWilkError::ZeroRange);
    }

    let nf = n as f64;
    let normal = standard_normal();

    // Expected normal order statistics via Blom plotting positions.
    let m: Vec<f64> = (1..=n)
        .map(|i| normal.inverse_cdf((i as f64 - 0.375) / (nf + 0.25)))
        .collect();
    let m_sum_sq: f64 = m.iter().map(|v| v * v).sum();

    // Weights: exact for n = 3, Royston's polynomial-corrected tails above.
    let mut a = vec![0.0; n];
    if n == 3 {
        a[0] = -FRAC_1_SQRT_2;
        a[2] = FRAC_1_SQRT_2;
    } else {
        let u = 1.0 / nf.sqrt();
        let c_n = m[n - 1] / m_sum_sq.sqrt();
        let a_n = poly(
            c_n,
            u,
            &[0.221_157, -0.147_981, -2.071_190, 4.434_685, -2.706_056],
        );
        if n <= 5 {
            let phi = (m_sum_sq - 2.0 * m[n - 1] * m[n - 1]) / (1.0 - 2.0 * a_n * a_n);
            for i in 1..n - 1 {
                a[i] = m[i] / phi.sqrt();
            }
            a[n - 1] = a_n;
            a[0] = -a_n;
        } else {
            let c_n1 = m[n - 2] / m_sum_sq.sqrt();
            let a_n1 = poly(
                c_n1,
                u,
                &[0.042_981, -0.293_762, -1.752_461, 5.682_633, -3.582_633],
            );
            let phi = (m_sum_sq
                - 2.0 * m[n - 1] * m[n - 1]
                - 2.0 * m[n - 2] * m[n - 2])
                / (1.0 - 2.0 * a_n * a_n - 2.0 * a_n1 * a_n1);
            for i in 2..n - 2 {
                a[i] = m[i] / phi.sqrt();
            }
            a[n - 1] = a_n;
            a[0] = -a_n;
            a[n - 2] = a_n1;
            a[1] = -a_n1;
        }
    }

    // W = (Σ a_i x_(i))² / Σ (x_i - x̄)²
    let mean = x.iter().sum::<f64>() / nf;
    let numerator: f64 = a.iter().zip(&x).map(|(ai, xi)| ai * xi).sum();
    let denominator: f64 = x.iter().map(|xi| (xi - mean).powi(2)).sum();
    let statistic = ((numerator * numerator) / denominator).min(1.0);

    let p_value = p_value_for(statistic, n, &normal);

    Ok(ShapiroWilk {
        statistic,
        p_value,
        n,
    })
}

/// Maps a W statistic to its upper-tail p-value.
#[expect(clippy::cast_precision_loss)]
fn p_value_for(w: f64, n: usize, normal: &Normal) -> f64 {
    let nf = n as f64;
    if n == 3 {
        // Exact distribution of W for n = 3.
        let p = 6.0 / PI * (w.sqrt().asin() - 0.75_f64.sqrt().asin());
        return p.clamp(0.0, 1.0);
    }

    let one_minus_w = (1.0 - w).max(f64::MIN_POSITIVE);
    let (y, mu, sigma) = if n <= 11 {
        let gamma = -2.273 + 0.459 * nf;
        let y = -(gamma - one_minus_w.ln()).ln();
        let mu = 0.544 - 0.399_78 * nf + 0.025_054 * nf * nf - 0.000_671_4 * nf.powi(3);
        let sigma =
            (1.382_2 - 0.778_57 * nf + 0.062_767 * nf * nf - 0.002_032_2 * nf.powi(3)).exp();
        (y, mu, sigma)
    } else {
        let ln_n = nf.ln();
        let y = one_minus_w.ln();
        let mu = -1.586_1 - 0.310_82 * ln_n - 0.083_751 * ln_n * ln_n
            + 0.003_891_5 * ln_n.powi(3);
        let sigma = (-0.480_3 - 0.082_676 * ln_n + 0.003_030_2 * ln_n * ln_n).exp();
        (y, mu, sigma)
    };

    let z = (y - mu) / sigma;
    (1.0 - normal.cdf(z)).clamp(0.0, 1.0)
}

/// Evaluates `c + Σ coeffs[k] · u^(k+1)`.
fn poly(c: f64, u: f64, coeffs: &[f64]) -> f64 {
    let mut acc = c;
    let mut power = u;
    for &coeff in coeffs {
        acc += coeff * power;
        power *= u;
    }
    acc
}

fn standard_normal() -> Normal {
    Normal::new(0.0, 1.0).expect("standard normal parameters are valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_normal_sample_accepts() {
        // Symmetric sample drawn to look like a discretized bell curve.
        let sample = [
            1.0, 2.0, 2.0, 3.0, 3.0, 3.0, 3.0, 4.0, 4.0, 4.0, 4.0, 4.0, 5.0, 5.0, 5.0, 5.0,
            6.0, 6.0, 7.0,
        ];
        let result = shapiro_wilk(&sample).unwrap();
        assert!(result.statistic > 0.9);
        assert!(result.p_value > 0.05);
    }

    #[test]
    fn test_heavily_skewed_sample_rejects() {
        // Exponential-ish growth is far from normal.
        let sample = [
            1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 4.0, 6.0, 9.0, 14.0, 22.0, 35.0,
            55.0, 90.0, 150.0, 250.0,
        ];
        let result = shapiro_wilk(&sample).unwrap();
        assert!(result.p_value < 0.05);
    }

    #[test]
    fn test_minimum_sample_size() {
        let result = shapiro_wilk(&[1.0, 2.0, 3.0]).unwrap();
        // Perfectly linear order statistics score high W for n = 3.
        assert!(result.statistic > 0.95);
        assert!((0.0..=1.0).contains(&result.p_value));

        assert!(matches!(
            shapiro_wilk(&[1.0, 2.0]),
            Err(ShapiroWilkError::TooFewObservations { actual: 2 })
        ));
    }

    #[test]
    fn test_constant_sample_is_zero_range() {
        assert!(matches!(
            shapiro_wilk(&[4.0, 4.0, 4.0, 4.0]),
            Err(ShapiroWilkError::ZeroRange)
        ));
    }

    #[test]
    fn test_statistic_bounded_by_one() {
        let sample = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let result = shapiro_wilk(&sample).unwrap();
        assert!(result.statistic <= 1.0);
        assert!(result.statistic > 0.9);
    }
}
