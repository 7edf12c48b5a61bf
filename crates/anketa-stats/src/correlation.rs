use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::rank::average_ranks;

/// A correlation coefficient with its two-sided p-value.
///
/// Produced by [`pearson`] and [`spearman`]; the caller records which.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Correlation {
    /// Coefficient in [-1, 1].
    pub r: f64,
    /// Two-sided p-value against the null hypothesis of no association.
    pub p_value: f64,
    /// Number of observation pairs used.
    pub n: usize,
}

/// Computes Pearson's product-moment correlation between two samples.
///
/// The samples must be row-aligned and of equal length; the caller is
/// responsible for pairwise-complete filtering beforehand. The p-value uses
/// the exact-under-normality t transform `t = r·√((n−2)/(1−r²))` with n − 2
/// degrees of freedom.
///
/// # Returns
///
/// `None` when fewer than 2 pairs are given, when the lengths differ, or
/// when either sample has zero variance (the coefficient is undefined).
///
/// # Examples
///
/// ```
/// use anketa_stats::correlation::pearson;
///
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [1.5, 3.1, 4.4, 6.2, 7.4];
/// let corr = pearson(&x, &y).unwrap();
/// assert!(corr.r > 0.99);
/// assert!(corr.p_value < 0.05);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn pearson(x: &[f64], y: &[f64]) -> Option<Correlation> {
    let n = x.len();
    if n != y.len() || n < 2 {
        return None;
    }

    let nf = n as f64;
    let mean_x = x.iter().sum::<f64>() / nf;
    let mean_y = y.iter().sum::<f64>() / nf;

    let mut ss_x = 0.0;
    let mut ss_y = 0.0;
    let mut ss_xy = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        ss_x += dx * dx;
        ss_y += dy * dy;
        ss_xy += dx * dy;
    }

    if ss_x <= 0.0 || ss_y <= 0.0 {
        return None;
    }

    // Clamp against floating-point drift past ±1.
    let r = (ss_xy / (ss_x * ss_y).sqrt()).clamp(-1.0, 1.0);
    let p_value = two_sided_p(r, n);

    Some(Correlation { r, p_value, n })
}

/// Computes Spearman's rank correlation between two samples.
///
/// Both samples are transformed to average ranks (ties share their mean
/// rank) and the Pearson formula is applied to the ranks, which handles tied
/// data exactly. The p-value uses the same t approximation as [`pearson`].
///
/// # Returns
///
/// `None` under the same conditions as [`pearson`], including the
/// zero-variance case of a sample whose values are all tied.
///
/// # Examples
///
/// ```
/// use anketa_stats::correlation::spearman;
///
/// // Monotonic but not linear — rho is exactly 1.
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [1.0, 4.0, 9.0, 16.0, 25.0];
/// let corr = spearman(&x, &y).unwrap();
/// assert!((corr.r - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn spearman(x: &[f64], y: &[f64]) -> Option<Correlation> {
    if x.len() != y.len() {
        return None;
    }
    pearson(&average_ranks(x), &average_ranks(y))
}

/// Two-sided p-value for a correlation coefficient via the t distribution.
#[expect(clippy::cast_precision_loss)]
fn two_sided_p(r: f64, n: usize) -> f64 {
    if n < 3 {
        // One degree of freedom short of a test; by convention p = 1.
        return 1.0;
    }
    let df = (n - 2) as f64;
    if (1.0 - r.abs()) < f64::EPSILON {
        return 0.0;
    }
    let t = r * (df / (1.0 - r * r)).sqrt();
    let Ok(dist) = StudentsT::new(0.0, 1.0, df) else {
        return f64::NAN;
    };
    (2.0 * dist.cdf(-t.abs())).min(1.0)
}
