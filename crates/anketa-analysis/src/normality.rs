use anketa_stats::shapiro::{ShapiroWilk, shapiro_wilk};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::AnalysisConfig;

/// Outcome of testing one composite score for approximate normality.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NormalityVerdict {
    /// Shapiro–Wilk W statistic.
    pub statistic: f64,
    /// Shapiro–Wilk p-value.
    pub p_value: f64,
    /// `true` when `p_value > α`, i.e. the sample is consistent with
    /// normality.
    pub is_normal: bool,
}

/// Normality status of a composite, including the recovered failure path.
///
/// The gate requires at least 3 non-missing observations. Below that (or for
/// a constant sample) the test cannot run; the composite is then *treated*
/// as non-normal for method selection, with the reason carried along as a
/// caveat instead of a crash.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum NormalityStatus {
    /// The test ran and produced a verdict.
    Tested(NormalityVerdict),
    /// The test could not run; treated as non-normal downstream.
    Inconclusive {
        /// Why the test could not run (surfaced as a report caveat).
        reason: String,
    },
}

impl NormalityStatus {
    /// Whether this composite counts as normal for method selection.
    ///
    /// Inconclusive composites count as non-normal, which routes the
    /// association onto the non-parametric path.
    #[must_use]
    pub fn is_normal(&self) -> bool {
        match self {
            Self::Tested(verdict) => verdict.is_normal,
            Self::Inconclusive { .. } => false,
        }
    }

    /// The computed verdict, if the test ran.
    #[must_use]
    pub fn verdict(&self) -> Option<&NormalityVerdict> {
        match self {
            Self::Tested(verdict) => Some(verdict),
            Self::Inconclusive { .. } => None,
        }
    }
}

/// Tests a composite's non-missing values for approximate normality.
///
/// # Examples
///
/// ```
/// use anketa_analysis::{config::AnalysisConfig, normality::assess_normality};
///
/// let config = AnalysisConfig::default();
///
/// // Too few observations: recovered, not raised.
/// let status = assess_normality(&[12.0, 14.0], &config);
/// assert!(!status.is_normal());
/// assert!(status.verdict().is_none());
/// ```
#[must_use]
pub fn assess_normality(values: &[f64], config: &AnalysisConfig) -> NormalityStatus {
    match shapiro_wilk(values) {
        Ok(ShapiroWilk {
            statistic, p_value, ..
        }) => NormalityStatus::Tested(NormalityVerdict {
            statistic,
            p_value,
            is_normal: p_value > config.significance_level,
        }),
        Err(err) => {
            warn!(%err, "normality test unavailable; treating composite as non-normal");
            NormalityStatus::Inconclusive {
                reason: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_uses_shared_alpha() {
        let sample = [2.0, 3.0, 3.5, 4.0, 4.0, 4.5, 5.0, 6.0];
        let NormalityStatus::Tested(verdict) =
            assess_normality(&sample, &AnalysisConfig::default())
        else {
            panic!("sample is testable");
        };

        // The verdict flips with the injected α around the computed p-value.
        let lenient = AnalysisConfig {
            significance_level: verdict.p_value / 2.0,
        };
        assert!(assess_normality(&sample, &lenient).is_normal());

        let strict = AnalysisConfig {
            significance_level: f64::midpoint(verdict.p_value, 1.0),
        };
        assert!(!assess_normality(&sample, &strict).is_normal());
    }

    #[test]
    fn test_insufficient_data_is_inconclusive() {
        let status = assess_normality(&[1.0], &AnalysisConfig::default());
        assert!(matches!(status, NormalityStatus::Inconclusive { .. }));
        assert!(!status.is_normal());
    }

    #[test]
    fn test_constant_composite_is_inconclusive() {
        let status = assess_normality(&[3.0, 3.0, 3.0, 3.0], &AnalysisConfig::default());
        assert!(matches!(status, NormalityStatus::Inconclusive { .. }));
    }
}
