use serde::{Deserialize, Serialize};

/// Default significance level shared by normality testing and association
/// significance (α = 0.05).
pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Shared configuration for one analysis run.
///
/// The significance level governs two independent decisions — whether a
/// composite counts as normally distributed and whether an association
/// counts as statistically significant. Both components receive the same
/// injected value so the threshold cannot drift between them.
///
/// # Examples
///
/// ```
/// use anketa_analysis::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.significance_level, 0.05);
///
/// let strict = AnalysisConfig { significance_level: 0.01 };
/// assert!(strict.significance_level < config.significance_level);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Significance level α for both normality and association tests.
    pub significance_level: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            significance_level: DEFAULT_SIGNIFICANCE_LEVEL,
        }
    }
}
