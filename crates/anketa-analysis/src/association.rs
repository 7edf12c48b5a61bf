use anketa_stats::correlation::{Correlation, pearson, spearman};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{config::AnalysisConfig, normality::NormalityStatus};

/// Correlation method chosen by the normality gate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, derive_more::Display,
)]
pub enum Method {
    /// Pearson's product-moment correlation; assumes a linear relationship
    /// between interval/ratio-like variables.
    #[display("Pearson Correlation")]
    Pearson,
    /// Spearman's rank correlation; assumes only a monotonic relationship
    /// and is robust to non-normality and ordinal data.
    #[display("Spearman Rank Correlation")]
    Spearman,
}

impl Method {
    /// Selects the method from both composites' normality.
    ///
    /// Pearson requires **both** composites to be normal; everything else is
    /// Spearman. This is a hard either/or — no blended method.
    ///
    /// ```
    /// use anketa_analysis::association::Method;
    ///
    /// assert_eq!(Method::select(true, true), Method::Pearson);
    /// assert_eq!(Method::select(true, false), Method::Spearman);
    /// assert_eq!(Method::select(false, false), Method::Spearman);
    /// ```
    #[must_use]
    pub fn select(x_normal: bool, y_normal: bool) -> Self {
        if x_normal && y_normal {
            Self::Pearson
        } else {
            Self::Spearman
        }
    }

    /// One-sentence rationale for why this method applies.
    #[must_use]
    pub fn rationale(self) -> &'static str {
        match self {
            Self::Pearson => {
                "Both variables are normally distributed and measure linear association."
            }
            Self::Spearman => {
                "Normality assumption is violated; monotonic relationship is assessed."
            }
        }
    }
}

/// Qualitative strength band for |r|.
///
/// Band lower bounds are closed: an |r| exactly on a boundary belongs to the
/// higher band.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, derive_more::Display,
)]
pub enum Strength {
    #[display("Very Weak")]
    VeryWeak,
    #[display("Weak")]
    Weak,
    #[display("Moderate")]
    Moderate,
    #[display("Strong")]
    Strong,
    #[display("Very Strong")]
    VeryStrong,
}

impl Strength {
    /// Classifies a coefficient by absolute value.
    ///
    /// ```
    /// use anketa_analysis::association::Strength;
    ///
    /// assert_eq!(Strength::of(0.1999), Strength::VeryWeak);
    /// assert_eq!(Strength::of(0.2), Strength::Weak);
    /// assert_eq!(Strength::of(-0.65), Strength::Strong);
    /// assert_eq!(Strength::of(0.8), Strength::VeryStrong);
    /// ```
    #[must_use]
    pub fn of(r: f64) -> Self {
        let r = r.abs();
        if r < 0.2 {
            Self::VeryWeak
        } else if r < 0.4 {
            Self::Weak
        } else if r < 0.6 {
            Self::Moderate
        } else if r < 0.8 {
            Self::Strong
        } else {
            Self::VeryStrong
        }
    }
}

/// Direction of the association.
///
/// The coefficient must be strictly positive to count as Positive; r = 0 is
/// labeled Negative by the non-strict comparison this pipeline inherits.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, derive_more::Display,
)]
pub enum Direction {
    #[display("Positive")]
    Positive,
    #[display("Negative")]
    Negative,
}

impl Direction {
    #[must_use]
    pub fn of(r: f64) -> Self {
        if r > 0.0 { Self::Positive } else { Self::Negative }
    }
}

/// Cohen-style effect-size label used in the report's detailed
/// interpretation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, derive_more::Display,
)]
pub enum EffectSize {
    #[display("Small effect")]
    Small,
    #[display("Medium effect")]
    Medium,
    #[display("Large effect")]
    Large,
}

impl EffectSize {
    #[must_use]
    pub fn of(r: f64) -> Self {
        let r = r.abs();
        if r < 0.3 {
            Self::Small
        } else if r < 0.5 {
            Self::Medium
        } else {
            Self::Large
        }
    }
}

/// A fully-formed association result.
///
/// Computed once over pairwise-complete observations and consumed by both
/// the live view and the document export without recomputation. Never
/// exposed partially: coefficient and p-value are always both populated.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AssociationResult {
    /// Method actually used.
    pub method: Method,
    /// Correlation coefficient in [-1, 1].
    pub r: f64,
    /// Two-sided p-value.
    pub p_value: f64,
    /// Number of pairwise-complete observation pairs.
    pub n_pairs: usize,
    /// Qualitative strength of |r|.
    pub strength: Strength,
    /// Sign interpretation.
    pub direction: Direction,
    /// Effect-size label for the detailed interpretation.
    pub effect_size: EffectSize,
    /// `true` when `p_value < α`.
    pub significant: bool,
}

/// Association analysis outcome, including the non-error skip states.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum AssociationOutcome {
    /// Both composites existed and the correlation was computable.
    Computed(AssociationResult),
    /// The analysis was skipped; the reason is reported, never raised.
    Skipped {
        /// Human-readable reason ("insufficient selection", ...).
        reason: String,
    },
}

impl AssociationOutcome {
    /// The computed result, if any.
    #[must_use]
    pub fn as_result(&self) -> Option<&AssociationResult> {
        match self {
            Self::Computed(result) => Some(result),
            Self::Skipped { .. } => None,
        }
    }
}

/// Retains the rows where both composites are non-missing.
///
/// Exclusion here affects only this bivariate computation; per-column
/// profiles over the same columns keep every row.
#[must_use]
pub fn pairwise_complete(x: &[Option<f64>], y: &[Option<f64>]) -> Vec<(f64, f64)> {
    x.iter()
        .zip(y)
        .filter_map(|(xv, yv)| Some(((*xv)?, (*yv)?)))
        .collect()
}

/// Runs the association engine over two row-aligned composite columns.
///
/// The caller provides each composite's cells (aligned by row, `None` for
/// missing) and its normality status; the engine picks the method, computes
/// the coefficient over pairwise-complete rows, and attaches the qualitative
/// labels. A selection too degenerate to correlate (no complete pairs, or a
/// constant composite) produces a skipped outcome rather than an error.
///
/// # Examples
///
/// ```
/// use anketa_analysis::association::{compute_association, Method};
/// use anketa_analysis::config::AnalysisConfig;
/// use anketa_analysis::normality::{NormalityStatus, NormalityVerdict};
///
/// let x: Vec<Option<f64>> = vec![Some(4.0), Some(5.0), Some(3.0), Some(4.0), Some(5.0)];
/// let y: Vec<Option<f64>> = vec![Some(5.0), Some(4.0), Some(4.0), Some(5.0), Some(5.0)];
/// let normal = NormalityStatus::Tested(NormalityVerdict {
///     statistic: 0.9,
///     p_value: 0.2,
///     is_normal: true,
/// });
///
/// let outcome = compute_association(&x, &y, &normal, &normal, &AnalysisConfig::default());
/// let result = outcome.as_result().unwrap();
/// assert_eq!(result.method, Method::Pearson);
/// assert_eq!(result.n_pairs, 5);
/// ```
#[must_use]
pub fn compute_association(
    x: &[Option<f64>],
    y: &[Option<f64>],
    x_status: &NormalityStatus,
    y_status: &NormalityStatus,
    config: &AnalysisConfig,
) -> AssociationOutcome {
    let method = Method::select(x_status.is_normal(), y_status.is_normal());

    let pairs = pairwise_complete(x, y);
    let (xs, ys): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();

    let correlation = match method {
        Method::Pearson => pearson(&xs, &ys),
        Method::Spearman => spearman(&xs, &ys),
    };

    let Some(Correlation { r, p_value, n }) = correlation else {
        return AssociationOutcome::Skipped {
            reason: format!(
                "too few usable observation pairs for {method} ({} complete pairs)",
                xs.len()
            ),
        };
    };

    debug!(%method, r, p_value, n, "association computed");
    AssociationOutcome::Computed(AssociationResult {
        method,
        r,
        p_value,
        n_pairs: n,
        strength: Strength::of(r),
        direction: Direction::of(r),
        effect_size: EffectSize::of(r),
        significant: p_value < config.significance_level,
    })
}
