use anketa_stats::{descriptive::DescriptiveStats, frequency::FrequencyTable};
use anketa_table::{Column, Value};
use serde::{Deserialize, Serialize};

/// Measurement kind of an analyzed column, classified once per column.
///
/// Downstream code branches on this tag instead of re-inspecting cell types
/// at every use site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Measurement {
    /// Every non-missing cell is a number; descriptive statistics apply.
    Numeric,
    /// At least one non-missing cell is text; only frequency analysis
    /// applies.
    Categorical,
}

impl Measurement {
    /// Classifies a column by its underlying cell types.
    #[must_use]
    pub fn of(column: &Column) -> Self {
        if column.is_numeric() {
            Self::Numeric
        } else {
            Self::Categorical
        }
    }
}

/// Everything the pipeline derives from a single analyzed column.
///
/// Immutable once computed. Descriptive statistics are present only for
/// numeric columns with at least one non-missing value; the frequency table
/// is always present (missing values get their own bucket). The Likert flag
/// is computed for numeric columns only and attaches an interpretive note —
/// it never alters downstream statistics.
///
/// # Examples
///
/// ```
/// use anketa_analysis::profile::{ColumnProfile, Measurement};
/// use anketa_table::{Column, Value};
///
/// let col = Column::new(
///     "q1",
///     vec![Value::Number(4.0), Value::Number(5.0), Value::Missing],
/// );
/// let profile = ColumnProfile::of(&col);
///
/// assert_eq!(profile.measurement, Measurement::Numeric);
/// assert_eq!(profile.descriptive.as_ref().unwrap().count, 2);
/// assert_eq!(profile.frequency.missing_count(), 1);
/// assert_eq!(profile.likert, Some(true));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Measurement kind, classified once.
    pub measurement: Measurement,
    /// Descriptive statistics over non-missing values; `None` for
    /// categorical columns and for numeric columns with no non-missing
    /// values.
    pub descriptive: Option<DescriptiveStats>,
    /// Exhaustive frequency table, missing bucket included.
    pub frequency: FrequencyTable,
    /// Whether all non-missing values lie in {1, 2, 3, 4, 5}; `None` for
    /// categorical columns. An all-missing numeric column is vacuously
    /// `Some(true)`.
    pub likert: Option<bool>,
}

impl ColumnProfile {
    /// Profiles a column: pure function of the column's name and cells.
    #[must_use]
    pub fn of(column: &Column) -> Self {
        let measurement = Measurement::of(column);

        let (descriptive, likert) = match measurement {
            Measurement::Numeric => {
                let numbers = column.numbers();
                let likert = numbers.iter().all(|n| LIKERT_LEVELS.contains(n));
                (DescriptiveStats::from_values(&numbers), Some(likert))
            }
            Measurement::Categorical => (None, None),
        };

        let frequency =
            FrequencyTable::from_observations(column.values.iter().map(category_label));

        Self {
            name: column.name.clone(),
            measurement,
            descriptive,
            frequency,
            likert,
        }
    }
}

/// The five response levels of the Likert scale this pipeline recognizes.
pub const LIKERT_LEVELS: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];

/// Maps a cell to its frequency-table category; `None` marks missing.
///
/// Whole numbers print without a fractional part so Likert responses read
/// as "4" rather than "4.0".
fn category_label(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(format_number(*n)),
        Value::Text(s) => Some(s.clone()),
        Value::Missing => None,
    }
}

#[expect(clippy::cast_possible_truncation)]
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
