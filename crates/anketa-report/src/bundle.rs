use anketa_analysis::{
    association::AssociationResult, chart::ChartRequest, normality::NormalityVerdict,
    profile::ColumnProfile,
};
use anketa_stats::descriptive::DescriptiveStats;
use serde::{Deserialize, Serialize};

/// One row of the two-column descriptive-statistics table.
///
/// The value is carried as the raw `f64`; consumers format it themselves
/// (the document export uses [`StatRow::formatted`], the live view may pick
/// its own precision) so both always render the same underlying number.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StatRow {
    /// Statistic label ("Mean", "Median", ...).
    pub label: String,
    /// Raw value.
    pub value: f64,
}

impl StatRow {
    /// The value formatted to two decimals, as the document layout expects.
    #[must_use]
    pub fn formatted(&self) -> String {
        format!("{:.2}", self.value)
    }
}

/// Builds the ordered descriptive rows for one column.
///
/// Order matches the rendered table: Count, Mean, Median, Std Deviation,
/// Variance, Minimum, Maximum.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn descriptive_rows(stats: &DescriptiveStats) -> Vec<StatRow> {
    [
        ("Count", stats.count as f64),
        ("Mean", stats.mean),
        ("Median", stats.median),
        ("Std Deviation", stats.std_dev),
        ("Variance", stats.variance),
        ("Minimum", stats.min),
        ("Maximum", stats.max),
    ]
    .into_iter()
    .map(|(label, value)| StatRow {
        label: label.to_string(),
        value,
    })
    .collect()
}

/// Dataset summary shown on the report's information page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatasetSection {
    /// Total respondents (rows), composites included in the column count.
    pub rows: usize,
    /// Total columns after composite creation.
    pub columns: usize,
    /// Selected X item columns, in selection order.
    pub x_variables: Vec<String>,
    /// Selected Y item columns, in selection order.
    pub y_variables: Vec<String>,
}

/// Everything rendered for a single analyzed variable.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VariableSection {
    /// The profile the pipeline computed; frequencies double as the
    /// three-column table rows (category, count, percentage).
    pub profile: ColumnProfile,
    /// Two-column descriptive rows; empty for categorical or all-missing
    /// columns.
    pub statistics: Vec<StatRow>,
    /// Key-takeaway narrative lines.
    pub takeaways: Vec<String>,
    /// Likert-scale interpretive note, when the flag is set.
    pub likert_note: Option<String>,
    /// Frequency-table interpretation lines.
    pub frequency_interpretation: Vec<String>,
}

/// One row of the normality-test table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NormalityRow {
    /// Composite variable name.
    pub variable: String,
    /// Computed verdict; `None` when the test could not run.
    pub verdict: Option<NormalityVerdict>,
    /// "Normal" / "Not Normal".
    pub distribution: String,
    /// "Use parametric tests" / "Use non-parametric tests".
    pub interpretation: String,
}

/// The normality-testing section.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NormalitySection {
    /// Significance level the verdicts used.
    pub alpha: f64,
    /// One row per tested composite; composites that were never created do
    /// not appear.
    pub rows: Vec<NormalityRow>,
    /// Caveats for composites whose test could not run (recovered errors).
    pub caveats: Vec<String>,
    /// The method-selection decision line; present only when both
    /// composites exist.
    pub decision: Option<String>,
}

/// The association-analysis section: computed or explicitly skipped.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssociationSection {
    /// Association was computed; all labels come from the engine.
    Computed {
        /// The engine's result, untouched.
        result: AssociationResult,
        /// Why this method applies.
        method_rationale: String,
        /// Detailed interpretation lines.
        interpretation: Vec<String>,
    },
    /// Association was skipped — a valid state, not an error.
    Skipped {
        /// Why ("insufficient selection", ...).
        reason: String,
    },
}

/// Conclusions and recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConclusionsSection {
    pub key_findings: Vec<String>,
    pub practical_implications: Vec<String>,
    pub limitations: Vec<String>,
    pub recommendations: Vec<String>,
}

/// The complete, ordered report content.
///
/// Immutable once assembled and free of timestamps: assembling the same
/// analysis run twice yields an equal bundle. Generation metadata belongs to
/// the export step ([`ExportMeta`](crate::export::ExportMeta)), not here.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReportBundle {
    /// Report title.
    pub title: String,
    /// Dataset summary.
    pub dataset: DatasetSection,
    /// Executive summary paragraph.
    pub executive_summary: String,
    /// Per-variable sections in rendering order: X items, Y items,
    /// X_total, Y_total.
    pub variables: Vec<VariableSection>,
    /// Normality-testing section.
    pub normality: NormalitySection,
    /// Association section, computed or skipped.
    pub association: AssociationSection,
    /// Chart-data requests, in the order the sections reference them.
    pub charts: Vec<ChartRequest>,
    /// Conclusions and recommendations.
    pub conclusions: ConclusionsSection,
    /// Methodology notes.
    pub methodology: Vec<String>,
}
