use anketa_table::{Table, TableError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    association::{AssociationOutcome, compute_association},
    chart::{ChartRequest, TrendLine},
    composite::{Composites, Selection, build_composites},
    config::AnalysisConfig,
    normality::{NormalityStatus, assess_normality},
    profile::{ColumnProfile, Measurement},
};

/// Row and column counts of the analyzed table, composites included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct TableSummary {
    pub rows: usize,
    pub columns: usize,
}

/// Everything one analysis request produces.
///
/// This is the single source of truth both consumers render from: the
/// interactive view and the document export read these exact values, so the
/// numbers can never diverge between them. Formatting may differ per
/// consumer; the values may not.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalysisRun {
    /// Shape of the analyzed table.
    pub summary: TableSummary,
    /// The selection this run was requested with.
    pub selection: Selection,
    /// Which composite columns were actually created.
    pub composites: Composites,
    /// Profiles in rendering order: X items, Y items, X_total, Y_total.
    pub profiles: Vec<ColumnProfile>,
    /// Normality status of X_total; `None` when the composite was never
    /// created (not reported, only defaulted for method selection).
    pub x_normality: Option<NormalityStatus>,
    /// Normality status of Y_total; same convention as `x_normality`.
    pub y_normality: Option<NormalityStatus>,
    /// Association outcome, skipped states included.
    pub association: AssociationOutcome,
    /// Chart-data requests for the rendering collaborator.
    pub charts: Vec<ChartRequest>,
    /// The configuration the run used (α for every threshold).
    pub config: AnalysisConfig,
}

/// The pipeline entry point.
///
/// One invocation processes one materialized table to completion: a
/// request-scoped copy is taken, composites are appended to the copy, and
/// every downstream stage reads from it. Nothing is cached across runs.
#[derive(Debug)]
pub struct Analysis;

impl Analysis {
    /// Runs the full statistical decision pipeline.
    ///
    /// # Errors
    ///
    /// Fails only when a composite column cannot be appended (a source
    /// column is already named `X_total`/`Y_total`). Empty selections,
    /// missing composites, and untestable composites are all valid skip
    /// states reflected in the run, never errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use anketa_analysis::{
    ///     composite::Selection, config::AnalysisConfig, pipeline::Analysis,
    /// };
    /// use anketa_table::{Column, Table, Value};
    ///
    /// let table = Table::from_columns(vec![Column::new(
    ///     "q1",
    ///     vec![Value::Number(4.0), Value::Number(5.0)],
    /// )])
    /// .unwrap();
    ///
    /// // No Y items: the association section is skipped, not a crash.
    /// let selection = Selection::new(vec!["q1".into()], vec![]);
    /// let run = Analysis::run(&table, &selection, &AnalysisConfig::default()).unwrap();
    /// assert!(run.association.as_result().is_none());
    /// ```
    pub fn run(
        table: &Table,
        selection: &Selection,
        config: &AnalysisConfig,
    ) -> Result<AnalysisRun, TableError> {
        // Request-scoped copy; the caller's table is never mutated.
        let mut data = table.clone();

        let composites = build_composites(&mut data, selection)?;

        let profiles = Self::profile_columns(&data, selection, &composites);

        let x_normality = composites
            .x
            .as_deref()
            .map(|name| Self::gate_composite(&data, name, config));
        let y_normality = composites
            .y
            .as_deref()
            .map(|name| Self::gate_composite(&data, name, config));

        let association =
            Self::associate(&data, &composites, x_normality.as_ref(), y_normality.as_ref(), config);

        let charts = Self::chart_requests(&data, &profiles, &composites);

        Ok(AnalysisRun {
            summary: TableSummary {
                rows: data.row_count(),
                columns: data.column_count(),
            },
            selection: selection.clone(),
            composites,
            profiles,
            x_normality,
            y_normality,
            association,
            charts,
            config: *config,
        })
    }

    /// Profiles the analyzed columns in rendering order.
    fn profile_columns(
        data: &Table,
        selection: &Selection,
        composites: &Composites,
    ) -> Vec<ColumnProfile> {
        let names = selection
            .x_items
            .iter()
            .chain(&selection.y_items)
            .map(String::as_str)
            .chain(composites.x.as_deref())
            .chain(composites.y.as_deref());

        let mut profiles = Vec::new();
        for name in names {
            match data.column(name) {
                Some(column) => profiles.push(ColumnProfile::of(column)),
                None => warn!(column = %name, "selected column not found; skipping profile"),
            }
        }
        profiles
    }

    /// Runs the normality gate over a composite's non-missing values.
    fn gate_composite(data: &Table, name: &str, config: &AnalysisConfig) -> NormalityStatus {
        let values = data
            .column(name)
            .map(anketa_table::Column::numbers)
            .unwrap_or_default();
        debug!(composite = name, n = values.len(), "running normality gate");
        assess_normality(&values, config)
    }

    /// Runs the association engine, or records why it was skipped.
    fn associate(
        data: &Table,
        composites: &Composites,
        x_normality: Option<&NormalityStatus>,
        y_normality: Option<&NormalityStatus>,
        config: &AnalysisConfig,
    ) -> AssociationOutcome {
        let (Some(x_name), Some(y_name)) = (composites.x.as_deref(), composites.y.as_deref())
        else {
            return AssociationOutcome::Skipped {
                reason: "insufficient selection: both X and Y composites are required".into(),
            };
        };
        let (Some(x_col), Some(y_col)) = (data.column(x_name), data.column(y_name)) else {
            return AssociationOutcome::Skipped {
                reason: "insufficient selection: both X and Y composites are required".into(),
            };
        };
        // A composite that exists always has a gate status; a missing status
        // would mean an absent composite, already handled above.
        let fallback = NormalityStatus::Inconclusive {
            reason: "composite not tested".into(),
        };
        let x_status = x_normality.unwrap_or(&fallback);
        let y_status = y_normality.unwrap_or(&fallback);

        compute_association(
            &x_col.coerced_numbers(),
            &y_col.coerced_numbers(),
            x_status,
            y_status,
            config,
        )
    }

    /// Builds the chart-data requests for the rendering collaborator.
    fn chart_requests(
        data: &Table,
        profiles: &[ColumnProfile],
        composites: &Composites,
    ) -> Vec<ChartRequest> {
        let mut charts = Vec::new();

        for profile in profiles {
            if profile.measurement != Measurement::Numeric {
                continue;
            }
            let Some(column) = data.column(&profile.name) else {
                continue;
            };
            let values = column.numbers();
            charts.push(ChartRequest::Histogram {
                variable: profile.name.clone(),
                values: values.clone(),
            });
            charts.push(ChartRequest::Boxplot {
                variable: profile.name.clone(),
                values,
            });
        }

        if let (Some(x_name), Some(y_name)) = (composites.x.as_deref(), composites.y.as_deref())
            && let (Some(x_col), Some(y_col)) = (data.column(x_name), data.column(y_name))
        {
            let points = crate::association::pairwise_complete(
                &x_col.coerced_numbers(),
                &y_col.coerced_numbers(),
            );
            let trend = TrendLine::fit(&points);
            charts.push(ChartRequest::Scatter {
                x_label: x_name.to_string(),
                y_label: y_name.to_string(),
                points,
                trend,
            });
        }

        charts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::association::Method;
    use anketa_table::{Column, Value};

    fn likert(name: &str, values: &[f64]) -> Column {
        Column::new(
            name,
            values.iter().map(|&n| Value::Number(n)).collect::<Vec<_>>(),
        )
    }

    fn five_respondents() -> Table {
        Table::from_columns(vec![
            likert("x1", &[4.0, 5.0, 3.0, 4.0, 5.0]),
            likert("y1", &[5.0, 4.0, 4.0, 5.0, 5.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_end_to_end_five_respondents() {
        let table = five_respondents();
        let selection = Selection::new(vec!["x1".into()], vec!["y1".into()]);
        let run = Analysis::run(&table, &selection, &AnalysisConfig::default()).unwrap();

        // Single-item composites equal their items.
        let profile_names: Vec<_> = run.profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(profile_names, vec!["x1", "y1", "X_total", "Y_total"]);
        let x_total = run.profiles[2].descriptive.as_ref().unwrap();
        assert_eq!(x_total.count, 5);
        assert_eq!(x_total.mean, 4.2);

        // Both composites gated; method follows the computed verdicts.
        let x_status = run.x_normality.as_ref().unwrap();
        let y_status = run.y_normality.as_ref().unwrap();
        let expected = Method::select(x_status.is_normal(), y_status.is_normal());
        let result = run.association.as_result().unwrap();
        assert_eq!(result.method, expected);
        assert_eq!(result.n_pairs, 5);
        assert!(result.r.abs() <= 1.0);
        assert!((0.0..=1.0).contains(&result.p_value));
    }

    #[test]
    fn test_run_is_deterministic() {
        let table = five_respondents();
        let selection = Selection::new(vec!["x1".into()], vec!["y1".into()]);
        let config = AnalysisConfig::default();

        let first = Analysis::run(&table, &selection, &config).unwrap();
        let second = Analysis::run(&table, &selection, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_source_table_is_not_mutated() {
        let table = five_respondents();
        let selection = Selection::new(vec!["x1".into()], vec!["y1".into()]);
        Analysis::run(&table, &selection, &AnalysisConfig::default()).unwrap();
        assert_eq!(table.column_count(), 2);
        assert!(!table.has_column("X_total"));
    }

    #[test]
    fn test_zero_y_items_skips_association() {
        let table = five_respondents();
        let selection = Selection::new(vec!["x1".into()], vec![]);
        let run = Analysis::run(&table, &selection, &AnalysisConfig::default()).unwrap();

        // No Y-side profiles, no Y composite, association skipped.
        let profile_names: Vec<_> = run.profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(profile_names, vec!["x1", "X_total"]);
        assert_eq!(run.composites.y, None);
        assert!(run.y_normality.is_none());
        assert!(matches!(
            run.association,
            AssociationOutcome::Skipped { .. }
        ));
    }

    #[test]
    fn test_tiny_composite_still_produces_an_outcome() {
        // Two respondents: below the normality gate's minimum.
        let table = Table::from_columns(vec![
            likert("x1", &[4.0, 5.0]),
            likert("y1", &[5.0, 4.0]),
        ])
        .unwrap();
        let selection = Selection::new(vec!["x1".into()], vec!["y1".into()]);
        let run = Analysis::run(&table, &selection, &AnalysisConfig::default()).unwrap();

        // The gate is inconclusive, never a panic, and the engine falls back
        // to the non-parametric path.
        assert!(matches!(
            run.x_normality,
            Some(NormalityStatus::Inconclusive { .. })
        ));
        if let Some(result) = run.association.as_result() {
            assert_eq!(result.method, Method::Spearman);
        }
    }

    #[test]
    fn test_overlapping_selection_profiles_twice() {
        let table = five_respondents();
        let selection = Selection::new(vec!["x1".into()], vec!["x1".into()]);
        let run = Analysis::run(&table, &selection, &AnalysisConfig::default()).unwrap();

        let profile_names: Vec<_> = run.profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(profile_names, vec!["x1", "x1", "X_total", "Y_total"]);
    }

    #[test]
    fn test_charts_cover_numeric_columns_and_scatter() {
        let table = five_respondents();
        let selection = Selection::new(vec!["x1".into()], vec!["y1".into()]);
        let run = Analysis::run(&table, &selection, &AnalysisConfig::default()).unwrap();

        // Two requests per numeric column (4 columns) plus the scatter.
        assert_eq!(run.charts.len(), 9);
        assert!(matches!(
            run.charts.last(),
            Some(ChartRequest::Scatter { trend: Some(_), .. })
        ));
    }
}
