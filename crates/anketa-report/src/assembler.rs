use anketa_analysis::{
    association::{AssociationOutcome, AssociationResult, Direction, Method},
    normality::NormalityStatus,
    pipeline::AnalysisRun,
    profile::ColumnProfile,
};

use crate::bundle::{
    AssociationSection, ConclusionsSection, DatasetSection, NormalityRow, NormalitySection,
    ReportBundle, VariableSection, descriptive_rows,
};

/// Assembles an [`AnalysisRun`] into the one [`ReportBundle`] both consumers
/// render from.
///
/// The assembler is a deterministic, order-preserving merge: every number is
/// pulled from the run, every narrative is a template substitution over
/// labels the pipeline already derived. No statistic is recomputed and no
/// judgment is made here, so assembling the same run twice yields an
/// identical bundle.
///
/// # Examples
///
/// ```
/// use anketa_analysis::{
///     composite::Selection, config::AnalysisConfig, pipeline::Analysis,
/// };
/// use anketa_report::ReportAssembler;
/// use anketa_table::{Column, Table, Value};
///
/// let table = Table::from_columns(vec![
///     Column::new("q1", vec![Value::Number(4.0), Value::Number(5.0), Value::Number(3.0)]),
///     Column::new("q2", vec![Value::Number(5.0), Value::Number(4.0), Value::Number(4.0)]),
/// ])
/// .unwrap();
/// let selection = Selection::new(vec!["q1".into()], vec!["q2".into()]);
/// let run = Analysis::run(&table, &selection, &AnalysisConfig::default()).unwrap();
///
/// let bundle = ReportAssembler::assemble(&run);
/// assert_eq!(bundle.variables.len(), 4);
/// assert_eq!(bundle, ReportAssembler::assemble(&run));
/// ```
#[derive(Debug)]
pub struct ReportAssembler;

impl ReportAssembler {
    /// Builds the report bundle from an analysis run.
    #[must_use]
    pub fn assemble(run: &AnalysisRun) -> ReportBundle {
        ReportBundle {
            title: "Statistical Analysis Report".to_string(),
            dataset: DatasetSection {
                rows: run.summary.rows,
                columns: run.summary.columns,
                x_variables: run.selection.x_items.clone(),
                y_variables: run.selection.y_items.clone(),
            },
            executive_summary: executive_summary(
                &run.association,
                run.config.significance_level,
            ),
            variables: run.profiles.iter().map(variable_section).collect(),
            normality: normality_section(run),
            association: association_section(&run.association, run.config.significance_level),
            charts: run.charts.clone(),
            conclusions: conclusions(run),
            methodology: methodology(run),
        }
    }
}

fn executive_summary(association: &AssociationOutcome, alpha: f64) -> String {
    match association {
        AssociationOutcome::Computed(result) => format!(
            "This report presents a comprehensive statistical analysis of survey data. \
             The analysis reveals a {} {} relationship between X and Y variables \
             (r = {:.3}, p = {:.4}). The relationship is {}.",
            lower(&result.strength.to_string()),
            lower(&result.direction.to_string()),
            result.r,
            result.p_value,
            significance_phrase(result, alpha),
        ),
        AssociationOutcome::Skipped { reason } => format!(
            "This report presents a comprehensive statistical analysis of survey data. \
             Association analysis was skipped: {reason}."
        ),
    }
}

fn variable_section(profile: &ColumnProfile) -> VariableSection {
    let statistics = profile
        .descriptive
        .as_ref()
        .map(descriptive_rows)
        .unwrap_or_default();

    let takeaways = profile.descriptive.as_ref().map_or_else(Vec::new, |stats| {
        vec![
            "The histogram reveals the distribution shape and potential skewness.".to_string(),
            "The boxplot highlights the median and identifies possible outliers.".to_string(),
            format!(
                "Mean = {:.2}, Median = {:.2}, Std Dev = {:.2}.",
                stats.mean, stats.median, stats.std_dev
            ),
            "Outliers may indicate extreme responses that affect the mean.".to_string(),
        ]
    });

    let likert_note = (profile.likert == Some(true)).then(|| {
        "This variable follows a Likert-type scale (1-5), allowing ordinal interpretation \
         and supporting non-parametric analysis if normality is violated."
            .to_string()
    });

    VariableSection {
        profile: profile.clone(),
        statistics,
        takeaways,
        likert_note,
        frequency_interpretation: vec![
            "Dominant categories represent prevailing respondent opinions.".to_string(),
            "Percentage distribution reflects response variability and concentration.".to_string(),
        ],
    }
}

fn normality_section(run: &AnalysisRun) -> NormalitySection {
    let alpha = run.config.significance_level;
    let mut rows = Vec::new();
    let mut caveats = Vec::new();

    let sides = [
        (run.composites.x.as_deref(), run.x_normality.as_ref()),
        (run.composites.y.as_deref(), run.y_normality.as_ref()),
    ];
    for (name, status) in sides {
        let (Some(name), Some(status)) = (name, status) else {
            continue;
        };
        match status {
            NormalityStatus::Tested(verdict) => rows.push(NormalityRow {
                variable: name.to_string(),
                verdict: Some(verdict.clone()),
                distribution: if verdict.is_normal { "Normal" } else { "Not Normal" }.to_string(),
                interpretation: parametric_phrase(verdict.is_normal),
            }),
            NormalityStatus::Inconclusive { reason } => {
                rows.push(NormalityRow {
                    variable: name.to_string(),
                    verdict: None,
                    distribution: "Not Normal".to_string(),
                    interpretation: parametric_phrase(false),
                });
                caveats.push(format!(
                    "{name}: normality could not be tested ({reason}); treated as non-normal."
                ));
            }
        }
    }

    let decision = match (run.x_normality.as_ref(), run.y_normality.as_ref()) {
        (Some(x), Some(y)) => Some(if x.is_normal() && y.is_normal() {
            "Both variables are normal, use Pearson correlation.".to_string()
        } else {
            "At least one variable is not normal, use Spearman correlation.".to_string()
        }),
        _ => None,
    };

    NormalitySection {
        alpha,
        rows,
        caveats,
        decision,
    }
}

fn association_section(
    association: &AssociationOutcome,
    alpha: f64,
) -> AssociationSection {
    match association {
        AssociationOutcome::Computed(result) => AssociationSection::Computed {
            result: result.clone(),
            method_rationale: result.method.rationale().to_string(),
            interpretation: interpretation_lines(result, alpha),
        },
        AssociationOutcome::Skipped { reason } => AssociationSection::Skipped {
            reason: reason.clone(),
        },
    }
}

fn interpretation_lines(result: &AssociationResult, alpha: f64) -> Vec<String> {
    let tendency = match result.direction {
        Direction::Positive => "increase",
        Direction::Negative => "decrease",
    };
    vec![
        format!(
            "The correlation coefficient of r = {:.3} indicates a {} relationship between X and Y.",
            result.r,
            lower(&result.strength.to_string())
        ),
        format!(
            "Direction: {} - as X increases by one unit, Y tends to {tendency}.",
            result.direction
        ),
        format!(
            "The p-value of {:.4} indicates the relationship is {}.",
            result.p_value,
            significance_phrase(result, alpha)
        ),
        format!("Effect size: {}.", result.effect_size),
        "This analysis shows association, NOT causation.".to_string(),
    ]
}

fn conclusions(run: &AnalysisRun) -> ConclusionsSection {
    let mut key_findings = vec![
        "Descriptive Analysis: Revealed meaningful response patterns across all variables \
         with appropriate measures of central tendency and dispersion."
            .to_string(),
    ];
    if run.composites.x.is_some() || run.composites.y.is_some() {
        key_findings.push(
            "Composite Scores: Aggregating multiple items into totals improves measurement \
             reliability."
                .to_string(),
        );
    }
    match &run.association {
        AssociationOutcome::Computed(result) => {
            let normality_summary = if matches!(result.method, Method::Pearson) {
                "Both variables showed normal distribution"
            } else {
                "At least one variable violated normality assumption"
            };
            key_findings.push(format!(
                "Normality Testing: {normality_summary}, guiding the selection of {}.",
                result.method
            ));
            key_findings.push(format!(
                "Association Analysis: Found a {} {} relationship (r = {:.3}) that is {}.",
                lower(&result.strength.to_string()),
                lower(&result.direction.to_string()),
                result.r,
                significance_phrase(result, run.config.significance_level),
            ));
        }
        AssociationOutcome::Skipped { reason } => {
            key_findings.push(format!("Association Analysis: skipped ({reason})."));
        }
    }

    ConclusionsSection {
        key_findings,
        practical_implications: vec![
            "Results are suitable for academic reports, research papers, and program \
             evaluations."
                .to_string(),
            "Consider additional analyses such as regression modeling to explore predictive \
             relationships."
                .to_string(),
        ],
        limitations: vec![
            "Correlation does not imply causation - experimental studies are needed to \
             establish causal relationships."
                .to_string(),
            "Results are specific to this sample and may not generalize to other populations."
                .to_string(),
            "Potential confounding variables were not controlled in this analysis.".to_string(),
        ],
        recommendations: vec![
            "Conduct follow-up studies with larger sample sizes to validate findings."
                .to_string(),
            "Investigate potential mediating or moderating variables.".to_string(),
            "Consider longitudinal designs to examine relationships over time.".to_string(),
            "Use these results as preliminary evidence for hypothesis generation.".to_string(),
        ],
    }
}

fn methodology(run: &AnalysisRun) -> Vec<String> {
    let alpha = run.config.significance_level;
    let confidence = (1.0 - alpha) * 100.0;
    let mut notes = vec![
        "Descriptive Statistics: Mean, Median, Standard Deviation, Variance, Min/Max"
            .to_string(),
        format!("Normality Testing: Shapiro-Wilk test (α = {alpha})"),
        match &run.association {
            AssociationOutcome::Computed(result) => {
                format!("Association Analysis: {}", result.method)
            }
            AssociationOutcome::Skipped { .. } => "Association Analysis: skipped".to_string(),
        },
        format!("Significance Level: α = {alpha} ({confidence}% confidence level)"),
        "Data Processing: Missing values excluded per computation; association uses \
         pairwise-complete observations"
            .to_string(),
        format!("Total Respondents: {}", run.summary.rows),
        format!("X Variables Analyzed: {}", run.selection.x_items.len()),
        format!("Y Variables Analyzed: {}", run.selection.y_items.len()),
    ];
    if run.composites.x.is_some() || run.composites.y.is_some() {
        notes.push("Composite Scores: Created by summing individual items".to_string());
    }
    notes
}

fn significance_phrase(result: &AssociationResult, alpha: f64) -> String {
    if result.significant {
        format!("statistically significant at α = {alpha}")
    } else {
        format!("not statistically significant at α = {alpha}")
    }
}

fn parametric_phrase(is_normal: bool) -> String {
    if is_normal {
        "Use parametric tests".to_string()
    } else {
        "Use non-parametric tests".to_string()
    }
}

fn lower(label: &str) -> String {
    label.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anketa_analysis::{composite::Selection, config::AnalysisConfig, pipeline::Analysis};
    use anketa_table::{Column, Table, Value};

    fn likert(name: &str, values: &[f64]) -> Column {
        Column::new(
            name,
            values.iter().map(|&n| Value::Number(n)).collect::<Vec<_>>(),
        )
    }

    fn full_run() -> AnalysisRun {
        let table = Table::from_columns(vec![
            likert("x1", &[4.0, 5.0, 3.0, 4.0, 5.0]),
            likert("y1", &[5.0, 4.0, 4.0, 5.0, 5.0]),
        ])
        .unwrap();
        let selection = Selection::new(vec!["x1".into()], vec!["y1".into()]);
        Analysis::run(&table, &selection, &AnalysisConfig::default()).unwrap()
    }

    #[test]
    fn test_assembly_is_idempotent() {
        let run = full_run();
        assert_eq!(ReportAssembler::assemble(&run), ReportAssembler::assemble(&run));
    }

    #[test]
    fn test_sections_are_ordered_and_complete() {
        let bundle = ReportAssembler::assemble(&full_run());

        let names: Vec<_> = bundle
            .variables
            .iter()
            .map(|v| v.profile.name.as_str())
            .collect();
        assert_eq!(names, vec!["x1", "y1", "X_total", "Y_total"]);

        assert_eq!(bundle.normality.rows.len(), 2);
        assert!(bundle.normality.decision.is_some());
        assert!(matches!(
            bundle.association,
            AssociationSection::Computed { .. }
        ));
        assert!(!bundle.conclusions.key_findings.is_empty());
        assert!(!bundle.methodology.is_empty());
    }

    #[test]
    fn test_narratives_substitute_engine_values() {
        let run = full_run();
        let bundle = ReportAssembler::assemble(&run);

        let result = run.association.as_result().unwrap();
        let AssociationSection::Computed { interpretation, .. } = &bundle.association else {
            panic!("association was computed");
        };
        // The r embedded in the narrative is the engine's, formatted once.
        assert!(interpretation[0].contains(&format!("{:.3}", result.r)));
        assert!(bundle.executive_summary.contains(&format!("{:.4}", result.p_value)));
    }

    #[test]
    fn test_likert_note_attached_to_likert_variables() {
        let bundle = ReportAssembler::assemble(&full_run());
        assert!(bundle.variables[0].likert_note.is_some());
        // Composite totals exceed the 1-5 range only when items sum past 5;
        // single-item composites stay within it here.
        assert!(bundle.variables[2].likert_note.is_some());
    }

    #[test]
    fn test_skipped_y_side_marks_sections_skipped() {
        let table = Table::from_columns(vec![likert("x1", &[4.0, 5.0, 3.0])]).unwrap();
        let selection = Selection::new(vec!["x1".into()], vec![]);
        let run = Analysis::run(&table, &selection, &AnalysisConfig::default()).unwrap();
        let bundle = ReportAssembler::assemble(&run);

        // Only the X side is profiled and gated; association is skipped.
        let names: Vec<_> = bundle
            .variables
            .iter()
            .map(|v| v.profile.name.as_str())
            .collect();
        assert_eq!(names, vec!["x1", "X_total"]);
        assert_eq!(bundle.normality.rows.len(), 1);
        assert!(bundle.normality.decision.is_none());
        assert!(matches!(
            bundle.association,
            AssociationSection::Skipped { .. }
        ));
        assert!(bundle.executive_summary.contains("skipped"));
    }

    #[test]
    fn test_inconclusive_normality_becomes_caveat() {
        let table = Table::from_columns(vec![
            likert("x1", &[4.0, 5.0]),
            likert("y1", &[5.0, 4.0]),
        ])
        .unwrap();
        let selection = Selection::new(vec!["x1".into()], vec!["y1".into()]);
        let run = Analysis::run(&table, &selection, &AnalysisConfig::default()).unwrap();
        let bundle = ReportAssembler::assemble(&run);

        assert_eq!(bundle.normality.caveats.len(), 2);
        assert!(bundle.normality.rows.iter().all(|r| r.verdict.is_none()));
        assert_eq!(
            bundle.normality.decision.as_deref(),
            Some("At least one variable is not normal, use Spearman correlation.")
        );
    }
}
