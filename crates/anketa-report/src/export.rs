//! The document-export collaborator contract.
//!
//! Rendering the bundle into a paginated document (layout, tables, fonts)
//! is external work. The pipeline only defines the contract: an exporter is
//! a capability that may be absent, and a failed export must leave the
//! already-computed [`ReportBundle`] untouched — the analysis result
//! survives independent of export success.

use chrono::{DateTime, Local};

use crate::bundle::ReportBundle;

/// Error surfaced by a document exporter.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ExportError {
    /// The export capability is not present in this deployment.
    #[display("document export capability is unavailable")]
    Unavailable,
    /// The exporter ran and failed; the bundle remains valid.
    #[display("report generation failed: {reason}")]
    Failed { reason: String },
}

/// Export-time metadata.
///
/// Generation time lives here, not in the bundle, so the bundle stays
/// idempotent while exported documents still carry their timestamp.
#[derive(Debug, Clone)]
pub struct ExportMeta {
    /// Document title, typically the bundle's.
    pub title: String,
    /// When the export was produced.
    pub generated_at: DateTime<Local>,
}

impl ExportMeta {
    /// Stamps metadata for an export starting now.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            generated_at: Local::now(),
        }
    }
}

/// A capability-checked document exporter.
///
/// Callers probe [`availability`](Self::availability) (or just call
/// [`export`](Self::export) and handle [`ExportError::Unavailable`]) instead
/// of discovering a missing capability through a hard failure.
pub trait DocumentExporter {
    /// Whether this exporter can produce documents in this deployment.
    fn availability(&self) -> bool;

    /// Serializes the bundle into a finished document.
    ///
    /// Implementations must not mutate or invalidate the bundle; on error
    /// the caller still holds the complete analysis result.
    fn export(&self, bundle: &ReportBundle, meta: &ExportMeta) -> Result<Vec<u8>, ExportError>;
}

/// Machine-readable export of the bundle as pretty-printed JSON.
///
/// This is the built-in exporter; paginated-document exporters (PDF and the
/// like) implement the same trait externally.
///
/// # Examples
///
/// ```no_run
/// use anketa_report::export::{DocumentExporter, ExportMeta, JsonExporter};
/// # use anketa_report::ReportBundle;
/// # fn bundle() -> ReportBundle { unimplemented!() }
///
/// let exporter = JsonExporter;
/// let bundle = bundle();
/// let meta = ExportMeta::new(bundle.title.clone());
/// let bytes = exporter.export(&bundle, &meta).unwrap();
/// assert!(!bytes.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl DocumentExporter for JsonExporter {
    fn availability(&self) -> bool {
        true
    }

    fn export(&self, bundle: &ReportBundle, _meta: &ExportMeta) -> Result<Vec<u8>, ExportError> {
        serde_json::to_vec_pretty(bundle).map_err(|err| ExportError::Failed {
            reason: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anketa_analysis::{composite::Selection, config::AnalysisConfig, pipeline::Analysis};
    use anketa_table::{Column, Table, Value};

    use crate::ReportAssembler;

    struct BrokenExporter;

    impl DocumentExporter for BrokenExporter {
        fn availability(&self) -> bool {
            false
        }

        fn export(
            &self,
            _bundle: &ReportBundle,
            _meta: &ExportMeta,
        ) -> Result<Vec<u8>, ExportError> {
            Err(ExportError::Unavailable)
        }
    }

    fn bundle() -> ReportBundle {
        let table = Table::from_columns(vec![
            Column::new(
                "x1",
                vec![Value::Number(4.0), Value::Number(5.0), Value::Number(3.0)],
            ),
            Column::new(
                "y1",
                vec![Value::Number(5.0), Value::Number(4.0), Value::Number(4.0)],
            ),
        ])
        .unwrap();
        let selection = Selection::new(vec!["x1".into()], vec!["y1".into()]);
        let run = Analysis::run(&table, &selection, &AnalysisConfig::default()).unwrap();
        ReportAssembler::assemble(&run)
    }

    #[test]
    fn test_json_export_round_trips() {
        let bundle = bundle();
        let meta = ExportMeta::new(bundle.title.clone());
        let bytes = JsonExporter.export(&bundle, &meta).unwrap();
        let back: ReportBundle = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, bundle);
    }

    #[test]
    fn test_failed_export_leaves_bundle_intact() {
        let bundle = bundle();
        let before = bundle.clone();
        let meta = ExportMeta::new(bundle.title.clone());

        let exporter = BrokenExporter;
        assert!(!exporter.availability());
        assert!(matches!(
            exporter.export(&bundle, &meta),
            Err(ExportError::Unavailable)
        ));
        // The computed bundle survives the export failure untouched.
        assert_eq!(bundle, before);
    }
}
