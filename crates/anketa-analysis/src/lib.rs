//! The statistical decision pipeline for survey association analysis.
//!
//! This crate turns a materialized [`Table`](anketa_table::Table) and a
//! variable [`Selection`](composite::Selection) into a complete, explainable
//! set of analysis results. The pipeline runs once per analysis request,
//! synchronously, and owns no state between runs.
//!
//! # Pipeline
//!
//! Data flows strictly upward:
//!
//! ```text
//! raw table
//!   ├─ CompositeScoreBuilder (composite.rs) — appends X_total / Y_total
//!   ├─ ColumnProfiler (profile.rs)          — per-column descriptives + frequencies
//!   ↓
//! NormalityGate (normality.rs)              — Shapiro–Wilk per composite
//!   ↓
//! AssociationEngine (association.rs)        — Pearson/Spearman + labels
//!   ↓
//! AnalysisRun (pipeline.rs)                 — everything a report needs
//! ```
//!
//! # Method selection
//!
//! The gate tests each composite for approximate normality at the shared
//! significance level from [`AnalysisConfig`](config::AnalysisConfig).
//! Pearson's product-moment correlation is used only when **both** composites
//! pass; any other combination (including composites too small to test)
//! falls back to Spearman's rank correlation. There is no blended method.
//!
//! # Example
//!
//! ```
//! use anketa_analysis::{
//!     composite::Selection, config::AnalysisConfig, pipeline::Analysis,
//! };
//! use anketa_table::{Column, Table, Value};
//!
//! let table = Table::from_columns(vec![
//!     Column::new("q1", vec![4.0.into(), 5.0.into(), 3.0.into(), 4.0.into(), 5.0.into()]),
//!     Column::new("q2", vec![5.0.into(), 4.0.into(), 4.0.into(), 5.0.into(), 5.0.into()]),
//! ])
//! .unwrap();
//!
//! let selection = Selection::new(vec!["q1".into()], vec!["q2".into()]);
//! let run = Analysis::run(&table, &selection, &AnalysisConfig::default()).unwrap();
//!
//! assert_eq!(run.profiles.len(), 4); // q1, q2, X_total, Y_total
//! assert!(run.association.as_result().is_some());
//! ```

pub mod association;
pub mod chart;
pub mod composite;
pub mod config;
pub mod normality;
pub mod pipeline;
pub mod profile;
