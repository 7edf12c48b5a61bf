//! Tabular data substrate for survey analysis.
//!
//! This crate provides the in-memory table model the analysis pipeline
//! consumes: an ordered collection of named [`Column`]s whose cells are
//! [`Value`]s (numeric, text, or missing). Rows are aligned by position and
//! the row count is invariant across all columns of a [`Table`].
//!
//! Parsing uploaded files (CSV/Excel) into a [`Table`] is the job of an
//! external collaborator; this crate only defines the structure that
//! collaborator produces.
//!
//! # Example
//!
//! ```
//! use anketa_table::{Column, Table, Value};
//!
//! let mut table = Table::new();
//! table
//!     .add_column(Column::new(
//!         "q1",
//!         vec![Value::Number(4.0), Value::Number(5.0), Value::Missing],
//!     ))
//!     .unwrap();
//!
//! assert_eq!(table.row_count(), 3);
//! assert_eq!(table.column_count(), 1);
//! assert!(table.column("q1").unwrap().is_numeric());
//! ```

pub use self::{column::Column, table::*, value::Value};

pub mod column;
pub mod table;
pub mod value;
