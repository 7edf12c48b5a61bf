use serde::{Deserialize, Serialize};

use crate::Column;

/// Error raised when a column cannot be added to a [`Table`].
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum TableError {
    /// A column with the same name already exists.
    #[display("column '{name}' already exists in the table")]
    DuplicateColumn { name: String },
    /// The column's row count differs from the table's.
    #[display("column '{name}' has {actual} rows, expected {expected}")]
    RowCountMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
}

/// An ordered collection of named columns with a shared row count.
///
/// The table is fully materialized in memory: one analysis request operates
/// on one table from start to finish. The only mutation the pipeline performs
/// is appending composite-score columns; everything else reads.
///
/// # Examples
///
/// ```
/// use anketa_table::{Column, Table, Value};
///
/// let mut table = Table::new();
/// table
///     .add_column(Column::new("q1", vec![Value::Number(4.0), Value::Number(5.0)]))
///     .unwrap();
/// table
///     .add_column(Column::new("q2", vec![Value::Number(3.0), Value::Missing]))
///     .unwrap();
///
/// assert_eq!(table.row_count(), 2);
/// assert_eq!(table.column_names(), vec!["q1", "q2"]);
///
/// // Row counts must agree.
/// let short = Column::new("q3", vec![Value::Number(1.0)]);
/// assert!(table.add_column(short).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from columns, validating the row-count invariant and
    /// name uniqueness.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, TableError> {
        let mut table = Self::new();
        for column in columns {
            table.add_column(column)?;
        }
        Ok(table)
    }

    /// Appends a column.
    ///
    /// The first column fixes the table's row count; every later column must
    /// match it. Names must be unique.
    pub fn add_column(&mut self, column: Column) -> Result<(), TableError> {
        if self.column(&column.name).is_some() {
            return Err(TableError::DuplicateColumn { name: column.name });
        }
        if let Some(first) = self.columns.first()
            && first.len() != column.len()
        {
            let actual = column.len();
            return Err(TableError::RowCountMismatch {
                name: column.name,
                expected: first.len(),
                actual,
            });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns `true` if a column with `name` exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Number of rows (0 for a table with no columns).
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column names in table order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Iterates over columns in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
