use serde::{Deserialize, Serialize};

use crate::Value;

/// A named sequence of cells, one per respondent row.
///
/// # Examples
///
/// ```
/// use anketa_table::{Column, Value};
///
/// let col = Column::new("q1", vec![Value::Number(4.0), Value::Missing]);
/// assert_eq!(col.len(), 2);
/// assert_eq!(col.missing_count(), 1);
/// assert_eq!(col.numbers(), vec![4.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Column {
    /// Column name as it appeared in the source dataset.
    pub name: String,
    /// Cell values, aligned by row position with every other column.
    pub values: Vec<Value>,
}

impl Column {
    /// Creates a column from a name and its cells.
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Creates a numeric column where `None` entries become missing cells.
    ///
    /// This is the shape composite scores are appended in.
    ///
    /// ```
    /// use anketa_table::Column;
    ///
    /// let col = Column::from_numbers("X_total", vec![Some(12.0), None]);
    /// assert_eq!(col.missing_count(), 1);
    /// ```
    pub fn from_numbers(name: impl Into<String>, numbers: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values: numbers.into_iter().map(Value::from).collect(),
        }
    }

    /// Number of rows in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the column has zero rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of missing cells.
    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Whether the column's underlying type is numeric.
    ///
    /// A column is numeric when every non-missing cell holds a number. An
    /// all-missing column counts as numeric, the same way a column of NaNs
    /// keeps a numeric dtype in the source data this models.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.values
            .iter()
            .all(|v| matches!(v, Value::Number(_) | Value::Missing))
    }

    /// Non-missing numeric cells, in row order.
    ///
    /// This reads stored numbers only; it does not coerce text. Use
    /// [`Value::as_number`] per cell when coercion is wanted.
    #[must_use]
    pub fn numbers(&self) -> Vec<f64> {
        self.values
            .iter()
            .filter_map(|v| match v {
                Value::Number(n) => Some(*n),
                Value::Text(_) | Value::Missing => None,
            })
            .collect()
    }

    /// Cells coerced to numbers, preserving row positions.
    ///
    /// Non-coercible cells become `None`. Row alignment is kept so that
    /// row-wise operations (composite sums, pairwise-complete filtering)
    /// can line columns up by index.
    #[must_use]
    pub fn coerced_numbers(&self) -> Vec<Option<f64>> {
        self.values.iter().map(Value::as_number).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric() {
        let numeric = Column::new("a", vec![Value::Number(1.0), Value::Missing]);
        assert!(numeric.is_numeric());

        let mixed = Column::new("b", vec![Value::Number(1.0), Value::Text("x".into())]);
        assert!(!mixed.is_numeric());

        let all_missing = Column::new("c", vec![Value::Missing, Value::Missing]);
        assert!(all_missing.is_numeric());
    }

    #[test]
    fn test_numbers_skips_text_without_coercing() {
        let col = Column::new(
            "a",
            vec![Value::Number(1.0), Value::Text("2".into()), Value::Missing],
        );
        assert_eq!(col.numbers(), vec![1.0]);
        assert_eq!(col.coerced_numbers(), vec![Some(1.0), Some(2.0), None]);
    }
}
