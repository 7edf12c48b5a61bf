use anketa_table::{Column, Table, TableError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Name of the composite column built from the X item selection.
pub const X_TOTAL: &str = "X_total";
/// Name of the composite column built from the Y item selection.
pub const Y_TOTAL: &str = "Y_total";

/// The user's variable selection for one analysis request.
///
/// An empty item list is a valid, silent opt-out of that half of the
/// analysis, not an error. Overlapping X/Y lists are not validated; a column
/// selected on both sides simply contributes to both composites and is
/// profiled under each side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Selection {
    /// Item columns summed into `X_total`.
    pub x_items: Vec<String>,
    /// Item columns summed into `Y_total`.
    pub y_items: Vec<String>,
    /// Whether composite scores should be created at all.
    pub create_composites: bool,
}

impl Selection {
    /// Creates a selection with composite building enabled.
    #[must_use]
    pub fn new(x_items: Vec<String>, y_items: Vec<String>) -> Self {
        Self {
            x_items,
            y_items,
            create_composites: true,
        }
    }
}

/// Names of the composite columns actually appended to the table.
///
/// A side is `None` when its item list was empty (or composite creation was
/// disabled), in which case every downstream step referencing that composite
/// is skipped entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Composites {
    /// Name of the X composite column, if one was created.
    pub x: Option<String>,
    /// Name of the Y composite column, if one was created.
    pub y: Option<String>,
}

/// Derives composite scores from the selection and appends them to the table.
///
/// Each selected item column is coerced to numeric (non-parsing text becomes
/// missing) and the composite is the row-wise sum of the coercible values.
/// A row where **every** contributing item is missing yields a missing
/// composite cell — it is excluded rather than summed to zero, so an
/// entirely non-coercible selection degrades to an all-missing composite
/// that contributes nothing downstream.
///
/// # Examples
///
/// ```
/// use anketa_analysis::composite::{build_composites, Selection, X_TOTAL};
/// use anketa_table::{Column, Table, Value};
///
/// let mut table = Table::from_columns(vec![
///     Column::new("a", vec![Value::Number(3.0), Value::Missing]),
///     Column::new("b", vec![Value::Number(5.0), Value::Missing]),
/// ])
/// .unwrap();
///
/// let selection = Selection::new(vec!["a".into(), "b".into()], vec![]);
/// let composites = build_composites(&mut table, &selection).unwrap();
///
/// assert_eq!(composites.x.as_deref(), Some(X_TOTAL));
/// assert_eq!(composites.y, None);
/// let x_total = table.column(X_TOTAL).unwrap();
/// assert_eq!(x_total.values[0], Value::Number(8.0));
/// assert!(x_total.values[1].is_missing()); // all contributors missing
/// ```
pub fn build_composites(
    table: &mut Table,
    selection: &Selection,
) -> Result<Composites, TableError> {
    if !selection.create_composites {
        return Ok(Composites::default());
    }

    let x = append_composite(table, X_TOTAL, &selection.x_items)?;
    let y = append_composite(table, Y_TOTAL, &selection.y_items)?;
    Ok(Composites { x, y })
}

/// Sums the listed item columns into a new column named `name`.
///
/// Returns `Ok(None)` without touching the table when no listed column
/// exists — the silent opt-out path.
fn append_composite(
    table: &mut Table,
    name: &str,
    items: &[String],
) -> Result<Option<String>, TableError> {
    let mut coerced: Vec<Vec<Option<f64>>> = Vec::new();
    for item in items {
        match table.column(item) {
            Some(column) => coerced.push(column.coerced_numbers()),
            None => warn!(column = %item, "selected item column not found; skipping"),
        }
    }
    if coerced.is_empty() {
        return Ok(None);
    }

    let sums = (0..table.row_count())
        .map(|row| {
            let contributions: Vec<f64> =
                coerced.iter().filter_map(|column| column[row]).collect();
            if contributions.is_empty() {
                None
            } else {
                Some(contributions.iter().sum())
            }
        })
        .collect::<Vec<_>>();

    debug!(composite = name, items = coerced.len(), "appending composite score");
    table.add_column(Column::from_numbers(name, sums))?;
    Ok(Some(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anketa_table::Value;

    fn item(name: &str, values: Vec<Value>) -> Column {
        Column::new(name, values)
    }

    #[test]
    fn test_partial_missing_rows_sum_what_is_there() {
        let mut table = Table::from_columns(vec![
            item("a", vec![Value::Number(3.0)]),
            item("b", vec![Value::Missing]),
            item("c", vec![Value::Number(5.0)]),
        ])
        .unwrap();

        let selection =
            Selection::new(vec!["a".into(), "b".into(), "c".into()], vec![]);
        build_composites(&mut table, &selection).unwrap();

        assert_eq!(
            table.column(X_TOTAL).unwrap().values[0],
            Value::Number(8.0)
        );
    }

    #[test]
    fn test_text_items_are_coerced() {
        let mut table = Table::from_columns(vec![
            item("a", vec![Value::Text("4".into()), Value::Text("agree".into())]),
            item("b", vec![Value::Number(1.0), Value::Number(2.0)]),
        ])
        .unwrap();

        let selection = Selection::new(vec!["a".into(), "b".into()], vec![]);
        build_composites(&mut table, &selection).unwrap();

        let x_total = table.column(X_TOTAL).unwrap();
        assert_eq!(x_total.values[0], Value::Number(5.0));
        // "agree" coerces to missing; the row still sums its numeric item.
        assert_eq!(x_total.values[1], Value::Number(2.0));
    }

    #[test]
    fn test_empty_selection_is_a_silent_opt_out() {
        let mut table =
            Table::from_columns(vec![item("a", vec![Value::Number(1.0)])]).unwrap();

        let composites =
            build_composites(&mut table, &Selection::new(vec![], vec![])).unwrap();

        assert_eq!(composites, Composites::default());
        assert_eq!(table.column_count(), 1);
    }

    #[test]
    fn test_disabled_composites_leave_table_untouched() {
        let mut table =
            Table::from_columns(vec![item("a", vec![Value::Number(1.0)])]).unwrap();

        let selection = Selection {
            x_items: vec!["a".into()],
            y_items: vec![],
            create_composites: false,
        };
        let composites = build_composites(&mut table, &selection).unwrap();

        assert_eq!(composites, Composites::default());
        assert!(!table.has_column(X_TOTAL));
    }

    #[test]
    fn test_fully_non_coercible_selection_degrades_to_all_missing() {
        let mut table = Table::from_columns(vec![item(
            "notes",
            vec![Value::Text("fine".into()), Value::Text("ok".into())],
        )])
        .unwrap();

        let selection = Selection::new(vec!["notes".into()], vec![]);
        build_composites(&mut table, &selection).unwrap();

        let x_total = table.column(X_TOTAL).unwrap();
        assert!(x_total.values.iter().all(Value::is_missing));
    }
}
