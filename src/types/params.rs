use crate::error::{DbError, Result};
use crate::types::SqlValue;

/// Parameter set bound to a single statement execution.
///
/// Parameters are either positional (ordered values) or named (name/value
/// pairs); the `Row` variant is a zero-copy view into one row of a
/// [`ParameterColumns`] batch, produced by the generic batch algorithm.
#[derive(Debug, Clone, Copy)]
pub enum Parameters<'a> {
    Positional(&'a [SqlValue]),
    Named(&'a [(&'a str, SqlValue)]),
    Row(RowView<'a>),
}

impl Parameters<'_> {
    /// The empty parameter set, used for parameterless execution.
    pub fn empty() -> Parameters<'static> {
        Parameters::Positional(&[])
    }

    /// Number of parameter slots.
    pub fn len(&self) -> usize {
        match self {
            Parameters::Positional(values) => values.len(),
            Parameters::Named(pairs) => pairs.len(),
            Parameters::Row(view) => view.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at a zero-based position, in declaration order for named sets.
    pub fn get(&self, position: usize) -> Option<&SqlValue> {
        match self {
            Parameters::Positional(values) => values.get(position),
            Parameters::Named(pairs) => pairs.get(position).map(|(_, v)| v),
            Parameters::Row(view) => view.get(position),
        }
    }

    /// Value bound to a parameter name; `None` for positional sets.
    pub fn get_named(&self, name: &str) -> Option<&SqlValue> {
        match self {
            Parameters::Positional(_) => None,
            Parameters::Named(pairs) => pairs.iter().find(|(n, _)| *n == name).map(|(_, v)| v),
            Parameters::Row(view) => view.get_named(name),
        }
    }

    /// Clones the values out in positional order. Intended for drivers that
    /// hand owned values to a backend API, and for recording in tests.
    pub fn to_vec(&self) -> Vec<SqlValue> {
        (0..self.len()).filter_map(|j| self.get(j).cloned()).collect()
    }
}

/// Column-oriented parameter batch for [`execute_many`]: each slot holds one
/// value per batch row rather than a single scalar.
///
/// [`execute_many`]: crate::traits::Statement::execute_many
#[derive(Debug, Clone)]
pub enum ParameterColumns {
    Positional(Vec<Vec<SqlValue>>),
    Named(Vec<(String, Vec<SqlValue>)>),
}

impl ParameterColumns {
    pub fn positional(columns: Vec<Vec<SqlValue>>) -> Self {
        ParameterColumns::Positional(columns)
    }

    pub fn named(columns: Vec<(String, Vec<SqlValue>)>) -> Self {
        ParameterColumns::Named(columns)
    }

    /// A batch with no parameter slots at all.
    pub fn empty() -> Self {
        ParameterColumns::Positional(Vec::new())
    }

    pub fn column_count(&self) -> usize {
        match self {
            ParameterColumns::Positional(columns) => columns.len(),
            ParameterColumns::Named(columns) => columns.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.column_count() == 0
    }

    /// The full column of per-row values at a zero-based slot position.
    pub fn column(&self, position: usize) -> Option<&[SqlValue]> {
        match self {
            ParameterColumns::Positional(columns) => {
                columns.get(position).map(|c| c.as_slice())
            }
            ParameterColumns::Named(columns) => {
                columns.get(position).map(|(_, c)| c.as_slice())
            }
        }
    }

    /// The slot name at a position; `None` for positional batches.
    pub fn column_name(&self, position: usize) -> Option<&str> {
        match self {
            ParameterColumns::Positional(_) => None,
            ParameterColumns::Named(columns) => columns.get(position).map(|(n, _)| n.as_str()),
        }
    }

    // Label used in mismatch errors: the slot name, or its position.
    fn column_label(&self, position: usize) -> String {
        match self.column_name(position) {
            Some(name) => name.to_string(),
            None => position.to_string(),
        }
    }

    /// Checks that every column holds the same number of values and returns
    /// that shared row count. Fails with [`DbError::ParameterMismatch`]
    /// naming the first offending column; callers run this before executing
    /// any row, so a mismatch means zero rows were executed.
    pub fn validate(&self) -> Result<usize> {
        let Some(first) = self.column(0) else {
            return Ok(0);
        };
        let expected = first.len();
        for position in 1..self.column_count() {
            let actual = self.column(position).map(|c| c.len()).unwrap_or(0);
            if actual != expected {
                return Err(DbError::ParameterMismatch {
                    column: self.column_label(position),
                    expected,
                    actual,
                });
            }
        }
        Ok(expected)
    }

    /// A lazy view over one batch row. Nothing is copied; the view forwards
    /// position `j` to `column(j)[index]`.
    pub fn row(&self, index: usize) -> RowView<'_> {
        RowView {
            columns: self,
            index,
        }
    }
}

/// Zero-copy view presenting one row of a [`ParameterColumns`] batch as an
/// ordinary per-row parameter set.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    columns: &'a ParameterColumns,
    index: usize,
}

impl<'a> RowView<'a> {
    pub fn len(&self) -> usize {
        self.columns.column_count()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The batch row index this view covers.
    pub fn row_index(&self) -> usize {
        self.index
    }

    pub fn get(&self, position: usize) -> Option<&'a SqlValue> {
        self.columns.column(position)?.get(self.index)
    }

    pub fn get_named(&self, name: &str) -> Option<&'a SqlValue> {
        (0..self.columns.column_count())
            .find(|&j| self.columns.column_name(j) == Some(name))
            .and_then(|j| self.get(j))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_batch() -> ParameterColumns {
        ParameterColumns::named(vec![
            (
                "ids".to_string(),
                vec![SqlValue::Int32(1), SqlValue::Int32(2), SqlValue::Int32(3)],
            ),
            (
                "names".to_string(),
                vec!["a".into(), "b".into(), "c".into()],
            ),
        ])
    }

    #[test]
    fn row_view_forwards_without_copying() {
        let batch = sample_batch();
        let view = batch.row(1);
        assert_eq!(view.len(), 2);
        assert_eq!(view.get(0), Some(&SqlValue::Int32(2)));
        assert_eq!(view.get(1), Some(&SqlValue::Text("b".to_string())));
        assert_eq!(view.get(2), None);
    }

    #[test]
    fn row_view_resolves_names() {
        let batch = sample_batch();
        let view = batch.row(2);
        assert_eq!(view.get_named("ids"), Some(&SqlValue::Int32(3)));
        assert_eq!(view.get_named("names"), Some(&SqlValue::Text("c".to_string())));
        assert_eq!(view.get_named("missing"), None);
    }

    #[test]
    fn validate_accepts_consistent_columns() {
        assert_eq!(sample_batch().validate().unwrap(), 3);
        assert_eq!(ParameterColumns::empty().validate().unwrap(), 0);
    }

    #[test]
    fn validate_names_the_offending_column() {
        let batch = ParameterColumns::named(vec![
            ("ids".to_string(), vec![SqlValue::Int32(1), SqlValue::Int32(2)]),
            ("names".to_string(), vec!["a".into()]),
        ]);
        match batch.validate().unwrap_err() {
            DbError::ParameterMismatch {
                column,
                expected,
                actual,
            } => {
                assert_eq!(column, "names");
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("expected ParameterMismatch, got {other:?}"),
        }
    }

    #[test]
    fn positional_mismatch_is_labelled_by_position() {
        let batch = ParameterColumns::positional(vec![
            vec![SqlValue::Int32(1)],
            vec![SqlValue::Int32(1), SqlValue::Int32(2)],
        ]);
        match batch.validate().unwrap_err() {
            DbError::ParameterMismatch { column, .. } => assert_eq!(column, "1"),
            other => panic!("expected ParameterMismatch, got {other:?}"),
        }
    }

    #[test]
    fn zero_length_columns_validate_to_zero_rows() {
        let batch = ParameterColumns::positional(vec![Vec::new(), Vec::new()]);
        assert_eq!(batch.validate().unwrap(), 0);
    }

    #[test]
    fn parameters_accessors() {
        let values = [SqlValue::Int32(7), SqlValue::Bool(true)];
        let positional = Parameters::Positional(&values);
        assert_eq!(positional.len(), 2);
        assert_eq!(positional.get(0), Some(&SqlValue::Int32(7)));
        assert_eq!(positional.get_named("anything"), None);

        let pairs = [("id", SqlValue::Int32(7))];
        let named = Parameters::Named(&pairs);
        assert_eq!(named.get_named("id"), Some(&SqlValue::Int32(7)));
        assert_eq!(named.get(0), Some(&SqlValue::Int32(7)));

        assert!(Parameters::empty().is_empty());
        assert_eq!(named.to_vec(), vec![SqlValue::Int32(7)]);
    }
}
