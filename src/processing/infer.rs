//! Column type inference for untyped row data.

use indexmap::IndexMap;

use crate::types::{columns_of, ColumnType, Row, Sheet};

/// Minimum share of observed values that must coerce to a number for a column to be numeric.
pub const NUMERIC_RATIO_THRESHOLD: f64 = 0.8;

/// Classify every column of `sheet` as [`ColumnType::Numeric`] or [`ColumnType::Textual`].
///
/// The returned map follows [`Sheet::columns`] order. See [`infer_column_type`] for the per-column
/// rule.
pub fn infer_column_types(sheet: &Sheet) -> IndexMap<String, ColumnType> {
    infer_row_types(&sheet.rows)
}

/// Same as [`infer_column_types`], over a bare row slice.
pub fn infer_row_types(rows: &[Row]) -> IndexMap<String, ColumnType> {
    columns_of(rows)
        .into_iter()
        .map(|column| {
            let ty = infer_column_type(rows, &column);
            (column, ty)
        })
        .collect()
}

/// Classify a single column.
///
/// Null/absent cells and empty strings are not observed. A column is numeric when
/// `numeric / max(1, observed) >= 0.8`, so a column with no observations is textual.
pub fn infer_column_type(rows: &[Row], column: &str) -> ColumnType {
    let mut observed = 0usize;
    let mut numeric = 0usize;
    for value in rows.iter().map(|r| r.get(column)) {
        if value.is_blank() {
            continue;
        }
        observed += 1;
        if value.coerce_number().is_some() {
            numeric += 1;
        }
    }

    if numeric as f64 / observed.max(1) as f64 >= NUMERIC_RATIO_THRESHOLD {
        ColumnType::Numeric
    } else {
        ColumnType::Textual
    }
}

#[cfg(test)]
mod tests {
    use super::{infer_column_type, infer_column_types};
    use crate::types::{ColumnType, Row, Sheet, Value};

    fn col_a(values: Vec<Value>) -> Vec<Row> {
        values
            .into_iter()
            .map(|v| [("a", v)].into_iter().collect())
            .collect()
    }

    #[test]
    fn below_threshold_is_textual() {
        // observed = 4 (empty string skipped), numeric = 3 -> 0.75
        let rows = col_a(vec![
            Value::from("1"),
            Value::from("2"),
            Value::from("x"),
            Value::from(""),
            Value::from(5),
        ]);
        assert_eq!(infer_column_type(&rows, "a"), ColumnType::Textual);
    }

    #[test]
    fn exactly_at_threshold_is_numeric() {
        let rows = col_a(vec![
            Value::from(1),
            Value::from("2"),
            Value::from(" 3 "),
            Value::from(4.5),
            Value::from("n/a"),
            Value::Null,
        ]);
        assert_eq!(infer_column_type(&rows, "a"), ColumnType::Numeric);
    }

    #[test]
    fn empty_column_is_textual() {
        let rows = col_a(vec![Value::Null, Value::from(""), Value::Null]);
        assert_eq!(infer_column_type(&rows, "a"), ColumnType::Textual);
        assert_eq!(infer_column_type(&rows, "missing"), ColumnType::Textual);
    }

    #[test]
    fn booleans_count_as_non_numeric_observations() {
        let rows = col_a(vec![Value::Bool(true), Value::Bool(false), Value::from(1)]);
        assert_eq!(infer_column_type(&rows, "a"), ColumnType::Textual);
    }

    #[test]
    fn every_column_of_every_row_gets_a_type() {
        let rows: Vec<Row> = vec![
            [("id", Value::from(1)), ("name", Value::from("Ada"))]
                .into_iter()
                .collect(),
            [("id", Value::from(2)), ("extra", Value::Null)]
                .into_iter()
                .collect(),
        ];
        let types = infer_column_types(&Sheet::new("s", rows));
        let keys: Vec<&str> = types.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "name", "extra"]);
        assert_eq!(types["id"], ColumnType::Numeric);
        assert_eq!(types["name"], ColumnType::Textual);
        assert_eq!(types["extra"], ColumnType::Textual);
    }

    #[test]
    fn empty_sheet_has_no_columns() {
        assert!(infer_column_types(&Sheet::default()).is_empty());
    }
}
