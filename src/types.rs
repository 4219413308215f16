//! Core data model: cell [`Value`]s, [`Row`]s, [`Sheet`]s and [`Workbook`]s.
//!
//! Rows are untyped: each is an ordered mapping from column name to a [`Value`], and rows of the
//! same sheet need not share a key set. Column types are never stored; they are derived on demand
//! by [`crate::processing::infer`].

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// A single cell value as produced by a workbook decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing/empty cell.
    Null,
    /// Boolean cell.
    Bool(bool),
    /// Numeric cell (always 64-bit float).
    Number(f64),
    /// Text cell.
    Text(String),
}

static NULL: Value = Value::Null;

impl Value {
    /// Best-effort conversion to a finite number.
    ///
    /// - numbers pass through if finite
    /// - text is trimmed and parsed as a decimal number; empty text does not coerce
    /// - booleans and nulls never coerce
    pub fn coerce_number(&self) -> Option<f64> {
        let n = match self {
            Value::Number(n) => *n,
            Value::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok()?
            }
            Value::Bool(_) | Value::Null => return None,
        };
        n.is_finite().then_some(n)
    }

    /// `true` for `Null` and the empty string, i.e. values type inference does not count as
    /// observed.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// `true` if this is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// One record of a sheet: column name → cell value, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: IndexMap<String, Value>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `column`, or [`Value::Null`] if the key is absent.
    pub fn get(&self, column: &str) -> &Value {
        self.cells.get(column).unwrap_or(&NULL)
    }

    /// `true` if the row has an entry for `column` (even a null one).
    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    /// Insert or replace a cell; returns the previous value if any.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.cells.insert(column.into(), value.into())
    }

    /// Column names present in this row, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Iterate `(column, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Derive the ordered column list of a row set: union of keys in order of first appearance.
pub fn columns_of(rows: &[Row]) -> Vec<String> {
    let mut seen: IndexSet<&str> = IndexSet::new();
    for row in rows {
        seen.extend(row.keys());
    }
    seen.into_iter().map(str::to_string).collect()
}

/// A named table of rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet (tab) name.
    pub name: String,
    /// Rows in source order.
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Create a sheet from a name and rows.
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Number of rows in the sheet.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Ordered column names (see [`columns_of`]).
    pub fn columns(&self) -> Vec<String> {
        columns_of(&self.rows)
    }
}

/// The decoded contents of one uploaded file: an ordered list of sheets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    /// Sheets in workbook order.
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Look up a sheet by exact name.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn first_sheet(&self) -> Option<&Sheet> {
        self.sheets.first()
    }

    /// Pick the named sheet, or the first sheet when `name` is `None`.
    ///
    /// A sheet that does not exist yields an empty sheet carrying the requested name, so callers
    /// get an empty report rather than an error.
    pub fn select(&self, name: Option<&str>) -> Sheet {
        match name {
            Some(name) => self
                .sheet(name)
                .cloned()
                .unwrap_or_else(|| Sheet::new(name, Vec::new())),
            None => self.first_sheet().cloned().unwrap_or_default(),
        }
    }
}

/// Inferred column classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    /// At least 80% of observed values coerce to finite numbers.
    #[serde(rename = "number")]
    Numeric,
    /// Everything else, including columns with no observed values.
    #[serde(rename = "string")]
    Textual,
}

#[cfg(test)]
mod tests {
    use super::{columns_of, Row, Sheet, Value, Workbook};

    #[test]
    fn coerce_number_trims_and_parses_decimal_text() {
        assert_eq!(Value::from(" 42 ").coerce_number(), Some(42.0));
        assert_eq!(Value::from("-1.5e2").coerce_number(), Some(-150.0));
        assert_eq!(Value::from(".5").coerce_number(), Some(0.5));
        assert_eq!(Value::from(7).coerce_number(), Some(7.0));
    }

    #[test]
    fn coerce_number_rejects_non_numeric_values() {
        assert_eq!(Value::from("").coerce_number(), None);
        assert_eq!(Value::from("   ").coerce_number(), None);
        assert_eq!(Value::from("12abc").coerce_number(), None);
        assert_eq!(Value::from("1,000").coerce_number(), None);
        assert_eq!(Value::from("inf").coerce_number(), None);
        assert_eq!(Value::from("NaN").coerce_number(), None);
        assert_eq!(Value::Number(f64::INFINITY).coerce_number(), None);
        assert_eq!(Value::Bool(true).coerce_number(), None);
        assert_eq!(Value::Null.coerce_number(), None);
    }

    #[test]
    fn row_get_returns_null_for_absent_key() {
        let row: Row = [("a", Value::from(1))].into_iter().collect();
        assert_eq!(row.get("a"), &Value::Number(1.0));
        assert_eq!(row.get("b"), &Value::Null);
        assert!(!row.contains("b"));
    }

    #[test]
    fn columns_are_union_in_first_seen_order() {
        let rows = vec![
            [("b", Value::from(1)), ("a", Value::from(2))].into_iter().collect::<Row>(),
            [("c", Value::from(3)), ("a", Value::from(4))].into_iter().collect::<Row>(),
        ];
        assert_eq!(columns_of(&rows), vec!["b", "a", "c"]);
    }

    #[test]
    fn row_serializes_as_ordered_json_object() {
        let row: Row = [("z", Value::from(1)), ("a", Value::from("x")), ("n", Value::Null)]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"z":1.0,"a":"x","n":null}"#);
    }

    #[test]
    fn workbook_select_falls_back_to_empty_sheet() {
        let wb = Workbook::new(vec![Sheet::new("First", vec![Row::new()])]);
        assert_eq!(wb.select(None).name, "First");
        let missing = wb.select(Some("Nope"));
        assert_eq!(missing.name, "Nope");
        assert_eq!(missing.row_count(), 0);
        assert_eq!(Workbook::default().select(None).row_count(), 0);
    }
}
