//! JSON decoding.
//!
//! Supported inputs:
//! - An array of objects: `[{"a":1}, {"a":2}]` → one sheet named `Sheet1`
//! - An object of arrays keyed by sheet name: `{"Q1": [...], "Q2": [...]}` → one sheet per key
//! - A single object → one sheet with one row
//! - Newline-delimited JSON (NDJSON): `{"a":1}\n{"a":2}\n` → one sheet named `Sheet1`
//!
//! Object key order is preserved as column order. Nested objects and arrays inside a row are kept
//! as their JSON text.

use std::fs;
use std::path::Path;

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::{Row, Sheet, Value, Workbook};

use super::DEFAULT_SHEET_NAME;

/// Decode a JSON file into a [`Workbook`].
pub fn parse_json_path(path: impl AsRef<Path>) -> AnalysisResult<Workbook> {
    let text = fs::read_to_string(path)?;
    parse_json_str(&text)
}

/// Decode JSON from an in-memory string into a [`Workbook`].
pub fn parse_json_str(input: &str) -> AnalysisResult<Workbook> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::InvalidWorkbook {
            message: "json input is empty".to_string(),
        });
    }

    // First try parsing as a single JSON value (array or object).
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(trimmed) {
        return match v {
            serde_json::Value::Array(items) => {
                Ok(Workbook::new(vec![sheet_from_values(DEFAULT_SHEET_NAME, &items)?]))
            }
            serde_json::Value::Object(map) if is_sheet_map(&map) => {
                let sheets = map
                    .iter()
                    .filter_map(|(name, items)| items.as_array().map(|items| sheet_from_values(name, items)))
                    .collect::<AnalysisResult<Vec<_>>>()?;
                Ok(Workbook::new(sheets))
            }
            serde_json::Value::Object(map) => {
                let row = row_from_object(&map);
                Ok(Workbook::new(vec![Sheet::new(DEFAULT_SHEET_NAME, vec![row])]))
            }
            _ => Err(AnalysisError::InvalidWorkbook {
                message: "json must be an object, an array of objects, or NDJSON".to_string(),
            }),
        };
    }

    // Fall back to NDJSON.
    let mut values = Vec::new();
    for line in trimmed.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        values.push(serde_json::from_str::<serde_json::Value>(line)?);
    }
    Ok(Workbook::new(vec![sheet_from_values(DEFAULT_SHEET_NAME, &values)?]))
}

/// Convert a JSON value into a cell value.
///
/// Objects and arrays are not cell values; they are kept as their JSON text.
pub fn value_from_json(v: &serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
        serde_json::Value::String(s) => Value::Text(s.clone()),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => Value::Text(v.to_string()),
    }
}

/// Convert a JSON object into a [`Row`], keeping key order.
pub fn row_from_object(obj: &serde_json::Map<String, serde_json::Value>) -> Row {
    obj.iter()
        .map(|(k, v)| (k.as_str(), value_from_json(v)))
        .collect()
}

fn is_sheet_map(map: &serde_json::Map<String, serde_json::Value>) -> bool {
    !map.is_empty() && map.values().all(serde_json::Value::is_array)
}

fn sheet_from_values(name: &str, values: &[serde_json::Value]) -> AnalysisResult<Sheet> {
    let rows = values
        .iter()
        .enumerate()
        .map(|(idx0, v)| {
            v.as_object()
                .map(row_from_object)
                .ok_or_else(|| AnalysisError::InvalidWorkbook {
                    message: format!("sheet '{name}' row {} is not a json object", idx0 + 1),
                })
        })
        .collect::<AnalysisResult<Vec<Row>>>()?;
    Ok(Sheet::new(name, rows))
}

#[cfg(test)]
mod tests {
    use super::parse_json_str;
    use crate::error::AnalysisError;
    use crate::types::Value;

    #[test]
    fn object_of_arrays_is_a_multi_sheet_workbook() {
        let wb = parse_json_str(r#"{"Q1":[{"a":1}],"Q2":[{"a":2},{"a":3}]}"#).unwrap();
        assert_eq!(wb.sheet_names(), vec!["Q1", "Q2"]);
        assert_eq!(wb.sheet("Q2").unwrap().row_count(), 2);
    }

    #[test]
    fn keeps_key_order_and_stringifies_nested_values() {
        let wb = parse_json_str(r#"[{"z":1,"a":{"b":2},"m":[1,2],"n":null}]"#).unwrap();
        let sheet = wb.first_sheet().unwrap();
        assert_eq!(sheet.columns(), vec!["z", "a", "m", "n"]);
        assert_eq!(sheet.rows[0].get("a"), &Value::from(r#"{"b":2}"#));
        assert_eq!(sheet.rows[0].get("m"), &Value::from("[1,2]"));
        assert_eq!(sheet.rows[0].get("n"), &Value::Null);
    }

    #[test]
    fn single_object_is_one_row() {
        let wb = parse_json_str(r#"{"a":1,"b":"x"}"#).unwrap();
        assert_eq!(wb.sheets.len(), 1);
        assert_eq!(wb.sheets[0].row_count(), 1);
    }

    #[test]
    fn rejects_non_object_rows_and_scalars() {
        let err = parse_json_str("[1,2]").unwrap_err();
        assert!(err.to_string().contains("row 1 is not a json object"));
        assert!(matches!(
            parse_json_str("42").unwrap_err(),
            AnalysisError::InvalidWorkbook { .. }
        ));
        assert!(parse_json_str("   ").is_err());
    }
}
