#![cfg(feature = "excel")]

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Reader, Sheets};

use crate::error::AnalysisResult;
use crate::types::{Row, Sheet, Value, Workbook};

use super::header::normalize_headers;

/// Decode an Excel document (`.xlsx`, `.xls`, `.ods`, etc.) from disk into a [`Workbook`].
///
/// Behavior, per worksheet (in workbook order):
/// - The first non-empty row is the header row
/// - Every following non-empty row becomes a [`Row`] carrying every header key
/// - Empty cells become [`Value::Null`]
pub fn parse_excel_path(path: impl AsRef<Path>) -> AnalysisResult<Workbook> {
    let mut workbook = open_workbook_auto(path)?;
    read_workbook(&mut workbook)
}

/// Decode an in-memory Excel document into a [`Workbook`].
pub fn parse_excel_bytes(bytes: &[u8]) -> AnalysisResult<Workbook> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    read_workbook(&mut workbook)
}

fn read_workbook<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> AnalysisResult<Workbook> {
    let names: Vec<String> = workbook.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook.worksheet_range(&name)?;
        let rows = rows_from_range(&range);
        sheets.push(Sheet::new(name, rows));
    }
    Ok(Workbook::new(sheets))
}

fn rows_from_range(range: &calamine::Range<Data>) -> Vec<Row> {
    let mut data_rows = range
        .rows()
        .filter(|row| row.iter().any(|c| !matches!(c, Data::Empty)));

    // A sheet without any non-empty row has no header and therefore no rows.
    let Some(header_cells) = data_rows.next() else {
        return Vec::new();
    };
    let headers = normalize_headers(header_cells.iter().map(cell_to_header_string));

    data_rows
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .map(|(idx, h)| (h.as_str(), row.get(idx).map_or(Value::Null, convert_cell)))
                .collect()
        })
        .collect()
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(f) => f.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => "".to_string(),
    }
}

/// Convert a decoded cell into a [`Value`].
///
/// Date/time cells become their Excel serial number, matching what spreadsheet readers hand out
/// when not asked to materialize dates.
fn convert_cell(c: &Data) -> Value {
    match c {
        Data::Empty => Value::Null,
        Data::Int(i) => Value::Number(*i as f64),
        Data::Float(f) => Value::Number(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::String(s) => Value::Text(s.clone()),
        Data::DateTime(dt) => Value::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Text(s.clone()),
        Data::Error(e) => Value::Text(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::convert_cell;
    use crate::types::Value;
    use calamine::Data;

    #[test]
    fn converts_cells_to_values() {
        assert_eq!(convert_cell(&Data::Empty), Value::Null);
        assert_eq!(convert_cell(&Data::Int(3)), Value::Number(3.0));
        assert_eq!(convert_cell(&Data::Float(2.5)), Value::Number(2.5));
        assert_eq!(convert_cell(&Data::Bool(true)), Value::Bool(true));
        assert_eq!(
            convert_cell(&Data::String("x".to_string())),
            Value::Text("x".to_string())
        );
    }
}
