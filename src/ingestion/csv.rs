//! CSV decoding.
//!
//! A CSV file decodes to a single sheet. The first record is the header row; every following
//! non-blank record becomes a [`Row`] carrying every header key (short records are padded with
//! nulls).

use std::io::Read;
use std::path::Path;

use crate::error::AnalysisResult;
use crate::types::{Row, Sheet, Value};

use super::header::normalize_headers;
use super::DEFAULT_SHEET_NAME;

/// Decode a CSV file into a [`Sheet`] named [`DEFAULT_SHEET_NAME`].
pub fn parse_csv_path(path: impl AsRef<Path>) -> AnalysisResult<Sheet> {
    let mut rdr = reader_builder().from_path(path)?;
    parse_csv_reader(&mut rdr, DEFAULT_SHEET_NAME)
}

/// Decode in-memory CSV bytes into a [`Sheet`] named [`DEFAULT_SHEET_NAME`].
pub fn parse_csv_bytes(bytes: &[u8]) -> AnalysisResult<Sheet> {
    let mut rdr = reader_builder().from_reader(bytes);
    parse_csv_reader(&mut rdr, DEFAULT_SHEET_NAME)
}

/// Decode CSV data from an existing reader.
///
/// The reader should be configured with `has_headers(true)`; `flexible(true)` is recommended so
/// ragged rows decode instead of failing.
pub fn parse_csv_reader<R: Read>(
    rdr: &mut csv::Reader<R>,
    sheet_name: &str,
) -> AnalysisResult<Sheet> {
    let headers = normalize_headers(rdr.headers()?.iter());

    let mut rows: Vec<Row> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let row: Row = headers
            .iter()
            .enumerate()
            .map(|(idx, h)| (h.as_str(), record.get(idx).map_or(Value::Null, cell_from_text)))
            .collect();
        rows.push(row);
    }

    Ok(Sheet::new(sheet_name, rows))
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).flexible(true);
    builder
}

/// Type a raw CSV field the way a spreadsheet application would on open.
///
/// - blank → `Null`
/// - `true`/`false` (any case) → `Bool`
/// - finite decimal number → `Number`
/// - anything else → `Text` (untrimmed)
pub fn cell_from_text(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Value::Number(n),
        _ => Value::Text(raw.to_string()),
    }
}
