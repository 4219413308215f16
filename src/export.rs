#![cfg(feature = "export")]

//! xlsx export of row sets (feature-gated behind `export`).

use rust_xlsxwriter::{Workbook, Worksheet};

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::{columns_of, Row, Sheet, Value};

/// Longest sheet name Excel accepts.
pub const MAX_SHEET_NAME_CHARS: usize = 31;

/// Encode sheets of rows as an xlsx document.
///
/// - Sheet names are truncated to [`MAX_SHEET_NAME_CHARS`] characters
/// - Row 0 of each sheet is the header: the union of row keys in first-seen order
/// - Numbers, text and booleans are written as typed cells; nulls/absent keys are left blank
pub fn build_workbook(sheets: &[Sheet]) -> AnalysisResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(truncate_sheet_name(&sheet.name))?;
        write_rows(worksheet, &sheet.rows)?;
    }
    Ok(workbook.save_to_buffer()?)
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Row]) -> AnalysisResult<()> {
    let columns = columns_of(rows);
    for (col_idx, name) in columns.iter().enumerate() {
        worksheet.write_string(0, to_col(col_idx)?, name.as_str())?;
    }

    for (row_idx0, row) in rows.iter().enumerate() {
        let r = to_row(row_idx0 + 1)?;
        for (col_idx, name) in columns.iter().enumerate() {
            let c = to_col(col_idx)?;
            match row.get(name) {
                Value::Null => {}
                Value::Number(n) => {
                    worksheet.write_number(r, c, *n)?;
                }
                Value::Text(s) => {
                    worksheet.write_string(r, c, s.as_str())?;
                }
                Value::Bool(b) => {
                    worksheet.write_boolean(r, c, *b)?;
                }
            }
        }
    }
    Ok(())
}

fn truncate_sheet_name(name: &str) -> String {
    name.chars().take(MAX_SHEET_NAME_CHARS).collect()
}

fn to_row(idx: usize) -> AnalysisResult<u32> {
    u32::try_from(idx).map_err(|_| AnalysisError::InvalidWorkbook {
        message: format!("row index {idx} exceeds the xlsx row limit"),
    })
}

fn to_col(idx: usize) -> AnalysisResult<u16> {
    u16::try_from(idx).map_err(|_| AnalysisError::InvalidWorkbook {
        message: format!("column index {idx} exceeds the xlsx column limit"),
    })
}
