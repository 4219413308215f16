//! Report shapes handed to the reporting layer, and the builders that produce them.
//!
//! Both reports serialize (via `serde`) to the camelCase JSON objects the frontend consumes:
//!
//! - [`SummaryReport`]: `{sheetName, columns, types, summary, rowCount}`
//! - [`PivotReport`]: `{sheetName, groupKey, aggKey, op, data}`, where each `data` entry is
//!   `{<groupKey>: <group value>, "value": <reduced value or null>}`

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::ser::{SerializeMap, SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::error::AnalysisResult;
use crate::processing::{
    group_by_aggregate, infer_column_types, summarize_column, AggregationRow, ColumnSummary,
    Operator,
};
use crate::types::{ColumnType, Sheet};

/// Column types plus numeric summaries for one sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub sheet_name: String,
    /// Sheet columns in first-seen order.
    pub columns: Vec<String>,
    pub types: IndexMap<String, ColumnType>,
    /// Summaries for numeric columns only.
    pub summary: IndexMap<String, ColumnSummary>,
    pub row_count: usize,
}

/// Build the summary report for `sheet`.
///
/// Numeric columns are summarized in parallel; output order always follows column order.
pub fn build_summary_report(sheet: &Sheet) -> SummaryReport {
    let types = infer_column_types(sheet);
    let numeric: Vec<&str> = types
        .iter()
        .filter(|(_, ty)| **ty == ColumnType::Numeric)
        .map(|(name, _)| name.as_str())
        .collect();

    let summary: IndexMap<String, ColumnSummary> = numeric
        .par_iter()
        .map(|column| (column.to_string(), summarize_column(&sheet.rows, column)))
        .collect::<Vec<_>>()
        .into_iter()
        .collect();

    SummaryReport {
        sheet_name: sheet.name.clone(),
        columns: types.keys().cloned().collect(),
        types,
        summary,
        row_count: sheet.row_count(),
    }
}

/// Group-by aggregation result for one sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotReport {
    pub sheet_name: String,
    pub group_key: String,
    pub agg_key: String,
    pub op: Operator,
    pub data: Vec<AggregationRow>,
}

/// Build the pivot report for `sheet` with an already-validated operator.
pub fn build_pivot_report(sheet: &Sheet, group_key: &str, agg_key: &str, op: Operator) -> PivotReport {
    PivotReport {
        sheet_name: sheet.name.clone(),
        group_key: group_key.to_string(),
        agg_key: agg_key.to_string(),
        op,
        data: group_by_aggregate(&sheet.rows, group_key, agg_key, op),
    }
}

/// Build the pivot report from an operator name (`None` means `sum`).
///
/// Fails with [`crate::AnalysisError::InvalidOperator`] for unknown operator names.
pub fn pivot_report(
    sheet: &Sheet,
    group_key: &str,
    agg_key: &str,
    op: Option<&str>,
) -> AnalysisResult<PivotReport> {
    let op = Operator::parse_or_default(op)?;
    Ok(build_pivot_report(sheet, group_key, agg_key, op))
}

impl Serialize for PivotReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("PivotReport", 5)?;
        s.serialize_field("sheetName", &self.sheet_name)?;
        s.serialize_field("groupKey", &self.group_key)?;
        s.serialize_field("aggKey", &self.agg_key)?;
        s.serialize_field("op", &self.op)?;
        s.serialize_field(
            "data",
            &PivotRows {
                group_key: &self.group_key,
                rows: &self.data,
            },
        )?;
        s.end()
    }
}

struct PivotRows<'a> {
    group_key: &'a str,
    rows: &'a [AggregationRow],
}

impl Serialize for PivotRows<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in self.rows {
            seq.serialize_element(&PivotRow {
                group_key: self.group_key,
                row,
            })?;
        }
        seq.end()
    }
}

struct PivotRow<'a> {
    group_key: &'a str,
    row: &'a AggregationRow,
}

impl Serialize for PivotRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // A group column literally named "value" is shadowed by the reduced value.
        if self.group_key == "value" {
            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_entry("value", &self.row.value)?;
            return map.end();
        }
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.group_key, &self.row.group)?;
        map.serialize_entry("value", &self.row.value)?;
        map.end()
    }
}
