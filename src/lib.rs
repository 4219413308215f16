//! `sheet-analytics` is the analytics core of a spreadsheet upload/analysis backend: uploaded
//! CSV/JSON/Excel files are decoded into untyped rows, columns are classified as numeric or
//! textual, numeric columns are summarized, and group-by "pivot" aggregations are computed for
//! charts and tables.
//!
//! ## Data model
//!
//! A [`types::Workbook`] holds named [`types::Sheet`]s; a sheet is an ordered list of
//! [`types::Row`]s, each an ordered `column → `[`types::Value`] mapping. Cells are one of
//! [`types::Value::Number`], [`types::Value::Text`], [`types::Value::Bool`] or
//! [`types::Value::Null`]; rows of one sheet need not share a key set.
//!
//! Numbers are read out of cells with one rule everywhere ([`types::Value::coerce_number`]):
//! numbers pass through if finite, text is trimmed and parsed as a decimal, everything else does
//! not coerce.
//!
//! ## Analytics
//!
//! - [`processing::infer_column_types`]: a column is numeric when at least 80% of its non-empty
//!   values coerce to a number
//! - [`processing::summarize_column`]: count/sum/mean/min/max/std (population) over the values
//!   that coerce; a column without any yields a `{count: 0}` summary
//! - [`processing::group_by_aggregate`]: one output row per distinct raw group value, in
//!   first-seen order; values that do not coerce contribute `0`
//!
//! ```rust
//! use sheet_analytics::report::{build_pivot_report, build_summary_report};
//! use sheet_analytics::processing::Operator;
//! use sheet_analytics::types::{Row, Sheet, Value};
//!
//! let rows: Vec<Row> = vec![
//!     [("g", Value::from("A")), ("v", Value::from(1))].into_iter().collect(),
//!     [("g", Value::from("A")), ("v", Value::from(3))].into_iter().collect(),
//!     [("g", Value::from("B")), ("v", Value::from("x"))].into_iter().collect(),
//! ];
//! let sheet = Sheet::new("Sheet1", rows);
//!
//! let summary = build_summary_report(&sheet);
//! assert_eq!(summary.row_count, 3);
//!
//! let pivot = build_pivot_report(&sheet, "g", "v", Operator::Sum);
//! let json = serde_json::to_string(&pivot.data.iter().map(|r| r.value).collect::<Vec<_>>()).unwrap();
//! assert_eq!(json, "[4.0,0.0]");
//! ```
//!
//! ## Ingestion and export
//!
//! - [`ingestion`]: decode CSV, JSON and (with the `excel` feature) Excel workbooks, with optional
//!   observer hooks for logging/alerting
//! - `export` (with the `export` feature): encode sheets of rows as xlsx
//! - [`service`]: an uploads-directory context tying ingestion and reports together
//!
//! ## Modules
//!
//! - [`types`]: cell values, rows, sheets, workbooks
//! - [`processing`]: type inference, summaries, aggregation
//! - [`report`]: JSON report shapes and builders
//! - [`ingestion`]: workbook decoding
//! - [`service`]: upload-backed summary/pivot/export operations
//! - [`error`]: the crate error type

pub mod error;
#[cfg(feature = "export")]
pub mod export;
pub mod ingestion;
pub mod processing;
pub mod report;
pub mod service;
pub mod types;

pub use error::{AnalysisError, AnalysisResult};
