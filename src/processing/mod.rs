//! The analytics core: pure, in-memory computations over sheet rows.
//!
//! Currently implemented:
//!
//! - [`infer`]: numeric/textual column classification
//! - [`summarize`]: count/sum/mean/min/max/std over a column's numeric values
//! - [`aggregate`]: group-by aggregation with a selectable [`Operator`]
//!
//! None of these functions mutate their input or keep state between calls, and none of them fail
//! on missing data: an empty sheet, an empty column or an unknown column all produce well-defined
//! empty results. The only error is [`crate::AnalysisError::InvalidOperator`].
//!
//! ## Example
//!
//! ```rust
//! use sheet_analytics::processing::{group_by_aggregate, infer_column_types, summarize_column, Operator};
//! use sheet_analytics::types::{ColumnType, Row, Sheet, Value};
//!
//! let rows: Vec<Row> = vec![
//!     [("region", Value::from("north")), ("sales", Value::from("10"))].into_iter().collect(),
//!     [("region", Value::from("south")), ("sales", Value::from(4))].into_iter().collect(),
//!     [("region", Value::from("north")), ("sales", Value::from(6))].into_iter().collect(),
//! ];
//! let sheet = Sheet::new("Sheet1", rows);
//!
//! let types = infer_column_types(&sheet);
//! assert_eq!(types["sales"], ColumnType::Numeric);
//! assert_eq!(types["region"], ColumnType::Textual);
//!
//! let summary = summarize_column(&sheet.rows, "sales");
//! assert_eq!(summary.count, 3);
//! assert_eq!(summary.sum(), Some(20.0));
//!
//! let pivot = group_by_aggregate(&sheet.rows, "region", "sales", Operator::Sum);
//! assert_eq!(pivot[0].group, Value::from("north"));
//! assert_eq!(pivot[0].value, Some(16.0));
//! ```

pub mod aggregate;
pub mod infer;
pub mod summarize;

pub use aggregate::{aggregate, group_by_aggregate, AggregationReport, AggregationRow, Operator};
pub use infer::{infer_column_type, infer_column_types, infer_row_types, NUMERIC_RATIO_THRESHOLD};
pub use summarize::{summarize_column, summarize_values, ColumnSummary, NumericStats};
