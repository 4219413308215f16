//! Numeric column summaries.

use serde::{Deserialize, Serialize};

use crate::types::Row;

/// Statistics over the numeric values of a column.
///
/// `stats` is `None` when nothing in the column coerced to a number; in that case the summary
/// serializes as exactly `{"count":0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    /// Number of values that coerced to a finite number.
    pub count: usize,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub stats: Option<NumericStats>,
}

/// Descriptive statistics, present only when `count > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation (divisor is `count`).
    pub std: f64,
    pub sum: f64,
}

impl ColumnSummary {
    /// The summary of a column with no numeric content.
    pub fn empty() -> Self {
        Self {
            count: 0,
            stats: None,
        }
    }

    pub fn sum(&self) -> Option<f64> {
        self.stats.map(|s| s.sum)
    }

    pub fn mean(&self) -> Option<f64> {
        self.stats.map(|s| s.mean)
    }

    pub fn min(&self) -> Option<f64> {
        self.stats.map(|s| s.min)
    }

    pub fn max(&self) -> Option<f64> {
        self.stats.map(|s| s.max)
    }

    pub fn std(&self) -> Option<f64> {
        self.stats.map(|s| s.std)
    }
}

/// Summarize `column` over `rows`.
///
/// Values are coerced with [`crate::types::Value::coerce_number`]; anything that does not coerce
/// (text, booleans, nulls, absent keys) is left out of every statistic, including `count`.
pub fn summarize_column(rows: &[Row], column: &str) -> ColumnSummary {
    let values: Vec<f64> = rows
        .iter()
        .filter_map(|r| r.get(column).coerce_number())
        .collect();
    summarize_values(&values)
}

/// Summarize an already-coerced list of finite values.
pub fn summarize_values(values: &[f64]) -> ColumnSummary {
    if values.is_empty() {
        return ColumnSummary::empty();
    }

    let count = values.len();
    let n = count as f64;
    let sum: f64 = values.iter().sum();
    let mean = sum / n;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    ColumnSummary {
        count,
        stats: Some(NumericStats {
            mean,
            min,
            max,
            std: variance.sqrt(),
            sum,
        }),
    }
}
