//! Group-by aggregation ("pivot") over untyped rows.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::{Row, Value};

/// Reducer applied to each group's numeric contributions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Arithmetic total.
    #[default]
    Sum,
    /// Total divided by the number of contributions.
    Mean,
    /// Smallest contribution.
    Min,
    /// Largest contribution.
    Max,
    /// Number of contributing rows (zero-filled entries included).
    Count,
}

impl Operator {
    /// All supported operators.
    pub const ALL: [Operator; 5] = [
        Operator::Sum,
        Operator::Mean,
        Operator::Min,
        Operator::Max,
        Operator::Count,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Sum => "sum",
            Operator::Mean => "mean",
            Operator::Min => "min",
            Operator::Max => "max",
            Operator::Count => "count",
        }
    }

    /// Parse an optional operator name, defaulting to [`Operator::Sum`] when absent.
    pub fn parse_or_default(op: Option<&str>) -> AnalysisResult<Self> {
        op.map_or(Ok(Operator::default()), |s| s.parse())
    }

    /// Reduce a group's contributions. An empty group reduces to `None`.
    pub fn reduce(self, values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let value = match self {
            Operator::Sum => values.iter().sum(),
            Operator::Mean => values.iter().sum::<f64>() / values.len() as f64,
            Operator::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Operator::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Operator::Count => values.len() as f64,
        };
        Some(value)
    }
}

impl FromStr for Operator {
    type Err = AnalysisError;

    /// Operator names are matched exactly (lowercase).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| AnalysisError::InvalidOperator { op: s.to_string() })
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One output row of a group-by aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationRow {
    /// Raw group value exactly as it appeared in the data (never coerced).
    pub group: Value,
    /// Reduced value, or `None` for a group without contributions.
    pub value: Option<f64>,
}

/// Aggregation output: one row per distinct group value, in first-seen order.
pub type AggregationReport = Vec<AggregationRow>;

/// Hashable wrapper giving [`Value`] raw-value equality for grouping.
///
/// Variants never compare equal to each other (`1` and `"1"` are different groups). Numbers are
/// compared by value, with `-0.0 == 0.0` and all NaNs equal.
#[derive(Debug, Clone)]
struct GroupKey(Value);

impl GroupKey {
    fn number_bits(n: f64) -> u64 {
        if n == 0.0 {
            0.0_f64.to_bits()
        } else if n.is_nan() {
            f64::NAN.to_bits()
        } else {
            n.to_bits()
        }
    }
}

impl PartialEq for GroupKey {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => Self::number_bits(*a) == Self::number_bits(*b),
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for GroupKey {}

impl Hash for GroupKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(&self.0).hash(state);
        match &self.0 {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Number(n) => Self::number_bits(*n).hash(state),
            Value::Text(s) => s.hash(state),
        }
    }
}

/// Group `rows` by the raw value of `group_key` and reduce `agg_key` per group.
///
/// Each row contributes the coerced value of `agg_key`; values that do not coerce to a finite
/// number contribute `0`. Consequently `count` counts rows, not numeric values.
pub fn group_by_aggregate(
    rows: &[Row],
    group_key: &str,
    agg_key: &str,
    op: Operator,
) -> AggregationReport {
    let mut groups: IndexMap<GroupKey, Vec<f64>> = IndexMap::new();
    for row in rows {
        let group = GroupKey(row.get(group_key).clone());
        let contribution = row.get(agg_key).coerce_number().unwrap_or(0.0);
        groups.entry(group).or_default().push(contribution);
    }

    groups
        .into_iter()
        .map(|(GroupKey(group), values)| AggregationRow {
            group,
            value: op.reduce(&values),
        })
        .collect()
}

/// String-operator entry point: validates `op` and runs [`group_by_aggregate`].
///
/// Fails with [`AnalysisError::InvalidOperator`] for anything outside `sum`, `mean`, `min`,
/// `max`, `count`.
pub fn aggregate(
    rows: &[Row],
    group_key: &str,
    agg_key: &str,
    op: &str,
) -> AnalysisResult<AggregationReport> {
    let op: Operator = op.parse()?;
    Ok(group_by_aggregate(rows, group_key, agg_key, op))
}
