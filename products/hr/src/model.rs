use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned employee identity. Opaque to the client.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A single performance metric. The server schema accepts numbers, but values
/// typed by a user may be free text until the server rejects them.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    /// Interpret user input: anything that parses as a number is sent as one.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => MetricValue::Number(value),
            _ => MetricValue::Text(trimmed.to_string()),
        }
    }

    /// Numbers order numerically, texts lexicographically, numbers before texts.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (MetricValue::Number(a), MetricValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (MetricValue::Text(a), MetricValue::Text(b)) => a.cmp(b),
            (MetricValue::Number(_), MetricValue::Text(_)) => Ordering::Less,
            (MetricValue::Text(_), MetricValue::Number(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(value) => write!(f, "{value}"),
            MetricValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Number(value)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PerformanceMetrics {
    pub metric1: MetricValue,
    pub metric2: MetricValue,
    pub metric3: MetricValue,
}

/// Metrics as sent on create/update; the score is always computed server-side.
pub type MetricsInput = PerformanceMetrics;

impl PerformanceMetrics {
    pub fn new(
        metric1: impl Into<MetricValue>,
        metric2: impl Into<MetricValue>,
        metric3: impl Into<MetricValue>,
    ) -> Self {
        Self {
            metric1: metric1.into(),
            metric2: metric2.into(),
            metric3: metric3.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub performance_metrics: PerformanceMetrics,
    pub performance_score: f64,
}
