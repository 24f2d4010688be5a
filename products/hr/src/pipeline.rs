//! Client-side list pipeline: filter by name, sort, aggregate.

use std::cmp::Ordering;
use std::str::FromStr;

use thiserror::Error;

use crate::model::Employee;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Metric1,
    Metric2,
    Metric3,
    Score,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort key `{0}` (expected name, metric1, metric2, metric3 or score)")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "metric1" => Ok(SortKey::Metric1),
            "metric2" => Ok(SortKey::Metric2),
            "metric3" => Ok(SortKey::Metric3),
            "score" | "performancescore" => Ok(SortKey::Score),
            other => Err(UnknownSortKey(other.to_string())),
        }
    }
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Metric1 => "metric1",
            SortKey::Metric2 => "metric2",
            SortKey::Metric3 => "metric3",
            SortKey::Score => "score",
        }
    }

    fn compare(&self, a: &Employee, b: &Employee) -> Ordering {
        let (am, bm) = (&a.performance_metrics, &b.performance_metrics);
        match self {
            // UTF-16 code unit order.
            SortKey::Name => a.name.encode_utf16().cmp(b.name.encode_utf16()),
            SortKey::Metric1 => am.metric1.compare(&bm.metric1),
            SortKey::Metric2 => am.metric2.compare(&bm.metric2),
            SortKey::Metric3 => am.metric3.compare(&bm.metric3),
            SortKey::Score => a
                .performance_score
                .partial_cmp(&b.performance_score)
                .unwrap_or(Ordering::Equal),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
    }
}

/// Column sort selection, toggled by repeated header clicks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortState {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortState {
    /// Same key while ascending flips to descending; anything else sorts ascending.
    pub fn toggle(&mut self, key: SortKey) {
        self.direction = if self.key == Some(key) && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        self.key = Some(key);
    }

    fn compare(&self, a: &Employee, b: &Employee) -> Ordering {
        let Some(key) = self.key else {
            return Ordering::Equal;
        };
        let ordering = key.compare(a, b);
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// View-local search and sort inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub search: String,
    pub sort: SortState,
}

/// The rendered slice of the employee list plus its aggregates.
#[derive(Clone, Debug, PartialEq)]
pub struct EmployeeView<'a> {
    pub rows: Vec<&'a Employee>,
    pub total_records: usize,
    pub average_score: f64,
    pub median_score: f64,
}

pub fn compute_view<'a>(all: &'a [Employee], query: &ViewQuery) -> EmployeeView<'a> {
    let mut rows = filter_by_name(all, &query.search);
    let scores: Vec<f64> = rows.iter().map(|emp| emp.performance_score).collect();
    if query.sort.key.is_some() {
        rows.sort_by(|a, b| query.sort.compare(a, b));
    }
    EmployeeView {
        total_records: rows.len(),
        average_score: average(&scores),
        median_score: median(&scores),
        rows,
    }
}

/// Case-insensitive substring match on `name`; empty search keeps everything in order.
pub fn filter_by_name<'a>(all: &'a [Employee], search: &str) -> Vec<&'a Employee> {
    if search.is_empty() {
        return all.iter().collect();
    }
    let needle = search.to_lowercase();
    all.iter()
        .filter(|emp| emp.name.to_lowercase().contains(&needle))
        .collect()
}

/// Arithmetic mean, `0` for an empty set.
pub fn average(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Median of the ascending scores, `0` for an empty set.
pub fn median(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let mut sorted = scores.to_vec();
    sorted.sort_by(f64::total_cmp);
    let middle = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[middle - 1] + sorted[middle]) / 2.0
    } else {
        sorted[middle]
    }
}
