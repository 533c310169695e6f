//! Aggregate metrics over normalized project rows.
//!
//! The snapshot is rebuilt from scratch on every load and never mutated.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::dates::YearMonth;
use super::normalize::ProjectRow;

/// Status labels counted by the three headline counters.
///
/// Matching is exact and case-sensitive. Rows with any other status count
/// toward none of the three.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusLabels {
    pub active: String,
    pub finished: String,
    pub delayed: String,
}

impl Default for StatusLabels {
    fn default() -> Self {
        Self {
            active: "in progress".to_string(),
            finished: "done".to_string(),
            delayed: "delayed".to_string(),
        }
    }
}

impl StatusLabels {
    /// Classify a status label.
    pub fn classify(&self, status: &str) -> StatusKind {
        if status == self.active {
            StatusKind::Active
        } else if status == self.finished {
            StatusKind::Finished
        } else if status == self.delayed {
            StatusKind::Delayed
        } else {
            StatusKind::Other
        }
    }
}

/// Which headline counter a status contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Active,
    Finished,
    Delayed,
    Other,
}

/// Aggregation found no rows to work with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no data available")]
pub struct EmptyDataset;

/// Number of rows sharing a status label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

/// Mean delay of the projects that actually closed in a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyDelay {
    pub month: YearMonth,
    pub mean_delay_days: f64,
    /// Rows with a defined delay that contributed to the mean.
    pub samples: usize,
}

/// Derived, read-only metrics for one load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateSnapshot {
    pub total: usize,
    pub active: usize,
    pub finished: usize,
    pub delayed: usize,
    /// Count per distinct status, largest first.
    pub distribution: Vec<StatusCount>,
    /// Mean delay per actual-close month, oldest first.
    pub delay_by_month: Vec<MonthlyDelay>,
}

impl AggregateSnapshot {
    /// Largest per-status count, used to scale the bar chart.
    pub fn max_status_count(&self) -> usize {
        self.distribution.iter().map(|s| s.count).max().unwrap_or(0)
    }
}

/// Compute the snapshot, or report that there is nothing to compute.
pub fn aggregate(
    rows: &[ProjectRow],
    labels: &StatusLabels,
) -> Result<AggregateSnapshot, EmptyDataset> {
    if rows.is_empty() {
        return Err(EmptyDataset);
    }

    let mut active = 0;
    let mut finished = 0;
    let mut delayed = 0;
    let mut by_status: HashMap<&str, usize> = HashMap::new();

    for row in rows {
        match labels.classify(&row.status) {
            StatusKind::Active => active += 1,
            StatusKind::Finished => finished += 1,
            StatusKind::Delayed => delayed += 1,
            StatusKind::Other => {}
        }
        *by_status.entry(row.status.as_str()).or_default() += 1;
    }

    let mut distribution: Vec<StatusCount> = by_status
        .into_iter()
        .map(|(status, count)| StatusCount {
            status: status.to_string(),
            count,
        })
        .collect();
    distribution.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.status.cmp(&b.status)));

    Ok(AggregateSnapshot {
        total: rows.len(),
        active,
        finished,
        delayed,
        distribution,
        delay_by_month: delay_by_month(rows),
    })
}

/// Group rows by actual-close month and average their delays.
///
/// Rows without a usable actual close date are skipped, and months where no
/// row has a defined delay do not appear.
pub fn delay_by_month(rows: &[ProjectRow]) -> Vec<MonthlyDelay> {
    let mut sums: BTreeMap<YearMonth, (i64, usize)> = BTreeMap::new();

    for row in rows {
        let Some(actual) = row.actual_close_at() else {
            continue;
        };
        let Some(delay) = row.delay_days() else {
            continue;
        };
        let entry = sums.entry(YearMonth::of(&actual)).or_insert((0, 0));
        entry.0 += delay;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(month, (sum, samples))| MonthlyDelay {
            month,
            mean_delay_days: sum as f64 / samples as f64,
            samples,
        })
        .collect()
}
