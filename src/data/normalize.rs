//! Normalization of raw records into fixed-column project rows.
//!
//! Every record maps to exactly one row, independently of the others. A field
//! that cannot be read takes its default; normalization itself never fails.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates::{delay_days, parse_close_date};
use super::raw::{self, RawBatch, RawRecord};

/// Name used when a record has no title.
pub const NO_NAME: &str = "no name";

/// Status used when a record has no status label.
pub const NO_STATUS: &str = "no status";

/// Names of the database properties each column is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyNames {
    pub name: String,
    pub status: String,
    pub value: String,
    pub estimated_close: String,
    pub actual_close: String,
}

impl Default for PropertyNames {
    fn default() -> Self {
        Self {
            name: "Nombre".to_string(),
            status: "Estado".to_string(),
            value: "Valor".to_string(),
            estimated_close: "Fecha Estimada de Cierre".to_string(),
            actual_close: "Fecha Real de Cierre".to_string(),
        }
    }
}

/// A normalized project record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectRow {
    pub name: String,
    pub status: String,
    pub value: f64,
    /// Raw `date.start` of the estimated close date.
    pub estimated_close: Option<String>,
    /// Raw `date.start` of the actual close date.
    pub actual_close: Option<String>,
}

impl ProjectRow {
    /// Parsed estimated close date, `None` if missing or unparseable.
    pub fn estimated_close_at(&self) -> Option<NaiveDate> {
        self.estimated_close.as_deref().and_then(parse_close_date)
    }

    /// Parsed actual close date, `None` if missing or unparseable.
    pub fn actual_close_at(&self) -> Option<NaiveDate> {
        self.actual_close.as_deref().and_then(parse_close_date)
    }

    /// Days between estimated and actual close, if both dates are usable.
    pub fn delay_days(&self) -> Option<i64> {
        Some(delay_days(self.estimated_close_at()?, self.actual_close_at()?))
    }
}

/// Normalize a whole batch, preserving order.
pub fn normalize(batch: &RawBatch, names: &PropertyNames) -> Vec<ProjectRow> {
    batch
        .results
        .iter()
        .map(|record| normalize_record(record, names))
        .collect()
}

/// Normalize a single record.
pub fn normalize_record(record: &RawRecord, names: &PropertyNames) -> ProjectRow {
    ProjectRow {
        name: record
            .property(&names.name)
            .and_then(raw::first_text_segment)
            .unwrap_or(NO_NAME)
            .to_string(),
        status: record
            .property(&names.status)
            .and_then(raw::option_label)
            .unwrap_or(NO_STATUS)
            .to_string(),
        value: record.property(&names.value).and_then(raw::number).unwrap_or(0.0),
        estimated_close: record
            .property(&names.estimated_close)
            .and_then(raw::date_start)
            .map(str::to_string),
        actual_close: record
            .property(&names.actual_close)
            .and_then(raw::date_start)
            .map(str::to_string),
    }
}
