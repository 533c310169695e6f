//! Data models and processing for project records.
//!
//! This module handles the transformation of raw query results into
//! normalized rows and the aggregate metrics shown by the dashboard.
//!
//! ## Submodules
//!
//! - [`raw`]: Raw query response types and optional-lookup helpers
//! - [`normalize`]: Fixed-column [`ProjectRow`]s with defaulted fields
//! - [`dates`]: Close date parsing, delay arithmetic and [`YearMonth`] buckets
//! - [`metrics`]: Counters, status distribution and monthly delay series
//!
//! ## Data Flow
//!
//! ```text
//! RawBatch (JSON results)
//!        │
//!        ▼
//! normalize()  ──▶ Vec<ProjectRow>
//!        │
//!        ▼
//! aggregate()  ──▶ AggregateSnapshot | EmptyDataset
//! ```

pub mod dates;
pub mod metrics;
pub mod normalize;
pub mod raw;

pub use dates::YearMonth;
pub use metrics::{
    aggregate, AggregateSnapshot, EmptyDataset, MonthlyDelay, StatusCount, StatusKind,
    StatusLabels,
};
pub use normalize::{normalize, ProjectRow, PropertyNames, NO_NAME, NO_STATUS};
pub use raw::{RawBatch, RawRecord};
