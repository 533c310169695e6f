//! # notion-dashboard
//!
//! A terminal dashboard and library summarizing a Notion projects database.
//!
//! Each load queries the database once, flattens every record into a
//! [`ProjectRow`], computes an [`AggregateSnapshot`] (status counts and the
//! average closing delay per month) and renders the result with ratatui.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│ pipeline │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(fetch, normalize, aggregate) │         │ │
//! │  └────┬────┘    └────┬─────┘    └─────────┘    └─────────┘ │
//! │       │              │                                      │
//! │       ▼              ▼                                      │
//! │  ┌─────────┐    ┌──────────┐                                │
//! │  │ source  │    │   data   │                                │
//! │  │ (input) │    │ (models) │                                │
//! │  └─────────┘    └──────────┘                                │
//! │       ▲                                                     │
//! │       └── NotionSource | FileSource                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation, and user interaction logic
//! - **[`source`]**: Record source abstraction ([`RecordSource`] trait) with the
//!   Notion API client and a saved-response file reader
//! - **[`data`]**: Raw record accessors, normalization into [`ProjectRow`], and
//!   aggregation into [`AggregateSnapshot`]
//! - **[`pipeline`]**: One load run, producing an [`Outcome`]
//! - **[`ui`]**: Terminal rendering - counters, charts, the projects table and
//!   error/empty notices
//! - **[`config`]**: Layered TOML/environment configuration
//! - **[`export`]**: JSON export of an outcome
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Query the database configured in dashboard.toml / NOTION_DASHBOARD_* env
//! notion-dashboard
//!
//! # Render a saved query response instead
//! notion-dashboard --input query.json
//!
//! # Write the computed metrics as JSON and exit
//! notion-dashboard --export metrics.json
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use std::path::Path;
//! use notion_dashboard::{pipeline, DashboardConfig, NotionSource};
//!
//! let config = DashboardConfig::load(Path::new("dashboard.toml")).unwrap();
//! let mut source = NotionSource::from_config(&config).unwrap();
//! let outcome = pipeline::run(&mut source, &config);
//! if let Some(snapshot) = outcome.snapshot() {
//!     println!("{} projects, {} delayed", snapshot.total, snapshot.delayed);
//! }
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod export;
pub mod pipeline;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, View};
pub use config::DashboardConfig;
pub use data::{
    aggregate, normalize, AggregateSnapshot, MonthlyDelay, ProjectRow, PropertyNames, RawBatch,
    StatusCount, StatusLabels,
};
pub use pipeline::Outcome;
pub use source::{FetchError, FileSource, NotionSource, NotionSourceBuilder, RecordSource};
