//! Record source abstraction for loading raw query results.
//!
//! This module provides a trait-based abstraction over where the raw
//! database rows come from: the live Notion API or a response saved to disk.

mod error;
mod file;
mod notion;

pub use error::FetchError;
pub use file::FileSource;
pub use notion::{NotionSource, NotionSourceBuilder};

use std::fmt::Debug;

use crate::data::RawBatch;

/// Trait for loading one batch of raw records.
///
/// Each call performs a complete, independent fetch. Implementations keep no
/// state between fetches beyond their own settings.
///
/// # Example
///
/// ```
/// use notion_dashboard::{FileSource, RecordSource};
///
/// let mut source = FileSource::new("query.json");
/// match source.fetch() {
///     Ok(batch) => println!("Got {} records", batch.len()),
///     Err(e) => println!("{} failed: {}", source.description(), e),
/// }
/// ```
pub trait RecordSource: Send + Debug {
    /// Fetch the current batch of records.
    fn fetch(&mut self) -> Result<RawBatch, FetchError>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI title bar.
    fn description(&self) -> &str;
}
