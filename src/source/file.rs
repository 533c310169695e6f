//! File-based record source.
//!
//! Reads a saved database query response from disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{FetchError, RecordSource};
use crate::data::RawBatch;

/// A record source that reads a query response from a JSON file.
///
/// The file holds the body of a database query response, i.e. an object with
/// a `results` array. It is re-read on every fetch.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }
}

impl RecordSource for FileSource {
    fn fetch(&mut self) -> Result<RawBatch, FetchError> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| FetchError::Read(e.to_string()))?;
        let batch: RawBatch =
            serde_json::from_str(&content).map_err(|e| FetchError::Parse(e.to_string()))?;
        debug!(path = %self.path.display(), results = batch.len(), "read saved query");
        Ok(batch)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
