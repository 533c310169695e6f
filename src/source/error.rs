//! Error types for record sources.

use thiserror::Error;

/// Errors that can occur while fetching a batch of raw records.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The API answered with a non-success status.
    #[error("Notion API returned status {status}")]
    Status {
        /// Numeric HTTP status code.
        status: u16,
        /// Response body as text, empty if it could not be read.
        body: String,
    },

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Connection failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Failed to read a saved response from disk.
    #[error("Read error: {0}")]
    Read(String),

    /// The source is missing settings it needs to run.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FetchError {
    /// HTTP status code, when the failure came from the API itself.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Error body returned by the API, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            FetchError::Status { body, .. } if !body.is_empty() => Some(body),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else {
            FetchError::Http(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessors() {
        let err = FetchError::Status {
            status: 404,
            body: r#"{"code":"object_not_found"}"#.to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.body(), Some(r#"{"code":"object_not_found"}"#));
        assert_eq!(err.to_string(), "Notion API returned status 404");
    }

    #[test]
    fn test_empty_body_is_none() {
        let err = FetchError::Status {
            status: 500,
            body: String::new(),
        };
        assert_eq!(err.body(), None);
        assert_eq!(FetchError::Timeout.status(), None);
    }
}
