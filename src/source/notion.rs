//! Notion source using the database query endpoint.
//!
//! Issues a single `POST /v1/databases/{id}/query` and returns the first page
//! of results. There is no pagination and no retry.
//!
//! ## Example
//!
//! ```rust,no_run
//! use notion_dashboard::NotionSource;
//!
//! let source = NotionSource::builder()
//!     .api_key("secret_...")
//!     .database_id("18b359dcc19580e69c2bd70d6ac384a3")
//!     .build()?;
//!
//! let batch = source.query()?;
//! println!("{} projects", batch.len());
//! # Ok::<(), notion_dashboard::FetchError>(())
//! ```

use std::fmt;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info, warn};

use super::{FetchError, RecordSource};
use crate::config::{query_url, DashboardConfig, DEFAULT_API_BASE, DEFAULT_NOTION_VERSION};
use crate::data::RawBatch;

const NOTION_VERSION_HEADER: &str = "Notion-Version";

/// Fetches raw records from a Notion database.
#[derive(Clone)]
pub struct NotionSource {
    client: Client,
    url: String,
    api_key: String,
    notion_version: String,
    description: String,
}

impl NotionSource {
    /// Create a new builder for configuring the source.
    pub fn builder() -> NotionSourceBuilder {
        NotionSourceBuilder::default()
    }

    /// Build a source from the dashboard configuration.
    ///
    /// Fails with [`FetchError::Config`] if the credential or database id is
    /// unset.
    pub fn from_config(config: &DashboardConfig) -> Result<Self, FetchError> {
        let missing = config.missing_credentials();
        if !missing.is_empty() {
            return Err(FetchError::Config(format!(
                "missing {} (set in the config file or NOTION_DASHBOARD_* variables)",
                missing.join(", ")
            )));
        }

        Self::builder()
            .api_base(&config.api_base)
            .database_id(&config.database_id)
            .api_key(&config.api_key)
            .notion_version(&config.notion_version)
            .build()
    }

    /// The query endpoint this source posts to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Run the database query.
    pub fn query(&self) -> Result<RawBatch, FetchError> {
        debug!(url = %self.url, "querying notion database");

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .header(NOTION_VERSION_HEADER, &self.notion_version)
            .header(CONTENT_TYPE, "application/json")
            .body("{}")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(status = status.as_u16(), "notion query failed");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let batch: RawBatch = response
            .json()
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        info!(results = batch.len(), "notion query succeeded");
        Ok(batch)
    }
}

impl RecordSource for NotionSource {
    fn fetch(&mut self) -> Result<RawBatch, FetchError> {
        self.query()
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Debug for NotionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotionSource")
            .field("url", &self.url)
            .field("notion_version", &self.notion_version)
            .finish_non_exhaustive()
    }
}

/// Builder for NotionSource.
#[derive(Default)]
pub struct NotionSourceBuilder {
    api_base: Option<String>,
    database_id: Option<String>,
    api_key: Option<String>,
    notion_version: Option<String>,
}

impl NotionSourceBuilder {
    /// Set the API host (default: "https://api.notion.com").
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set the database to query.
    pub fn database_id(mut self, database_id: impl Into<String>) -> Self {
        self.database_id = Some(database_id.into());
        self
    }

    /// Set the integration token.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the `Notion-Version` header (default: "2022-06-28").
    pub fn notion_version(mut self, version: impl Into<String>) -> Self {
        self.notion_version = Some(version.into());
        self
    }

    /// Build the source.
    pub fn build(self) -> Result<NotionSource, FetchError> {
        let client = Client::builder().build()?;

        let api_base = self.api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let database_id = self.database_id.unwrap_or_default();
        let url = query_url(&api_base, &database_id);

        Ok(NotionSource {
            client,
            url,
            api_key: self.api_key.unwrap_or_default(),
            notion_version: self
                .notion_version
                .unwrap_or_else(|| DEFAULT_NOTION_VERSION.to_string()),
            description: format!("notion: {}", database_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Blocking clients must not be created or dropped on the async runtime.
    async fn query_blocking(
        base: String,
        database_id: &'static str,
    ) -> Result<RawBatch, FetchError> {
        tokio::task::spawn_blocking(move || {
            let source = NotionSource::builder()
                .api_base(base)
                .database_id(database_id)
                .api_key("secret_token")
                .build()?;
            source.query()
        })
        .await
        .unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let source = NotionSource::builder().database_id("abc").build().unwrap();
        assert_eq!(source.url(), "https://api.notion.com/v1/databases/abc/query");
        assert_eq!(source.notion_version, "2022-06-28");
        assert_eq!(source.description(), "notion: abc");
    }

    #[test]
    fn test_from_config_requires_credentials() {
        let err = NotionSource::from_config(&DashboardConfig::default()).unwrap_err();
        assert!(matches!(err, FetchError::Config(ref msg) if msg.contains("api_key")));

        let config = DashboardConfig {
            api_key: "secret".to_string(),
            database_id: "db".to_string(),
            ..DashboardConfig::default()
        };
        let source = NotionSource::from_config(&config).unwrap();
        assert_eq!(source.url(), "https://api.notion.com/v1/databases/db/query");
    }

    #[test]
    fn test_debug_hides_key() {
        let source = NotionSource::builder().api_key("secret_token").build().unwrap();
        assert!(!format!("{:?}", source).contains("secret_token"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_query_sends_headers_and_parses_results() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/databases/db123/query"))
            .and(header("authorization", "Bearer secret_token"))
            .and(header("notion-version", "2022-06-28"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "object": "list",
                "results": [{"id": "a", "properties": {}}, {"id": "b"}],
                "has_more": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let batch = query_blocking(server.uri(), "db123").await.unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.results[1].0["id"], "b");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_query_not_found_carries_body() {
        let server = MockServer::start().await;
        let body = r#"{"object":"error","status":404,"code":"object_not_found"}"#;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_string(body))
            .mount(&server)
            .await;

        let err = query_blocking(server.uri(), "missing").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.body(), Some(body));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_query_invalid_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = query_blocking(server.uri(), "db").await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }
}
