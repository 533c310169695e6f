//! Dashboard configuration.
//!
//! Settings are layered from an optional TOML file and `NOTION_DASHBOARD_*`
//! environment variables, the latter taking precedence. Nested keys use a
//! double underscore, e.g. `NOTION_DASHBOARD_LABELS__ACTIVE`.

use std::fmt;
use std::path::Path;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::{PropertyNames, StatusLabels};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "NOTION_DASHBOARD";

pub const DEFAULT_API_BASE: &str = "https://api.notion.com";
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

/// Everything the pipeline needs, passed explicitly to each stage.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Integration token sent as a bearer credential.
    pub api_key: String,
    /// Database to query.
    pub database_id: String,
    pub api_base: String,
    /// Value of the `Notion-Version` header.
    pub notion_version: String,
    pub properties: PropertyNames,
    pub labels: StatusLabels,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            database_id: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
            properties: PropertyNames::default(),
            labels: StatusLabels::default(),
        }
    }
}

impl fmt::Debug for DashboardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardConfig")
            .field("api_key", &"<redacted>")
            .field("database_id", &self.database_id)
            .field("api_base", &self.api_base)
            .field("notion_version", &self.notion_version)
            .field("properties", &self.properties)
            .field("labels", &self.labels)
            .finish()
    }
}

/// Query endpoint for a database under `api_base`.
pub fn query_url(api_base: &str, database_id: &str) -> String {
    format!(
        "{}/v1/databases/{}/query",
        api_base.trim_end_matches('/'),
        database_id
    )
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

impl DashboardConfig {
    /// Load from `path` (if it exists) and the environment.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with(path, env_source())
    }

    fn load_with(path: &Path, env: Environment) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env)
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Names of required remote settings that are unset.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_key.trim().is_empty() {
            missing.push("api_key");
        }
        if self.database_id.trim().is_empty() {
            missing.push("database_id");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_env() -> Environment {
        env_source().source(Some(HashMap::new()))
    }

    #[test]
    fn test_defaults_without_file() {
        let missing = Path::new("/nonexistent/dashboard.toml");
        let config = DashboardConfig::load_with(missing, no_env()).unwrap();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.notion_version, DEFAULT_NOTION_VERSION);
        assert_eq!(config.properties, PropertyNames::default());
        assert_eq!(config.labels, StatusLabels::default());
        assert_eq!(config.missing_credentials(), vec!["api_key", "database_id"]);
    }

    #[test]
    fn test_file_values() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            r#"
api_key = "secret_abc"
database_id = "18b359dc"

[labels]
active = "En curso"

[properties]
status = "Status"
"#
        )
        .unwrap();

        let config = DashboardConfig::load_with(file.path(), no_env()).unwrap();
        assert_eq!(config.api_key, "secret_abc");
        assert_eq!(config.database_id, "18b359dc");
        assert_eq!(config.labels.active, "En curso");
        assert_eq!(config.labels.finished, "done");
        assert_eq!(config.properties.status, "Status");
        assert_eq!(config.properties.name, "Nombre");
        assert!(config.missing_credentials().is_empty());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "database_id = \"from-file\"").unwrap();

        let env = env_source().source(Some(HashMap::from([
            ("NOTION_DASHBOARD_DATABASE_ID".to_string(), "from-env".to_string()),
            ("NOTION_DASHBOARD_LABELS__DELAYED".to_string(), "Retrasado".to_string()),
        ])));

        let config = DashboardConfig::load_with(file.path(), env).unwrap();
        assert_eq!(config.database_id, "from-env");
        assert_eq!(config.labels.delayed, "Retrasado");
    }

    #[test]
    fn test_query_url() {
        assert_eq!(
            query_url("http://localhost:8080/", "abc123"),
            "http://localhost:8080/v1/databases/abc123/query"
        );
        assert_eq!(
            query_url(DEFAULT_API_BASE, "abc123"),
            "https://api.notion.com/v1/databases/abc123/query"
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = DashboardConfig {
            api_key: "secret_abc".to_string(),
            ..DashboardConfig::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret_abc"));
        assert!(debug.contains("<redacted>"));
    }
}
