//! The fetch → normalize → aggregate chain run on every load.

use tracing::{debug, info, warn};

use crate::config::DashboardConfig;
use crate::data::{aggregate, normalize, AggregateSnapshot, ProjectRow};
use crate::source::{FetchError, RecordSource};

/// Result of one pipeline run. Exactly one variant is shown per load.
#[derive(Debug)]
pub enum Outcome {
    /// The fetch failed; nothing was computed.
    Failed(FetchError),
    /// The fetch succeeded but returned no records.
    NoData,
    /// Metrics were computed.
    Ready {
        rows: Vec<ProjectRow>,
        snapshot: AggregateSnapshot,
    },
}

impl Outcome {
    pub fn snapshot(&self) -> Option<&AggregateSnapshot> {
        match self {
            Outcome::Ready { snapshot, .. } => Some(snapshot),
            _ => None,
        }
    }

    pub fn rows(&self) -> &[ProjectRow] {
        match self {
            Outcome::Ready { rows, .. } => rows,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Outcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Run the whole pipeline once against `source`.
pub fn run(source: &mut dyn RecordSource, config: &DashboardConfig) -> Outcome {
    info!(source = source.description(), "loading projects");

    let batch = match source.fetch() {
        Ok(batch) => batch,
        Err(err) => {
            warn!(error = %err, "fetch failed");
            return Outcome::Failed(err);
        }
    };

    let rows = normalize(&batch, &config.properties);
    debug!(rows = rows.len(), "normalized records");
    match aggregate(&rows, &config.labels) {
        Ok(snapshot) => {
            info!(
                total = snapshot.total,
                statuses = snapshot.distribution.len(),
                months = snapshot.delay_by_month.len(),
                "metrics computed"
            );
            Outcome::Ready { rows, snapshot }
        }
        Err(empty) => {
            info!("{}", empty);
            Outcome::NoData
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::RawBatch;
    use serde_json::json;

    /// Source returning a canned result on every fetch.
    #[derive(Debug)]
    pub(crate) enum StaticSource {
        Body(serde_json::Value),
        Status(u16, String),
    }

    impl StaticSource {
        pub(crate) fn ok(body: serde_json::Value) -> Self {
            Self::Body(body)
        }

        pub(crate) fn status(status: u16, body: &str) -> Self {
            Self::Status(status, body.to_string())
        }
    }

    impl RecordSource for StaticSource {
        fn fetch(&mut self) -> Result<RawBatch, FetchError> {
            match self {
                StaticSource::Body(body) => serde_json::from_value(body.clone())
                    .map_err(|e| FetchError::Parse(e.to_string())),
                StaticSource::Status(status, body) => Err(FetchError::Status {
                    status: *status,
                    body: body.clone(),
                }),
            }
        }

        fn description(&self) -> &str {
            "static"
        }
    }

    pub(crate) fn one_project_body() -> serde_json::Value {
        json!({
            "results": [{
                "properties": {
                    "Nombre": {"title": [{"text": {"content": "Website"}}]},
                    "Estado": {"status": {"name": "in progress"}},
                    "Valor": {"number": 100},
                    "Fecha Estimada de Cierre": {"date": {"start": "2024-06-01"}},
                    "Fecha Real de Cierre": {"date": {"start": "2024-06-11"}}
                }
            }]
        })
    }

    #[test]
    fn test_run_ready() {
        let mut source = StaticSource::ok(one_project_body());
        let outcome = run(&mut source, &DashboardConfig::default());

        let snapshot = outcome.snapshot().unwrap();
        assert_eq!(snapshot.total, 1);
        assert_eq!(snapshot.active, 1);
        assert_eq!(snapshot.finished, 0);
        assert_eq!(snapshot.delayed, 0);
        assert_eq!(snapshot.delay_by_month[0].month.to_string(), "2024-06");
        assert_eq!(snapshot.delay_by_month[0].mean_delay_days, 10.0);
        assert_eq!(outcome.rows()[0].value, 100.0);
        assert!(outcome.error().is_none());
    }

    #[test]
    fn test_run_no_data() {
        let mut source = StaticSource::ok(json!({"results": []}));
        let outcome = run(&mut source, &DashboardConfig::default());
        assert!(matches!(outcome, Outcome::NoData));
        assert!(outcome.snapshot().is_none());
        assert!(outcome.rows().is_empty());
    }

    #[test]
    fn test_run_failed() {
        let mut source = StaticSource::status(404, "not found");
        let outcome = run(&mut source, &DashboardConfig::default());
        let err = outcome.error().unwrap();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.body(), Some("not found"));
        assert!(outcome.snapshot().is_none());
    }
}
