//! JSON export of a pipeline outcome.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde_json::{json, Value};

use crate::pipeline::Outcome;

/// Build the export document for an outcome.
pub fn to_json(outcome: &Outcome) -> Value {
    match outcome {
        Outcome::Ready { rows, snapshot } => {
            let rows: Vec<Value> = rows
                .iter()
                .map(|r| {
                    json!({
                        "name": r.name,
                        "status": r.status,
                        "value": r.value,
                        "estimated_close": r.estimated_close,
                        "actual_close": r.actual_close,
                        "delay_days": r.delay_days(),
                    })
                })
                .collect();
            json!({
                "status": "ok",
                "snapshot": snapshot,
                "rows": rows,
            })
        }
        Outcome::NoData => json!({ "status": "no_data" }),
        Outcome::Failed(err) => json!({
            "status": "error",
            "http_status": err.status(),
            "message": err.to_string(),
            "body": err.body(),
        }),
    }
}

/// Write the export document to `path`, pretty-printed.
pub fn write_outcome(outcome: &Outcome, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&to_json(outcome))?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(json.as_bytes())?;
    tracing::info!(path = %path.display(), "exported dashboard state");
    Ok(())
}
