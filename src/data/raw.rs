//! Raw query responses as returned by the Notion database API.
//!
//! Records are kept as untyped JSON. Every property may be absent, null or
//! shaped differently than expected, so fields are only ever read through the
//! optional lookups below, each of which returns `None` instead of failing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single page of query results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBatch {
    /// The result objects, in API order. Missing or null means empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<RawRecord>,
}

/// One database page, shape unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(pub Value);

fn null_as_empty<'de, D>(de: D) -> Result<Vec<RawRecord>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<RawRecord>>::deserialize(de)?.unwrap_or_default())
}

impl RawBatch {
    pub fn new(results: Vec<RawRecord>) -> Self {
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl RawRecord {
    /// The `properties` object, if present.
    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.0.get("properties")?.as_object()
    }

    /// A named property, if present and not null.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties()?.get(name).filter(|v| !v.is_null())
    }
}

/// Text of the first segment of a `title` (or `rich_text`) array.
///
/// Prefers `text.content` and falls back to `plain_text`. Returns `None` when
/// the array is absent or empty.
pub fn first_text_segment(prop: &Value) -> Option<&str> {
    let segments = ["title", "rich_text"]
        .iter()
        .find_map(|key| prop.get(key)?.as_array())?;
    let first = segments.first()?;
    first
        .get("text")
        .and_then(|t| t.get("content"))
        .and_then(Value::as_str)
        .or_else(|| first.get("plain_text").and_then(Value::as_str))
}

/// The `name` of a labelled value such as a `select` or `status` property.
///
/// The key named by the property's own `type` field is tried first, then
/// `status`, then `select`.
pub fn option_label(prop: &Value) -> Option<&str> {
    let declared = prop.get("type").and_then(Value::as_str);
    declared
        .into_iter()
        .chain(["status", "select"])
        .find_map(|key| prop.get(key)?.get("name")?.as_str())
}

/// The `number` of a numeric property.
pub fn number(prop: &Value) -> Option<f64> {
    prop.get("number")?.as_f64()
}

/// The `start` of a date property.
pub fn date_start(prop: &Value) -> Option<&str> {
    prop.get("date")?.get("start")?.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_batch_missing_results() {
        let batch: RawBatch = serde_json::from_str(r#"{"object":"list"}"#).unwrap();
        assert!(batch.is_empty());

        let batch: RawBatch = serde_json::from_str(r#"{"results":null}"#).unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_batch_keeps_order() {
        let batch: RawBatch =
            serde_json::from_str(r#"{"results":[{"id":"a"},{"id":"b"},42]}"#).unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.results[0].0["id"], "a");
        assert_eq!(batch.results[2].0, json!(42));
    }

    #[test]
    fn test_property_lookup_tolerates_shapes() {
        assert!(RawRecord(json!(42)).properties().is_none());
        assert!(RawRecord(json!({"properties": []})).properties().is_none());

        let record = RawRecord(json!({"properties": {"Estado": null, "Valor": {"number": 3}}}));
        assert!(record.property("Estado").is_none());
        assert!(record.property("Missing").is_none());
        assert_eq!(record.property("Valor").and_then(number), Some(3.0));
    }

    #[test]
    fn test_first_text_segment() {
        let prop = json!({"title": [{"text": {"content": "Alpha"}}, {"text": {"content": "B"}}]});
        assert_eq!(first_text_segment(&prop), Some("Alpha"));

        let prop = json!({"title": [{"plain_text": "Plain"}]});
        assert_eq!(first_text_segment(&prop), Some("Plain"));

        let prop = json!({"rich_text": [{"text": {"content": "Rich"}}]});
        assert_eq!(first_text_segment(&prop), Some("Rich"));

        assert_eq!(first_text_segment(&json!({"title": []})), None);
        assert_eq!(first_text_segment(&json!({"title": [{}]})), None);
        assert_eq!(first_text_segment(&json!({"title": null})), None);
    }

    #[test]
    fn test_option_label_select_and_status() {
        let select = json!({"type": "select", "select": {"name": "done"}});
        assert_eq!(option_label(&select), Some("done"));

        let status = json!({"type": "status", "status": {"name": "in progress"}});
        assert_eq!(option_label(&status), Some("in progress"));

        let untyped = json!({"select": {"name": "delayed"}});
        assert_eq!(option_label(&untyped), Some("delayed"));

        assert_eq!(option_label(&json!({"type": "select", "select": null})), None);
        assert_eq!(option_label(&json!({"status": {"id": "x"}})), None);
    }

    #[test]
    fn test_number_and_date() {
        assert_eq!(number(&json!({"number": 12.5})), Some(12.5));
        assert_eq!(number(&json!({"number": null})), None);
        assert_eq!(number(&json!({"number": "12"})), None);

        assert_eq!(date_start(&json!({"date": {"start": "2024-03-01"}})), Some("2024-03-01"));
        assert_eq!(date_start(&json!({"date": null})), None);
        assert_eq!(date_start(&json!({"date": {"end": "2024-03-01"}})), None);
    }
}
