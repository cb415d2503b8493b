//! JSON output formatting

use chrono::Utc;
use serde::Serialize;

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub data: T,
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// Timestamp of the response
    pub timestamp: String,

    /// CLI version
    pub version: String,

    /// Human-readable result summary, for paged results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                summary: None,
            },
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.meta.summary = Some(summary.into());
        self
    }
}

/// Format data as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}

/// Format data as pretty-printed JSON with a summary line in the metadata
pub fn format_json_with_summary<T: Serialize + ?Sized>(
    data: &T,
    summary: &str,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data).with_summary(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[derive(Debug, Serialize)]
    struct Item {
        id: u64,
        name: String,
    }

    #[test]
    fn test_format_json_wraps_data() {
        let items = vec![Item {
            id: 1,
            name: "Press".to_string(),
        }];

        let value: Value = serde_json::from_str(&format_json(&items).unwrap()).unwrap();

        assert_eq!(value["data"][0]["name"], "Press");
        assert_eq!(value["meta"]["version"], env!("CARGO_PKG_VERSION"));
        assert!(value["meta"].get("summary").is_none());
    }

    #[test]
    fn test_format_json_empty_vec() {
        let items: Vec<Item> = vec![];
        assert!(format_json(&items).unwrap().contains("\"data\": []"));
    }

    #[test]
    fn test_format_json_with_summary() {
        let output = format_json_with_summary(&[1, 2], "Found 2 items").unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["meta"]["summary"], "Found 2 items");
        assert_eq!(value["data"], serde_json::json!([1, 2]));
    }
}
