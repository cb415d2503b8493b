//! Media models

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Media record as returned in search results.
///
/// Only the fields requested through `return_values` are modelled; anything
/// else the API sends is kept in `extra` and passed through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaRecord {
    /// Media ID used for item and download lookups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_media_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub byline: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,

    /// Folders the media is filed under
    #[serde(default, deserialize_with = "null_as_default")]
    pub folder_ids: Vec<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url_ssl: Option<String>,

    /// File size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_disksize: Option<u64>,

    /// Creation timestamp as sent by the API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MediaRecord {
    /// Creation date (`YYYY-MM-DD`) without the time part.
    pub fn created_date(&self) -> Option<&str> {
        self.created
            .as_deref()
            .map(|created| created.get(..10).unwrap_or(created))
    }

    /// Pixel area in megapixels, when both dimensions are known.
    pub fn megapixels(&self) -> Option<f64> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 => Some((w * h) as f64 / 1e6),
            _ => None,
        }
    }
}

/// Item detail as returned by `/media/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: u64,

    pub filename: String,

    /// Media type: `image`, `stock`, `vector`, `video` or `generic`
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Metadata block; `metadata.title` is keyed by language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Local media bundle an item is imported as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaBundle {
    Image,
    Video,
    Document,
}

impl MediaBundle {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaBundle::Image => "image",
            MediaBundle::Video => "video",
            MediaBundle::Document => "document",
        }
    }
}

impl MediaItem {
    /// First title in any language, if the item has one.
    pub fn title(&self) -> Option<&str> {
        let title = self.metadata.as_ref()?.get("title")?;
        match title {
            Value::String(s) => Some(s.as_str()),
            Value::Object(by_language) => by_language.values().find_map(Value::as_str),
            Value::Array(values) => values.iter().find_map(Value::as_str),
            _ => None,
        }
        .filter(|s| !s.is_empty())
    }

    /// Alternative text for an imported image: the title, or the filename.
    pub fn alt_text(&self) -> &str {
        self.title().unwrap_or(&self.filename)
    }

    /// Bundle the item maps to, or `None` for unsupported types.
    pub fn bundle(&self) -> Option<MediaBundle> {
        match self.kind.as_str() {
            "stock" | "image" | "vector" => Some(MediaBundle::Image),
            "video" => Some(MediaBundle::Video),
            "generic" => Some(MediaBundle::Document),
            _ => None,
        }
    }
}

/// Response of `/media/{id}/download_location`.
///
/// The URL is only valid for a few minutes after it is issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadLocation {
    pub url: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_record_passes_unknown_fields_through() {
        let record: MediaRecord = serde_json::from_str(
            r#"{"unique_media_id": 12, "filename": "cat.jpg", "keywords": null, "camera": "X100"}"#,
        )
        .unwrap();

        assert_eq!(record.unique_media_id, Some(12));
        assert!(record.keywords.is_empty());
        assert_eq!(record.extra.get("camera"), Some(&Value::from("X100")));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["camera"], "X100");
    }

    #[test]
    fn test_media_record_created_date() {
        let record = MediaRecord {
            created: Some("2024-03-05T10:11:12Z".to_string()),
            ..Default::default()
        };
        assert_eq!(record.created_date(), Some("2024-03-05"));

        let short = MediaRecord {
            created: Some("2024".to_string()),
            ..Default::default()
        };
        assert_eq!(short.created_date(), Some("2024"));
    }

    #[test]
    fn test_media_record_megapixels() {
        let record = MediaRecord {
            width: Some(4000),
            height: Some(3000),
            ..Default::default()
        };
        assert_eq!(record.megapixels(), Some(12.0));
        assert_eq!(MediaRecord::default().megapixels(), None);
    }

    #[test]
    fn test_media_item_title_from_language_map() {
        let item: MediaItem = serde_json::from_str(
            r#"{"id": 5, "filename": "a.png", "type": "image", "metadata": {"title": {"en": "Harbour"}}}"#,
        )
        .unwrap();
        assert_eq!(item.title(), Some("Harbour"));
        assert_eq!(item.alt_text(), "Harbour");
    }

    #[test]
    fn test_media_item_alt_text_falls_back_to_filename() {
        let item: MediaItem = serde_json::from_str(
            r#"{"id": 5, "filename": "a.png", "type": "image", "metadata": {"title": []}}"#,
        )
        .unwrap();
        assert_eq!(item.title(), None);
        assert_eq!(item.alt_text(), "a.png");
    }

    #[test]
    fn test_media_item_bundle() {
        let mut item: MediaItem =
            serde_json::from_str(r#"{"id": 1, "filename": "f", "type": "stock"}"#).unwrap();
        assert_eq!(item.bundle(), Some(MediaBundle::Image));

        item.kind = "video".to_string();
        assert_eq!(item.bundle(), Some(MediaBundle::Video));

        item.kind = "generic".to_string();
        assert_eq!(item.bundle(), Some(MediaBundle::Document));

        item.kind = "audio".to_string();
        assert_eq!(item.bundle(), None);
    }
}
