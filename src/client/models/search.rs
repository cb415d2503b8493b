//! Search response models

use serde::{Deserialize, Serialize};

use super::MediaRecord;

/// Raw body of the `/search` endpoint.
///
/// Every part is optional here; shape validation happens when the response
/// is normalized into a result page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<SearchHits>,

    /// Number of items returned in this page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_count: Option<u64>,

    /// Offset of the first returned item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_offset: Option<u64>,
}

/// The `response` object of a search result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHits {
    /// Total number of matches across all pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hits: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<MediaRecord>>,
}
