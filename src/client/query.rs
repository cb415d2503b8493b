//! Search query parameters
//!
//! A [`SearchQuery`] is an immutable description of one search request. Build
//! it with the chained setters, then hand it to the client; the same query
//! always produces the same request path.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Items per page when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Fields requested for every search hit.
pub const RETURN_VALUES: &str = "title+description+byline+copyright+unique_media_id+thumbnail_url_ssl+keywords+filename+created+folder_ids+file_disksize+width+height";

/// Thumbnail size requested for every search hit.
pub const THUMBNAIL_SIZE: &str = "320px";

/// Skyfish media type filter values.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Images
    Image,
    /// Vector graphics
    Vector,
    /// Videos
    Video,
    /// Generic files
    Generic,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Vector => "vector",
            MediaType::Video => "video",
            MediaType::Generic => "generic",
        }
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Search keyword relevance
    #[default]
    Relevance,
    /// Date, most recent first
    Created,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Relevance => "relevance",
            SortOrder::Created => "created",
        }
    }
}

/// Parameters of a single search request.
///
/// # Example
/// ```ignore
/// let query = SearchQuery::new()
///     .text("harbour")
///     .folder_ids([12, 13])
///     .media_type(MediaType::Image)
///     .page(2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free-text terms; empty browses everything
    pub text: String,
    /// Folders to search in (recursively); empty means all folders
    pub folder_ids: Vec<u64>,
    /// Offset of the first item
    pub offset: usize,
    /// Items per page
    pub page_size: usize,
    /// Media types to include; empty means all types
    pub media_types: BTreeSet<MediaType>,
    /// Result ordering
    pub order: SortOrder,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            text: String::new(),
            folder_ids: Vec::new(),
            offset: 0,
            page_size: DEFAULT_PAGE_SIZE,
            media_types: BTreeSet::new(),
            order: SortOrder::default(),
        }
    }
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text terms.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Limit the search to these folders.
    pub fn folder_ids(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.folder_ids = ids.into_iter().collect();
        self
    }

    /// Set the offset of the first item.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Set the number of items per page. Zero falls back to the default.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = if size == 0 { DEFAULT_PAGE_SIZE } else { size };
        self
    }

    /// Jump to a 1-based page number using the current page size.
    ///
    /// Pages past the addressable range clamp to the largest offset.
    pub fn page(mut self, page: usize) -> Self {
        self.offset = page.saturating_sub(1).saturating_mul(self.page_size);
        self
    }

    /// Add one media type to the filter.
    pub fn media_type(mut self, media_type: MediaType) -> Self {
        self.media_types.insert(media_type);
        self
    }

    /// Replace the media type filter.
    pub fn media_types(mut self, types: impl IntoIterator<Item = MediaType>) -> Self {
        self.media_types = types.into_iter().collect();
        self
    }

    /// Set the result ordering.
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// 1-based page number the offset falls on.
    pub fn page_number(&self) -> usize {
        (self.offset / self.page_size.max(1)).saturating_add(1)
    }

    /// Query string parameters in request order.
    ///
    /// Values are already encoded: `q` is percent-encoded, while
    /// `return_values` and `media_type` keep their literal `+` separators.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        let text = self.text.trim();
        if !text.is_empty() {
            params.push(("q", urlencoding::encode(text).into_owned()));
        }

        params.push(("media_count", self.page_size.to_string()));
        params.push(("recursive", "true".to_string()));
        params.push(("return_values", RETURN_VALUES.to_string()));
        params.push(("order", self.order.as_str().to_string()));
        params.push(("thumbnail_size", THUMBNAIL_SIZE.to_string()));

        if !self.folder_ids.is_empty() {
            let ids: Vec<String> = self.folder_ids.iter().map(u64::to_string).collect();
            params.push(("folder_ids", ids.join(",")));
        }

        if !self.media_types.is_empty() {
            let types: Vec<&str> = self.media_types.iter().map(MediaType::as_str).collect();
            params.push(("media_type", types.join("+")));
        }

        if self.offset > 0 {
            params.push(("media_offset", self.offset.to_string()));
        }

        params
    }

    /// Request path (relative to the API base URL).
    pub fn to_path(&self) -> String {
        let query: Vec<String> = self
            .to_query_params()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        format!("/search?{}", query.join("&"))
    }
}
