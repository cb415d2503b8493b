//! Search orchestration
//!
//! Runs a [`SearchQuery`] against the API and normalizes the raw response
//! into a [`SearchResultPage`].

use std::fmt;

use serde::Serialize;

use crate::client::models::SearchResponse;
use crate::client::{MediaRecord, SearchQuery, SkyfishApi};
use crate::error::{ApiError, Result};

/// One page of search results.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResultPage {
    /// Matches across all pages
    pub total_found: u64,
    /// Items on this page
    pub item_count: u64,
    /// Offset of the first item on this page
    pub offset: u64,
    pub items: Vec<MediaRecord>,
}

/// What a result page represents, for the headline above the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSummary {
    None,
    One,
    All { total: u64 },
    FirstPage { total: u64, shown: u64, pages: u64 },
    Page { total: u64, start: u64, end: u64, page: u64, pages: u64 },
}

impl fmt::Display for ResultSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ResultSummary::None => write!(f, "Found no items for this search."),
            ResultSummary::One => write!(f, "Found one item for this search:"),
            ResultSummary::All { total } => {
                write!(f, "Found {} items, showing all {}:", total, total)
            }
            ResultSummary::FirstPage { total, shown, pages } => write!(
                f,
                "Found {} items, showing items 1 to {} (page 1 of {}):",
                total, shown, pages
            ),
            ResultSummary::Page {
                total,
                start,
                end,
                page,
                pages,
            } => write!(
                f,
                "Found {} items, showing {} to {} (page {} of {}):",
                total, start, end, page, pages
            ),
        }
    }
}

impl SearchResultPage {
    /// Normalize a raw search response.
    ///
    /// The two missing shapes are treated differently on purpose. A
    /// `response` object without `media` is a valid empty page, while a body
    /// with no `response` object at all is malformed and becomes an error
    /// instead of a silent zero page. Callers that only want "no results"
    /// (the `search` command) map the error themselves after logging it.
    ///
    /// # Errors
    /// `ApiError::InvalidResponse` when the `response` object is missing.
    pub fn from_response(raw: SearchResponse) -> Result<Self> {
        let hits = raw.response.ok_or_else(|| {
            ApiError::InvalidResponse("search response has no 'response' object".to_string())
        })?;

        let Some(items) = hits.media else {
            return Ok(Self::default());
        };

        Ok(Self {
            total_found: hits.hits.unwrap_or(items.len() as u64),
            item_count: raw.media_count.unwrap_or(items.len() as u64),
            offset: raw.media_offset.unwrap_or(0),
            items,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of pages at the given page size, rounded up
    pub fn total_pages(&self, page_size: usize) -> u64 {
        self.total_found.div_ceil(page_size.max(1) as u64)
    }

    /// Classify the page against the query that produced it.
    pub fn summary(&self, page_size: usize) -> ResultSummary {
        let total = self.total_found;
        let pages = self.total_pages(page_size);

        if self.offset > 0 {
            return ResultSummary::Page {
                total,
                start: self.offset.saturating_add(1),
                end: self.offset.saturating_add(self.item_count),
                page: (self.offset / page_size.max(1) as u64).saturating_add(1),
                pages,
            };
        }

        match total {
            0 => ResultSummary::None,
            1 => ResultSummary::One,
            _ if total == self.item_count => ResultSummary::All { total },
            _ => ResultSummary::FirstPage {
                total,
                shown: self.item_count,
                pages,
            },
        }
    }
}

/// Folders to send with a search.
///
/// An explicit choice wins; otherwise a configured root scope limits the
/// search. The API recurses into subfolders either way.
pub fn resolve_scope(choice: Option<u64>, root_scope: Option<u64>) -> Vec<u64> {
    choice.or(root_scope).into_iter().collect()
}

/// Run a search and normalize the result.
pub async fn search<A: SkyfishApi + ?Sized>(api: &A, query: &SearchQuery) -> Result<SearchResultPage> {
    log::debug!("Searching: {}", query.to_path());
    let raw = api.search(query).await?;
    let page = SearchResultPage::from_response(raw)?;
    log::debug!(
        "Search found {} items ({} on page)",
        page.total_found,
        page.item_count
    );
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockSkyfishClient;
    use crate::client::models::SearchHits;
    use crate::error::Error;

    fn record(id: u64) -> MediaRecord {
        MediaRecord {
            unique_media_id: Some(id),
            filename: Some(format!("{}.jpg", id)),
            ..Default::default()
        }
    }

    fn page(total: u64, count: u64, offset: u64) -> SearchResultPage {
        SearchResultPage {
            total_found: total,
            item_count: count,
            offset,
            items: (0..count).map(record).collect(),
        }
    }

    #[test]
    fn test_missing_response_object_is_invalid() {
        let result = SearchResultPage::from_response(SearchResponse::default());
        assert!(matches!(
            result,
            Err(Error::Api(ApiError::InvalidResponse(_)))
        ));
    }

    #[test]
    fn test_response_without_media_is_empty_page() {
        let raw: SearchResponse =
            serde_json::from_str(r#"{"response": {"hits": 5}, "media_count": 0}"#).unwrap();
        let page = SearchResultPage::from_response(raw).unwrap();

        assert_eq!(page.total_found, 0);
        assert_eq!(page.item_count, 0);
        assert!(page.is_empty());
    }

    #[test]
    fn test_full_response() {
        let raw: SearchResponse = serde_json::from_str(
            r#"{
                "response": {"hits": 42, "media": [
                    {"unique_media_id": 1, "filename": "a.jpg", "custom": true},
                    {"unique_media_id": 2, "filename": "b.jpg"}
                ]},
                "media_count": 2,
                "media_offset": 20
            }"#,
        )
        .unwrap();
        let page = SearchResultPage::from_response(raw).unwrap();

        assert_eq!(page.total_found, 42);
        assert_eq!(page.item_count, 2);
        assert_eq!(page.offset, 20);
        assert_eq!(page.items[0].extra.get("custom"), Some(&serde_json::json!(true)));
    }

    #[test]
    fn test_summary_cases() {
        assert_eq!(page(0, 0, 0).summary(20), ResultSummary::None);
        assert_eq!(page(1, 1, 0).summary(20), ResultSummary::One);
        assert_eq!(page(7, 7, 0).summary(20), ResultSummary::All { total: 7 });
        assert_eq!(
            page(45, 20, 0).summary(20),
            ResultSummary::FirstPage {
                total: 45,
                shown: 20,
                pages: 3
            }
        );
        assert_eq!(
            page(45, 5, 40).summary(20),
            ResultSummary::Page {
                total: 45,
                start: 41,
                end: 45,
                page: 3,
                pages: 3
            }
        );
    }

    #[test]
    fn test_summary_with_echoed_huge_offset() {
        assert_eq!(
            page(10, 2, u64::MAX).summary(1),
            ResultSummary::Page {
                total: 10,
                start: u64::MAX,
                end: u64::MAX,
                page: u64::MAX,
                pages: 10
            }
        );
    }

    #[test]
    fn test_summary_messages() {
        assert_eq!(
            page(1, 1, 0).summary(20).to_string(),
            "Found one item for this search:"
        );
        assert_eq!(
            page(45, 20, 20).summary(20).to_string(),
            "Found 45 items, showing 21 to 40 (page 2 of 3):"
        );
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(page(0, 0, 0).total_pages(20), 0);
        assert_eq!(page(20, 20, 0).total_pages(20), 1);
        assert_eq!(page(21, 20, 0).total_pages(20), 2);
        assert_eq!(page(5, 5, 0).total_pages(0), 5);
    }

    #[test]
    fn test_resolve_scope() {
        assert_eq!(resolve_scope(Some(5), Some(1)), vec![5]);
        assert_eq!(resolve_scope(None, Some(1)), vec![1]);
        assert!(resolve_scope(None, None).is_empty());
    }

    #[tokio::test]
    async fn test_search_through_api() {
        let mock = MockSkyfishClient::new()
            .with_search_response(SearchResponse {
                response: Some(SearchHits {
                    hits: Some(1),
                    media: Some(vec![record(9)]),
                }),
                media_count: Some(1),
                media_offset: Some(0),
            })
            .await;

        let query = SearchQuery::new().text("boat").folder_ids([3]);
        let page = search(&mock, &query).await.unwrap();

        assert_eq!(page.summary(20), ResultSummary::One);
        let paths = mock.search_paths().await;
        assert_eq!(paths.len(), 1);
        assert!(paths[0].starts_with("/search?q=boat&media_count=20"));
        assert!(paths[0].contains("&folder_ids=3"));
    }

    #[tokio::test]
    async fn test_search_propagates_api_errors() {
        let mock = MockSkyfishClient::new()
            .with_error(ApiError::Network("timed out".to_string()))
            .await;

        let result = search(&mock, &SearchQuery::new()).await;
        assert!(matches!(result, Err(Error::Api(ApiError::Network(_)))));
    }
}
