//! Mock Skyfish API client for testing
//!
//! Provides a mock implementation of [`SkyfishApi`] for unit testing
//! without making real API calls.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::models::{AuthToken, Folder, MediaItem, SearchResponse};
use super::query::SearchQuery;
use super::SkyfishApi;
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockSkyfishClient::new()
///     .with_folders(vec![Folder::new(1, "A", None)])
///     .await;
///
/// let folders = mock.get_folders().await?;
/// assert_eq!(folders.len(), 1);
/// ```
#[derive(Default)]
pub struct MockSkyfishClient {
    /// Folders to return from get_folders
    folders: Arc<Mutex<Vec<Folder>>>,
    /// Response to return from search
    search_response: Arc<Mutex<SearchResponse>>,
    /// Items to return from get_item / get_filename
    items: Arc<Mutex<HashMap<u64, MediaItem>>>,
    /// Download URLs to return from get_item_download_url
    download_urls: Arc<Mutex<HashMap<u64, String>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Search request paths, in call order
    search_paths: Arc<Mutex<Vec<String>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub authenticate: usize,
    pub get_folders: usize,
    pub search: usize,
    pub get_item: usize,
    pub get_filename: usize,
    pub get_item_download_url: usize,
}

impl MockSkyfishClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure folders to return from get_folders.
    pub async fn with_folders(self, folders: Vec<Folder>) -> Self {
        *self.folders.lock().await = folders;
        self
    }

    /// Configure the raw search response.
    pub async fn with_search_response(self, response: SearchResponse) -> Self {
        *self.search_response.lock().await = response;
        self
    }

    /// Configure an item detail record.
    pub async fn with_item(self, item: MediaItem) -> Self {
        self.items.lock().await.insert(item.id, item);
        self
    }

    /// Configure a download URL for an item.
    pub async fn with_download_url(self, id: u64, url: &str) -> Self {
        self.download_urls.lock().await.insert(id, url.to_string());
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Replace the folder listing after construction.
    pub async fn set_folders(&self, folders: Vec<Folder>) {
        *self.folders.lock().await = folders;
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get the request paths of all searches made.
    pub async fn search_paths(&self) -> Vec<String> {
        self.search_paths.lock().await.clone()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        if let Some(e) = self.error.lock().await.take() {
            return Err(e.into());
        }
        Ok(())
    }

    fn not_found(id: u64) -> ApiError {
        ApiError::Status {
            status: 404,
            category: super::status::StatusCategory::NotFound,
            request_id: Some(format!("mock-{}", id)),
        }
    }
}

#[async_trait]
impl SkyfishApi for MockSkyfishClient {
    async fn authenticate(&self) -> Result<AuthToken> {
        self.call_count.lock().await.authenticate += 1;
        self.check_error().await?;
        Ok(AuthToken {
            token: "mock-token".to_string(),
        })
    }

    async fn get_folders(&self) -> Result<Vec<Folder>> {
        self.call_count.lock().await.get_folders += 1;
        self.check_error().await?;
        Ok(self.folders.lock().await.clone())
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        self.call_count.lock().await.search += 1;
        self.search_paths.lock().await.push(query.to_path());
        self.check_error().await?;
        Ok(self.search_response.lock().await.clone())
    }

    async fn get_item(&self, id: u64) -> Result<MediaItem> {
        self.call_count.lock().await.get_item += 1;
        self.check_error().await?;
        self.items
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found(id).into())
    }

    async fn get_filename(&self, id: u64) -> Result<String> {
        self.call_count.lock().await.get_filename += 1;
        self.check_error().await?;
        self.items
            .lock()
            .await
            .get(&id)
            .map(|item| item.filename.clone())
            .ok_or_else(|| Self::not_found(id).into())
    }

    async fn get_item_download_url(&self, id: u64) -> Result<String> {
        self.call_count.lock().await.get_item_download_url += 1;
        self.check_error().await?;
        self.download_urls
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found(id).into())
    }
}
