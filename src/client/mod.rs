//! Skyfish API client

use async_trait::async_trait;

use crate::error::Result;

#[cfg(test)]
pub mod mock;
pub mod models;
pub mod query;
pub mod signature;
pub mod skyfish;
pub mod status;

#[cfg(test)]
pub use mock::MockSkyfishClient;
pub use models::{AuthToken, Credentials, Folder, MediaItem, MediaRecord, SearchResponse};
pub use query::{MediaType, SearchQuery, SortOrder};
pub use skyfish::SkyfishClient;

/// Skyfish API client trait
///
/// Every operation returns a `Result`; failures are classified and logged by
/// the implementation before they are returned.
#[async_trait]
pub trait SkyfishApi: Send + Sync {
    /// Obtain a fresh token for the configured credentials
    async fn authenticate(&self) -> Result<AuthToken>;

    /// List all folders visible to the account, ordered by name
    async fn get_folders(&self) -> Result<Vec<Folder>>;

    /// Run a search and return the raw response body
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse>;

    /// Fetch the detail record of a media item
    async fn get_item(&self, id: u64) -> Result<MediaItem>;

    /// Fetch only the filename of a media item
    async fn get_filename(&self, id: u64) -> Result<String>;

    /// Fetch a time-limited download URL for a media item
    async fn get_item_download_url(&self, id: u64) -> Result<String>;
}
