//! Cached wrapper for the Skyfish API client
//!
//! Folder listings are cached per principal for the configured TTL. All other
//! calls pass straight through: tokens are security sensitive, search results
//! change constantly and download URLs are time-limited.

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::cache::CacheStorage;
use crate::client::models::{AuthToken, Folder, MediaItem, SearchResponse};
use crate::client::{SearchQuery, SkyfishApi};
use crate::error::Result;

const FOLDERS_ENDPOINT: &str = "get_folders";

/// Cached wrapper for any SkyfishApi implementation.
///
/// The cache is optional (`--no-cache` or an unusable cache directory leave
/// it out) and wrapped in a Mutex so the client stays `Sync`.
pub struct CachedSkyfishClient<C: SkyfishApi> {
    inner: Arc<C>,
    cache: Option<Mutex<CacheStorage>>,
    principal: String,
    ttl: Duration,
}

impl<C: SkyfishApi> CachedSkyfishClient<C> {
    /// Create a new cached client wrapper.
    ///
    /// # Arguments
    /// * `inner` - The underlying API client to wrap
    /// * `principal` - Identity that scopes cache entries (the username)
    /// * `ttl` - Lifetime of cached folder listings
    /// * `enabled` - Whether caching is enabled (false for --no-cache)
    pub fn new(inner: C, principal: impl Into<String>, ttl: Duration, enabled: bool) -> Self {
        let cache = if enabled {
            match CacheStorage::open() {
                Ok(storage) => Some(Mutex::new(storage)),
                Err(e) => {
                    log::warn!("Response cache unavailable: {}", e);
                    None
                }
            }
        } else {
            None
        };
        Self {
            inner: Arc::new(inner),
            cache,
            principal: principal.into(),
            ttl,
        }
    }

    /// Wrap a client with an already opened storage.
    pub fn with_storage(
        inner: C,
        storage: CacheStorage,
        principal: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(inner),
            cache: Some(Mutex::new(storage)),
            principal: principal.into(),
            ttl,
        }
    }

    /// Get the inner client
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Whether responses are being cached
    pub fn is_caching(&self) -> bool {
        self.cache.is_some()
    }

    /// Folder listing as seen by `principal`.
    ///
    /// A miss, or a cached empty listing, fetches fresh. Empty listings are
    /// never stored.
    pub async fn folders_for(&self, principal: &str) -> Result<Vec<Folder>> {
        if let Some(cached) = self.get_cached::<Vec<Folder>>(FOLDERS_ENDPOINT, principal)
            && !cached.is_empty()
        {
            log::debug!("Cache hit: {} for {}", FOLDERS_ENDPOINT, principal);
            return Ok(cached);
        }

        let folders = self.inner.get_folders().await?;
        if !folders.is_empty() {
            self.set_cached(FOLDERS_ENDPOINT, principal, &folders);
        }
        Ok(folders)
    }

    /// Cached value for `principal`, if one is stored and still live
    fn get_cached<T: DeserializeOwned>(&self, endpoint: &str, principal: &str) -> Option<T> {
        let cache = self.cache.as_ref()?;
        let guard = cache.lock().ok()?;
        match guard.load(endpoint, principal) {
            Ok(data) => data.and_then(|bytes| serde_json::from_slice(&bytes).ok()),
            Err(e) => {
                log::warn!("Cache read failed: {}", e);
                None
            }
        }
    }

    fn set_cached<T: Serialize>(&self, endpoint: &str, principal: &str, data: &T) {
        if let Some(ref cache) = self.cache
            && let Ok(guard) = cache.lock()
            && let Ok(json) = serde_json::to_vec(data)
            && let Err(e) = guard.store(endpoint, principal, &json, self.ttl)
        {
            log::warn!("Cache write failed: {}", e);
        }
    }
}

#[async_trait]
impl<C: SkyfishApi + 'static> SkyfishApi for CachedSkyfishClient<C> {
    /// Authenticate - NEVER cached (security sensitive)
    async fn authenticate(&self) -> Result<AuthToken> {
        self.inner.authenticate().await
    }

    async fn get_folders(&self) -> Result<Vec<Folder>> {
        self.folders_for(&self.principal).await
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        self.inner.search(query).await
    }

    async fn get_item(&self, id: u64) -> Result<MediaItem> {
        self.inner.get_item(id).await
    }

    async fn get_filename(&self, id: u64) -> Result<String> {
        self.inner.get_filename(id).await
    }

    async fn get_item_download_url(&self, id: u64) -> Result<String> {
        self.inner.get_item_download_url(id).await
    }
}
