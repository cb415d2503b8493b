//! Command execution context
//!
//! Loads the config, authenticates and wraps the client in the response
//! cache, so command handlers start from a ready-to-use client.

use std::sync::Arc;

use crate::cache::{CachedSkyfishClient, ttl_from_minutes};
use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::SkyfishClient;
use crate::config::{Config, CredentialProvider};
use crate::error::Result;

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    /// Loaded and validated configuration
    pub config: Config,
    /// Authenticated API client with caching
    pub client: Arc<CachedSkyfishClient<SkyfishClient>>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context with full initialization.
    ///
    /// # Errors
    /// Returns error if config cannot be loaded, a credential is missing or
    /// authentication fails.
    pub async fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref())?;
        let credentials = config.credentials()?;

        let api_host = opts.api_host.clone().or_else(|| config.api_host.clone());
        let raw_client = SkyfishClient::connect_with_host(credentials, api_host).await?;

        // Cache entries are scoped to the configured user
        let principal = config.username().unwrap_or_default().to_string();
        let client = Arc::new(CachedSkyfishClient::new(
            raw_client,
            principal,
            ttl_from_minutes(config.cache_minutes()),
            !opts.no_cache,
        ));

        Ok(Self {
            config,
            client,
            format: opts.format,
        })
    }

    /// Root folder scope from the config
    pub fn root_scope(&self) -> Option<u64> {
        self.config.root_scope()
    }
}
