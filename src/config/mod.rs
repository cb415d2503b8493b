//! Configuration management for the Skyfish CLI

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::client::query::DEFAULT_PAGE_SIZE;
use crate::client::{Credentials, MediaType};
use crate::error::{ConfigError, Result};

/// Default cache lifetime for folder listings, in minutes
pub const DEFAULT_CACHE_MINUTES: u64 = 60;

/// Source of Skyfish credentials and client settings.
///
/// The API layer only depends on this trait, so credentials can come from
/// the config file, the environment or a test fixture.
pub trait CredentialProvider {
    fn username(&self) -> Option<&str>;
    fn password(&self) -> Option<&str>;
    fn api_key(&self) -> Option<&str>;
    fn secret(&self) -> Option<&str>;

    /// Folder cache lifetime in minutes; zero disables caching
    fn cache_minutes(&self) -> u64;

    /// Items per search page
    fn page_size(&self) -> usize;

    /// Collect the credentials, failing on the first missing one.
    fn credentials(&self) -> Result<Credentials> {
        fn required<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str> {
            value
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingCredential(name).into())
        }

        Ok(Credentials {
            username: required(self.username(), "username")?.to_string(),
            password: required(self.password(), "password")?.to_string(),
            api_key: required(self.api_key(), "API key")?.to_string(),
            secret: required(self.secret(), "API secret")?.to_string(),
        })
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Skyfish username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Skyfish password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Skyfish API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Skyfish API secret used to sign authentication requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,

    /// Folder cache lifetime in minutes. 0 disables caching; a key left out
    /// of the YAML file falls back to 60 minutes.
    #[serde(default = "default_cache_minutes")]
    pub cache_minutes: u64,

    /// Items per search page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Limit browsing to this top-level folder (0 = all folders)
    #[serde(default)]
    pub root_folder_id: u64,

    /// Top-level folders hidden from folder choices
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub omit_folder_ids: Vec<u64>,

    /// Media types requested when none are given (empty = all)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media_types: Vec<MediaType>,

    /// Custom API host for development/testing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,
}

fn default_cache_minutes() -> u64 {
    DEFAULT_CACHE_MINUTES
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            api_key: None,
            secret: None,
            cache_minutes: default_cache_minutes(),
            page_size: default_page_size(),
            root_folder_id: 0,
            omit_folder_ids: Vec::new(),
            media_types: Vec::new(),
            api_host: None,
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".skyfish").join("config.yaml"))
    }

    /// Resolve an optional override to a concrete path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from the override path or the default location
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to the override path or the default location
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Credentials live in this file; keep it private on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Validate that all credentials are present
    pub fn validate_auth(&self) -> Result<()> {
        self.credentials().map(|_| ())
    }

    /// Root folder scope, if one is configured
    pub fn root_scope(&self) -> Option<u64> {
        (self.root_folder_id != 0).then_some(self.root_folder_id)
    }
}

impl CredentialProvider for Config {
    fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }

    fn cache_minutes(&self) -> u64 {
        self.cache_minutes
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn complete_config() -> Config {
        Config {
            username: Some("editor".to_string()),
            password: Some("pw".to_string()),
            api_key: Some("key".to_string()),
            secret: Some("secret".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.username.is_none());
        assert_eq!(config.cache_minutes, 60);
        assert_eq!(config.page_size, 20);
        assert_eq!(config.root_scope(), None);
    }

    #[test]
    fn test_credentials_complete() {
        let creds = complete_config().credentials().unwrap();
        assert_eq!(creds.username, "editor");
        assert_eq!(creds.secret, "secret");
    }

    #[test]
    fn test_credentials_report_first_missing() {
        let mut config = complete_config();
        config.api_key = None;

        match config.validate_auth() {
            Err(crate::error::Error::Config(ConfigError::MissingCredential(name))) => {
                assert_eq!(name, "API key")
            }
            other => panic!("Expected missing API key, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_credential_counts_as_missing() {
        let mut config = complete_config();
        config.password = Some("  ".to_string());
        assert!(config.validate_auth().is_err());
    }

    #[test]
    fn test_root_scope() {
        let config = Config {
            root_folder_id: 12,
            ..Default::default()
        };
        assert_eq!(config.root_scope(), Some(12));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = complete_config();
        config.media_types = vec![MediaType::Image, MediaType::Video];
        config.omit_folder_ids = vec![99];
        config.save_to(path.clone()).unwrap();

        let loaded = Config::load_from(path.clone()).unwrap();
        assert_eq!(loaded.username.as_deref(), Some("editor"));
        assert_eq!(loaded.media_types, vec![MediaType::Image, MediaType::Video]);
        assert_eq!(loaded.omit_folder_ids, vec![99]);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = Config::load_from(dir.path().join("absent.yaml"));
        assert!(matches!(
            result,
            Err(crate::error::Error::Config(ConfigError::NotFound))
        ));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("username: editor\ncache_minutes: 0\n").unwrap();
        assert_eq!(config.cache_minutes, 0);
        assert_eq!(config.page_size, 20);
        assert!(config.media_types.is_empty());
    }

    #[test]
    fn test_cache_minutes_absent_from_file_uses_default() {
        let config: Config = serde_yaml::from_str("username: editor\n").unwrap();
        assert_eq!(config.cache_minutes(), DEFAULT_CACHE_MINUTES);

        let config: Config = serde_yaml::from_str("cache_minutes: 0\n").unwrap();
        assert_eq!(config.cache_minutes(), 0);
    }
}
