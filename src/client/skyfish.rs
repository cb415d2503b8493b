//! Skyfish API client implementation

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client as HttpClient, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use super::models::{
    AuthRequest, AuthToken, Credentials, DownloadLocation, Folder, MediaItem, SearchResponse,
};
use super::query::SearchQuery;
use super::signature;
use super::status::{REQUEST_ID_HEADER, StatusCategory, log_status};
use super::SkyfishApi;
use crate::error::{ApiError, Error, Result};

/// Skyfish API base URL
pub const API_BASE_URL: &str = "https://api.colourbox.com";

const AUTH_PATH: &str = "/authenticate/userpasshmac";
const FOLDERS_PATH: &str = "/folder?sort_by=name";

/// Skyfish API client
///
/// A client only exists once authentication succeeded: [`SkyfishClient::connect`]
/// obtains the token and builds the authorization header up front. If the
/// server later rejects the token with a 401, the client re-authenticates
/// once and retries the request.
pub struct SkyfishClient {
    http: HttpClient,
    base_url: String,
    credentials: Credentials,
    authorization: RwLock<String>,
}

impl SkyfishClient {
    /// Authenticate against the production API and return a ready client.
    pub async fn connect(credentials: Credentials) -> Result<Self> {
        Self::connect_with_host(credentials, None).await
    }

    /// Authenticate against a custom API host (for development/testing).
    pub async fn connect_with_host(
        credentials: Credentials,
        api_host: Option<String>,
    ) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let base_url = api_host
            .map(|host| host.trim_end_matches('/').to_string())
            .unwrap_or_else(|| API_BASE_URL.to_string());

        let token = request_token(&http, &base_url, &credentials).await?;
        log::debug!("Authenticated as {}", credentials.username);

        Ok(Self {
            http,
            base_url,
            credentials,
            authorization: RwLock::new(token.authorization_header()),
        })
    }

    /// Base URL all request paths are relative to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replace the token after the server rejected the current one
    async fn refresh_token(&self) -> Result<()> {
        let token = request_token(&self.http, &self.base_url, &self.credentials).await?;
        *self.authorization.write().await = token.authorization_header();
        Ok(())
    }

    /// Make an authenticated GET request and decode the JSON body.
    ///
    /// All API reads go through here.
    async fn request<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        match self.get_json(path).await {
            Err(Error::Api(err)) if err.is_unauthorized() => {
                log::info!("Token rejected for {}, re-authenticating", path);
                self.refresh_token().await?;
                self.get_json(path).await
            }
            result => result,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let authorization = self.authorization.read().await.clone();

        log::debug!("GET {}", url);
        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|e| {
                log::error!("Request to {} failed: {}", path, e);
                ApiError::from(e)
            })?;

        let response = check_status(response)?;
        let body = response.text().await.map_err(ApiError::from)?;

        serde_json::from_str(&body).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response from {}: {}", path, e))
                .into()
        })
    }
}

/// Pass 200 responses through; classify and log everything else.
fn check_status(response: Response) -> std::result::Result<Response, ApiError> {
    let status = response.status();
    if status == StatusCode::OK {
        return Ok(response);
    }

    let category = StatusCategory::from_status(status);
    let request_id = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    log_status(status, category, request_id.as_deref());

    Err(ApiError::Status {
        status: status.as_u16(),
        category,
        request_id,
    })
}

/// POST the signed credentials and extract the token.
async fn request_token(
    http: &HttpClient,
    base_url: &str,
    credentials: &Credentials,
) -> Result<AuthToken> {
    #[derive(Deserialize)]
    struct TokenResponse {
        #[serde(default)]
        token: Option<String>,
    }

    let ts = Utc::now().timestamp();
    let body = AuthRequest {
        username: &credentials.username,
        password: &credentials.password,
        key: &credentials.api_key,
        ts,
        hmac: signature::sign(&credentials.api_key, &credentials.secret, ts),
    };

    let response = http
        .post(format!("{}{}", base_url, AUTH_PATH))
        .json(&body)
        .send()
        .await
        .map_err(ApiError::from)?;

    let response = check_status(response).map_err(|err| match err {
        ApiError::Status {
            status, category, ..
        } => ApiError::Auth(format!("{} (HTTP {})", category, status)),
        other => other,
    })?;

    let text = response.text().await.map_err(ApiError::from)?;
    let parsed: TokenResponse = serde_json::from_str(&text)
        .map_err(|e| ApiError::Auth(format!("Unreadable authentication response: {}", e)))?;

    match parsed.token.filter(|token| !token.is_empty()) {
        Some(token) => Ok(AuthToken { token }),
        None => {
            log::error!("Authentication response did not contain a token");
            Err(ApiError::Auth("Response did not contain a token".to_string()).into())
        }
    }
}

#[async_trait]
impl SkyfishApi for SkyfishClient {
    async fn authenticate(&self) -> Result<AuthToken> {
        request_token(&self.http, &self.base_url, &self.credentials).await
    }

    async fn get_folders(&self) -> Result<Vec<Folder>> {
        self.request(FOLDERS_PATH).await
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        self.request(&query.to_path()).await
    }

    async fn get_item(&self, id: u64) -> Result<MediaItem> {
        self.request(&format!("/media/{}", id)).await
    }

    async fn get_filename(&self, id: u64) -> Result<String> {
        #[derive(Deserialize)]
        struct Filename {
            filename: String,
        }

        let item: Filename = self.request(&format!("/media/{}", id)).await?;
        Ok(item.filename)
    }

    async fn get_item_download_url(&self, id: u64) -> Result<String> {
        let location: DownloadLocation = self
            .request(&format!("/media/{}/download_location", id))
            .await?;
        Ok(location.url)
    }
}
