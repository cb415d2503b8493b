//! Skyfish API data models
//!
//! Wire types for the authentication, folder, search and media endpoints.

mod auth;
mod folder;
mod media;
mod search;

pub use auth::{AuthToken, Credentials};
pub(crate) use auth::AuthRequest;
pub use folder::Folder;
pub use media::{DownloadLocation, MediaBundle, MediaItem, MediaRecord};
pub use search::{SearchHits, SearchResponse};
