//! SQLite store for cached folder listings
//!
//! One row per principal and endpoint. Rows are found by the hashed
//! [`cache_key`], and expiry is checked on read, so stale rows only disappear
//! on `clear` or when the same principal refreshes its listing.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::cache_key;
use crate::error::CacheError;

/// Bumped whenever the `listings` table changes shape
const SCHEMA_VERSION: i32 = 2;

const DB_FILE: &str = "folders.db";

type Result<T> = std::result::Result<T, CacheError>;

/// Cached listings on disk
pub struct CacheStorage {
    conn: Connection,
    dir: PathBuf,
}

/// One cached listing, without its body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub principal: String,
    pub endpoint: String,
    pub fetched_at: i64,
    pub expires_at: i64,
    pub size_bytes: u64,
}

impl ListingEntry {
    pub fn is_live(&self, now: i64) -> bool {
        self.expires_at > now
    }
}

impl CacheStorage {
    /// Open the store in the user cache directory
    pub fn open() -> Result<Self> {
        Self::open_at(&Self::cache_dir()?)
    }

    /// `~/.cache/skyfish` on Linux
    pub fn cache_dir() -> Result<PathBuf> {
        dirs::cache_dir()
            .map(|base| base.join("skyfish"))
            .ok_or(CacheError::NoHome)
    }

    pub fn open_at(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .map_err(|e| CacheError::Io(format!("Failed to create cache dir: {}", e)))?;

        let conn = Connection::open(dir.join(DB_FILE))?;
        migrate(&conn)?;

        Ok(Self {
            conn,
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Listing body for `principal`, unless it has expired
    pub fn load(&self, endpoint: &str, principal: &str) -> Result<Option<Vec<u8>>> {
        let body = self
            .conn
            .query_row(
                "SELECT body FROM listings WHERE cache_key = ?1 AND expires_at > ?2",
                params![cache_key(endpoint, principal), Utc::now().timestamp()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(body)
    }

    /// Replace the listing for `principal`.
    ///
    /// A zero TTL writes a row that is already expired. TTLs past the end of
    /// the timestamp range never expire.
    pub fn store(&self, endpoint: &str, principal: &str, body: &[u8], ttl: Duration) -> Result<()> {
        let now = Utc::now().timestamp();
        self.conn.execute(
            "INSERT OR REPLACE INTO listings
             (cache_key, principal, endpoint, body, fetched_at, expires_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                cache_key(endpoint, principal),
                principal,
                endpoint,
                body,
                now,
                expiry(now, ttl)
            ],
        )?;
        Ok(())
    }

    /// Every cached listing, newest first
    pub fn entries(&self) -> Result<Vec<ListingEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT principal, endpoint, fetched_at, expires_at, length(body)
             FROM listings ORDER BY fetched_at DESC, principal",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ListingEntry {
                principal: row.get(0)?,
                endpoint: row.get(1)?,
                fetched_at: row.get(2)?,
                expires_at: row.get(3)?,
                size_bytes: row.get::<_, i64>(4)?.max(0) as u64,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Summary of the store, computed from [`entries`](Self::entries)
    pub fn stats(&self) -> Result<CacheStats> {
        let now = Utc::now().timestamp();
        let entries = self.entries()?;

        let live: Vec<&ListingEntry> = entries.iter().filter(|e| e.is_live(now)).collect();
        let mut principals: Vec<&str> = live.iter().map(|e| e.principal.as_str()).collect();
        principals.sort_unstable();
        principals.dedup();

        Ok(CacheStats {
            total_entries: entries.len(),
            live_entries: live.len(),
            expired_entries: entries.len() - live.len(),
            principals: principals.len(),
            total_size_bytes: entries.iter().map(|e| e.size_bytes).sum(),
            oldest_fetch: live.iter().map(|e| e.fetched_at).min(),
            newest_fetch: live.iter().map(|e| e.fetched_at).max(),
        })
    }

    /// Drop every listing
    pub fn clear_all(&self) -> Result<ClearStats> {
        let removed = self.conn.execute("DELETE FROM listings", [])?;
        Ok(ClearStats {
            entries_removed: removed,
        })
    }
}

/// Expiry timestamp for a row written at `now`
fn expiry(now: i64, ttl: Duration) -> i64 {
    i64::try_from(ttl.as_secs())
        .ok()
        .and_then(|secs| now.checked_add(secs))
        .unwrap_or(i64::MAX)
}

/// Bring the schema up to date. Older layouts are cache only, so they are
/// dropped rather than converted.
fn migrate(conn: &Connection) -> Result<()> {
    let version: i32 = conn.pragma_query_value(None, "user_version", |r| r.get(0))?;

    if version != SCHEMA_VERSION {
        if version != 0 {
            log::info!(
                "Cache schema {} is outdated (want {}), discarding cached listings",
                version,
                SCHEMA_VERSION
            );
        }
        conn.execute_batch(
            "DROP TABLE IF EXISTS responses;
             DROP TABLE IF EXISTS listings;",
        )?;
    }

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS listings (
             cache_key TEXT PRIMARY KEY NOT NULL,
             principal TEXT NOT NULL,
             endpoint TEXT NOT NULL,
             body BLOB NOT NULL,
             fetched_at INTEGER NOT NULL,
             expires_at INTEGER NOT NULL
         );",
    )?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    Ok(())
}

#[derive(Debug)]
pub struct ClearStats {
    pub entries_removed: usize,
}

#[derive(Debug)]
pub struct CacheStats {
    pub total_entries: usize,
    pub live_entries: usize,
    pub expired_entries: usize,
    /// Principals with at least one live listing
    pub principals: usize,
    pub total_size_bytes: u64,
    pub oldest_fetch: Option<i64>,
    pub newest_fetch: Option<i64>,
}
