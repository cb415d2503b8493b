//! Cache management commands

use chrono::Utc;

use crate::cache::CacheStorage;
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::output::formatters::{format_size, format_timestamp};

/// Show cache status/statistics
pub fn status(format: OutputFormat) -> Result<()> {
    let cache = CacheStorage::open()?;
    let stats = cache.stats()?;
    let listings = cache.entries()?;
    let path = cache.dir().display().to_string();

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "total_entries": stats.total_entries,
                "live_entries": stats.live_entries,
                "expired_entries": stats.expired_entries,
                "principals": stats.principals,
                "total_size_bytes": stats.total_size_bytes,
                "total_size_human": format_size(stats.total_size_bytes),
                "oldest_fetch_timestamp": stats.oldest_fetch,
                "newest_fetch_timestamp": stats.newest_fetch,
                "listings": listings,
                "path": path,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            println!("Cache Status");
            println!("────────────────────────────────────────");
            println!("Location:       {}", path);
            println!("Live listings:  {}", stats.live_entries);
            println!("Expired:        {}", stats.expired_entries);
            println!("Users:          {}", stats.principals);
            println!("Total size:     {}", format_size(stats.total_size_bytes));

            if let Some(oldest) = stats.oldest_fetch {
                println!("Oldest fetch:   {}", format_timestamp(oldest));
            }
            if let Some(newest) = stats.newest_fetch {
                println!("Newest fetch:   {}", format_timestamp(newest));
            }

            let now = Utc::now().timestamp();
            for entry in &listings {
                let expiry = match entry.expires_at {
                    i64::MAX => "never expires".to_string(),
                    at if entry.is_live(now) => format!("expires {}", format_timestamp(at)),
                    _ => "expired".to_string(),
                };
                println!(
                    "  {} ({}, fetched {}, {})",
                    entry.principal,
                    format_size(entry.size_bytes),
                    format_timestamp(entry.fetched_at),
                    expiry
                );
            }
        }
    }

    Ok(())
}

/// Clear all cache entries
pub fn clear(format: OutputFormat) -> Result<()> {
    let cache = CacheStorage::open()?;
    let stats = cache.clear_all()?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "entries_removed": stats.entries_removed,
                "success": true,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            if stats.entries_removed > 0 {
                println!("Cleared {} cached folder listings", stats.entries_removed);
            } else {
                println!("Cache was already empty");
            }
        }
    }

    Ok(())
}

/// Show cache path
pub fn path() -> Result<()> {
    println!("{}", CacheStorage::cache_dir()?.display());
    Ok(())
}
