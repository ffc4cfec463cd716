// src/fetch/cache.rs
// =============================================================================
// On-disk response cache keyed by URL.
//
// Layout: one JSON file per URL under the cache directory. The file name is
// the SHA-256 of the URL, so any URL maps to a safe, fixed-length name.
// Each entry stores the URL it was fetched from, when, and the body text.
//
// There is no expiry. The only invalidation is clear(), which wipes every
// entry (the --clear-cache flag).
// =============================================================================

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::{Result, ScraperError};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    url: String,
    fetched_at: DateTime<Utc>,
    body: String,
}

#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    /// Opens (and creates if needed) a cache rooted at `dir`
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| ScraperError::io(&dir, e))?;
        debug!("Response cache at {}", dir.display());
        Ok(Self { dir })
    }

    /// Returns the cached body for `url`, if any
    ///
    /// Unreadable or foreign entries count as a miss.
    pub async fn get(&self, url: &str) -> Option<String> {
        let path = self.entry_path(url);
        let raw = tokio::fs::read(&path).await.ok()?;

        match serde_json::from_slice::<CacheEntry>(&raw) {
            Ok(entry) if entry.url == url => {
                debug!("Cache hit for {} (fetched {})", url, entry.fetched_at);
                Some(entry.body)
            }
            Ok(entry) => {
                warn!("Cache entry {} belongs to {}, ignoring", path.display(), entry.url);
                None
            }
            Err(e) => {
                warn!("Corrupt cache entry {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Stores `body` as the response for `url`
    pub async fn put(&self, url: &str, body: &str) -> Result<()> {
        let entry = CacheEntry {
            url: url.to_string(),
            fetched_at: Utc::now(),
            body: body.to_string(),
        };
        let json = serde_json::to_vec(&entry)
            .map_err(|e| ScraperError::io(&self.dir, std::io::Error::other(e)))?;

        // Write beside the final name, then rename, so a crash never leaves half an entry
        let path = self.entry_path(url);
        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| ScraperError::io(&tmp, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| ScraperError::io(&path, e))?;
        Ok(())
    }

    /// Removes every entry; returns how many were deleted
    pub async fn clear(&self) -> Result<usize> {
        let mut removed = 0;
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| ScraperError::io(&self.dir, e))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ScraperError::io(&self.dir, e))?
        {
            let path = entry.path();
            if path.is_file() {
                tokio::fs::remove_file(&path)
                    .await
                    .map_err(|e| ScraperError::io(&path, e))?;
                removed += 1;
            }
        }

        Ok(removed)
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        self.dir.join(format!("{}.json", cache_key(url)))
    }
}

/// Hex SHA-256 of the URL
fn cache_key(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why hash the URL instead of using it as the file name?
//    - URLs contain '/', '?' and ':' which are not safe in file names
//    - SHA-256 gives a fixed 64-character hex name for any URL
//
// 2. Why store the URL inside the entry as well?
//    - get() compares it, so a stray file under the same name is never
//      returned as the wrong page
//
// 3. Why does get() return Option and not Result?
//    - A cache that cannot be read is just a miss; the page gets fetched again
//    - Only writes report errors, since a failed put() means the disk is in trouble
//
// 4. What does with_extension("tmp") + rename give us?
//    - rename() replaces the old entry in one step on the same filesystem
//    - A reader sees either the old entry or the new one, never a partial write
// -----------------------------------------------------------------------------
