//! Refresh marker stored next to the extracted pages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, TldrError};

/// Marker file written after every successful refresh
pub const META_FILE: &str = "cache-meta.json";

/// Cache metadata stored in `<root>/cache-meta.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheMeta {
    /// Version of the client that wrote the cache
    pub cache_version: String,

    /// Where the archive was downloaded from
    pub archive_url: String,

    /// xxh3 digest of the downloaded archive
    pub archive_hash: String,

    /// When the refresh completed
    pub generated_at: DateTime<Utc>,
}

impl CacheMeta {
    pub fn new(archive_url: &str, archive_hash: &str) -> Self {
        Self {
            cache_version: env!("CARGO_PKG_VERSION").to_string(),
            archive_url: archive_url.to_string(),
            archive_hash: archive_hash.to_string(),
            generated_at: Utc::now(),
        }
    }
}

/// Write cache metadata
pub fn write_meta(root: &Path, meta: &CacheMeta) -> Result<()> {
    let path = root.join(META_FILE);
    let json = serde_json::to_string_pretty(meta)
        .map_err(|e| TldrError::io(&path, std::io::Error::other(e)))?;
    fs::write(&path, json).map_err(|e| TldrError::io(&path, e))
}

/// Read cache metadata; `None` when absent or unreadable
pub fn read_meta(root: &Path) -> Option<CacheMeta> {
    let content = fs::read_to_string(root.join(META_FILE)).ok()?;
    serde_json::from_str(&content).ok()
}
