//! Common utilities

use chrono::{DateTime, Utc};
use std::path::Path;
use std::time::Duration;
use xxhash_rust::xxh3::xxh3_64;

/// Compute the xxh3 digest of bytes as hex
pub fn hash_bytes(data: &[u8]) -> String {
    format!("{:016x}", xxh3_64(data))
}

/// Get file modification time
pub fn get_mtime(path: &Path) -> std::io::Result<DateTime<Utc>> {
    let metadata = std::fs::metadata(path)?;
    Ok(metadata.modified()?.into())
}

/// Whether `since` lies further than `ttl` in the past
///
/// A zero TTL is always exceeded.
pub fn is_older_than(since: DateTime<Utc>, ttl: Duration) -> bool {
    if ttl.is_zero() {
        return true;
    }
    let age = Utc::now().signed_duration_since(since);
    match chrono::Duration::from_std(ttl) {
        Ok(ttl) => age > ttl,
        // TTL beyond chrono's range never expires
        Err(_) => false,
    }
}
