//! Cache store - Owns the on-disk cache directory
//!
//! A refresh downloads the index and the page archive into the cache root,
//! extracts the archive in place and finally writes the refresh marker.
//! A failure part-way through can leave a partially extracted tree; the
//! marker is only written once everything else succeeded.
//!
//! Concurrent refreshes of the same root from several processes are not
//! coordinated.

use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::cache::archive::extract_archive;
use crate::cache::config::CacheConfig;
use crate::cache::fetch::{Fetch, HttpFetcher};
use crate::cache::meta::{read_meta, write_meta, CacheMeta};
use crate::core::util::{get_mtime, hash_bytes, is_older_than};
use crate::error::{Result, TldrError};

pub struct CacheStore {
    config: CacheConfig,
    fetcher: Box<dyn Fetch>,
}

impl CacheStore {
    pub fn new(config: CacheConfig, fetcher: Box<dyn Fetch>) -> Self {
        Self { config, fetcher }
    }

    /// Store backed by the default HTTP transport
    pub fn with_http(config: CacheConfig) -> Result<Self> {
        Ok(Self::new(config, Box::new(HttpFetcher::try_default()?)))
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn root(&self) -> &Path {
        self.config.root()
    }

    fn archive_path(&self) -> PathBuf {
        self.root().join(self.config.archive_file())
    }

    fn index_path(&self) -> PathBuf {
        self.root().join(self.config.index_file())
    }

    /// Time of the last successful refresh
    ///
    /// Falls back to the modification time of the downloaded archive when the
    /// marker file is missing.
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        read_meta(self.root())
            .map(|meta| meta.generated_at)
            .or_else(|| get_mtime(&self.archive_path()).ok())
    }

    /// Whether the cache has ever been populated
    pub fn is_populated(&self) -> bool {
        self.root().is_dir() && self.last_refresh().is_some()
    }

    /// Whether the cache is older than `ttl`; a cache never refreshed is expired
    pub fn is_expired(&self, ttl: Duration) -> bool {
        let expired = match self.last_refresh() {
            Some(refreshed_at) => is_older_than(refreshed_at, ttl),
            None => true,
        };
        debug!(root = %self.root().display(), ?ttl, expired, "checked cache age");
        expired
    }

    /// Download the index and archive, extract the pages and mark the refresh
    pub fn refresh(&self) -> Result<()> {
        let root = self.root();
        info!(root = %root.display(), "refreshing page cache");

        ensure_root(root)?;

        let index = self.fetcher.fetch(self.config.index_url())?;
        let archive = self.fetcher.fetch(self.config.archive_url())?;

        // The archive file doubles as a fallback marker, so keep it off disk
        // until it is known to extract
        let files = extract_archive(&archive, root)?;

        write_file(&self.index_path(), &index)?;
        write_file(&self.archive_path(), &archive)?;

        let meta = CacheMeta::new(self.config.archive_url(), &hash_bytes(&archive));
        write_meta(root, &meta)?;

        info!(files, archive_hash = %meta.archive_hash, "page cache refreshed");
        Ok(())
    }

    /// Populate the cache when it has never been filled or an update is forced
    ///
    /// Returns whether a refresh ran. An existing cache is left alone
    /// regardless of its age; callers check [`CacheStore::is_expired`]
    /// themselves.
    pub fn on_initialize(&self) -> Result<bool> {
        if self.config.force_update() {
            debug!("update forced");
        } else if !self.is_populated() {
            debug!(root = %self.root().display(), "cache not populated yet");
        } else {
            return Ok(false);
        }
        self.refresh()?;
        Ok(true)
    }
}

/// Ensure the cache root exists, creating parents as needed
fn ensure_root(root: &Path) -> Result<()> {
    fs::create_dir_all(root).map_err(|e| TldrError::Config {
        message: format!("cannot create cache directory {:?}", root),
        source: Some(e),
    })
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|e| TldrError::io(path, e))
}
