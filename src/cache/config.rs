//! Cache configuration
//!
//! [`CacheConfig`] is immutable once built. [`CacheConfigBuilder::build`]
//! validates the root path and the remote locations before anything touches
//! the filesystem or the network.

use reqwest::Url;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::paths::url_basename;
use crate::error::{Result, TldrError};

pub const DEFAULT_ARCHIVE_URL: &str = "https://tldr.sh/assets/tldr.zip";
pub const DEFAULT_INDEX_URL: &str = "https://tldr.sh/assets/index.json";
pub const DEFAULT_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);
pub const DEFAULT_PAGE_PREFIX: &str = "pages";
pub const DEFAULT_PAGE_EXTENSION: &str = "md";

/// Where the cache lives, where it is refreshed from, and how pages are laid out
#[derive(Debug, Clone)]
pub struct CacheConfig {
    root: PathBuf,
    archive_url: String,
    index_url: String,
    archive_file: String,
    index_file: String,
    ttl: Duration,
    platform: Option<String>,
    language: Option<String>,
    force_update: bool,
    page_prefix: String,
    page_extension: String,
}

impl CacheConfig {
    pub fn builder(root: impl Into<PathBuf>) -> CacheConfigBuilder {
        CacheConfigBuilder::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn archive_url(&self) -> &str {
        &self.archive_url
    }

    pub fn index_url(&self) -> &str {
        &self.index_url
    }

    /// Local file name of the downloaded archive
    pub fn archive_file(&self) -> &str {
        &self.archive_file
    }

    /// Local file name of the downloaded index
    pub fn index_file(&self) -> &str {
        &self.index_file
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Platform requested in place of the host platform
    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    /// Language requested in place of the locale-derived list
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn force_update(&self) -> bool {
        self.force_update
    }

    pub fn page_prefix(&self) -> &str {
        &self.page_prefix
    }

    pub fn page_extension(&self) -> &str {
        &self.page_extension
    }
}

/// Builder for [`CacheConfig`]
#[derive(Debug, Clone)]
pub struct CacheConfigBuilder {
    root: PathBuf,
    archive_url: String,
    index_url: String,
    ttl: Duration,
    platform: Option<String>,
    language: Option<String>,
    force_update: bool,
    page_prefix: String,
    page_extension: String,
}

impl CacheConfigBuilder {
    fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            archive_url: DEFAULT_ARCHIVE_URL.to_string(),
            index_url: DEFAULT_INDEX_URL.to_string(),
            ttl: DEFAULT_TTL,
            platform: None,
            language: None,
            force_update: false,
            page_prefix: DEFAULT_PAGE_PREFIX.to_string(),
            page_extension: DEFAULT_PAGE_EXTENSION.to_string(),
        }
    }

    pub fn archive_url(mut self, url: impl Into<String>) -> Self {
        self.archive_url = url.into();
        self
    }

    pub fn index_url(mut self, url: impl Into<String>) -> Self {
        self.index_url = url.into();
        self
    }

    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Empty values are treated as "not set"
    pub fn platform(mut self, platform: Option<String>) -> Self {
        self.platform = platform.filter(|p| !p.trim().is_empty());
        self
    }

    /// Empty values are treated as "not set"
    pub fn language(mut self, language: Option<String>) -> Self {
        self.language = language.filter(|l| !l.trim().is_empty());
        self
    }

    pub fn force_update(mut self, force_update: bool) -> Self {
        self.force_update = force_update;
        self
    }

    pub fn page_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.page_prefix = prefix.into();
        self
    }

    pub fn page_extension(mut self, extension: impl Into<String>) -> Self {
        self.page_extension = extension.into();
        self
    }

    pub fn build(self) -> Result<CacheConfig> {
        if self.root.as_os_str().is_empty() {
            return Err(TldrError::config("cache root path is empty"));
        }
        if self.page_prefix.is_empty() || self.page_extension.is_empty() {
            return Err(TldrError::config(
                "page prefix and extension must not be empty",
            ));
        }

        let archive_file = remote_file_name(&self.archive_url)?;
        let index_file = remote_file_name(&self.index_url)?;
        if archive_file == index_file {
            return Err(TldrError::config(format!(
                "archive and index would both be stored as '{}'",
                archive_file
            )));
        }

        Ok(CacheConfig {
            root: self.root,
            archive_url: self.archive_url,
            index_url: self.index_url,
            archive_file,
            index_file,
            ttl: self.ttl,
            platform: self.platform,
            language: self.language,
            force_update: self.force_update,
            page_prefix: self.page_prefix,
            page_extension: self.page_extension,
        })
    }
}

/// Validate a remote location and derive its local file name
fn remote_file_name(url: &str) -> Result<String> {
    let parsed =
        Url::parse(url).map_err(|e| TldrError::config(format!("invalid URL '{}': {}", url, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(TldrError::config(format!(
            "unsupported URL scheme '{}' in '{}'",
            parsed.scheme(),
            url
        )));
    }

    url_basename(parsed.path())
        .map(str::to_string)
        .ok_or_else(|| TldrError::config(format!("URL '{}' does not name a file", url)))
}
