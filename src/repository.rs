//! Page repository - The single entry point used by the CLI
//!
//! Resolves the language and platform search order once at construction,
//! then delegates freshness to [`CacheStore`] and queries to [`PageLookup`].
//! Looking up a page never triggers a refresh on its own.

use std::time::Duration;
use tracing::debug;

use crate::cache::config::CacheConfig;
use crate::cache::fetch::Fetch;
use crate::cache::store::CacheStore;
use crate::error::Result;
use crate::lang::{resolve_locale, Locale, DEFAULT_LANGUAGE};
use crate::pages::lookup::PageLookup;
use crate::pages::model::Page;
use crate::pages::platform::platform_dirs;

pub struct PageRepository {
    store: CacheStore,
    lookup: PageLookup,
    platforms: Vec<String>,
    languages: Vec<String>,
}

impl PageRepository {
    /// Repository downloading over HTTP
    pub fn new(config: CacheConfig, locale: &Locale) -> Result<Self> {
        let languages = resolve_locale(config.language(), locale);
        let platforms = platform_dirs(config.platform());
        let lookup = lookup_for(&config);
        let store = CacheStore::with_http(config)?;
        Ok(Self::assemble(store, lookup, platforms, languages))
    }

    /// Repository downloading through a caller-supplied transport
    pub fn with_fetcher(config: CacheConfig, locale: &Locale, fetcher: Box<dyn Fetch>) -> Self {
        let languages = resolve_locale(config.language(), locale);
        let platforms = platform_dirs(config.platform());
        let lookup = lookup_for(&config);
        let store = CacheStore::new(config, fetcher);
        Self::assemble(store, lookup, platforms, languages)
    }

    fn assemble(
        store: CacheStore,
        lookup: PageLookup,
        platforms: Vec<String>,
        languages: Vec<String>,
    ) -> Self {
        debug!(?platforms, ?languages, "resolved page search order");
        Self {
            store,
            lookup,
            platforms,
            languages,
        }
    }

    /// Populate the cache if it is empty or an update was forced
    ///
    /// Returns whether the cache was refreshed.
    pub fn on_initialize(&self) -> Result<bool> {
        self.store.on_initialize()
    }

    /// Find the page for a command given as tokens, e.g. `["git", "checkout"]`
    pub fn find_page<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Page> {
        self.lookup.find(tokens, &self.platforms, &self.languages)
    }

    /// Refresh the cache now, regardless of its age
    pub fn update(&self) -> Result<()> {
        self.store.refresh()
    }

    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.store.is_expired(ttl)
    }

    /// Page names (file stems such as `git-checkout`) for the configured platforms and languages
    pub fn list_pages(&self) -> Vec<String> {
        let mut languages = self.languages.clone();
        if !languages.iter().any(|l| l == DEFAULT_LANGUAGE) {
            languages.push(DEFAULT_LANGUAGE.to_string());
        }
        self.lookup.list(&self.platforms, &languages)
    }

    pub fn config(&self) -> &CacheConfig {
        self.store.config()
    }

    pub fn platforms(&self) -> &[String] {
        &self.platforms
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }
}

fn lookup_for(config: &CacheConfig) -> PageLookup {
    PageLookup::new(
        config.root(),
        config.page_prefix(),
        config.page_extension(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::fetch::testing::{zip_archive, StaticFetcher};
    use std::path::Path;
    use tempfile::tempdir;

    const ARCHIVE_URL: &str = "https://example.com/tldr.zip";
    const INDEX_URL: &str = "https://example.com/index.json";

    fn fetcher() -> StaticFetcher {
        StaticFetcher::default()
            .with(INDEX_URL, b"{}".to_vec())
            .with(
                ARCHIVE_URL,
                zip_archive(&[
                    ("pages/common/lsof.md", "# lsof"),
                    ("pages/common/git-checkout.md", "# git checkout"),
                    ("pages.nl/common/lsof.md", "# lsof (nl)"),
                    ("pages/sunos/prstat.md", "# prstat"),
                ]),
            )
    }

    fn repository(root: &Path, language: Option<&str>, platform: Option<&str>) -> PageRepository {
        let config = CacheConfig::builder(root)
            .archive_url(ARCHIVE_URL)
            .index_url(INDEX_URL)
            .language(language.map(str::to_string))
            .platform(platform.map(str::to_string))
            .build()
            .unwrap();
        PageRepository::with_fetcher(config, &Locale::new("en_US.UTF-8", ""), Box::new(fetcher()))
    }

    #[test]
    fn test_initialize_then_find() {
        let temp = tempdir().unwrap();
        let repo = repository(&temp.path().join(".tldr"), None, None);
        assert!(repo.on_initialize().unwrap());
        assert!(!repo.on_initialize().unwrap());

        let page = repo.find_page(&["lsof"]).unwrap();
        assert_eq!(page.command_name, "lsof");
        assert_eq!(page.language, "en");

        let page = repo.find_page(&["git", "checkout"]).unwrap();
        assert_eq!(page.command_name, "git checkout");

        let err = repo.find_page(&["lsofaaaaaaaaaaaaaaa"]).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_language_override() {
        let temp = tempdir().unwrap();
        let repo = repository(temp.path(), Some("nl"), None);
        assert_eq!(repo.languages(), ["nl"]);
        repo.on_initialize().unwrap();

        let page = repo.find_page(&["lsof"]).unwrap();
        assert_eq!(page.language, "nl");
        // Only the overriding language is searched
        assert!(repo.find_page(&["git", "checkout"]).is_err());
    }

    #[test]
    fn test_platform_override() {
        let temp = tempdir().unwrap();
        let repo = repository(temp.path(), None, Some("sunos"));
        assert_eq!(repo.platforms(), ["sunos", "common"]);
        repo.on_initialize().unwrap();

        let page = repo.find_page(&["prstat"]).unwrap();
        assert_eq!(page.platform, "sunos");
    }

    #[test]
    fn test_expiry_and_update() {
        let temp = tempdir().unwrap();
        let repo = repository(temp.path(), None, None);
        assert!(repo.is_expired(Duration::from_secs(3600)));

        repo.update().unwrap();
        assert!(!repo.is_expired(Duration::from_secs(3600)));
        assert!(repo.is_expired(Duration::ZERO));
    }

    #[test]
    fn test_list_pages_includes_base_language() {
        let temp = tempdir().unwrap();
        let repo = repository(temp.path(), Some("nl"), Some("linux"));
        repo.on_initialize().unwrap();

        assert_eq!(repo.list_pages(), vec!["git-checkout", "lsof"]);
    }
}
