//! tldr-cache - A locally cached command-reference page client
//!
//! tldr-cache provides:
//! - A page cache refreshed from a remote zip archive, with TTL-based staleness
//! - Language preference resolution from `LANG` / `LANGUAGE`
//! - Page lookup by platform, language and command name

pub mod cache;
pub mod core;
pub mod error;
pub mod lang;
pub mod pages;
pub mod repository;

pub use cache::config::CacheConfig;
pub use cache::fetch::{Fetch, HttpFetcher};
pub use error::{Result, TldrError};
pub use lang::Locale;
pub use pages::model::Page;
pub use repository::PageRepository;
