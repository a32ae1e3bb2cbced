//! Path helpers for the on-disk page tree
//!
//! The archive stores base-language pages under `<prefix>/<platform>/` and
//! every other language under `<prefix>.<lang>/<platform>/`.

use directories::BaseDirs;
use std::path::{Path, PathBuf};

use crate::lang::DEFAULT_LANGUAGE;

/// Name of the cache directory created under the home directory
pub const CACHE_DIR_NAME: &str = ".tldr";

/// Default cache root: `~/.tldr`, or the temp dir when no home is known
pub fn default_cache_dir() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(std::env::temp_dir)
        .join(CACHE_DIR_NAME)
}

/// Directory holding the pages of one language
pub fn language_dir(prefix: &str, language: &str) -> String {
    if language == DEFAULT_LANGUAGE {
        prefix.to_string()
    } else {
        format!("{}.{}", prefix, language)
    }
}

/// File name of a (possibly multi-word) command page
pub fn page_file_name(command: &str, extension: &str) -> String {
    format!("{}.{}", command.replace(' ', "-"), extension)
}

/// Full path of a page inside the cache root
pub fn page_path(
    root: &Path,
    prefix: &str,
    platform: &str,
    language: &str,
    command: &str,
    extension: &str,
) -> PathBuf {
    root.join(language_dir(prefix, language))
        .join(platform)
        .join(page_file_name(command, extension))
}

/// Last path segment of a URL, used as the local file name of a download
pub fn url_basename(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    path.rsplit('/').next().filter(|name| !name.is_empty())
}
