//! Page lookup over the extracted page tree
//!
//! Search order, first match wins:
//! 1. the full command name, then the name with trailing words dropped
//! 2. for each name, every platform directory in order
//! 3. for each platform, every language in order
//!
//! So `git checkout --help` finds `git-checkout` on any platform or
//! language before it falls back to the `git` page.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::core::paths::{language_dir, page_path};
use crate::error::{Result, TldrError};
use crate::pages::model::Page;

/// Reads pages from a cache root laid out as `<prefix>[.<lang>]/<platform>/<name>.<ext>`
#[derive(Debug, Clone)]
pub struct PageLookup {
    root: PathBuf,
    prefix: String,
    extension: String,
}

impl PageLookup {
    pub fn new(
        root: impl Into<PathBuf>,
        prefix: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            prefix: prefix.into(),
            extension: extension.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find the best page for a command given as whitespace-separated tokens
    pub fn find<S: AsRef<str>>(
        &self,
        tokens: &[S],
        platforms: &[String],
        languages: &[String],
    ) -> Result<Page> {
        let words = normalize_tokens(tokens);
        let query = words.join(" ");

        // Page names never contain path separators or parent references
        if words.iter().any(|w| is_path_like(w)) {
            debug!(query = %query, "rejecting path-like command");
            return Err(TldrError::NotFound { command: query });
        }

        for len in (1..=words.len()).rev() {
            let command = words[..len].join(" ");
            if let Some(page) = self.find_exact(&command, platforms, languages)? {
                debug!(
                    query = %query,
                    command = %page.command_name,
                    platform = %page.platform,
                    language = %page.language,
                    "page found"
                );
                return Ok(page);
            }
        }

        debug!(query = %query, "no page found");
        Err(TldrError::NotFound { command: query })
    }

    fn find_exact(
        &self,
        command: &str,
        platforms: &[String],
        languages: &[String],
    ) -> Result<Option<Page>> {
        for platform in platforms {
            for language in languages {
                let path = page_path(
                    &self.root,
                    &self.prefix,
                    platform,
                    language,
                    command,
                    &self.extension,
                );
                trace!(path = %path.display(), "trying page");

                match fs::read_to_string(&path) {
                    Ok(content) => {
                        return Ok(Some(Page {
                            command_name: command.to_string(),
                            platform: platform.clone(),
                            language: language.clone(),
                            content,
                        }))
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                    Err(e) => return Err(TldrError::io(path, e)),
                }
            }
        }
        Ok(None)
    }

    /// Page file stems available for the given platforms and languages, sorted
    pub fn list(&self, platforms: &[String], languages: &[String]) -> Vec<String> {
        let suffix = format!(".{}", self.extension);
        let mut names = BTreeSet::new();

        for language in languages {
            for platform in platforms {
                let dir = self
                    .root
                    .join(language_dir(&self.prefix, language))
                    .join(platform);

                let entries = WalkDir::new(&dir)
                    .min_depth(1)
                    .max_depth(1)
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_file());

                for entry in entries {
                    let stem = entry
                        .file_name()
                        .to_str()
                        .and_then(|name| name.strip_suffix(&suffix));
                    if let Some(stem) = stem {
                        names.insert(stem.to_string());
                    }
                }
            }
        }

        names.into_iter().collect()
    }
}

/// Split tokens on whitespace and lowercase them
fn normalize_tokens<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    tokens
        .iter()
        .flat_map(|t| t.as_ref().split_whitespace())
        .map(str::to_lowercase)
        .collect()
}

fn is_path_like(word: &str) -> bool {
    word.contains(['/', '\\']) || word == ".." || word == "."
}
