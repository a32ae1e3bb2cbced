//! CLI module - Command-line interface definitions and handlers

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tldr_cache::cache::config::{DEFAULT_ARCHIVE_URL, DEFAULT_INDEX_URL};
use tldr_cache::core::paths::default_cache_dir;
use tldr_cache::{CacheConfig, Locale, PageRepository, TldrError};

/// tldr - simplified, community-driven command reference pages.
#[derive(Parser, Debug)]
#[command(name = "tldr")]
#[command(
    author,
    version,
    about,
    long_about = r#"tldr prints a short reference page for a command.

Pages are served from a local cache that is downloaded on first use and
refreshed once it is older than the configured TTL.

Examples:
    tldr tar
    tldr git checkout
    tldr --platform osx brew
    tldr --language ja lsof
    tldr --update
"#
)]
pub struct Cli {
    /// Command to show the page for (several words for sub-commands).
    #[arg(value_name = "COMMAND", required_unless_present_any = ["list", "update"])]
    pub command: Vec<String>,

    /// Cache directory.
    #[arg(
        long,
        env = "TLDR_CACHE_DIR",
        value_name = "DIR",
        long_help = "Directory holding the downloaded page archive and extracted pages.\n\n\
Defaults to ~/.tldr."
    )]
    pub cache_dir: Option<PathBuf>,

    /// Language to show pages in, instead of the one derived from LANG/LANGUAGE.
    #[arg(short = 'L', long, env = "TLDR_LANGUAGE", value_name = "CODE")]
    pub language: Option<String>,

    /// Platform to show pages for (linux, osx, windows, ...).
    #[arg(
        short,
        long,
        value_name = "PLATFORM",
        long_help = "Platform to show pages for, e.g. linux, osx, windows, android, sunos.\n\n\
Defaults to the current operating system. Pages under 'common' are always searched last."
    )]
    pub platform: Option<String>,

    /// Refresh the page cache before looking anything up.
    #[arg(short, long)]
    pub update: bool,

    /// List the pages available for the current platform.
    #[arg(short, long)]
    pub list: bool,

    /// Hours before the cache is refreshed automatically.
    #[arg(long, env = "TLDR_CACHE_TTL_HOURS", default_value_t = 168, value_name = "HOURS")]
    pub ttl_hours: u64,

    /// Page archive location.
    #[arg(long, env = "TLDR_ARCHIVE_URL", default_value = DEFAULT_ARCHIVE_URL, hide = true)]
    pub archive_url: String,

    /// Page index location.
    #[arg(long, env = "TLDR_INDEX_URL", default_value = DEFAULT_INDEX_URL, hide = true)]
    pub index_url: String,

    /// Quiet mode (errors only).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (cache and lookup diagnostics).
    #[arg(short, long)]
    pub verbose: bool,
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the flags
pub fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn run(cli: Cli) -> Result<()> {
    let ttl = Duration::from_secs(cli.ttl_hours.saturating_mul(60 * 60));
    let config = CacheConfig::builder(cli.cache_dir.unwrap_or_else(default_cache_dir))
        .archive_url(cli.archive_url)
        .index_url(cli.index_url)
        .ttl(ttl)
        .language(cli.language)
        .platform(cli.platform)
        .force_update(cli.update)
        .build()
        .context("Invalid cache configuration")?;

    let repo = PageRepository::new(config, &Locale::from_env())?;
    let refreshed = repo
        .on_initialize()
        .context("Failed to initialize the page cache")?;

    if !refreshed && repo.is_expired(ttl) {
        info!("page cache is stale, refreshing");
        if let Err(e) = repo.update() {
            warn!("failed to refresh stale page cache, using cached pages: {}", e);
        }
    }

    if cli.list {
        for name in repo.list_pages() {
            println!("{}", name);
        }
        return Ok(());
    }

    if cli.command.is_empty() {
        info!(root = %repo.config().root().display(), "page cache updated");
        return Ok(());
    }

    match repo.find_page(cli.command.as_slice()) {
        Ok(page) => {
            print!("{}", page.content);
            if !page.content.ends_with('\n') {
                println!();
            }
            Ok(())
        }
        Err(TldrError::NotFound { command }) => bail!(
            "No page found for '{}'. Run with --update to refresh the cache.",
            command
        ),
        Err(e) => Err(e.into()),
    }
}
