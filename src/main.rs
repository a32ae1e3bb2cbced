//! tldr - Show simplified command reference pages from a local cache

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(&cli);
    cli::run(cli)
}
