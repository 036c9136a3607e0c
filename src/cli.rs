//! Command-line interface parsing for the feedcache binary
//!
//! Parses the subcommand and the optional `--store` override with clap, then
//! resolves them into a `RunConfig`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;
use url::Url;

use crate::config::FeedConfig;

/// Error types for CLI argument handling
#[derive(Debug, Error)]
pub enum CliError {
    /// No `--store` was given and no cache directory could be determined
    #[error("Could not determine a cache directory; pass --store <PATH>")]
    NoCacheDir,
}

/// feedcache - fetch an image feed and manage its local cache
#[derive(Parser, Debug)]
#[command(name = "feedcache")]
#[command(about = "Fetch an image feed and manage its local cache")]
#[command(version)]
pub struct Cli {
    /// Cache file to use instead of the one in the user cache directory
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the cached feed if it is still fresh
    Load,
    /// Fetch the feed and cache it, falling back to the cache if the fetch fails
    Refresh {
        /// Feed server endpoint
        #[arg(long, value_name = "URL")]
        url: Url,
    },
    /// Delete the cached feed if it is stale or unreadable
    Validate,
    /// Delete the cached feed
    Clear,
}

/// Everything the binary needs to run one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub command: Command,
    pub feed: FeedConfig,
}

impl RunConfig {
    /// Creates a RunConfig from parsed CLI arguments, using the user cache
    /// directory unless `--store` was given.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        Self::resolve(cli, FeedConfig::new())
    }

    fn resolve(cli: &Cli, default: Option<FeedConfig>) -> Result<Self, CliError> {
        let feed = match (&cli.store, default) {
            (Some(path), _) => FeedConfig::with_store_path(path.clone()),
            (None, Some(default)) => default,
            (None, None) => return Err(CliError::NoCacheDir),
        };

        Ok(Self {
            command: cli.command.clone(),
            feed,
        })
    }
}
