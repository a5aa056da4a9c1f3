//! Command-line interface parsing for mangalag
//!
//! Flags can also be given through `MANGALAG_*` environment variables. Parsed
//! arguments are validated and turned into a `StartupConfig`.

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::{ReadingListConfig, DEFAULT_BASE_URL, DEFAULT_CACHE_KEY};

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// The username is empty or only whitespace
    #[error("Username must not be empty")]
    EmptyUsername,

    /// The base URL is not an http(s) URL
    #[error("Invalid base URL: '{0}'. Expected an http:// or https:// URL")]
    InvalidBaseUrl(String),
}

/// mangalag - See how many chapters behind you are on your reading list
#[derive(Parser, Debug)]
#[command(name = "mangalag")]
#[command(about = "How many chapters behind is your manga reading list")]
#[command(version)]
pub struct Cli {
    /// User whose reading list is fetched
    #[arg(short, long, env = "MANGALAG_USERNAME")]
    pub username: String,

    /// Base URL of the reading-list aggregation API
    #[arg(long, env = "MANGALAG_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Directory for the cached list (default: XDG cache dir)
    #[arg(long, env = "MANGALAG_CACHE_DIR", value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Name of the cache entry
    #[arg(long, env = "MANGALAG_CACHE_KEY", default_value = DEFAULT_CACHE_KEY)]
    pub cache_key: String,

    /// Print the list to stdout instead of opening the terminal UI
    #[arg(long)]
    pub print: bool,

    /// Refresh from the API on startup even if a cached list exists
    #[arg(long)]
    pub refresh: bool,

    /// Discard the cached list before refreshing (implies --refresh)
    #[arg(long)]
    pub clear: bool,

    /// Log file (default: mangalag.log in the cache dir; stderr with --print)
    #[arg(long, env = "MANGALAG_LOG_FILE", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// How the list is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Interactive terminal UI
    #[default]
    Tui,
    /// One line per entry on stdout
    Print,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Pipeline configuration
    pub reading_list: ReadingListConfig,
    /// Presentation mode
    pub mode: OutputMode,
    /// Whether to refresh even when the cache is warm
    pub refresh_on_start: bool,
    /// Whether the startup refresh discards the cache first
    pub force_clear: bool,
    /// Explicit log file location
    pub log_file: Option<PathBuf>,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if the username or base URL is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let username = cli.username.trim();
        if username.is_empty() {
            return Err(CliError::EmptyUsername);
        }

        let base_url = cli.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CliError::InvalidBaseUrl(cli.base_url.clone()));
        }

        let mut reading_list = ReadingListConfig::new(username)
            .with_base_url(base_url)
            .with_cache_key(cli.cache_key.clone());
        if let Some(dir) = &cli.cache_dir {
            reading_list = reading_list.with_cache_dir(dir.clone());
        }

        Ok(StartupConfig {
            reading_list,
            mode: if cli.print {
                OutputMode::Print
            } else {
                OutputMode::Tui
            },
            refresh_on_start: cli.refresh || cli.clear,
            force_clear: cli.clear,
            log_file: cli.log_file.clone(),
        })
    }
}
