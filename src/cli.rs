//! Command-line interface parsing for the Pokedex
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! a validated [`StartupConfig`] for the REPL.

use std::time::Duration;

use clap::Parser;
use log::LevelFilter;
use thiserror::Error;

use crate::cache::DEFAULT_CACHE_INTERVAL;
use crate::pokeapi::DEFAULT_BASE_URL;

/// Error types for CLI argument validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    /// The cache interval must be positive
    #[error("Invalid cache interval: '{0}'. The interval must be at least 1 second")]
    InvalidCacheInterval(u64),

    /// The base URL is not an http(s) URL
    #[error("Invalid base URL: '{0}'. Expected an http:// or https:// URL")]
    InvalidBaseUrl(String),
}

/// Pokedex - explore locations and catch pokemon from your terminal
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "A Pokedex REPL backed by PokeAPI")]
#[command(version)]
pub struct Cli {
    /// How long API responses stay cached, in seconds
    ///
    /// Responses are swept once per interval, so an entry lives between one
    /// and two intervals.
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_CACHE_INTERVAL.as_secs())]
    pub cache_interval: u64,

    /// Base URL of the PokeAPI v2 REST API
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    ///
    /// RUST_LOG takes precedence when set.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// Cache sweep interval and maximum entry age
    pub cache_interval: Duration,
    /// PokeAPI base URL without a trailing slash
    pub base_url: String,
    /// Default log level when RUST_LOG is not set
    pub log_level: LevelFilter,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            cache_interval: DEFAULT_CACHE_INTERVAL,
            base_url: DEFAULT_BASE_URL.to_string(),
            log_level: LevelFilter::Warn,
        }
    }
}

/// Maps the `-v` count to a log level
pub fn log_level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with validated settings
    /// * `Err(CliError)` if the interval is zero or the base URL is not http(s)
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.cache_interval == 0 {
            return Err(CliError::InvalidCacheInterval(cli.cache_interval));
        }

        let base_url = cli.base_url.trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CliError::InvalidBaseUrl(cli.base_url.clone()));
        }

        Ok(StartupConfig {
            cache_interval: Duration::from_secs(cli.cache_interval),
            base_url: base_url.to_string(),
            log_level: log_level_for(cli.verbose),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args_uses_defaults() {
        let cli = Cli::parse_from(["pokedex"]);
        assert_eq!(cli.cache_interval, 300);
        assert_eq!(cli.base_url, "https://pokeapi.co/api/v2");
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_parse_cache_interval() {
        let cli = Cli::parse_from(["pokedex", "--cache-interval", "30"]);
        assert_eq!(cli.cache_interval, 30);
    }

    #[test]
    fn test_cli_parse_rejects_non_numeric_interval() {
        let result = Cli::try_parse_from(["pokedex", "--cache-interval", "soon"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_verbose_count() {
        let cli = Cli::parse_from(["pokedex", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_startup_config_default() {
        let config = StartupConfig::default();
        assert_eq!(config.cache_interval, Duration::from_secs(300));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.log_level, LevelFilter::Warn);
    }

    #[test]
    fn test_startup_config_from_cli_no_args_matches_default() {
        let cli = Cli::parse_from(["pokedex"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config, StartupConfig::default());
    }

    #[test]
    fn test_startup_config_from_cli_zero_interval() {
        let cli = Cli::parse_from(["pokedex", "--cache-interval", "0"]);
        let err = StartupConfig::from_cli(&cli).unwrap_err();
        assert_eq!(err, CliError::InvalidCacheInterval(0));
        assert!(err.to_string().contains("Invalid cache interval"));
    }

    #[test]
    fn test_startup_config_from_cli_trims_base_url() {
        let cli = Cli::parse_from(["pokedex", "--base-url", "http://localhost:8000/api/v2/"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.base_url, "http://localhost:8000/api/v2");
    }

    #[test]
    fn test_startup_config_from_cli_invalid_base_url() {
        let cli = Cli::parse_from(["pokedex", "--base-url", "pokeapi.co"]);
        let result = StartupConfig::from_cli(&cli);
        assert_eq!(
            result.unwrap_err(),
            CliError::InvalidBaseUrl("pokeapi.co".to_string())
        );
    }

    #[test]
    fn test_log_level_for_verbosity() {
        assert_eq!(log_level_for(0), LevelFilter::Warn);
        assert_eq!(log_level_for(1), LevelFilter::Info);
        assert_eq!(log_level_for(2), LevelFilter::Debug);
        assert_eq!(log_level_for(5), LevelFilter::Trace);
    }
}
