//! # Application Configuration Module
//!
//! This module defines the runtime configuration for the bot: where the recipe
//! catalog comes from, how free-text ingredients are resolved, and how many
//! result cards are sent per reply.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::inventory_parser::ResolverConfig;

// Constants for application configuration
pub const DEFAULT_MAX_RESULTS: usize = 5;
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 1;
pub const DEFAULT_LANGUAGE: &str = "en";

/// Configuration structure for the bot process
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Telegram bot token; only the binary needs it
    pub bot_token: Option<String>,
    /// JSON catalog to load instead of the bundled one
    pub catalog_path: Option<PathBuf>,
    /// Maximum number of recipe cards per reply
    pub max_results: usize,
    /// Language used when the user's client does not report one
    pub default_language: String,
    /// Free-text ingredient resolution settings
    pub resolver: ResolverConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            catalog_path: None,
            max_results: DEFAULT_MAX_RESULTS,
            default_language: DEFAULT_LANGUAGE.to_string(),
            resolver: ResolverConfig::default().with_max_edit_distance(DEFAULT_MAX_EDIT_DISTANCE),
        }
    }
}

impl AppConfig {
    /// Build configuration from environment variables, falling back to defaults
    ///
    /// Reads `TELEGRAM_BOT_TOKEN`, `CATALOG_PATH`, `MAX_RESULTS`,
    /// `RESOLVER_MAX_EDIT_DISTANCE` and `DEFAULT_LANGUAGE`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.bot_token = lookup("TELEGRAM_BOT_TOKEN").filter(|t| !t.trim().is_empty());
        config.catalog_path = lookup("CATALOG_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        if let Some(raw) = lookup("MAX_RESULTS") {
            config.max_results = raw
                .trim()
                .parse()
                .with_context(|| format!("MAX_RESULTS must be a positive integer, got '{raw}'"))?;
            if config.max_results == 0 {
                anyhow::bail!("MAX_RESULTS must be at least 1");
            }
        }

        if let Some(raw) = lookup("RESOLVER_MAX_EDIT_DISTANCE") {
            let distance: usize = raw.trim().parse().with_context(|| {
                format!("RESOLVER_MAX_EDIT_DISTANCE must be an integer, got '{raw}'")
            })?;
            config.resolver = config.resolver.with_max_edit_distance(distance);
        }

        if let Some(language) = lookup("DEFAULT_LANGUAGE").filter(|l| !l.trim().is_empty()) {
            config.default_language = language.trim().to_lowercase();
        }

        Ok(config)
    }
}
