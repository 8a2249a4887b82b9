//! Start-up configuration.
//!
//! Native builds read the process environment, seeded from `.env` or from
//! the bundled `assets/config.env`. The browser has no process environment,
//! so web builds read the bundled file directly. The webhook endpoint is not
//! configurable; see [`crate::webhook::WEBHOOK_URL`].

use crate::i18n::{Locale, UnknownLocale};
use crate::theme::{ThemeMode, UnknownTheme};
use anyhow::{Context, Result};
use std::env;
use tracing::Level;

/// Bundled config for builds without a `.env` file (web, mobile)
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

pub const LOCALE_VAR: &str = "AZBOT_LOCALE";
pub const THEME_VAR: &str = "AZBOT_THEME";
pub const LOG_VAR: &str = "AZBOT_LOG";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Locale(#[from] UnknownLocale),

    #[error(transparent)]
    Theme(#[from] UnknownTheme),

    #[error("unknown log level '{0}'")]
    LogLevel(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub locale: Locale,
    pub theme: ThemeMode,
    pub log_level: Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            theme: ThemeMode::default(),
            log_level: Level::INFO,
        }
    }
}

impl AppConfig {
    /// Startup config for the current platform.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self> {
        load_dotenv();
        Self::from_env()
    }

    /// Startup config for the current platform.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Self> {
        Self::from_bundled()
    }

    /// Reads `assets/config.env` without touching the process environment.
    pub fn from_bundled() -> Result<Self> {
        let pairs = parse_env_lines(BUNDLED_CONFIG);
        Self::from_lookup(|key| {
            pairs
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(LOCALE_VAR) {
            config.locale = raw
                .parse::<Locale>()
                .map_err(ConfigError::from)
                .with_context(|| format!("invalid {LOCALE_VAR}"))?;
        }
        if let Some(raw) = lookup(THEME_VAR) {
            config.theme = raw
                .parse::<ThemeMode>()
                .map_err(ConfigError::from)
                .with_context(|| format!("invalid {THEME_VAR}"))?;
        }
        if let Some(raw) = lookup(LOG_VAR) {
            config.log_level = parse_level(&raw).with_context(|| format!("invalid {LOG_VAR}"))?;
        }
        Ok(config)
    }
}

fn parse_level(raw: &str) -> Result<Level, ConfigError> {
    raw.trim()
        .parse::<Level>()
        .map_err(|_| ConfigError::LogLevel(raw.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_dotenv() {
    // First try to load from .env file (desktop dev)
    if dotenvy::dotenv().is_ok() {
        return;
    }

    // Fall back to bundled config (mobile builds)
    load_bundled_config();
}

#[cfg(not(target_arch = "wasm32"))]
fn load_bundled_config() {
    for (key, value) in parse_env_lines(BUNDLED_CONFIG) {
        // Only set if not already set (allow env override)
        if env::var(key).is_err() {
            // SAFETY: We're setting env vars at startup before any threads are spawned
            unsafe {
                env::set_var(key, value);
            }
        }
    }
}

/// `KEY=VALUE` pairs, skipping blanks and `#` comments.
pub fn parse_env_lines(source: &str) -> Vec<(&str, &str)> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
        .collect()
}

/// Installs the fmt subscriber at the configured level.
pub fn init_logging(config: &AppConfig) {
    let installed = tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_target(false)
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
