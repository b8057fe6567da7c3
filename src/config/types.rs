use serde::{Deserialize, Serialize};
use anyhow::{Result, Context};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::ui::i18n::Locale;

/// Default DexScreener API host
pub const DEFAULT_API_URL: &str = "https://api.dexscreener.com";

/// Page size used by the search store
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Configuration for the pair search client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// DexScreener API base URL
    pub api_url: String,
    /// Number of pairs shown per page
    pub page_size: usize,
    /// How long a cached search stays fresh (in seconds)
    pub stale_time_seconds: u64,
    /// Additional attempts after a failed fetch
    pub fetch_retries: u32,
    /// Base delay between retries (in milliseconds)
    pub retry_base_delay_ms: u64,
    /// HTTP request timeout (in seconds), none when unset
    pub request_timeout_seconds: Option<u64>,
    /// File holding the persisted theme preference
    pub theme_file: PathBuf,
    /// Language used for all displayed strings
    pub locale: Locale,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            stale_time_seconds: 30,
            fetch_retries: 2,
            retry_base_delay_ms: 1000,
            request_timeout_seconds: None,
            theme_file: default_theme_file(),
            locale: Locale::En,
        }
    }
}

/// `~/.config/dex-pair-search/theme`, or `./.dex-pair-search-theme` without a home directory
fn default_theme_file() -> PathBuf {
    match env::var_os("HOME") {
        Some(home) => PathBuf::from(home)
            .join(".config")
            .join("dex-pair-search")
            .join("theme"),
        None => PathBuf::from(".dex-pair-search-theme"),
    }
}

/// Loads configuration from environment variables, falling back to default values
pub fn load_config() -> Result<Config> {
    load_config_from(|key| env::var(key).ok())
}

/// Builds the configuration from `lookup`; a set but unparsable value is an error
pub fn load_config_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
    let mut config = Config::default();

    if let Some(api_url) = lookup("DEXSCREENER_API_URL") {
        config.api_url = api_url.trim_end_matches('/').to_string();
    }

    if let Some(value) = parse_var::<usize>(&lookup, "PAGE_SIZE")? {
        if value == 0 {
            anyhow::bail!("PAGE_SIZE must be greater than zero");
        }
        config.page_size = value;
    }

    if let Some(value) = parse_var::<u64>(&lookup, "STALE_TIME_SECONDS")? {
        config.stale_time_seconds = value;
    }

    if let Some(value) = parse_var::<u32>(&lookup, "FETCH_RETRIES")? {
        config.fetch_retries = value;
    }

    if let Some(value) = parse_var::<u64>(&lookup, "RETRY_BASE_DELAY_MS")? {
        config.retry_base_delay_ms = value;
    }

    if let Some(value) = parse_var::<u64>(&lookup, "REQUEST_TIMEOUT_SECONDS")? {
        config.request_timeout_seconds = Some(value);
    }

    if let Some(theme_file) = lookup("THEME_FILE") {
        config.theme_file = PathBuf::from(theme_file);
    }

    if let Some(locale) = parse_var::<Locale>(&lookup, "LOCALE")? {
        config.locale = locale;
    }

    Ok(config)
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Invalid {}: {}", key, raw)),
        None => Ok(None),
    }
}
