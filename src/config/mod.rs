//! Configuration management.
//!
//! Settings come from defaults, an optional TOML file and `SHELF_SCOUT__*`
//! environment variables, in increasing priority.
//!
//! # Configuration File Format
//!
//! ```toml
//! [api_keys]
//! google_books = "your-google-key"
//! nytimes = "your-nyt-key"
//!
//! [endpoints]
//! google_books = "https://www.googleapis.com/books/v1/volumes"
//! nytimes_article_search = "https://api.nytimes.com/svc/search/v2/articlesearch.json"
//!
//! [search]
//! max_results = 30
//! throttle_interval_ms = 200
//!
//! [http]
//! timeout_secs = 30
//! connect_timeout_secs = 10
//!
//! [logging]
//! level = "info"
//! json = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default Google Books volumes endpoint
pub const GOOGLE_BOOKS_BASE_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// Default NYTimes Article Search endpoint
pub const NYTIMES_ARTICLE_SEARCH_URL: &str =
    "https://api.nytimes.com/svc/search/v2/articlesearch.json";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API keys for the providers
    #[serde(default)]
    pub api_keys: ApiKeys,

    /// Provider endpoints
    #[serde(default)]
    pub endpoints: Endpoints,

    /// Search tuning
    #[serde(default)]
    pub search: SearchConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Write the configuration as TOML
    pub fn save(&self, path: &Path) -> Result<(), ConfigFileError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// API keys for external services
///
/// A missing key is not an error; the provider call goes out with an empty key
/// and the provider's own auth failure comes back as an ordinary API error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeys {
    /// Google Books API key
    #[serde(default)]
    pub google_books: Option<String>,

    /// NYTimes Article Search API key
    #[serde(default)]
    pub nytimes: Option<String>,
}

impl Default for ApiKeys {
    fn default() -> Self {
        Self {
            google_books: std::env::var("GOOGLE_BOOKS_API_KEY").ok(),
            nytimes: std::env::var("NYTIMES_API_KEY").ok(),
        }
    }
}

/// Provider endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default = "default_google_books")]
    pub google_books: String,

    #[serde(default = "default_nytimes")]
    pub nytimes_article_search: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            google_books: default_google_books(),
            nytimes_article_search: default_nytimes(),
        }
    }
}

fn default_google_books() -> String {
    GOOGLE_BOOKS_BASE_URL.to_string()
}

fn default_nytimes() -> String {
    NYTIMES_ARTICLE_SEARCH_URL.to_string()
}

/// Search tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Page size for catalog searches
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Minimum time between catalog searches while typing
    #[serde(default = "default_throttle_interval_ms")]
    pub throttle_interval_ms: u64,
}

impl SearchConfig {
    pub fn throttle_interval(&self) -> Duration {
        Duration::from_millis(self.throttle_interval_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            throttle_interval_ms: default_throttle_interval_ms(),
        }
    }
}

fn default_max_results() -> usize {
    30
}

fn default_throttle_interval_ms() -> u64 {
    200
}

/// HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level for this crate's targets when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Errors writing a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Load configuration from a file, with `SHELF_SCOUT__SECTION__KEY` env overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    load_layered(Some(path))
}

/// Layer defaults, an optional file and `SHELF_SCOUT__*` env overrides
fn load_layered(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix("SHELF_SCOUT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut loaded: Config = settings.try_deserialize()?;

    // Keys absent from the file still come from the plain provider env vars
    let env_keys = ApiKeys::default();
    if loaded.api_keys.google_books.is_none() {
        loaded.api_keys.google_books = env_keys.google_books;
    }
    if loaded.api_keys.nytimes.is_none() {
        loaded.api_keys.nytimes = env_keys.nytimes;
    }

    Ok(loaded)
}

/// Find a configuration file in the default locations
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("shelf-scout.toml");
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("shelf-scout").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Get the configuration from the default file location (if any), defaults and env vars
pub fn get_config() -> Config {
    let path = find_config_file();
    match load_layered(path.as_deref()) {
        Ok(config) => {
            if let Some(path) = &path {
                tracing::debug!("Loaded config file: {}", path.display());
            }
            config
        }
        Err(e) => {
            tracing::warn!("Ignoring invalid configuration: {}", e);
            Config::default()
        }
    }
}
