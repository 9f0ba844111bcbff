//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOP_STORE_PATH` - Store file location (default: `.localshop/storage.json`)
//! - `SHOP_SEED_SOURCE` - Seed user list: an `http(s)://` URL or a file path
//! - `SHOP_SEED_TIMEOUT_SECS` - Timeout for the seed request (default: none)
//! - `SHOP_REVEAL_THRESHOLD` - Visible fraction that reveals an element (default: 0.12)
//! - `SHOP_LOG_FORMAT` - `pretty` or `json` (default: pretty)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_STORE_PATH: &str = ".localshop/storage.json";
const DEFAULT_REVEAL_THRESHOLD: f64 = 0.12;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the seed user list is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSourceConfig {
    /// Fetched over HTTP.
    Url(Url),
    /// Read from a local file.
    Path(PathBuf),
}

impl FromStr for SeedSourceConfig {
    type Err = url::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Url::parse(s).map(Self::Url)
        } else {
            Ok(Self::Path(PathBuf::from(s)))
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'pretty' or 'json', got '{other}'")),
        }
    }
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopConfig {
    /// File backing the persistent store
    pub store_path: PathBuf,
    /// Optional seed user list
    pub seed_source: Option<SeedSourceConfig>,
    /// Timeout for fetching the seed list
    pub seed_timeout: Option<Duration>,
    /// Intersection ratio at which an element is revealed
    pub reveal_threshold: f64,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            seed_source: None,
            seed_timeout: None,
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            log_format: LogFormat::default(),
        }
    }
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store_path = PathBuf::from(get_env_or_default(
            &lookup,
            "SHOP_STORE_PATH",
            DEFAULT_STORE_PATH,
        ));

        let seed_source = get_optional_env(&lookup, "SHOP_SEED_SOURCE")
            .map(|value| {
                value
                    .parse::<SeedSourceConfig>()
                    .map_err(|e| invalid("SHOP_SEED_SOURCE", &e))
            })
            .transpose()?;

        let seed_timeout = get_optional_env(&lookup, "SHOP_SEED_TIMEOUT_SECS")
            .map(|value| {
                value
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| invalid("SHOP_SEED_TIMEOUT_SECS", &e))
            })
            .transpose()?;

        let reveal_threshold = get_env_or_default(
            &lookup,
            "SHOP_REVEAL_THRESHOLD",
            &DEFAULT_REVEAL_THRESHOLD.to_string(),
        )
        .parse::<f64>()
        .map_err(|e| invalid("SHOP_REVEAL_THRESHOLD", &e))?;
        if !(0.0..=1.0).contains(&reveal_threshold) {
            return Err(ConfigError::InvalidEnvVar(
                "SHOP_REVEAL_THRESHOLD".to_string(),
                "must be between 0 and 1".to_string(),
            ));
        }

        let log_format = get_env_or_default(&lookup, "SHOP_LOG_FORMAT", "pretty")
            .parse::<LogFormat>()
            .map_err(|e| invalid("SHOP_LOG_FORMAT", &e))?;

        Ok(Self {
            store_path,
            seed_source,
            seed_timeout,
            reveal_threshold,
            log_format,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional, non-empty environment variable.
fn get_optional_env(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> String {
    get_optional_env(lookup, key).unwrap_or_else(|| default.to_string())
}

fn invalid(key: &str, err: &impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), err.to_string())
}
