//! One-time import of an initial user list.
//!
//! On the first page load of a browser context the storefront reads a
//! bundled `users.json` (or a remote URL) and merges it into the registry.
//! The attempt is made once: success or failure, the `shop_seeded_v1` flag
//! is set afterwards and the import never runs again. Failures are logged
//! and otherwise ignored.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::instrument;
use url::Url;

use localshop_core::SeedState;

use super::registry::{MergeSummary, UserRegistry};
use crate::config::SeedSourceConfig;
use crate::models::User;
use crate::store::{LocalStore, StoreError, keys};

/// Value written under the seed flag key.
const SEEDED_FLAG: &str = "1";

/// Errors that can occur while fetching the seed list.
#[derive(Debug, Error)]
pub enum SeedError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("seed request returned status {0}")]
    Status(u16),

    /// Reading a local seed file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload is not a JSON array of users.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Where the initial user list comes from.
pub trait SeedSource: Send + Sync {
    /// Fetch the full list of seed users.
    fn fetch(&self) -> impl Future<Output = Result<Vec<User>, SeedError>> + Send;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Seed list served over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSeedSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpSeedSource {
    /// Create a source for `url`. Without a timeout a hung request simply
    /// delays the seed flag.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(url: Url, timeout: Option<Duration>) -> Result<Self, SeedError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            url,
        })
    }
}

impl SeedSource for HttpSeedSource {
    async fn fetch(&self) -> Result<Vec<User>, SeedError> {
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(SeedError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| SeedError::Parse(e.to_string()))
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

/// Seed list bundled as a local JSON file.
#[derive(Debug, Clone)]
pub struct FileSeedSource {
    path: PathBuf,
}

impl FileSeedSource {
    /// Create a source reading `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SeedSource for FileSeedSource {
    async fn fetch(&self) -> Result<Vec<User>, SeedError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        serde_json::from_str(&content).map_err(|e| SeedError::Parse(e.to_string()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Seed source selected by configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredSeedSource {
    Http(HttpSeedSource),
    File(FileSeedSource),
}

impl ConfiguredSeedSource {
    /// Build the source described by `config`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn from_config(
        config: &SeedSourceConfig,
        timeout: Option<Duration>,
    ) -> Result<Self, SeedError> {
        Ok(match config {
            SeedSourceConfig::Url(url) => Self::Http(HttpSeedSource::new(url.clone(), timeout)?),
            SeedSourceConfig::Path(path) => Self::File(FileSeedSource::new(path.clone())),
        })
    }
}

impl SeedSource for ConfiguredSeedSource {
    async fn fetch(&self) -> Result<Vec<User>, SeedError> {
        match self {
            Self::Http(source) => source.fetch().await,
            Self::File(source) => source.fetch().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Http(source) => source.describe(),
            Self::File(source) => source.describe(),
        }
    }
}

/// What a call to [`Seeder::seed_once`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The flag was already set; nothing was fetched.
    AlreadySeeded,
    /// The list was fetched and merged.
    Merged(MergeSummary),
    /// Fetching or merging failed; the flag was set anyway.
    Failed,
}

/// Runs the one-time seed import.
#[derive(Debug, Clone)]
pub struct Seeder {
    store: LocalStore,
    registry: UserRegistry,
}

impl Seeder {
    /// Create a seeder merging into `registry`.
    #[must_use]
    pub const fn new(store: LocalStore, registry: UserRegistry) -> Self {
        Self { store, registry }
    }

    /// Whether the import has already run in this browser context.
    #[must_use]
    pub fn state(&self) -> SeedState {
        if self.store.contains(keys::SEEDED) {
            SeedState::Seeded
        } else {
            SeedState::Pending
        }
    }

    /// Import the seed list unless it has been imported before.
    ///
    /// Remote users whose email is already registered are skipped; local
    /// users are never overwritten. Fetch and merge failures are not
    /// returned: they are logged and the flag is set so the import is not
    /// retried.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` only if the seed flag itself cannot be written.
    #[instrument(skip_all, fields(source = %source.describe()))]
    pub async fn seed_once<S: SeedSource>(&self, source: &S) -> Result<SeedOutcome, StoreError> {
        if self.state() == SeedState::Seeded {
            tracing::debug!("seed already imported");
            return Ok(SeedOutcome::AlreadySeeded);
        }

        let outcome = match source.fetch().await {
            Ok(remote) => match self.registry.merge_remote(remote) {
                Ok(summary) => {
                    tracing::info!(
                        added = summary.added,
                        skipped = summary.skipped,
                        "seed users merged"
                    );
                    SeedOutcome::Merged(summary)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to save seed users");
                    SeedOutcome::Failed
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "seed fetch failed, not retrying");
                SeedOutcome::Failed
            }
        };

        self.store.write_raw(keys::SEEDED, SEEDED_FLAG)?;
        Ok(outcome)
    }
}
