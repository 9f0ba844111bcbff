//! Scenario tests for the Localshop storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p localshop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `accounts` - Registration, authentication and the session
//! - `carts_and_messages` - Cart membership and the contact log
//! - `seeding` - One-time seed import
//! - `persistence` - File-backed store across reopen and corruption
//! - `page_flow` - UI commands and page bootstrap end to end

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use localshop_storefront::config::ShopConfig;
use localshop_storefront::models::User;
use localshop_storefront::services::{SeedError, SeedSource};
use localshop_storefront::state::AppState;
use localshop_storefront::store::StoreError;

/// A storefront backed by a store file in a temporary directory.
#[derive(Debug)]
pub struct TestContext {
    dir: TempDir,
    pub state: AppState,
}

impl TestContext {
    /// Create a context with an empty store file.
    ///
    /// # Errors
    ///
    /// Returns error if the temporary directory cannot be created.
    pub fn new() -> std::io::Result<Self> {
        let dir = tempfile::tempdir()?;
        let state = open_state(&dir.path().join("storage.json"))?;
        Ok(Self { dir, state })
    }

    /// Location of the store file.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.dir.path().join("storage.json")
    }

    /// Open a second state over the same file, as a new page load would.
    ///
    /// # Errors
    ///
    /// Returns error if the store file cannot be read.
    pub fn reopen(&self) -> std::io::Result<AppState> {
        open_state(&self.store_path())
    }
}

fn open_state(path: &Path) -> std::io::Result<AppState> {
    let config = ShopConfig {
        store_path: path.to_path_buf(),
        ..ShopConfig::default()
    };
    AppState::open(config).map_err(|e| match e {
        StoreError::Io(e) => e,
        other => std::io::Error::other(other.to_string()),
    })
}

/// Seed source serving a fixed JSON payload.
#[derive(Debug, Clone)]
pub struct JsonSeedSource(pub serde_json::Value);

impl SeedSource for JsonSeedSource {
    async fn fetch(&self) -> Result<Vec<User>, SeedError> {
        serde_json::from_value(self.0.clone()).map_err(|e| SeedError::Parse(e.to_string()))
    }

    fn describe(&self) -> String {
        "inline json".to_string()
    }
}

/// Seed source that is never reachable.
#[derive(Debug, Clone, Copy)]
pub struct UnreachableSeedSource;

impl SeedSource for UnreachableSeedSource {
    async fn fetch(&self) -> Result<Vec<User>, SeedError> {
        Err(SeedError::Status(503))
    }

    fn describe(&self) -> String {
        "unreachable".to_string()
    }
}
