//! Application state shared across UI commands.

use std::sync::Arc;

use crate::config::ShopConfig;
use crate::services::{CartManager, ContactLog, Seeder, SessionManager, UserRegistry};
use crate::store::{FileStore, LocalStore, StoreError};

/// Application state shared across all commands.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// services, all of which share one store.
#[derive(Clone, Debug)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Debug)]
struct AppStateInner {
    config: ShopConfig,
    store: LocalStore,
    registry: UserRegistry,
    sessions: SessionManager,
    carts: CartManager,
    contact: ContactLog,
    seeder: Seeder,
}

impl AppState {
    /// Create application state over an existing store.
    #[must_use]
    pub fn new(config: ShopConfig, store: LocalStore) -> Self {
        let registry = UserRegistry::new(store.clone());

        Self {
            inner: Arc::new(AppStateInner {
                sessions: SessionManager::new(store.clone()),
                carts: CartManager::new(store.clone()),
                contact: ContactLog::new(store.clone()),
                seeder: Seeder::new(store.clone(), registry.clone()),
                registry,
                store,
                config,
            }),
        }
    }

    /// Create application state backed by the configured store file.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the store file exists but cannot be read.
    pub fn open(config: ShopConfig) -> Result<Self, StoreError> {
        let store = LocalStore::new(FileStore::open(&config.store_path)?);
        Ok(Self::new(config, store))
    }

    /// In-memory state with default configuration.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(ShopConfig::default(), LocalStore::in_memory())
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &ShopConfig {
        &self.inner.config
    }

    /// Get a reference to the underlying store.
    #[must_use]
    pub fn store(&self) -> &LocalStore {
        &self.inner.store
    }

    /// Get a reference to the user registry.
    #[must_use]
    pub fn registry(&self) -> &UserRegistry {
        &self.inner.registry
    }

    /// Get a reference to the session manager.
    #[must_use]
    pub fn sessions(&self) -> &SessionManager {
        &self.inner.sessions
    }

    /// Get a reference to the cart manager.
    #[must_use]
    pub fn carts(&self) -> &CartManager {
        &self.inner.carts
    }

    /// Get a reference to the contact log.
    #[must_use]
    pub fn contact(&self) -> &ContactLog {
        &self.inner.contact
    }

    /// Get a reference to the seeder.
    #[must_use]
    pub fn seeder(&self) -> &Seeder {
        &self.inner.seeder
    }
}
