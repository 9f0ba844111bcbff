//! Debug surface over the storefront state.
//!
//! A thin facade for inspecting and poking the store by hand, exposed by the
//! CLI `debug` subcommand.

use serde_json::{Map, Value};

use crate::models::{Session, User};
use crate::state::AppState;
use crate::store::StoreError;

/// Raw access to users and the session.
#[derive(Debug, Clone, Copy)]
pub struct ShopApi<'a> {
    state: &'a AppState,
}

impl<'a> ShopApi<'a> {
    #[must_use]
    pub const fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    #[must_use]
    pub fn load_users(&self) -> Vec<User> {
        self.state.registry().list()
    }

    /// Replace the whole user list. No validation or deduplication is done.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the list cannot be written.
    pub fn save_users(&self, users: &[User]) -> Result<(), StoreError> {
        self.state.registry().save_all(users)
    }

    #[must_use]
    pub fn current_user(&self) -> Option<Session> {
        self.state.sessions().current()
    }

    /// # Errors
    ///
    /// Returns a `StoreError` if the session cannot be written.
    pub fn set_current_user(&self, session: Session) -> Result<(), StoreError> {
        self.state.sessions().login(session)
    }

    /// # Errors
    ///
    /// Returns a `StoreError` if the session cannot be removed.
    pub fn clear_current_user(&self) -> Result<(), StoreError> {
        self.state.sessions().logout()
    }

    /// Every stored key with its value, parsed as JSON where possible.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the keys cannot be listed.
    pub fn snapshot(&self) -> Result<Value, StoreError> {
        let store = self.state.store();
        let mut entries = Map::new();

        for key in store.keys()? {
            let Some(raw) = store.read_raw(&key) else {
                continue;
            };
            let value = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
            entries.insert(key, value);
        }

        Ok(Value::Object(entries))
    }
}
