//! Logged-in session.
//!
//! The session is the `{name, email}` pair stored under
//! `shop_current_user_v1`. The store is the source of truth, so a session
//! persisted by an earlier visit is picked up on construction.
//!
//! Every `login` and `logout` publishes the new session on a watch channel;
//! UI code subscribes to re-render auth-dependent markup.

use tokio::sync::watch;
use tracing::instrument;

use localshop_core::AuthState;

use crate::models::Session;
use crate::store::{LocalStore, StoreError, keys};

/// Current-user state with change notification.
#[derive(Debug)]
pub struct SessionManager {
    store: LocalStore,
    changes: watch::Sender<Option<Session>>,
}

impl SessionManager {
    /// Create a session manager, loading any persisted session.
    #[must_use]
    pub fn new(store: LocalStore) -> Self {
        let initial = store.read::<Session>(keys::CURRENT_USER);
        let (changes, _) = watch::channel(initial);
        Self { store, changes }
    }

    /// The current session, if any.
    ///
    /// A missing or corrupted session blob reads as logged out.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.store.read(keys::CURRENT_USER)
    }

    /// Logged-in or logged-out.
    #[must_use]
    pub fn state(&self) -> AuthState {
        if self.current().is_some() {
            AuthState::LoggedIn
        } else {
            AuthState::LoggedOut
        }
    }

    /// Persist `session` and notify subscribers.
    ///
    /// Logging in while already logged in replaces the session and still
    /// notifies.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the session cannot be written. Subscribers
    /// are not notified in that case.
    #[instrument(skip(self, session), fields(email = %session.email))]
    pub fn login(&self, session: Session) -> Result<(), StoreError> {
        self.store.write(keys::CURRENT_USER, &session)?;
        self.changes.send_replace(Some(session));
        tracing::info!("session started");
        Ok(())
    }

    /// Clear the session and notify subscribers.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the session cannot be removed.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), StoreError> {
        self.store.remove(keys::CURRENT_USER)?;
        self.changes.send_replace(None);
        tracing::info!("session cleared");
        Ok(())
    }

    /// Subscribe to session changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.changes.subscribe()
    }
}
