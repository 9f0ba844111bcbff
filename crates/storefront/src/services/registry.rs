//! User registry.
//!
//! Users live as a single JSON array under `shop_users_v1`, in insertion
//! order. There is no edit or delete path.
//!
//! # Email comparison
//!
//! Two different rules are in play and both are kept as-is:
//!
//! - `register` lowercases the submitted email and then checks for a
//!   duplicate with [`EmailMatch::Exact`].
//! - `authenticate` compares with [`EmailMatch::IgnoreCase`].
//!
//! Users registered through this service are always stored lowercase, so
//! the rules only diverge for mixed-case addresses imported by the seed.

use thiserror::Error;
use tracing::instrument;

use localshop_core::{Email, EmailError, EmailMatch, Password};

use crate::models::User;
use crate::store::{LocalStore, StoreError, keys};

/// Errors that can occur during registration.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A required field was empty after trimming.
    #[error("all fields are required")]
    EmptyInput,

    /// The email is not a valid address.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// A user with this email already exists.
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// The store rejected the write.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Counts from merging a remote user list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeSummary {
    /// Remote users appended to the registry.
    pub added: usize,
    /// Remote users skipped because their email was already present.
    pub skipped: usize,
}

/// Registered users.
#[derive(Debug, Clone)]
pub struct UserRegistry {
    store: LocalStore,
}

impl UserRegistry {
    /// Create a registry over `store`.
    #[must_use]
    pub const fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// All registered users, in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<User> {
        self.store.read_list(keys::USERS)
    }

    /// Replace the whole user list.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the write fails.
    pub fn save_all(&self, users: &[User]) -> Result<(), StoreError> {
        self.store.write(keys::USERS, users)
    }

    /// Find a user by email under the given comparison rule.
    #[must_use]
    pub fn find_by_email(&self, email: &str, rule: EmailMatch) -> Option<User> {
        self.list().into_iter().find(|u| u.has_email(email, rule))
    }

    /// Register a new user.
    ///
    /// The name and email are trimmed and the email is lowercased; the
    /// password is kept verbatim. Stored entries that are not valid users
    /// are left in place.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::EmptyInput` if any field is empty.
    /// Returns `RegistryError::InvalidEmail` if the email is malformed.
    /// Returns `RegistryError::DuplicateEmail` if the email is taken.
    /// Returns `RegistryError::Store` if the user list cannot be saved.
    #[instrument(skip(self, name, password), fields(email = %email.trim()))]
    pub fn register(&self, name: &str, email: &str, password: &str) -> Result<User, RegistryError> {
        let name = name.trim();
        if name.is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(RegistryError::EmptyInput);
        }
        let email = Email::parse_normalized(email)?;

        let mut users = self.store.read_records::<User>(keys::USERS);
        if users
            .iter()
            .any(|u| u.has_email(email.as_str(), EmailMatch::Exact))
        {
            tracing::info!("registration rejected: email already registered");
            return Err(RegistryError::DuplicateEmail(email.into_inner()));
        }

        let user = User {
            name: name.to_owned(),
            email,
            password: Password::new(password),
        };
        users.push(user.clone());
        self.store.write(keys::USERS, &users)?;

        tracing::info!(users = users.len(), "user registered");
        Ok(user)
    }

    /// Find the user with this email (case-insensitive) and exact password.
    #[instrument(skip(self, password), fields(email = %email.trim()))]
    #[must_use]
    pub fn authenticate(&self, email: &str, password: &str) -> Option<User> {
        let email = email.trim();
        let user = self
            .list()
            .into_iter()
            .find(|u| u.has_email(email, EmailMatch::IgnoreCase) && u.password.matches(password));

        if user.is_none() {
            tracing::info!("authentication failed");
        }
        user
    }

    /// Append remote users whose email is not already present.
    ///
    /// Stored entries that are not valid users are left in place.
    ///
    /// Presence is checked with [`EmailMatch::Exact`], against local users
    /// and against remote users merged earlier in the same call. Existing
    /// users are never overwritten.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the merged list cannot be saved.
    pub fn merge_remote(&self, remote: Vec<User>) -> Result<MergeSummary, StoreError> {
        let mut users = self.store.read_records::<User>(keys::USERS);
        let mut summary = MergeSummary::default();

        for candidate in remote {
            if users
                .iter()
                .any(|u| u.has_email(candidate.email.as_str(), EmailMatch::Exact))
            {
                summary.skipped += 1;
            } else {
                users.push(candidate);
                summary.added += 1;
            }
        }

        self.store.write(keys::USERS, &users)?;
        Ok(summary)
    }
}
