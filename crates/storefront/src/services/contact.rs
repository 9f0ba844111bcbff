//! Contact message log.

use chrono::Utc;
use thiserror::Error;
use tracing::instrument;

use crate::models::ContactMessage;
use crate::store::{LocalStore, StoreError, keys};

/// Name recorded when the contact form has no name field.
pub const DEFAULT_SENDER_NAME: &str = "User";

/// Errors that can occur when logging a contact message.
#[derive(Debug, Error)]
pub enum ContactError {
    /// The message text was empty after trimming.
    #[error("message text is empty")]
    EmptyMessage,

    /// The store rejected the write.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Append-only log of contact form submissions.
#[derive(Debug, Clone)]
pub struct ContactLog {
    store: LocalStore,
}

impl ContactLog {
    /// Create a contact log over `store`.
    #[must_use]
    pub const fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// All logged messages, oldest first.
    #[must_use]
    pub fn list(&self) -> Vec<ContactMessage> {
        self.store.read_list(keys::MESSAGES)
    }

    /// Append a message.
    ///
    /// `None` means the form has no such field: the name falls back to
    /// [`DEFAULT_SENDER_NAME`] and the email to an empty string. All fields
    /// are trimmed.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::EmptyMessage` without writing if the message
    /// is blank, or `ContactError::Store` if the log cannot be saved.
    #[instrument(skip_all)]
    pub fn append(
        &self,
        name: Option<&str>,
        email: Option<&str>,
        message: &str,
    ) -> Result<ContactMessage, ContactError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ContactError::EmptyMessage);
        }

        let entry = ContactMessage {
            name: name.map_or(DEFAULT_SENDER_NAME, str::trim).to_owned(),
            email: email.map(str::trim).unwrap_or_default().to_owned(),
            message: message.to_owned(),
            date: Utc::now(),
        };

        let mut log = self.store.read_records::<ContactMessage>(keys::MESSAGES);
        log.push(entry.clone());
        self.store.write(keys::MESSAGES, &log)?;

        tracing::info!(messages = log.len(), "contact message logged");
        Ok(entry)
    }
}
