//! Unified error handling.
//!
//! Provides a unified `AppError` type. UI commands convert every error into
//! page feedback at the boundary nearest the user action; nothing escapes
//! as an unhandled fault.

use thiserror::Error;

use crate::config::ConfigError;
use crate::services::{ContactError, RegistryError, SeedError};
use crate::store::StoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Registration failed.
    #[error("Registration error: {0}")]
    Registry(#[from] RegistryError),

    /// Contact message rejected.
    #[error("Contact error: {0}")]
    Contact(#[from] ContactError),

    /// Seed source could not be built.
    #[error("Seed error: {0}")]
    Seed(#[from] SeedError),

    /// Configuration is invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),
}

impl AppError {
    /// Whether this error comes from the environment rather than user input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        match self {
            Self::Registry(RegistryError::Store(_)) | Self::Contact(ContactError::Store(_)) => true,
            Self::Registry(_) | Self::Contact(_) => false,
            Self::Store(_) | Self::Seed(_) | Self::Config(_) | Self::Render(_) => true,
        }
    }

    /// Text to show the user.
    ///
    /// Internal error details are not exposed.
    #[must_use]
    pub fn user_message(&self) -> String {
        if self.is_internal() {
            tracing::error!(error = %self, "storefront error");
            return "Something went wrong. Please try again.".to_string();
        }

        match self {
            Self::Registry(err) => match err {
                RegistryError::EmptyInput => "Please fill in all fields.".to_string(),
                RegistryError::InvalidEmail(_) => "Please enter a valid email address.".to_string(),
                RegistryError::DuplicateEmail(_) => {
                    "This email is already registered!".to_string()
                }
                RegistryError::Store(_) => "Something went wrong. Please try again.".to_string(),
            },
            Self::Contact(_) => "The message text is empty.".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
