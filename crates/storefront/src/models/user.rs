//! User domain types.

use serde::{Deserialize, Serialize};

use localshop_core::{Email, EmailMatch, Password};

/// A registered user.
///
/// Created by registration or the seed import and never edited afterwards.
/// The password is kept in plaintext; this registry is a local demo, not an
/// identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Display name.
    pub name: String,
    /// Email address, the registry's unique key.
    pub email: Email,
    /// Plaintext password.
    pub password: Password,
}

impl User {
    /// Returns `true` if this user's email equals `email` under `rule`.
    #[must_use]
    pub fn has_email(&self, email: &str, rule: EmailMatch) -> bool {
        self.email.matches(email, rule)
    }
}
