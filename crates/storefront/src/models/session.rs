//! Session-related types.

use serde::{Deserialize, Serialize};

use localshop_core::Email;

use super::User;

/// Session-stored user identity.
///
/// Only the display name and email are kept; there is no token or expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// User's display name.
    pub name: String,
    /// User's email address, as stored in the registry.
    pub email: Email,
}

impl From<&User> for Session {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}
