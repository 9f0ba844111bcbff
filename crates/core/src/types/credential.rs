//! Password credential type.
//!
//! Registered users keep a plaintext password in the local store. There is
//! no hashing: the store is a browser-local demo registry, not an identity
//! provider. The newtype keeps the value out of `Debug` output and logs.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A plaintext password as stored in the user registry.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    /// Wrap a password. The value is kept verbatim (no trimming).
    #[must_use]
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    /// Exact comparison against a submitted password.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

impl From<&str> for Password {
    fn from(password: &str) -> Self {
        Self(password.to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_is_exact() {
        let password = Password::new("p1");
        assert!(password.matches("p1"));
        assert!(!password.matches("P1"));
        assert!(!password.matches(" p1"));
    }

    #[test]
    fn test_debug_redacts() {
        let password = Password::new("hunter2");
        let debug = format!("{password:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&Password::new("p1")).unwrap();
        assert_eq!(json, "\"p1\"");
    }
}
