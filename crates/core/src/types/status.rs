//! State enums for the storefront.
//!
//! Each is derived from what the store holds: a session blob, the `"1"` seed
//! flag, or a per-element reveal mark.

use serde::{Deserialize, Serialize};

/// Authentication state of the browser context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    #[default]
    LoggedOut,
    LoggedIn,
}

impl AuthState {
    /// Returns `true` when a session is present.
    #[must_use]
    pub const fn is_logged_in(self) -> bool {
        matches!(self, Self::LoggedIn)
    }
}

/// Result of adding a product to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOutcome {
    /// The product was appended to the cart.
    Added,
    /// The cart already held this product id; nothing changed.
    AlreadyPresent,
}

/// One-time seed import state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SeedState {
    /// No seed attempt has completed in this browser context.
    #[default]
    Pending,
    /// A seed attempt finished (successfully or not). Never retried.
    Seeded,
}

/// Scroll-reveal state of a single element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RevealState {
    /// Waiting for the element to intersect the viewport.
    #[default]
    Observing,
    /// Revealed once and no longer observed.
    Revealed,
}

/// Tone of an inline form message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageTone {
    Success,
    Error,
}

impl MessageTone {
    /// CSS color used for inline messages.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Success => "green",
            Self::Error => "red",
        }
    }
}

impl std::fmt::Display for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoggedOut => write!(f, "logged_out"),
            Self::LoggedIn => write!(f, "logged_in"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(AuthState::default(), AuthState::LoggedOut);
        assert_eq!(SeedState::default(), SeedState::Pending);
        assert_eq!(RevealState::default(), RevealState::Observing);
    }

    #[test]
    fn test_auth_state_display() {
        assert_eq!(AuthState::LoggedIn.to_string(), "logged_in");
        assert!(!AuthState::LoggedOut.is_logged_in());
    }

    #[test]
    fn test_add_outcome_serde() {
        let json = serde_json::to_string(&AddOutcome::AlreadyPresent).unwrap();
        assert_eq!(json, "\"already_present\"");
    }
}
