//! Contact form messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A submitted contact message. Append-only; no identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    /// Free-form; the contact form does not validate it.
    pub email: String,
    pub message: String,
    pub date: DateTime<Utc>,
}
