//! Core types for Localshop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod credential;
pub mod email;
pub mod id;
pub mod price;
pub mod status;

pub use credential::Password;
pub use email::{Email, EmailError, EmailMatch};
pub use id::ProductId;
pub use price::{Price, PriceError};
pub use status::*;
