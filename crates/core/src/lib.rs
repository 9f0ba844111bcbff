//! Localshop Core - Shared types library.
//!
//! This crate provides common types used across all Localshop components:
//! - `storefront` - Local data store, services and UI adapter layer
//! - `cli` - Command-line host driving the storefront against a file store
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for emails, passwords, product IDs, prices and states

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
