//! Localshop Storefront library.
//!
//! Client-side state for a demo storefront: a local user registry, the
//! logged-in session, per-user carts and a contact message log, all kept in
//! a per-origin key-value store. The `ui` module turns page events into
//! explicit commands over these services.
//!
//! # Modules
//!
//! - [`store`] - Key-value store trait, in-memory and file backends, JSON adapter
//! - [`models`] - Records persisted in the store
//! - [`services`] - Registry, session, cart, contact log and seeding
//! - [`ui`] - Commands, rendering, product cards and scroll reveal
//! - [`debug`] - Inspection facade over the registry and session

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod debug;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
pub mod ui;
