//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `registry` - Registered users: register, authenticate, seed merge
//! - `session` - The logged-in user and change notifications
//! - `cart` - Per-user carts with add-if-absent semantics
//! - `contact` - Append-only contact message log
//! - `seed` - One-time import of a remote user list

pub mod cart;
pub mod contact;
pub mod registry;
pub mod seed;
pub mod session;

pub use cart::{BuyGate, CartManager, CartSummary};
pub use contact::{ContactError, ContactLog};
pub use registry::{MergeSummary, RegistryError, UserRegistry};
pub use seed::{
    ConfiguredSeedSource, FileSeedSource, HttpSeedSource, SeedError, SeedOutcome, SeedSource,
    Seeder,
};
pub use session::SessionManager;
