//! Records persisted in the local store.
//!
//! Field names follow the stored JSON exactly (`addedAt`, `date`), so data
//! written by earlier page versions keeps loading.

pub mod cart;
pub mod message;
pub mod session;
pub mod user;

pub use cart::CartItem;
pub use message::ContactMessage;
pub use session::Session;
pub use user::User;
