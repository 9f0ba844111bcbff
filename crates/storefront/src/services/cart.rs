//! Per-user carts.
//!
//! Each user's cart is a JSON array under `shop_cart_<email>`, keyed by the
//! email exactly as it appears in the session. Items are only ever added;
//! adding a product id that is already present changes nothing.

use chrono::Utc;
use tracing::instrument;

use localshop_core::{AddOutcome, Email, Price, ProductId};

use crate::models::{CartItem, Session};
use crate::store::{LocalStore, StoreError, keys};

/// Whether a buy action may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuyGate<'a> {
    /// A user is logged in; add to their cart.
    Allowed(&'a Session),
    /// Nobody is logged in; offer to go to the login page.
    LoginRequired,
}

/// Item count and running total of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    /// Number of distinct items.
    pub count: usize,
    /// Sum of known item prices.
    pub total: Price,
    /// Items without a known price (not included in `total`).
    pub unpriced: usize,
}

/// Cart operations.
#[derive(Debug, Clone)]
pub struct CartManager {
    store: LocalStore,
}

impl CartManager {
    /// Create a cart manager over `store`.
    #[must_use]
    pub const fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Gate a buy action on the current session.
    #[must_use]
    pub const fn buy_guard(session: Option<&Session>) -> BuyGate<'_> {
        match session {
            Some(session) => BuyGate::Allowed(session),
            None => BuyGate::LoginRequired,
        }
    }

    /// Items in `user`'s cart, oldest first.
    #[must_use]
    pub fn items(&self, user: &Email) -> Vec<CartItem> {
        self.store.read_list(&keys::cart(user.as_str()))
    }

    /// Add a product unless the cart already holds its id.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the updated cart cannot be written.
    #[instrument(skip(self, title, price), fields(user = %user, product = %id))]
    pub fn add_item(
        &self,
        user: &Email,
        id: ProductId,
        title: &str,
        price: Option<Price>,
    ) -> Result<AddOutcome, StoreError> {
        let key = keys::cart(user.as_str());
        let mut cart = self.store.read_records::<CartItem>(&key);

        if cart.iter().any(|item| item.id == id) {
            tracing::debug!("product already in cart");
            return Ok(AddOutcome::AlreadyPresent);
        }

        cart.push(CartItem {
            id,
            title: title.to_owned(),
            added_at: Utc::now(),
            price,
        });
        self.store.write(&key, &cart)?;

        tracing::info!(items = cart.len(), "product added to cart");
        Ok(AddOutcome::Added)
    }

    /// Count and running total of `user`'s cart.
    #[must_use]
    pub fn summary(&self, user: &Email) -> CartSummary {
        let items = self.items(user);
        CartSummary {
            count: items.len(),
            total: items.iter().filter_map(|item| item.price).sum(),
            unpriced: items.iter().filter(|item| item.price.is_none()).count(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn ali() -> Email {
        Email::parse("ali@x.com").unwrap()
    }

    #[test]
    fn test_add_is_idempotent_per_id() {
        let carts = CartManager::new(LocalStore::in_memory());

        let first = carts.add_item(&ali(), "p7".into(), "Widget", None).unwrap();
        let second = carts.add_item(&ali(), "p7".into(), "Widget", None).unwrap();

        assert_eq!(first, AddOutcome::Added);
        assert_eq!(second, AddOutcome::AlreadyPresent);
        let items = carts.items(&ali());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Widget");
    }

    #[test]
    fn test_second_add_keeps_original_item() {
        let carts = CartManager::new(LocalStore::in_memory());
        carts.add_item(&ali(), "p7".into(), "Widget", None).unwrap();
        let before = carts.items(&ali());

        carts
            .add_item(&ali(), "p7".into(), "Renamed", Price::parse("5").ok())
            .unwrap();
        assert_eq!(carts.items(&ali()), before);
    }

    #[test]
    fn test_carts_are_per_user() {
        let store = LocalStore::in_memory();
        let carts = CartManager::new(store.clone());
        let sara = Email::parse("sara@x.com").unwrap();

        carts.add_item(&ali(), "p1".into(), "A", None).unwrap();
        carts.add_item(&sara, "p1".into(), "A", None).unwrap();
        carts.add_item(&sara, "p2".into(), "B", None).unwrap();

        assert_eq!(carts.items(&ali()).len(), 1);
        assert_eq!(carts.items(&sara).len(), 2);
        assert!(store.contains("shop_cart_sara@x.com"));
    }

    #[test]
    fn test_summary_totals_known_prices() {
        let carts = CartManager::new(LocalStore::in_memory());
        carts
            .add_item(&ali(), "p1".into(), "A", Price::parse("1,000").ok())
            .unwrap();
        carts
            .add_item(&ali(), "p2".into(), "B", Price::parse("250").ok())
            .unwrap();
        carts.add_item(&ali(), "p3".into(), "C", None).unwrap();

        let summary = carts.summary(&ali());
        assert_eq!(summary.count, 3);
        assert_eq!(summary.total, Price::parse("1250").unwrap());
        assert_eq!(summary.unpriced, 1);
    }

    #[test]
    fn test_summary_saturates_on_huge_prices() {
        let carts = CartManager::new(LocalStore::in_memory());
        let huge = Price::parse("79228162514264337593543950335").ok();
        carts.add_item(&ali(), "p1".into(), "A", huge).unwrap();
        carts.add_item(&ali(), "p2".into(), "B", huge).unwrap();

        let summary = carts.summary(&ali());
        assert_eq!(summary.count, 2);
        assert_eq!(Some(summary.total), huge);
    }

    #[test]
    fn test_add_keeps_unreadable_cart_lines() {
        let store = LocalStore::in_memory();
        let key = keys::cart("ali@x.com");
        store
            .write_raw(&key, r#"[{"id":"p1","addedAt":"2024-03-01T10:00:00Z"},{"id":"p2"}]"#)
            .unwrap();
        let carts = CartManager::new(store.clone());

        carts.add_item(&ali(), "p3".into(), "C", None).unwrap();

        let ids: Vec<_> = carts.items(&ali()).into_iter().map(|i| i.id.to_string()).collect();
        assert_eq!(ids, vec!["p1", "p3"]);
        assert!(store.read_raw(&key).unwrap().contains(r#"{"id":"p2"}"#));
    }

    #[test]
    fn test_corrupted_cart_reads_empty() {
        let store = LocalStore::in_memory();
        store.write_raw(&keys::cart("ali@x.com"), "nope").unwrap();
        let carts = CartManager::new(store);

        assert!(carts.items(&ali()).is_empty());
        assert_eq!(
            carts.add_item(&ali(), "p1".into(), "A", None).unwrap(),
            AddOutcome::Added
        );
    }

    #[test]
    fn test_full_store_surfaces_error() {
        let carts = CartManager::new(LocalStore::new(MemoryStore::with_quota(16)));
        assert!(carts.add_item(&ali(), "p1".into(), "A", None).is_err());
        assert!(carts.items(&ali()).is_empty());
    }

    #[test]
    fn test_buy_guard() {
        let session = Session {
            name: "Ali".to_string(),
            email: ali(),
        };
        assert_eq!(CartManager::buy_guard(None), BuyGate::LoginRequired);
        assert_eq!(
            CartManager::buy_guard(Some(&session)),
            BuyGate::Allowed(&session)
        );
    }
}
