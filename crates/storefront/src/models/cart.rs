//! Cart line records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use localshop_core::{Price, ProductId};

/// A product reference in a user's cart.
///
/// A cart holds at most one item per product id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier from the buy button.
    pub id: ProductId,
    /// Product title from the buy button. Older carts may lack it.
    #[serde(default)]
    pub title: String,
    /// When the item was added.
    #[serde(rename = "addedAt")]
    pub added_at: DateTime<Utc>,
    /// Unit price, when the product card showed one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
}
