//! Product cards as read from page markup.
//!
//! A buy button carries `data-product` and `data-title`; the price comes from
//! `data-price` when present, otherwise from the card's price element.

use std::collections::BTreeMap;

use thiserror::Error;

use localshop_core::{Price, ProductId};

/// Buy-button attribute holding the product id.
pub const DATA_PRODUCT: &str = "data-product";

/// Buy-button attribute holding the product title.
pub const DATA_TITLE: &str = "data-title";

/// Buy-button attribute holding the price.
pub const DATA_PRICE: &str = "data-price";

/// Errors reading a product card.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductCardError {
    #[error("buy button has no {DATA_PRODUCT} attribute")]
    MissingProductId,
}

/// The parts of a product card the buy handler looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardMarkup {
    pub attributes: BTreeMap<String, String>,
    /// Text of the card's title heading.
    pub heading: Option<String>,
    /// Text of the card's price element.
    pub price_text: Option<String>,
}

impl CardMarkup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute on the buy button.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn heading(mut self, text: impl Into<String>) -> Self {
        self.heading = Some(text.into());
        self
    }

    #[must_use]
    pub fn price_text(mut self, text: impl Into<String>) -> Self {
        self.price_text = Some(text.into());
        self
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// A product as offered by a buy button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: ProductId,
    /// Empty when neither `data-title` nor a heading is present.
    pub title: String,
    pub price: Option<Price>,
}

impl TryFrom<&CardMarkup> for ProductCard {
    type Error = ProductCardError;

    fn try_from(markup: &CardMarkup) -> Result<Self, Self::Error> {
        let id = markup
            .attribute(DATA_PRODUCT)
            .map(ProductId::from)
            .ok_or(ProductCardError::MissingProductId)?;

        let title = markup
            .attribute(DATA_TITLE)
            .map(str::to_owned)
            .or_else(|| markup.heading.as_deref().map(|h| h.trim().to_owned()))
            .unwrap_or_default();

        // Unparseable prices are dropped, not rejected.
        let price = markup
            .attribute(DATA_PRICE)
            .or(markup.price_text.as_deref())
            .and_then(|text| Price::parse(text).ok());

        Ok(Self { id, title, price })
    }
}
