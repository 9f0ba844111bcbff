//! Cart commands.

use localshop_storefront::state::AppState;
use localshop_storefront::ui::product::{DATA_PRICE, DATA_PRODUCT, DATA_TITLE};
use localshop_storefront::ui::{BuyCommand, CardMarkup, Command, ProductCard};

use super::{CliError, output, print_feedback};

/// Press the buy button of a product card.
///
/// # Errors
///
/// Returns `CliError::Product` if the product id is blank.
pub fn add(
    state: &AppState,
    product: &str,
    title: Option<&str>,
    price: Option<&str>,
) -> Result<(), CliError> {
    let mut markup = CardMarkup::new().attr(DATA_PRODUCT, product);
    if let Some(title) = title {
        markup = markup.attr(DATA_TITLE, title);
    }
    if let Some(price) = price {
        markup = markup.attr(DATA_PRICE, price);
    }

    let product = ProductCard::try_from(&markup)?;
    print_feedback(&BuyCommand { product }.execute(state));
    Ok(())
}

pub fn show(state: &AppState) {
    let Some(session) = state.sessions().current() else {
        output("Not logged in.");
        return;
    };

    let items = state.carts().items(&session.email);
    if items.is_empty() {
        output("Your cart is empty.");
        return;
    }

    for item in &items {
        let price = item
            .price
            .map_or_else(|| "-".to_string(), |price| price.to_string());
        output(&format!("{}\t{}\t{price}", item.id, item.title));
    }

    let summary = state.carts().summary(&session.email);
    output(&format!("{} items, total {}", summary.count, summary.total));
}
