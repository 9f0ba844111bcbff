//! Markup and store inspection.

use localshop_storefront::debug::ShopApi;
use localshop_storefront::error::AppError;
use localshop_storefront::state::AppState;
use localshop_storefront::ui::{AuthView, render_cart};

use super::{CliError, output};

pub fn user_area(auth: &AuthView) {
    output(&auth.user_area);
    output(&format!(
        "buy buttons: disabled={} class={:?} title={:?}",
        auth.buy_button.disabled, auth.buy_button.class, auth.buy_button.title
    ));
}

/// Print the logged-in user's cart markup.
///
/// # Errors
///
/// Returns error if the cart template fails to render.
pub fn cart(state: &AppState) -> Result<(), CliError> {
    match state.sessions().current() {
        Some(session) => output(&render_cart(state, &session.email)?),
        None => output("Not logged in."),
    }
    Ok(())
}

/// Dump the whole store.
///
/// # Errors
///
/// Returns error if the store keys cannot be listed.
pub fn debug(state: &AppState) -> Result<(), CliError> {
    let snapshot = ShopApi::new(state).snapshot().map_err(AppError::from)?;
    output(&serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
