//! Auth-dependent fragments and cart rendering.

use askama::Template;
use tracing::instrument;

use localshop_core::{AuthState, Email};

use crate::error::Result;
use crate::models::{CartItem, Session};
use crate::state::AppState;

/// `.user-area` fragment.
#[derive(Template)]
#[template(path = "partials/user_area.html")]
pub struct UserAreaTemplate<'a> {
    /// Logged-in user's name; `None` renders the login link.
    pub name: Option<&'a str>,
}

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub id: String,
    pub title: String,
    pub price: Option<String>,
    pub added_at: String,
    pub added_on: String,
}

impl From<&CartItem> for CartLineView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.to_string(),
            title: item.title.clone(),
            price: item.price.map(|p| p.to_string()),
            added_at: item.added_at.to_rfc3339(),
            added_on: item.added_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Cart lines fragment.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartTemplate {
    pub lines: Vec<CartLineView>,
    pub count: usize,
    pub total: String,
    pub unpriced: usize,
}

/// Attributes applied to every `.btn-buy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuyButtonState {
    pub disabled: bool,
    pub title: &'static str,
    pub class: &'static str,
}

impl BuyButtonState {
    #[must_use]
    pub const fn for_state(state: AuthState) -> Self {
        if state.is_logged_in() {
            Self {
                disabled: false,
                title: "",
                class: "btn",
            }
        } else {
            Self {
                disabled: true,
                title: "Please log in to buy",
                class: "ghost",
            }
        }
    }
}

/// Everything on a page that depends on the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthView {
    pub state: AuthState,
    /// Markup for each `.user-area`.
    pub user_area: String,
    pub buy_button: BuyButtonState,
}

impl AuthView {
    /// Render the view for `session`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Render` if the template fails.
    pub fn for_session(session: Option<&Session>) -> Result<Self> {
        let state = if session.is_some() {
            AuthState::LoggedIn
        } else {
            AuthState::LoggedOut
        };

        let user_area = UserAreaTemplate {
            name: session.map(|s| s.name.as_str()),
        }
        .render()?;

        Ok(Self {
            state,
            user_area,
            buy_button: BuyButtonState::for_state(state),
        })
    }
}

/// Render the auth view for the current session.
///
/// # Errors
///
/// Returns `AppError::Render` if the template fails.
#[instrument(skip(state))]
pub fn render_auth(state: &AppState) -> Result<AuthView> {
    AuthView::for_session(state.sessions().current().as_ref())
}

/// Render `user`'s cart lines with the running total.
///
/// # Errors
///
/// Returns `AppError::Render` if the template fails.
#[instrument(skip(state), fields(user = %user))]
pub fn render_cart(state: &AppState, user: &Email) -> Result<String> {
    let items = state.carts().items(user);
    let summary = state.carts().summary(user);

    let html = CartTemplate {
        lines: items.iter().map(CartLineView::from).collect(),
        count: summary.count,
        total: summary.total.to_string(),
        unpriced: summary.unpriced,
    }
    .render()?;

    Ok(html)
}
