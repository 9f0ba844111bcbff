//! UI adapter layer.
//!
//! Page events (form submits, button clicks, intersection callbacks) are
//! expressed as explicit commands over the services. A command never fails:
//! it returns [`Feedback`] describing what the page should show.
//!
//! # DOM contract
//!
//! - `#login-form`, `#register-form`, `#contact-form` - submitted forms
//! - `#login-message`, `#register-message` - inline message targets
//! - `.user-area` - auth-dependent navbar slot
//! - `.btn-buy` with `data-product`, `data-title` (and optionally `data-price`)

pub mod commands;
pub mod page;
pub mod product;
pub mod render;
pub mod reveal;

use std::time::Duration;

use localshop_core::MessageTone;

pub use commands::{
    BuyCommand, Command, ContactCommand, LoginCommand, LogoutCommand, RegisterCommand,
};
pub use page::{PageSeed, PageView, load_page, next_auth_view};
pub use product::{CardMarkup, ProductCard, ProductCardError};
pub use render::{AuthView, BuyButtonState, render_auth, render_cart};
pub use reveal::RevealTracker;

/// Inline message target of the login form.
pub const LOGIN_MESSAGE: &str = "#login-message";

/// Inline message target of the registration form.
pub const REGISTER_MESSAGE: &str = "#register-message";

/// Landing page.
pub const INDEX_PAGE: &str = "index.html";

/// Login and registration page.
pub const LOGIN_PAGE: &str = "login.html";

/// A navigation the page performs, possibly after a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub to: &'static str,
    pub after: Duration,
}

impl Redirect {
    /// Navigate to `to` after `millis` milliseconds.
    #[must_use]
    pub const fn after_millis(to: &'static str, millis: u64) -> Self {
        Self {
            to,
            after: Duration::from_millis(millis),
        }
    }

    /// Navigate to `to` right away.
    #[must_use]
    pub const fn immediate(to: &'static str) -> Self {
        Self::after_millis(to, 0)
    }
}

/// What the user sees right after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Colored text written into a message element.
    Inline {
        target: &'static str,
        tone: MessageTone,
        text: String,
    },
    /// A blocking alert dialog.
    Alert(String),
    /// A confirmation dialog; accepting follows `on_accept`.
    Confirm { text: String, on_accept: Redirect },
}

/// Outcome of a UI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub notice: Notice,
    /// Navigation scheduled after the notice.
    pub redirect: Option<Redirect>,
    /// Whether the submitted form should be cleared.
    pub reset_form: bool,
}

impl Feedback {
    fn from_notice(notice: Notice) -> Self {
        Self {
            notice,
            redirect: None,
            reset_form: false,
        }
    }

    /// Write a message into `target`.
    #[must_use]
    pub fn inline(target: &'static str, tone: MessageTone, text: impl Into<String>) -> Self {
        Self::from_notice(Notice::Inline {
            target,
            tone,
            text: text.into(),
        })
    }

    /// Show an alert.
    #[must_use]
    pub fn alert(text: impl Into<String>) -> Self {
        Self::from_notice(Notice::Alert(text.into()))
    }

    /// Ask for confirmation before navigating.
    #[must_use]
    pub fn confirm(text: impl Into<String>, on_accept: Redirect) -> Self {
        Self::from_notice(Notice::Confirm {
            text: text.into(),
            on_accept,
        })
    }

    /// Schedule a navigation.
    #[must_use]
    pub const fn with_redirect(mut self, redirect: Redirect) -> Self {
        self.redirect = Some(redirect);
        self
    }

    /// Clear the submitted form.
    #[must_use]
    pub const fn with_form_reset(mut self) -> Self {
        self.reset_form = true;
        self
    }

    /// The notice text.
    #[must_use]
    pub fn text(&self) -> &str {
        match &self.notice {
            Notice::Inline { text, .. } | Notice::Alert(text) | Notice::Confirm { text, .. } => {
                text
            }
        }
    }

    /// Whether the notice reports a problem.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(
            self.notice,
            Notice::Inline {
                tone: MessageTone::Error,
                ..
            }
        )
    }
}
