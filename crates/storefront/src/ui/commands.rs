//! Command handlers for page events.

use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use localshop_core::{AddOutcome, MessageTone};

use super::product::ProductCard;
use super::{Feedback, INDEX_PAGE, LOGIN_MESSAGE, LOGIN_PAGE, REGISTER_MESSAGE, Redirect};
use crate::error::AppError;
use crate::models::Session;
use crate::services::{BuyGate, CartManager, ContactError};
use crate::state::AppState;

/// Delay before leaving the login page after a successful login.
const LOGIN_REDIRECT_MILLIS: u64 = 800;

/// Delay before leaving the login page after a successful registration.
const REGISTER_REDIRECT_MILLIS: u64 = 900;

/// A handled page event.
pub trait Command {
    /// Run the command against `state`.
    fn execute(&self, state: &AppState) -> Feedback;
}

/// `#login-form` submit.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: SecretString,
}

impl Command for LoginCommand {
    #[instrument(skip_all)]
    fn execute(&self, state: &AppState) -> Feedback {
        let Some(user) = state
            .registry()
            .authenticate(&self.email, self.password.expose_secret())
        else {
            return Feedback::inline(
                LOGIN_MESSAGE,
                MessageTone::Error,
                "Incorrect email or password!",
            );
        };

        if let Err(e) = state.sessions().login(Session::from(&user)) {
            return Feedback::inline(
                LOGIN_MESSAGE,
                MessageTone::Error,
                AppError::from(e).user_message(),
            );
        }

        Feedback::inline(
            LOGIN_MESSAGE,
            MessageTone::Success,
            format!("Welcome, {}!", user.name),
        )
        .with_redirect(Redirect::after_millis(INDEX_PAGE, LOGIN_REDIRECT_MILLIS))
    }
}

/// `#register-form` submit.
#[derive(Debug)]
pub struct RegisterCommand {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

impl Command for RegisterCommand {
    #[instrument(skip_all)]
    fn execute(&self, state: &AppState) -> Feedback {
        let user = match state.registry().register(
            &self.name,
            &self.email,
            self.password.expose_secret(),
        ) {
            Ok(user) => user,
            Err(e) => {
                return Feedback::inline(
                    REGISTER_MESSAGE,
                    MessageTone::Error,
                    AppError::from(e).user_message(),
                );
            }
        };

        if let Err(e) = state.sessions().login(Session::from(&user)) {
            tracing::error!(error = %e, "account created but session not saved");
            return Feedback::inline(
                REGISTER_MESSAGE,
                MessageTone::Error,
                "Your account was created, but you could not be logged in. Please log in.",
            );
        }

        Feedback::inline(
            REGISTER_MESSAGE,
            MessageTone::Success,
            "Registration successful!",
        )
        .with_redirect(Redirect::after_millis(INDEX_PAGE, REGISTER_REDIRECT_MILLIS))
    }
}

/// Logout button click in `.user-area`.
#[derive(Debug, Default)]
pub struct LogoutCommand;

impl Command for LogoutCommand {
    #[instrument(skip_all)]
    fn execute(&self, state: &AppState) -> Feedback {
        match state.sessions().logout() {
            Ok(()) => Feedback::alert("You have been logged out."),
            Err(e) => Feedback::alert(AppError::from(e).user_message()),
        }
    }
}

/// `#contact-form` submit.
///
/// `name` and `email` are `None` when the form has no such field.
#[derive(Debug, Default)]
pub struct ContactCommand {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: String,
}

impl Command for ContactCommand {
    #[instrument(skip_all)]
    fn execute(&self, state: &AppState) -> Feedback {
        match state.contact().append(
            self.name.as_deref(),
            self.email.as_deref(),
            &self.message,
        ) {
            Ok(_) => Feedback::alert("Your message was sent successfully. Thank you!")
                .with_form_reset(),
            Err(ContactError::EmptyMessage) => Feedback::alert("The message text is empty."),
            Err(e) => Feedback::alert(AppError::from(e).user_message()),
        }
    }
}

/// `.btn-buy` click.
#[derive(Debug)]
pub struct BuyCommand {
    pub product: ProductCard,
}

impl Command for BuyCommand {
    #[instrument(skip_all, fields(product = %self.product.id))]
    fn execute(&self, state: &AppState) -> Feedback {
        let session = state.sessions().current();

        let user = match CartManager::buy_guard(session.as_ref()) {
            BuyGate::Allowed(session) => &session.email,
            BuyGate::LoginRequired => {
                return Feedback::confirm(
                    "You need to log in to buy. Go to the login page?",
                    Redirect::immediate(LOGIN_PAGE),
                );
            }
        };

        let added = state.carts().add_item(
            user,
            self.product.id.clone(),
            &self.product.title,
            self.product.price,
        );

        match added {
            Ok(AddOutcome::Added) => Feedback::alert("The product was added to your cart."),
            Ok(AddOutcome::AlreadyPresent) => {
                Feedback::alert("This product is already in your cart.")
            }
            Err(e) => Feedback::alert(AppError::from(e).user_message()),
        }
    }
}
