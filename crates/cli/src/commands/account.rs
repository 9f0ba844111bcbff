//! Account and session commands.

use secrecy::SecretString;

use localshop_storefront::state::AppState;
use localshop_storefront::ui::{Command, LoginCommand, LogoutCommand, RegisterCommand};

use super::{output, print_feedback};

pub fn register(state: &AppState, name: String, email: String, password: SecretString) {
    let feedback = RegisterCommand {
        name,
        email,
        password,
    }
    .execute(state);
    print_feedback(&feedback);
}

pub fn login(state: &AppState, email: String, password: SecretString) {
    print_feedback(&LoginCommand { email, password }.execute(state));
}

pub fn logout(state: &AppState) {
    print_feedback(&LogoutCommand.execute(state));
}

pub fn whoami(state: &AppState) {
    match state.sessions().current() {
        Some(session) => output(&format!("{} <{}>", session.name, session.email)),
        None => output("Not logged in."),
    }
}

/// List users without their passwords.
pub fn users(state: &AppState) {
    let users = state.registry().list();
    if users.is_empty() {
        output("No registered users.");
    }
    for user in users {
        output(&format!("{} <{}>", user.name, user.email));
    }
}
