//! Contact log commands.

use localshop_storefront::state::AppState;
use localshop_storefront::ui::{Command, ContactCommand};

use super::{CliError, output, print_feedback};

pub fn send(state: &AppState, name: Option<String>, email: Option<String>, message: String) {
    print_feedback(
        &ContactCommand {
            name,
            email,
            message,
        }
        .execute(state),
    );
}

/// Print every stored message as pretty JSON.
///
/// # Errors
///
/// Returns `CliError::Json` if the messages cannot be serialized.
pub fn messages(state: &AppState) -> Result<(), CliError> {
    let messages = state.contact().list();
    output(&serde_json::to_string_pretty(&messages)?);
    Ok(())
}
