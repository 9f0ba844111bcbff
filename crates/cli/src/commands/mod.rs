//! CLI command implementations.
//!
//! Each subcommand maps to one page event or inspection. Feedback is printed
//! to stdout; failures of the store itself surface as [`CliError`].

pub mod account;
pub mod cart;
pub mod contact;
pub mod inspect;
pub mod seed;

use thiserror::Error;

use localshop_storefront::config::ShopConfig;
use localshop_storefront::error::AppError;
use localshop_storefront::services::ConfiguredSeedSource;
use localshop_storefront::state::AppState;
use localshop_storefront::ui::{Feedback, Notice, PageView, ProductCardError, load_page};

/// Errors that end a CLI run with a failure exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// Storefront operation failed.
    #[error(transparent)]
    App(#[from] AppError),

    /// Buy button attributes are incomplete.
    #[error("Invalid product: {0}")]
    Product(#[from] ProductCardError),

    /// Output could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Open the store and load the page: seed once, then render auth state.
///
/// # Errors
///
/// Returns error if the store cannot be opened, the seed source cannot be
/// built, or the page fails to render.
pub async fn bootstrap(config: ShopConfig) -> Result<(AppState, PageView), CliError> {
    let source = config
        .seed_source
        .as_ref()
        .map(|source| ConfiguredSeedSource::from_config(source, config.seed_timeout))
        .transpose()
        .map_err(AppError::from)?;

    let state = AppState::open(config).map_err(AppError::from)?;
    tracing::debug!(path = %state.config().store_path.display(), "store opened");

    let page = load_page(&state, source.as_ref()).await?;
    Ok((state, page))
}

/// Terminal lines describing `feedback`.
pub fn describe(feedback: &Feedback) -> Vec<String> {
    let mut lines = match &feedback.notice {
        Notice::Inline { tone, .. } => vec![format!("[{}] {}", tone.color(), feedback.text())],
        Notice::Alert(_) => vec![feedback.text().to_owned()],
        Notice::Confirm { on_accept, .. } => vec![
            feedback.text().to_owned(),
            format!("(accepting opens {})", on_accept.to),
        ],
    };

    if let Some(redirect) = feedback.redirect {
        lines.push(format!(
            "-> {} in {} ms",
            redirect.to,
            redirect.after.as_millis()
        ));
    }

    lines
}

/// Print command feedback.
pub fn print_feedback(feedback: &Feedback) {
    for line in describe(feedback) {
        output(&line);
    }
}

/// Write one line to stdout.
#[allow(clippy::print_stdout)]
pub fn output(text: &str) {
    println!("{text}");
}
