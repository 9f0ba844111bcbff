//! Page bootstrap.
//!
//! On load the page first runs the one-time seed import, then renders the
//! session-dependent parts. Later session changes are picked up through
//! [`next_auth_view`].

use tokio::sync::watch;
use tracing::instrument;

use super::render::{AuthView, render_auth};
use crate::error::Result;
use crate::models::Session;
use crate::services::{SeedOutcome, SeedSource};
use crate::state::AppState;

/// What the seed step of a page load did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSeed {
    /// No seed source was given.
    NoSource,
    /// The import step ran.
    Ran(SeedOutcome),
    /// The import step ran but its flag could not be saved, so the next
    /// load will try again.
    FlagNotSaved,
}

/// What a freshly loaded page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub seed: PageSeed,
    pub auth: AuthView,
}

/// Load a page: seed once, then render the auth view.
///
/// # Errors
///
/// Returns `AppError::Render` if the auth view fails to render. Seed
/// failures never fail the page.
#[instrument(skip_all)]
pub async fn load_page<S: SeedSource>(state: &AppState, seed_source: Option<&S>) -> Result<PageView> {
    let seed = match seed_source {
        Some(source) => match state.seeder().seed_once(source).await {
            Ok(outcome) => PageSeed::Ran(outcome),
            Err(e) => {
                tracing::warn!(error = %e, "could not record seed import");
                PageSeed::FlagNotSaved
            }
        },
        None => PageSeed::NoSource,
    };

    let auth = render_auth(state)?;
    tracing::debug!(auth = %auth.state, "page loaded");

    Ok(PageView { seed, auth })
}

/// Wait for the next session change and render the new auth view.
///
/// Returns `None` once the session manager is gone.
pub async fn next_auth_view(
    changes: &mut watch::Receiver<Option<Session>>,
) -> Option<Result<AuthView>> {
    changes.changed().await.ok()?;
    let session = changes.borrow_and_update().clone();
    Some(AuthView::for_session(session.as_ref()))
}
