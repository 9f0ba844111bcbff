//! Registration, authentication and session scenarios.

#![allow(clippy::unwrap_used)]

use localshop_core::{AuthState, EmailMatch};
use localshop_storefront::models::Session;
use localshop_storefront::services::RegistryError;
use localshop_storefront::state::AppState;

#[test]
fn test_register_then_authenticate_ignores_case() {
    let state = AppState::in_memory();
    let user = state.registry().register("Ali", "ali@x.com", "p1").unwrap();

    let found = state.registry().authenticate("ALI@X.COM", "p1").unwrap();
    assert_eq!(found, user);
}

#[test]
fn test_distinct_registrations_grow_the_list() {
    let state = AppState::in_memory();
    let emails = ["a@x.com", "b@x.com", "c@x.com", "d@x.com"];

    for (i, email) in emails.iter().enumerate() {
        state.registry().register("User", email, "pw").unwrap();
        assert_eq!(state.registry().list().len(), i + 1);
    }
}

#[test]
fn test_repeated_email_in_any_case_is_rejected() {
    let state = AppState::in_memory();
    state.registry().register("Ali", "ali@x.com", "p1").unwrap();

    for email in ["ali@x.com", "ALI@x.com", "  Ali@X.Com "] {
        let err = state.registry().register("Other", email, "p2").unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateEmail(_)));
    }
    assert_eq!(state.registry().list().len(), 1);
}

#[test]
fn test_authenticate_requires_exact_password() {
    let state = AppState::in_memory();
    state.registry().register("Ali", "ali@x.com", "Secret").unwrap();

    assert!(state.registry().authenticate("ali@x.com", "secret").is_none());
    assert!(state.registry().authenticate("ali@x.com", "Secret ").is_none());
    assert!(state.registry().authenticate("nobody@x.com", "Secret").is_none());
    assert!(state.registry().authenticate("ali@x.com", "Secret").is_some());
}

#[test]
fn test_stored_emails_compare_exactly_for_lookups() {
    let state = AppState::in_memory();
    state.registry().register("Ali", "Ali@X.com", "p1").unwrap();

    assert!(
        state
            .registry()
            .find_by_email("ali@x.com", EmailMatch::Exact)
            .is_some()
    );
    assert!(
        state
            .registry()
            .find_by_email("Ali@X.com", EmailMatch::Exact)
            .is_none()
    );
}

#[test]
fn test_session_login_logout() {
    let state = AppState::in_memory();
    let user = state.registry().register("Ali", "ali@x.com", "p1").unwrap();
    assert_eq!(state.sessions().state(), AuthState::LoggedOut);

    state.sessions().login(Session::from(&user)).unwrap();
    let session = state.sessions().current().unwrap();
    assert_eq!(session.name, "Ali");
    assert_eq!(session.email, user.email);

    state.sessions().logout().unwrap();
    assert_eq!(state.sessions().current(), None);
}
