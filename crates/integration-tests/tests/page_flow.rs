//! UI commands and page bootstrap end to end.

#![allow(clippy::unwrap_used)]

use secrecy::SecretString;

use localshop_core::AuthState;
use localshop_integration_tests::{JsonSeedSource, TestContext, UnreachableSeedSource};
use localshop_storefront::services::SeedOutcome;
use localshop_storefront::ui::product::{DATA_PRODUCT, DATA_TITLE};
use localshop_storefront::ui::{
    BuyCommand, CardMarkup, Command, ContactCommand, INDEX_PAGE, LOGIN_PAGE, LoginCommand,
    LogoutCommand, Notice, PageSeed, ProductCard, Redirect, RegisterCommand, load_page,
    render_cart,
};

fn widget() -> ProductCard {
    let markup = CardMarkup::new()
        .attr(DATA_PRODUCT, "p7")
        .attr(DATA_TITLE, "Widget")
        .price_text("120,000 Toman");
    ProductCard::try_from(&markup).unwrap()
}

#[tokio::test]
async fn test_seeded_user_logs_in_and_shops() {
    let ctx = TestContext::new().unwrap();
    let source = JsonSeedSource(serde_json::json!([
        {"name": "Bob", "email": "bob@x.com", "password": "p2"}
    ]));

    let page = load_page(&ctx.state, Some(&source)).await.unwrap();
    assert!(matches!(page.seed, PageSeed::Ran(SeedOutcome::Merged(_))));
    assert_eq!(page.auth.state, AuthState::LoggedOut);

    let feedback = BuyCommand { product: widget() }.execute(&ctx.state);
    assert_eq!(
        feedback.notice,
        Notice::Confirm {
            text: "You need to log in to buy. Go to the login page?".to_string(),
            on_accept: Redirect::immediate(LOGIN_PAGE),
        }
    );

    let feedback = LoginCommand {
        email: "BOB@X.COM".to_string(),
        password: SecretString::from("p2"),
    }
    .execute(&ctx.state);
    assert_eq!(feedback.text(), "Welcome, Bob!");
    assert_eq!(feedback.redirect.map(|r| r.to), Some(INDEX_PAGE));

    let page = load_page(&ctx.state, Some(&source)).await.unwrap();
    assert_eq!(page.seed, PageSeed::Ran(SeedOutcome::AlreadySeeded));
    assert!(page.auth.user_area.contains("Hello, Bob"));
    assert!(!page.auth.buy_button.disabled);

    BuyCommand { product: widget() }.execute(&ctx.state);
    let again = BuyCommand { product: widget() }.execute(&ctx.state);
    assert_eq!(again.text(), "This product is already in your cart.");

    let session = ctx.state.sessions().current().unwrap();
    let html = render_cart(&ctx.state, &session.email).unwrap();
    assert!(html.contains("Widget"));
    assert!(html.contains("120,000"));
}

#[tokio::test]
async fn test_register_logout_cycle_with_failed_seed() {
    let ctx = TestContext::new().unwrap();
    let page = load_page(&ctx.state, Some(&UnreachableSeedSource))
        .await
        .unwrap();
    assert_eq!(page.seed, PageSeed::Ran(SeedOutcome::Failed));

    let feedback = RegisterCommand {
        name: "Ali".to_string(),
        email: "ali@x.com".to_string(),
        password: SecretString::from("p1"),
    }
    .execute(&ctx.state);
    assert_eq!(feedback.text(), "Registration successful!");

    let reopened = ctx.reopen().unwrap();
    assert_eq!(reopened.sessions().state(), AuthState::LoggedIn);

    let feedback = LogoutCommand.execute(&reopened);
    assert_eq!(feedback.text(), "You have been logged out.");
    assert_eq!(ctx.reopen().unwrap().sessions().state(), AuthState::LoggedOut);
}

#[test]
fn test_contact_form() {
    let ctx = TestContext::new().unwrap();

    let sent = ContactCommand {
        name: Some("Sara".to_string()),
        email: Some("sara@x.com".to_string()),
        message: "Do you ship abroad?".to_string(),
    }
    .execute(&ctx.state);
    assert!(sent.reset_form);

    let empty = ContactCommand {
        message: String::new(),
        ..ContactCommand::default()
    }
    .execute(&ctx.state);
    assert!(!empty.reset_form);

    let messages = ctx.reopen().unwrap().contact().list();
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages.first().map(|m| m.message.as_str()),
        Some("Do you ship abroad?")
    );
}
