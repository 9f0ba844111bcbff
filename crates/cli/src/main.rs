//! Localshop CLI - drive the storefront store from a terminal.
//!
//! Every run opens the store file, performs the one-time seed import when a
//! seed source is configured, and then runs a single command the way the
//! page would handle the matching event.
//!
//! # Usage
//!
//! ```bash
//! # Import the seed list (if not imported yet)
//! SHOP_SEED_SOURCE=static/users.json shop-cli seed
//!
//! # Register and log in
//! shop-cli register -n Ali -e ali@x.com -p secret
//!
//! # Add a product to the logged-in user's cart
//! shop-cli cart add --product p7 --title Widget --price 120000
//!
//! # Dump the whole store as JSON
//! shop-cli debug
//! ```
//!
//! # Commands
//!
//! - `seed` - Run the one-time seed import
//! - `register`, `login`, `logout`, `whoami`, `users` - Accounts and session
//! - `cart add`, `cart show` - Cart of the logged-in user
//! - `contact`, `messages` - Contact message log
//! - `render` - Print the `.user-area` or cart markup
//! - `debug` - Dump the store

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use secrecy::SecretString;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use localshop_storefront::config::{LogFormat, SeedSourceConfig, ShopConfig};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "shop-cli")]
#[command(author, version, about = "Localshop storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the one-time seed import
    Seed {
        /// Seed list URL or file, overriding `SHOP_SEED_SOURCE`
        #[arg(short, long)]
        source: Option<SeedSourceConfig>,
    },
    /// Register a new user and log in
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: SecretString,
    },
    /// Log in as an existing user
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: SecretString,
    },
    /// Log out
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List registered users
    Users,
    /// Manage the logged-in user's cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Send a contact message
    Contact {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        message: String,
    },
    /// List contact messages
    Messages,
    /// Print page markup
    Render {
        #[arg(value_enum)]
        target: RenderTarget,
    },
    /// Dump every stored key as JSON
    Debug,
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product
    Add {
        /// Product id (`data-product`)
        #[arg(long)]
        product: String,

        /// Product title (`data-title`)
        #[arg(long)]
        title: Option<String>,

        /// Price (`data-price`)
        #[arg(long)]
        price: Option<String>,
    },
    /// Show cart contents and total
    Show,
}

#[derive(Clone, Copy, ValueEnum)]
enum RenderTarget {
    /// The `.user-area` fragment and buy-button state
    UserArea,
    /// The cart lines of the logged-in user
    Cart,
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match ShopConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::default());
            tracing::error!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(config.log_format);

    let cli = Cli::parse();

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr so command output stays clean on stdout.
fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "localshop_storefront=info,localshop_cli=info".into());

    let (json, pretty) = match format {
        LogFormat::Json => (
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
            None,
        ),
        LogFormat::Pretty => (
            None,
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        ),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json)
        .with(pretty)
        .init();
}

async fn run(cli: Cli, mut config: ShopConfig) -> Result<(), CliError> {
    if let Commands::Seed {
        source: Some(source),
    } = &cli.command
    {
        config.seed_source = Some(source.clone());
    }

    let (state, page) = commands::bootstrap(config).await?;

    match cli.command {
        Commands::Seed { .. } => commands::seed::report(page.seed),
        Commands::Register {
            name,
            email,
            password,
        } => commands::account::register(&state, name, email, password),
        Commands::Login { email, password } => commands::account::login(&state, email, password),
        Commands::Logout => commands::account::logout(&state),
        Commands::Whoami => commands::account::whoami(&state),
        Commands::Users => commands::account::users(&state),
        Commands::Cart { action } => match action {
            CartAction::Add {
                product,
                title,
                price,
            } => commands::cart::add(&state, &product, title.as_deref(), price.as_deref())?,
            CartAction::Show => commands::cart::show(&state),
        },
        Commands::Contact {
            name,
            email,
            message,
        } => commands::contact::send(&state, name, email, message),
        Commands::Messages => commands::contact::messages(&state)?,
        Commands::Render { target } => match target {
            RenderTarget::UserArea => commands::inspect::user_area(&page.auth),
            RenderTarget::Cart => commands::inspect::cart(&state)?,
        },
        Commands::Debug => commands::inspect::debug(&state)?,
    }

    Ok(())
}
