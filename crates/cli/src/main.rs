//! Rowing Shop CLI - browse, order and administer the shop from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! rowing-cli products
//!
//! # Sign in (password from ROWING_SHOP_PASSWORD or prompted)
//! rowing-cli login -e stroke@club.ca
//!
//! # Order two of one product using details from a JSON file
//! rowing-cli order --item 7d4c4f8e-7a3c-4c53-9a51-0f4d3b8e2c10:2 --details checkout.json
//!
//! # List registered users (administrators only)
//! rowing-cli admin users
//! ```
//!
//! # Commands
//!
//! - `products` - List the catalog or show one product
//! - `login` / `logout` / `whoami` - Session management
//! - `register` / `change-password` - Account management
//! - `orders` / `order` - Order history and checkout
//! - `contact` - Send a message to the shop
//! - `admin` - User and contact-message administration
//!
//! Tokens are kept in `ROWING_SHOP_SESSION_FILE` (default
//! `.rowing-shop-session.json`) between runs.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rowing_shop_core::ProductId;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "rowing-cli")]
#[command(author, version, about = "Rowing Shop command-line client")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products, or show one product
    Products {
        /// Product ID
        #[arg(long)]
        id: Option<ProductId>,
    },
    /// Sign in
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,
    },
    /// Sign out and forget stored tokens
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Create an account
    Register {
        /// Account email address
        #[arg(short, long)]
        email: String,
    },
    /// Change the signed-in user's password
    ChangePassword,
    /// List the signed-in user's orders
    Orders,
    /// Place an order
    Order {
        /// Line to order, as `PRODUCT_ID:QUANTITY` (repeatable)
        #[arg(long = "item", required = true, value_parser = commands::shop::parse_item)]
        items: Vec<(ProductId, u32)>,

        /// JSON file with `shippingDetails` and `paymentDetails`
        #[arg(long)]
        details: PathBuf,
    },
    /// Send a message to the shop
    Contact {
        /// Reply-to email address
        #[arg(short, long)]
        email: String,

        /// Message text (at most 300 characters)
        #[arg(short, long)]
        message: String,
    },
    /// Administer users and contact messages
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// List all users
    Users,
    /// Create a user (password from ROWING_SHOP_NEW_PASSWORD or prompted)
    CreateUser {
        /// New account's email address
        #[arg(short, long)]
        email: String,
    },
    /// Delete a user
    DeleteUser {
        /// User ID
        id: rowing_shop_core::UserId,
    },
    /// List contact-form messages
    Contacts,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rowing_shop_storefront=info,rowing_shop_cli=info".into());

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let shell = commands::Shell::start().await?;

    let outcome = match cli.command {
        Commands::Products { id } => commands::shop::products(&shell, id).await,
        Commands::Login { email } => commands::account::login(&shell, &email).await,
        Commands::Logout => {
            commands::account::logout(&shell).await;
            Ok(())
        }
        Commands::Whoami => commands::account::whoami(&shell),
        Commands::Register { email } => commands::account::register(&shell, &email).await,
        Commands::ChangePassword => commands::account::change_password(&shell).await,
        Commands::Orders => commands::shop::orders(&shell).await,
        Commands::Order { items, details } => {
            commands::shop::order(&shell, &items, &details).await
        }
        Commands::Contact { email, message } => {
            commands::shop::contact(&shell, &email, &message).await
        }
        Commands::Admin { action } => match action {
            AdminAction::Users => commands::admin::users(&shell).await,
            AdminAction::CreateUser { email } => commands::admin::create_user(&shell, &email).await,
            AdminAction::DeleteUser { id } => commands::admin::delete_user(&shell, id).await,
            AdminAction::Contacts => commands::admin::contacts(&shell).await,
        },
    };

    // Persist whatever the command left behind, including a cleared session.
    shell.finish()?;
    outcome?;
    Ok(())
}
