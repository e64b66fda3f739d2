//! Bazaar CLI - shop from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog
//! bazaar products
//!
//! # Add two units of product 3 to the cart, then review it
//! bazaar cart add 3 -q 2
//! bazaar cart show
//!
//! # Place and pay for an order from the cart
//! bazaar order
//!
//! # Retry payment, or follow an order
//! bazaar pay 7
//! bazaar track 7
//! ```
//!
//! # Environment Variables
//!
//! - `BAZAAR_API_BASE` - Order API base URL (default: http://127.0.0.1:5000/api)
//! - `BAZAAR_API_TIMEOUT_SECS` - Per-request timeout (default: 10)
//! - `BAZAAR_CART_DIR` - Directory holding `cart.json` (default: .bazaar)

#![cfg_attr(not(test), forbid(unsafe_code))]
// Command results are the program's output
#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use bazaar_core::ProductId;
use bazaar_storefront::config::DEFAULT_API_BASE;
use clap::{Parser, Subcommand};

mod commands;

use commands::{CliError, Context};

#[derive(Parser)]
#[command(name = "bazaar")]
#[command(author, version, about = "Bazaar storefront client")]
struct Cli {
    /// Order API base URL
    #[arg(long, global = true, env = "BAZAAR_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Seconds to wait for each API call
    #[arg(long, global = true, env = "BAZAAR_API_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    /// Directory the cart file is kept in
    #[arg(long, global = true, env = "BAZAAR_CART_DIR", default_value = ".bazaar")]
    cart_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products in the catalog
    Products,
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order for the cart and pay for it
    Order,
    /// Pay for an existing order
    Pay {
        /// Order ID
        order_id: String,
    },
    /// Show an order's status and items
    Track {
        /// Order ID
        order_id: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the cart
    Add {
        /// Product ID
        product_id: ProductId,

        /// Units to add (default 1)
        #[arg(short, long)]
        quantity: Option<String>,
    },
    /// Show the cart priced against the catalog
    Show,
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    // Logs go to stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => println!("{output}"),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<String, CliError> {
    let ctx = Context::new(&cli.api_base, cli.timeout_secs, &cli.cart_dir)?;

    let output = match cli.command {
        Commands::Products => commands::catalog::products(&ctx).await?,
        Commands::Cart { action } => match action {
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(&ctx, product_id, quantity.as_deref()).await?,
            CartAction::Show => commands::cart::show(&ctx).await?,
            CartAction::Clear => commands::cart::clear(&ctx).await?,
        },
        Commands::Order => commands::orders::place(&ctx).await?,
        Commands::Pay { order_id } => commands::orders::pay(&ctx, &order_id).await?,
        Commands::Track { order_id } => commands::orders::track(&ctx, &order_id).await?,
    };
    Ok(output)
}
