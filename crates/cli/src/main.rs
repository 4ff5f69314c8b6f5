//! FoodChain CLI - Browse the marketplace and drive a storefront session.
//!
//! # Usage
//!
//! ```bash
//! # List products, optionally searching and filtering by tag
//! foodchain products --search salmon --filter sustainable
//!
//! # Show one product with its supply chain
//! foodchain product 3
//!
//! # List DAO proposals
//! foodchain proposals
//!
//! # Interactive session: login, cart, voting, minting
//! foodchain shell
//! ```
//!
//! # Commands
//!
//! - `products` - Search the catalog
//! - `product` - Product detail and provenance
//! - `proposals` - Governance board
//! - `shell` - Interactive storefront session

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use foodchain_core::ProductId;
use foodchain_storefront::catalog::ProductFilter;
use foodchain_storefront::config::StorefrontConfig;
use foodchain_storefront::state::AppState;

mod commands;

#[derive(Parser)]
#[command(name = "foodchain")]
#[command(author, version, about = "FoodChain marketplace CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products in the catalog
    Products {
        /// Match against product name or vendor
        #[arg(short, long, default_value = "")]
        search: String,

        /// Tag filter (`all`, `halal`, `organic`, `local`, `sustainable`)
        #[arg(short, long, default_value = "all")]
        filter: ProductFilter,
    },
    /// Show a product and its supply chain
    Product {
        /// Product ID
        id: ProductId,
    },
    /// List governance proposals
    Proposals,
    /// Start an interactive storefront session
    Shell,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some(config.sentry_environment.clone().into()),
            sample_rate: config.sentry_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration first (needed for Sentry init)
    let config = StorefrontConfig::from_env();

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    // Logs go to stderr so they don't interleave with command output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "foodchain_storefront=info,foodchain_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result: Result<(), Box<dyn std::error::Error>> = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(config)?;

    match cli.command {
        Commands::Products { search, filter } => {
            commands::catalog::list(state.catalog(), &search, &filter);
        }
        Commands::Product { id } => commands::catalog::show(state.catalog(), id)?,
        Commands::Proposals => commands::governance::list(&state.proposals()?),
        Commands::Shell => commands::shell::run(&state).await?,
    }
    Ok(())
}
