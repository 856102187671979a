//! Shop CLI - browse the store, manage the cart and check out from a terminal.
//!
//! Commands:
//! - `shop products` - List the catalog
//! - `shop product <id>` - Show one product, optionally add it to the cart
//! - `shop cart` - Show and change the cart
//! - `shop checkout` - Fill in the order form and place the order
//! - `shop browse` - Interactive storefront
//! - `shop open <fragment>` - Render the screen a `#/...` link points to
//! - `shop config` - Manage configuration

mod commands;
mod config;
mod context;
mod notifier;
mod output;
mod screens;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{
    BrowseArgs, CartArgs, CheckoutArgs, ConfigArgs, OpenArgs, ProductArgs, ProductsArgs,
};

/// Shop CLI - a terminal storefront
#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// API host, overrides config and environment
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Store path segment, overrides config and environment
    #[arg(long, global = true)]
    api_path: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products(ProductsArgs),

    /// Show a product
    Product(ProductArgs),

    /// Show or change the cart
    Cart(CartArgs),

    /// Place an order for the cart
    Checkout(CheckoutArgs),

    /// Browse the store interactively
    Browse(BrowseArgs),

    /// Render the screen for a location fragment
    Open(OpenArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let overrides = context::Overrides {
        base_url: cli.base_url,
        api_path: cli.api_path,
    };
    let ctx = match context::Context::load(cli.config.as_deref(), overrides, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    init_tracing(cli.verbose, &ctx.config.log.filter);

    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Open(args) => commands::open::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`, which wins over the config file.
fn init_tracing(verbose: bool, configured: &str) {
    let fallback = if verbose { "debug" } else { configured };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
