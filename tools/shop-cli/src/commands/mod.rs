//! CLI command implementations.

pub mod browse;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod open;
pub mod product;
pub mod products;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Only show products in this category.
    #[arg(short = 'C', long)]
    pub category: Option<String>,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub id: String,

    /// Add the product to the cart.
    #[arg(short, long)]
    pub add: bool,

    /// Quantity to add (1-10).
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..=10))]
    pub qty: u32,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add a product.
    Add {
        /// Product ID.
        product_id: String,
        /// Quantity (1-10).
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..=10))]
        qty: u32,
    },
    /// Set the quantity of a line.
    Set {
        /// Cart line ID.
        line: String,
        /// New quantity.
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        qty: u32,
    },
    /// One more unit of a line.
    Inc {
        /// Cart line ID.
        line: String,
    },
    /// One fewer unit of a line.
    Dec {
        /// Cart line ID.
        line: String,
    },
    /// Remove a line.
    Remove {
        /// Cart line ID.
        line: String,
    },
    /// Remove every line.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command.
///
/// Missing fields are prompted for when running in a terminal.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Recipient email.
    #[arg(long)]
    pub email: Option<String>,

    /// Recipient name.
    #[arg(long)]
    pub name: Option<String>,

    /// Recipient phone.
    #[arg(long)]
    pub tel: Option<String>,

    /// Shipping address.
    #[arg(long)]
    pub address: Option<String>,

    /// Note for the shop.
    #[arg(long)]
    pub message: Option<String>,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Start at this location, e.g. `#/products`.
    #[arg(default_value = "#/")]
    pub start: String,
}

/// Arguments for the open command.
#[derive(Args)]
pub struct OpenArgs {
    /// Location fragment, e.g. `#/products/abc`.
    pub fragment: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// API host.
        #[arg(long, default_value = "https://ec-course-api.hexschool.io")]
        base_url: String,
        /// Store path segment.
        #[arg(long)]
        api_path: Option<String>,
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the configuration.
    Validate,
}
