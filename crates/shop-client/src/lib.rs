//! HTTP client for the remote shop API.
//!
//! Every endpoint lives under `{base_url}/v2/api/{api_path}` and answers
//! with a JSON envelope carrying `success` and `message`. This crate
//! turns those calls into typed operations behind [`StorefrontApi`].
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_client::{ApiConfig, ShopClient, StorefrontApi};
//!
//! let config = ApiConfig::from_env()?;
//! let api = ShopClient::from_config(&config);
//!
//! let products = api.list_products().await?;
//! api.add_item(&products[0].id, Quantity::ONE).await?;
//! let cart = api.get_cart().await?;
//! ```

mod api;
mod client;
mod config;
mod error;
mod request;
mod response;
mod transport;

#[cfg(test)]
mod testing;

pub use api::{ShopClient, StorefrontApi};
pub use client::FetchClient;
pub use config::*;
pub use error::{ConfigError, FetchError};
pub use request::{Request, RequestBuilder};
pub use response::{ApiMessage, Envelope, Response};
pub use transport::{ReqwestTransport, Transport};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiConfig, FetchError, ShopClient, StorefrontApi, Transport};
}
