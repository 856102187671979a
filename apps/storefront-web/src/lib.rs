//! Tea shop storefront
//!
//! Client-side rendered shop over the remote shop API:
//! - Hash routing: `#/`, `#/products`, `#/products/:id`, `#/cart`
//! - One cart store shared by every page, refreshed after each change
//! - Checkout form validated as fields are touched
//!
//! The API host and store path are baked in at build time from
//! `SHOP_BASE_URL` and `SHOP_API_PATH`.

pub mod app;
mod notifier;
