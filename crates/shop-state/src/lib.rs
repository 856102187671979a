//! Storefront state, independent of any UI toolkit.
//!
//! - [`CartStore`]: the shared, server-backed cart with subscribers
//! - [`ProductList`], [`ProductDetail`], [`ProductModal`]: product screens
//! - [`CheckoutForm`] and [`submit_order`]: contact form and ordering
//! - [`Route`]: the hash-fragment router
//!
//! Everything is single-threaded: state lives in `Rc`/`RefCell` and the
//! async operations are driven by whatever local executor the host runs
//! (the browser event loop or a current-thread tokio runtime).
//!
//! Failures are reported once through a [`Notifier`] and then returned,
//! so callers only need to check the result when they sequence work.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use shop_state::prelude::*;
//!
//! let store = CartStore::new(Rc::new(api), Rc::new(RecordingNotifier::new()));
//! store.subscribe(|cart| println!("{} lines", cart.rows().len()));
//! store.refresh().await?;
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod notify;
pub mod route;
pub mod sequence;

pub use cart::{CartRow, CartSnapshot, CartStore, Refresh, SubscriptionId};
pub use catalog::{quick_add, Load, ProductDetail, ProductList, ProductModal};
pub use checkout::{submit_order, CheckoutForm, Field, FormErrors};
pub use error::ShopError;
pub use notify::{Action, Notice, NoticeLevel, Notifier, RecordingNotifier};
pub use route::Route;
pub use sequence::{RequestSequence, RequestToken};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{CartSnapshot, CartStore};
    pub use crate::catalog::{ProductDetail, ProductList, ProductModal};
    pub use crate::checkout::{submit_order, CheckoutForm, Field};
    pub use crate::error::ShopError;
    pub use crate::notify::{Notice, Notifier, RecordingNotifier};
    pub use crate::route::Route;
}
