//! Storefront domain types.
//!
//! Everything here mirrors what the remote shop API returns. The client
//! never prices anything itself: totals, stock and persistence belong to
//! the server, and these types only carry the server's answers around.
//!
//! - **Catalog**: [`Product`]
//! - **Cart**: [`Cart`] and its [`CartItem`] lines
//! - **Checkout**: [`OrderSubmission`] and the [`OrderReceipt`] it yields
//! - **Quantity**: the positive line quantity and the 1–10 selector range
//!
//! # Example
//!
//! ```
//! use shop_commerce::prelude::*;
//!
//! let cart: Cart = serde_json::from_str(r#"{"carts": [], "total": 0}"#).unwrap();
//! assert!(cart.is_empty());
//!
//! let qty = Quantity::selectable(2).unwrap();
//! assert!(qty.can_decrement());
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod ids;
pub mod money;
pub mod quantity;

pub use cart::{Cart, CartItem};
pub use catalog::Product;
pub use checkout::{OrderReceipt, OrderSubmission, OrderUser};
pub use error::CommerceError;
pub use ids::*;
pub use money::Amount;
pub use quantity::Quantity;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{Cart, CartItem};
    pub use crate::catalog::Product;
    pub use crate::checkout::{OrderReceipt, OrderSubmission, OrderUser};
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Amount;
    pub use crate::quantity::Quantity;
}
