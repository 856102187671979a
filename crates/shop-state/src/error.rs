//! Storefront state errors.

use shop_client::FetchError;
use shop_commerce::{CartItemId, CommerceError};
use thiserror::Error;

use crate::checkout::FormErrors;

/// Errors returned by storefront operations.
///
/// Network failures have already been reported through the
/// [`Notifier`](crate::Notifier) by the time a caller sees them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShopError {
    /// The remote call failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Checkout needs at least one cart line.
    #[error("The cart is empty")]
    EmptyCart,

    /// Checkout fields failed validation.
    #[error("Checkout form is invalid: {0}")]
    InvalidForm(FormErrors),

    /// The "-" control is disabled at one unit.
    #[error("Quantity is already at the minimum")]
    AtMinimumQuantity,

    /// The line is not in the current cart snapshot.
    #[error("Cart line not found: {0}")]
    UnknownLine(CartItemId),

    /// No product is loaded on the screen.
    #[error("No product selected")]
    NoProduct,

    /// Domain rule violation (e.g. quantity outside the selector).
    #[error(transparent)]
    Commerce(#[from] CommerceError),
}
