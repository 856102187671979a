//! Commerce error types.

use thiserror::Error;

/// Errors raised by the domain types themselves.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Quantity must be a positive integer.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Quantity is outside what the selector offers.
    #[error("Quantity {0} is outside the selectable range 1..={1}")]
    QuantityOutOfRange(u32, u32),
}
