//! Line quantities.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A positive line quantity.
///
/// Cart lines always hold at least one unit; the decrement control is
/// disabled at one instead of letting a line reach zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// Smallest quantity a line can hold.
    pub const MIN: u32 = 1;

    /// Largest quantity the product quantity selector offers.
    pub const SELECTOR_MAX: u32 = 10;

    /// One unit.
    pub const ONE: Quantity = Quantity(1);

    /// Create a quantity, rejecting zero.
    pub fn new(qty: u32) -> Result<Self, CommerceError> {
        if qty < Self::MIN {
            return Err(CommerceError::InvalidQuantity(qty));
        }
        Ok(Self(qty))
    }

    /// Create a quantity the selector can offer (1 through 10).
    pub fn selectable(qty: u32) -> Result<Self, CommerceError> {
        let qty = Self::new(qty)?;
        if qty.0 > Self::SELECTOR_MAX {
            return Err(CommerceError::QuantityOutOfRange(qty.0, Self::SELECTOR_MAX));
        }
        Ok(qty)
    }

    /// The options shown by the quantity selector, in order.
    pub fn selector_options() -> impl Iterator<Item = Quantity> {
        (Self::MIN..=Self::SELECTOR_MAX).map(Quantity)
    }

    /// The raw count.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Whether the "-" control is enabled.
    pub fn can_decrement(self) -> bool {
        self.0 > Self::MIN
    }

    /// One more unit.
    pub fn incremented(self) -> Quantity {
        Quantity(self.0.saturating_add(1))
    }

    /// One fewer unit, or `None` when already at the minimum.
    pub fn decremented(self) -> Option<Quantity> {
        if self.can_decrement() {
            Some(Quantity(self.0 - 1))
        } else {
            None
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for Quantity {
    type Error = CommerceError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Quantity::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(qty: Quantity) -> Self {
        qty.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
