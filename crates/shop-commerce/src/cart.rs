//! Cart and cart line types.
//!
//! These are snapshots of the server cart. There is no local add or
//! remove here: the client mutates the cart through the API and then
//! re-fetches, so a [`Cart`] is always exactly what the server last said.

use crate::catalog::Product;
use crate::ids::{CartItemId, ProductId};
use crate::money::Amount;
use crate::quantity::Quantity;
use serde::{Deserialize, Serialize};

/// The server cart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cart {
    /// Cart lines, in server order.
    #[serde(default)]
    pub carts: Vec<CartItem>,
    /// Sum of line totals.
    #[serde(default)]
    pub total: Amount,
    /// Total after coupons, when the server reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_total: Option<Amount>,
}

impl Cart {
    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.carts.len()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u32 {
        self.carts.iter().map(|line| line.qty.get()).sum()
    }

    /// Find a line by its id.
    pub fn line(&self, id: &CartItemId) -> Option<&CartItem> {
        self.carts.iter().find(|line| &line.id == id)
    }

    /// Find the line holding a product.
    pub fn line_for_product(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.carts.iter().find(|line| &line.product_id == product_id)
    }

    /// The amount the customer pays.
    pub fn payable_total(&self) -> Amount {
        self.final_total.unwrap_or(self.total)
    }
}

/// One line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Cart line id, used for update and remove.
    pub id: CartItemId,
    /// Product on this line.
    pub product_id: ProductId,
    /// Units on this line.
    pub qty: Quantity,
    /// Product snapshot embedded by the server.
    pub product: Product,
    /// Server-computed price × qty.
    #[serde(default)]
    pub total: Amount,
    /// Line total after coupons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_total: Option<Amount>,
}

impl CartItem {
    /// Whether the "-" control is enabled for this line.
    pub fn can_decrement(&self) -> bool {
        self.qty.can_decrement()
    }

    /// The amount charged for this line.
    pub fn payable_total(&self) -> Amount {
        self.final_total.unwrap_or(self.total)
    }
}
