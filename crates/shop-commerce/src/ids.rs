//! Newtype IDs for server-issued identifiers.
//!
//! The shop API hands out opaque string ids for products, cart lines and
//! orders. Wrapping them keeps a cart line id from being passed where a
//! product id is expected (the update call takes both).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of a catalog product.
    ProductId
);
define_id!(
    /// Identifier of one cart line (not the product it refers to).
    CartItemId
);
define_id!(
    /// Identifier of a placed order.
    OrderId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("-L9tH8jxVb2Ka_DYPwng");
        assert_eq!(id.as_str(), "-L9tH8jxVb2Ka_DYPwng");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = CartItemId::new("line-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""line-1""#);

        let back: CartItemId = serde_json::from_str(r#""line-1""#).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_id_display() {
        let id = OrderId::new("order-789");
        assert_eq!(format!("{}", id), "order-789");
    }
}
