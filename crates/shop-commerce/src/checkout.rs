//! Order submission types.

use crate::ids::OrderId;
use crate::money::Amount;
use serde::{Deserialize, Serialize};

/// Recipient contact details sent with an order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderUser {
    pub email: String,
    pub name: String,
    pub tel: String,
    pub address: String,
}

/// An order as posted to the shop API.
///
/// The server builds the order from its own cart; the client only adds
/// who it ships to and an optional note.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderSubmission {
    pub user: OrderUser,
    #[serde(default)]
    pub message: String,
}

impl OrderSubmission {
    /// Bundle contact details and a message.
    pub fn new(user: OrderUser, message: impl Into<String>) -> Self {
        Self {
            user,
            message: message.into(),
        }
    }
}

/// What the server returns after accepting an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReceipt {
    /// Server-issued order id.
    #[serde(rename = "orderId")]
    pub order_id: OrderId,
    /// Order total.
    #[serde(default)]
    pub total: Amount,
    /// Unix timestamp (seconds) of creation.
    #[serde(default)]
    pub create_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_submission_wire_shape() {
        let order = OrderSubmission::new(
            OrderUser {
                email: "buyer@example.com".into(),
                name: "Lin".into(),
                tel: "0912345678".into(),
                address: "Taipei".into(),
            },
            "Leave at the door",
        );

        assert_eq!(
            serde_json::to_value(&order).unwrap(),
            json!({
                "user": {
                    "email": "buyer@example.com",
                    "name": "Lin",
                    "tel": "0912345678",
                    "address": "Taipei"
                },
                "message": "Leave at the door"
            })
        );
    }

    #[test]
    fn test_receipt_from_order_response() {
        let receipt: OrderReceipt = serde_json::from_value(json!({
            "success": true,
            "message": "Order created",
            "total": 2500,
            "create_at": 1523539519,
            "orderId": "-L9u2EUkQSoEmW7QzGLF"
        }))
        .unwrap();

        assert_eq!(receipt.order_id.as_str(), "-L9u2EUkQSoEmW7QzGLF");
        assert_eq!(receipt.total.value(), 2500.0);
        assert_eq!(receipt.create_at, 1523539519);
    }
}
