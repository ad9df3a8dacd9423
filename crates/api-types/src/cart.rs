//! Server-side cart.

use serde::{Deserialize, Serialize};

use crate::Amount;

/// The cart as computed by the server. `subtotal` is authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub restaurant_id: Option<i64>,
    #[serde(default)]
    pub restaurant_name: Option<String>,
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub subtotal: Amount,
    #[serde(default)]
    pub item_count: i64,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub dish_id: i64,
    pub dish_name: String,
    pub price: Amount,
    pub quantity: i64,
    pub subtotal: Amount,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartAddRequest {
    pub dish_id: i64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartRemoveRequest {
    pub dish_id: i64,
}

/// Result of rebuilding the cart from a past order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub cart: Cart,
    #[serde(default)]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_subtotal_is_server_value() {
        let cart: Cart = serde_json::from_str(
            r#"{
                "restaurant_id": 1,
                "restaurant_name": "Dosa Corner",
                "items": [
                    {"dish_id": 1, "dish_name": "Masala Dosa", "price": "75.00", "quantity": 2, "subtotal": "150.00"},
                    {"dish_id": 2, "dish_name": "Thali", "price": "200.00", "quantity": 1, "subtotal": "200.00"}
                ],
                "subtotal": "350.00",
                "item_count": 3
            }"#,
        )
        .unwrap();

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].subtotal.to_string(), "150.00");
        assert_eq!(cart.subtotal.to_string(), "350.00");
        assert_eq!(cart.item_count, 3);
    }

    #[test]
    fn test_empty_cart() {
        let cart: Cart = serde_json::from_str(
            r#"{"restaurant_id":null,"restaurant_name":null,"items":[],"subtotal":"0.00","item_count":0}"#,
        )
        .unwrap();
        assert!(cart.is_empty());
        assert!(cart.restaurant_name.is_none());
    }
}
