//! Restaurants and dishes.

use serde::{Deserialize, Serialize};

use crate::Amount;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub pin_code: String,
    pub owner_id: i64,
    pub status: String,
    pub is_ordering_enabled: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub price: Amount,
    #[serde(default)]
    pub photo_path: Option<String>,
    pub available: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DishCreate {
    pub restaurant_id: i64,
    pub name: String,
    pub price: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_path: Option<String>,
    pub available: bool,
}

/// Partial update; unset fields are left out of the request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DishUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

impl DishUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.photo_path.is_none()
            && self.available.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderingToggle {
    pub is_ordering_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderingToggleResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub is_ordering_enabled: bool,
}
