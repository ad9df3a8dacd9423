//! Admin panel models.
//!
//! The admin service references related rows by bare id (`owner`,
//! `restaurant`) and adds read-only display names next to them.

use serde::{Deserialize, Serialize};

use crate::{Amount, Role};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminRestaurant {
    pub id: i64,
    pub name: String,
    pub owner: i64,
    #[serde(default)]
    pub owner_email: Option<String>,
    #[serde(default)]
    pub owner_name: Option<String>,
    pub pin_code: String,
    pub status: String,
    pub is_ordering_enabled: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminRestaurantCreate {
    pub name: String,
    pub owner: i64,
    pub pin_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_ordering_enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: i64,
    #[serde(default)]
    pub restaurant: Option<i64>,
    #[serde(default)]
    pub restaurant_name: Option<String>,
    pub discount_percentage: Amount,
    pub min_order_value: Amount,
    pub first_time_user_only: bool,
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// `restaurant: None` creates a platform-wide offer.
#[derive(Debug, Clone, Serialize)]
pub struct OfferCreate {
    pub restaurant: Option<i64>,
    pub discount_percentage: Amount,
    pub min_order_value: Amount,
    pub first_time_user_only: bool,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    pub id: i64,
    #[serde(default)]
    pub restaurant: Option<i64>,
    #[serde(default)]
    pub restaurant_name: Option<String>,
    pub delivery_fee: Amount,
    pub platform_fee: Amount,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeeCreate {
    pub restaurant: Option<i64>,
    pub delivery_fee: Amount,
    pub platform_fee: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub pin_code: String,
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}
