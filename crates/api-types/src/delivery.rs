//! Delivery partner models.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryPartner {
    pub id: i64,
    pub user_id: i64,
    pub available: bool,
    pub pin_code: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityToggle {
    pub available: bool,
}
