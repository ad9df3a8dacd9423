//! Auth service models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ParseEnumError;

/// Platform role carried by every user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Admin")]
    Admin,
    #[serde(rename = "Restaurant Owner")]
    RestaurantOwner,
    #[serde(rename = "Customer")]
    Customer,
    #[serde(rename = "Delivery Partner")]
    DeliveryPartner,
    #[serde(rename = "Customer Care")]
    CustomerCare,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::RestaurantOwner,
        Role::Customer,
        Role::DeliveryPartner,
        Role::CustomerCare,
    ];

    /// The name the backend uses on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::RestaurantOwner => "Restaurant Owner",
            Role::Customer => "Customer",
            Role::DeliveryPartner => "Delivery Partner",
            Role::CustomerCare => "Customer Care",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    /// Accepts the wire name or a kebab/snake-case spelling (`restaurant-owner`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().to_ascii_lowercase() == normalized)
            .ok_or_else(|| ParseEnumError {
                kind: "role",
                value: s.to_string(),
                expected: "admin, restaurant-owner, customer, delivery-partner, customer-care",
            })
    }
}

/// The authenticated user as returned by `/users/me` and login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub pin_code: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub role: Role,
    pub pin_code: String,
}

/// Signup echoes the created user. Some deployments also issue tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub user: User,
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// `refresh` is only present when the server rotates refresh tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}
