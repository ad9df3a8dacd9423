//! Wire models for the food delivery backend.
//!
//! Field names follow the JSON the auth and core services emit. Timestamps are
//! kept as the server's ISO-8601 strings and money as [`Amount`].

mod admin;
mod amount;
mod auth;
mod cart;
mod catalog;
mod complaints;
mod delivery;
mod error_body;
mod orders;

pub use admin::{AdminRestaurant, AdminRestaurantCreate, AdminUser, Fee, FeeCreate, Offer, OfferCreate};
pub use amount::{Amount, AmountError};
pub use auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, Role, SignupRequest,
    SignupResponse, User,
};
pub use cart::{Cart, CartAddRequest, CartItem, CartRemoveRequest, ReorderResponse};
pub use catalog::{Dish, DishCreate, DishUpdate, OrderingToggle, OrderingToggleResponse, Restaurant};
pub use complaints::{Complaint, ComplaintCreate, ComplaintResolve, ComplaintStatus};
pub use delivery::{AvailabilityToggle, DeliveryPartner};
pub use error_body::ErrorBody;
pub use orders::{CheckoutRequest, Order, OrderItem, OrderStatus, OrderStatusUpdate, PaymentMode};

use thiserror::Error;

/// Returned when a string does not name a known enum variant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} '{value}', expected one of: {expected}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}
