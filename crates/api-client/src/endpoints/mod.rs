//! Typed endpoint groups over [`ApiClient::send`].
//!
//! Each group borrows the client; `client.customer().cart().await`.

mod admin;
mod auth;
mod customer;
mod delivery;
mod restaurant;
mod support;

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use customer::CustomerApi;
pub use delivery::DeliveryApi;
pub use restaurant::RestaurantApi;
pub use support::SupportApi;

use crate::ApiClient;

impl ApiClient {
    /// Auth service: login, signup, `users/me`.
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { client: self }
    }

    /// Customer endpoints on the core API.
    pub fn customer(&self) -> CustomerApi<'_> {
        CustomerApi { client: self }
    }

    /// Restaurant-owner endpoints on the core API.
    pub fn restaurant(&self) -> RestaurantApi<'_> {
        RestaurantApi { client: self }
    }

    /// Delivery-partner endpoints on the core API.
    pub fn delivery(&self) -> DeliveryApi<'_> {
        DeliveryApi { client: self }
    }

    /// Customer-care endpoints on the core API.
    pub fn support(&self) -> SupportApi<'_> {
        SupportApi { client: self }
    }

    /// Admin panel endpoints on the admin base URL.
    pub fn admin(&self) -> AdminApi<'_> {
        AdminApi { client: self }
    }
}
