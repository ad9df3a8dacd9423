//! Client for the food delivery backend.
//!
//! This crate provides:
//! - [`ApiClient`]: bearer-token requests with single-flight renewal on 401
//! - [`SessionManager`]: login, signup, session user, logout, role gating
//! - Typed endpoint groups (`client.customer()`, `client.admin()`, ...)
//! - An explicit FSM-based auth state with change callbacks

mod auth_fsm;
mod client;
mod descriptor;
mod endpoints;
mod error;
mod events;
mod renewal;
mod response;
mod session;

pub use auth_fsm::auth_machine;
pub use auth_fsm::{AuthMachine, AuthMachineInput, AuthMachineState, AuthState, AuthStateChangedPayload};
pub use client::{ApiClient, ClientSettings};
pub use descriptor::RequestDescriptor;
pub use endpoints::{AdminApi, AuthApi, CustomerApi, DeliveryApi, RestaurantApi, SupportApi};
pub use error::{ApiError, ApiResult};
pub use events::{AuthStateCallback, SessionEvent, SessionEventCallback};
pub use renewal::RenewalOutcome;
pub use response::ApiResponse;
pub use session::SessionManager;
