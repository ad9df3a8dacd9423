//! API client error types.

use api_types::{ErrorBody, Role};
use thiserror::Error;

/// Error type for every call made through the API client.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (connect, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// The request exceeded its time budget
    #[error("Request timed out")]
    Timeout,

    /// The server answered with a non-success status
    #[error("Server returned {status}: {}", .detail.as_deref().unwrap_or(.body.as_str()))]
    Status {
        status: u16,
        /// `detail` message from the error body, if any
        detail: Option<String>,
        /// Raw response body
        body: String,
    },

    /// Credential renewal failed; the session has been cleared
    #[error("Session expired, please log in again")]
    SessionExpired,

    /// No credentials are stored
    #[error("Not logged in")]
    NotLoggedIn,

    /// Logged in, but the user's role may not perform this action
    #[error("Role {actual} is not allowed here (requires {})", format_roles(.required))]
    Forbidden { required: Vec<Role>, actual: Role },

    /// Invalid state transition in the auth FSM
    #[error("Invalid auth state transition: {0}")]
    InvalidStateTransition(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] client_storage::StorageError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parse error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

fn format_roles(roles: &[Role]) -> String {
    roles
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(" or ")
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Http(err)
        }
    }
}

impl From<client_config_and_utils::CoreError> for ApiError {
    fn from(err: client_config_and_utils::CoreError) -> Self {
        ApiError::Config(err.to_string())
    }
}

impl ApiError {
    /// Build a status error from a response body.
    pub fn from_status(status: u16, body: String) -> Self {
        let detail = ErrorBody::parse(&body).and_then(|b| b.detail_message());
        ApiError::Status {
            status,
            detail,
            body,
        }
    }

    /// The server's `detail` message, or `fallback` for everything else.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_string(),
        }
    }

    /// HTTP status, for errors that carry one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the same call may succeed when issued again later.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Timeout => true,
            ApiError::Http(e) => e.is_connect(),
            ApiError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Result type alias using ApiError.
pub type ApiResult<T> = Result<T, ApiError>;
