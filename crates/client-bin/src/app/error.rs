//! CLI error type and exit codes.

use api_client::ApiError;
use api_types::Role;
use client_config_and_utils::CoreError;
use client_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// A failed API call, already phrased for the user.
    #[error("{message}")]
    Api {
        message: String,
        #[source]
        source: ApiError,
    },

    #[error("Your session has expired. Run `food-delivery login` to sign in again.")]
    SessionExpired,

    #[error("You are not logged in. Run `food-delivery login` first.")]
    NotLoggedIn,

    #[error("This command needs the {required} role; you are logged in as {actual}.")]
    Forbidden { required: String, actual: Role },

    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Phrase an API failure for the terminal, using `fallback` when the
    /// server gave no readable reason.
    pub fn from_api(error: ApiError, fallback: &str) -> Self {
        match error {
            ApiError::SessionExpired => CliError::SessionExpired,
            ApiError::NotLoggedIn => CliError::NotLoggedIn,
            ApiError::Forbidden { required, actual } => CliError::Forbidden {
                required: required
                    .iter()
                    .map(Role::as_str)
                    .collect::<Vec<_>>()
                    .join(" or "),
                actual,
            },
            ApiError::Timeout => CliError::Api {
                message: format!("{fallback}: the server did not respond in time"),
                source: error,
            },
            ApiError::Http(_) => CliError::Api {
                message: format!("{fallback}: could not reach the server"),
                source: error,
            },
            ApiError::Status { .. } => CliError::Api {
                message: error.user_message(fallback),
                source: error,
            },
            other => CliError::Api {
                message: format!("{fallback}: {other}"),
                source: other,
            },
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::SessionExpired | CliError::NotLoggedIn => 2,
            CliError::Forbidden { .. } => 3,
            CliError::Usage(_) => 64,
            _ => 1,
        }
    }
}

impl From<ApiError> for CliError {
    fn from(error: ApiError) -> Self {
        CliError::from_api(error, "Request failed")
    }
}

/// Attach a per-command fallback message to API results.
pub trait OrFail<T> {
    fn or_fail(self, fallback: &str) -> CliResult<T>;
}

impl<T> OrFail<T> for Result<T, ApiError> {
    fn or_fail(self, fallback: &str) -> CliResult<T> {
        self.map_err(|e| CliError::from_api(e, fallback))
    }
}
