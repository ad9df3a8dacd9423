//! Storage key constants.

/// Storage keys used by the client
pub struct StorageKeys;

impl StorageKeys {
    /// Short-lived bearer credential
    pub const ACCESS_TOKEN: &'static str = "access_token";

    /// Long-lived credential exchanged for new access tokens
    pub const REFRESH_TOKEN: &'static str = "refresh_token";

    /// Cached session user (JSON)
    pub const USER: &'static str = "user";
}
