//! Credential pair and session-user persistence.

use crate::{KeyValueStorage, StorageKeys, StorageResult};

/// The credential capability handed to the API client.
///
/// The cached user is dropped whenever the credential pair changes, so a
/// stale projection never outlives the tokens it was fetched with.
pub trait SessionStore: Send + Sync {
    /// Current access token, read fresh on every call.
    fn access_token(&self) -> StorageResult<Option<String>>;

    /// Current refresh token.
    fn refresh_token(&self) -> StorageResult<Option<String>>;

    /// Replace the access token after a renewal.
    fn set_access_token(&self, token: &str) -> StorageResult<()>;

    /// Replace the refresh token when the backend rotates it.
    fn set_refresh_token(&self, token: &str) -> StorageResult<()>;

    /// Store a freshly issued pair.
    fn set_credentials(&self, access_token: &str, refresh_token: &str) -> StorageResult<()>;

    /// Cached session user as JSON.
    fn user(&self) -> StorageResult<Option<String>>;

    /// Cache the session user (JSON).
    fn set_user(&self, user_json: &str) -> StorageResult<()>;

    /// Remove tokens and user.
    fn clear(&self) -> StorageResult<()>;

    /// Whether an access token is present.
    fn is_authenticated(&self) -> StorageResult<bool> {
        Ok(self.access_token()?.is_some())
    }
}

/// [`SessionStore`] over any [`KeyValueStorage`] backend.
pub struct PersistentSessionStore {
    storage: Box<dyn KeyValueStorage>,
}

impl PersistentSessionStore {
    /// Create a session store with the given storage backend
    pub fn new(storage: Box<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Session store that is never written to disk.
    pub fn in_memory() -> Self {
        Self::new(Box::new(crate::MemoryStorage::new()))
    }
}

impl SessionStore for PersistentSessionStore {
    fn access_token(&self) -> StorageResult<Option<String>> {
        self.storage.get(StorageKeys::ACCESS_TOKEN)
    }

    fn refresh_token(&self) -> StorageResult<Option<String>> {
        self.storage.get(StorageKeys::REFRESH_TOKEN)
    }

    fn set_access_token(&self, token: &str) -> StorageResult<()> {
        self.storage
            .write_batch(&[(StorageKeys::ACCESS_TOKEN, token)], &[StorageKeys::USER])
    }

    fn set_refresh_token(&self, token: &str) -> StorageResult<()> {
        self.storage.set(StorageKeys::REFRESH_TOKEN, token)
    }

    fn set_credentials(&self, access_token: &str, refresh_token: &str) -> StorageResult<()> {
        self.storage.write_batch(
            &[
                (StorageKeys::ACCESS_TOKEN, access_token),
                (StorageKeys::REFRESH_TOKEN, refresh_token),
            ],
            &[StorageKeys::USER],
        )
    }

    fn user(&self) -> StorageResult<Option<String>> {
        self.storage.get(StorageKeys::USER)
    }

    fn set_user(&self, user_json: &str) -> StorageResult<()> {
        self.storage.set(StorageKeys::USER, user_json)
    }

    fn clear(&self) -> StorageResult<()> {
        self.storage.delete_many(&[
            StorageKeys::ACCESS_TOKEN,
            StorageKeys::REFRESH_TOKEN,
            StorageKeys::USER,
        ])
    }
}
