//! Storage trait definitions.

use crate::StorageResult;

/// Trait for key-value storage backends
pub trait KeyValueStorage: Send + Sync {
    /// Store a value
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Retrieve a value
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Delete a value, returning whether it existed
    fn delete(&self, key: &str) -> StorageResult<bool>;

    /// Check if a key exists
    fn has(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Delete several keys at once.
    fn delete_many(&self, keys: &[&str]) -> StorageResult<()> {
        self.write_batch(&[], keys)
    }

    /// Remove `remove`, then store `set`, as one change.
    ///
    /// Backends shared between processes override this so other readers never
    /// observe half of the batch.
    fn write_batch(&self, set: &[(&str, &str)], remove: &[&str]) -> StorageResult<()> {
        for key in remove {
            self.delete(key)?;
        }
        for (key, value) in set {
            self.set(key, value)?;
        }
        Ok(())
    }
}
