use crate::error::StoreResult;

/// Synchronous string key-value store backing one local profile.
///
/// All implementations must satisfy these invariants:
/// - `get` after `set` on the same key returns the written value.
/// - A missing key reads as `Ok(None)`.
/// - Each call runs to completion before the next one on the same store is
///   observed; there is no partial write.
/// - The store never interprets values.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Create or overwrite the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete `key`. Returns `true` if it existed.
    fn remove(&self, key: &str) -> StoreResult<bool>;

    /// All keys currently present, sorted.
    fn keys(&self) -> StoreResult<Vec<String>>;

    /// Remove every key.
    fn clear(&self) -> StoreResult<()>;

    /// Check whether `key` is present.
    fn contains(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Keys that start with `prefix`, sorted.
    fn keys_with_prefix(&self, prefix: &str) -> StoreResult<Vec<String>> {
        Ok(self
            .keys()?
            .into_iter()
            .filter(|k| k.starts_with(prefix))
            .collect())
    }
}
