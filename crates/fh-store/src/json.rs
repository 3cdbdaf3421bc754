//! JSON helpers over [`KeyValueStore`].
//!
//! These are free functions rather than trait methods so the trait stays
//! object-safe and callers can keep working with `Arc<dyn KeyValueStore>`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{StoreError, StoreResult};
use crate::traits::KeyValueStore;

/// Read and decode the JSON value stored under `key`.
///
/// Returns `Ok(None)` when the key is absent. A present but undecodable value
/// is an error.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> StoreResult<Option<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StoreError::Serialization {
            key: key.to_string(),
            reason: e.to_string(),
        })
}

/// Encode `value` as JSON and store it under `key`.
pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> StoreResult<()> {
    let encoded = serde_json::to_string(value).map_err(|e| StoreError::Serialization {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    store.set(key, &encoded)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::memory::InMemoryKeyValueStore;

    #[test]
    fn missing_key_loads_none() {
        let store = InMemoryKeyValueStore::new();
        let loaded: Option<Vec<String>> = load_json(&store, "absent").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn save_then_load() {
        let store = InMemoryKeyValueStore::new();
        let mut index = BTreeMap::new();
        index.insert("matrix".to_string(), "like".to_string());
        save_json(&store, "user_ratings", &index).unwrap();

        assert_eq!(
            store.get("user_ratings").unwrap().as_deref(),
            Some(r#"{"matrix":"like"}"#)
        );
        let loaded: BTreeMap<String, String> = load_json(&store, "user_ratings").unwrap().unwrap();
        assert_eq!(loaded, index);
    }

    #[test]
    fn malformed_value_is_an_error() {
        let store = InMemoryKeyValueStore::new();
        store.set("content_ratings", "{oops").unwrap();
        let err = load_json::<Vec<String>>(&store, "content_ratings").unwrap_err();
        match err {
            StoreError::Serialization { key, .. } => assert_eq!(key, "content_ratings"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
