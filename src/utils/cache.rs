//! Session cache for network responses.
//!
//! Backed by sessionStorage: entries survive in-page navigation and reloads
//! but are dropped when the tab closes, so a new visit always sees fresh
//! repository data.

use serde::{Serialize, de::DeserializeOwned};

use super::dom;
use crate::core::error::StorageError;

/// Cached value under `key`.
///
/// Missing entries and entries that no longer deserialize both read as
/// `None`; a stale shape is treated like a cache miss.
pub fn get<T: DeserializeOwned>(key: &str) -> Option<T> {
    let storage = dom::session_storage()?;
    let json = storage.get_item(key).ok()??;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(key, error = %err, "discarding unreadable cache entry");
            None
        }
    }
}

/// Store `data` under `key`.
pub fn set<T: Serialize>(key: &str, data: &T) -> Result<(), StorageError> {
    let storage = dom::session_storage().ok_or(StorageError::Unavailable)?;
    let json = encode(key, data)?;
    storage.set_item(key, &json).map_err(|err| {
        tracing::debug!(key, error = ?err, "cache write rejected");
        StorageError::WriteFailed(key.to_string())
    })
}

fn encode<T: Serialize>(key: &str, data: &T) -> Result<String, StorageError> {
    serde_json::to_string(data).map_err(|err| {
        tracing::debug!(key, error = %err, "cache entry does not serialize");
        StorageError::WriteFailed(key.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_encode() {
        assert_eq!(encode("repos", &vec![1, 2]).as_deref(), Ok("[1,2]"));
    }

    #[test]
    fn test_encode_failure_names_the_key() {
        // JSON object keys must be strings.
        let data: HashMap<(u8, u8), u8> = HashMap::from([((1, 2), 3)]);
        assert_eq!(
            encode("github-repos", &data),
            Err(StorageError::WriteFailed("github-repos".to_string()))
        );
    }
}
