use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::storage::KeyValueStore;

/// In-memory KeyValueStore for testing and non-browser targets.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert!(storage.get("user").is_none());

        storage.set("user", "{}");
        assert_eq!(storage.get("user").as_deref(), Some("{}"));
        assert_eq!(storage.len(), 1);

        storage.remove("user");
        assert!(storage.get("user").is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        other.set("jobResults", "[]");
        assert_eq!(storage.get("jobResults").as_deref(), Some("[]"));
    }
}
