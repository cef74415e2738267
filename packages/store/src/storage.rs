//! Key/value storage seam.
//!
//! Browser `localStorage` and `sessionStorage` are synchronous string maps, so
//! the trait is synchronous too. Implementations live in sibling modules
//! ([`crate::memory`], and `crate::browser` on the web target).

/// A synchronous string key/value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}
