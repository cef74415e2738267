//! # Web Storage backend — `localStorage` / `sessionStorage`
//!
//! [`BrowserStorage`] is the [`KeyValueStore`] used on the **web platform**. It
//! is a small handle naming which of the two browser stores to use; the
//! `web_sys::Storage` object is looked up on every call, so the handle is
//! `Copy` and can live inside Dioxus context without holding JS references.
//!
//! ## Error handling
//!
//! All methods swallow errors (returning `None` for reads, doing nothing for
//! writes) after logging them. Storage can be unavailable (private browsing,
//! quota exceeded); the UI degrades to "not logged in" rather than crashing.

use crate::storage::KeyValueStore;

/// Which browser store to address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageArea {
    Local,
    Session,
}

/// `window.localStorage` or `window.sessionStorage`.
#[derive(Clone, Copy, Debug)]
pub struct BrowserStorage {
    area: StorageArea,
}

impl BrowserStorage {
    pub fn local() -> Self {
        Self {
            area: StorageArea::Local,
        }
    }

    pub fn session() -> Self {
        Self {
            area: StorageArea::Session,
        }
    }

    fn storage(&self) -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        let storage = match self.area {
            StorageArea::Local => window.local_storage(),
            StorageArea::Session => window.session_storage(),
        };
        match storage {
            Ok(storage) => storage,
            Err(e) => {
                tracing::warn!("{:?} storage unavailable: {:?}", self.area, e);
                None
            }
        }
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = self.storage() {
            if let Err(e) = storage.set_item(key, value) {
                tracing::warn!("Failed to write {key} to {:?} storage: {:?}", self.area, e);
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(key);
        }
    }
}
