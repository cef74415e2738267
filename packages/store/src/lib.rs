pub mod config;
pub mod models;
pub mod session;
pub mod storage;

mod memory;
pub use memory::MemoryStorage;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod browser;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use browser::{BrowserStorage, StorageArea};

pub use config::ClientConfig;
pub use models::{Job, SavedJob, SearchKind, SearchRecord, User};
pub use session::{PersistencePolicy, Session};
pub use storage::KeyValueStore;
