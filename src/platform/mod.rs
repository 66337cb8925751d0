//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Key-value storage (LocalStorage on web, in-memory natively)
//! - JS bindings for the web shell

pub mod storage;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use storage::{KeyValueStore, MemoryStore, load_json, save_json};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;

/// Store backing persistence on this platform
#[cfg(target_arch = "wasm32")]
pub fn platform_store() -> Box<dyn KeyValueStore> {
    Box::new(LocalStore)
}

/// Native builds keep everything in memory for the process lifetime
#[cfg(not(target_arch = "wasm32"))]
pub fn platform_store() -> Box<dyn KeyValueStore> {
    Box::new(MemoryStore::default())
}
