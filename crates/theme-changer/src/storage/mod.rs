//! Persistence slot for the selected theme.
//!
//! The selection survives reloads through a [`PreferenceStore`]: an
//! origin-scoped string key-value store. The controller uses exactly one
//! slot, [`STORAGE_KEY`], holding the active theme's key. There is no
//! versioning; a stored value the registry doesn't know is treated as absent.
//!
//! Implementations:
//!
//! - [`MemoryStore`]: in-process map, with a switch to simulate failures
//! - [`FileStore`]: JSON object file (not available on wasm32)
//! - `web::LocalStorageStore`: the browser's `localStorage`

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::PersistenceError;

/// Name of the slot holding the selected theme key.
pub const STORAGE_KEY: &str = "selected_theme";

/// String key-value storage that survives page reloads.
pub trait PreferenceStore {
    /// Reads a slot. `Ok(None)` means nothing is stored.
    fn load(&self, slot: &str) -> Result<Option<String>, PersistenceError>;

    /// Writes a slot, replacing any previous value.
    fn save(&mut self, slot: &str, value: &str) -> Result<(), PersistenceError>;

    /// Clears a slot. Clearing an empty slot is not an error.
    fn remove(&mut self, slot: &str) -> Result<(), PersistenceError>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn load(&self, slot: &str) -> Result<Option<String>, PersistenceError> {
        (**self).load(slot)
    }

    fn save(&mut self, slot: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).save(slot, value)
    }

    fn remove(&mut self, slot: &str) -> Result<(), PersistenceError> {
        (**self).remove(slot)
    }
}
