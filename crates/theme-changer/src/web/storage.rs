use web_sys::Storage;

use super::js_message;
use crate::error::PersistenceError;
use crate::storage::PreferenceStore;

/// [`PreferenceStore`] over `window.localStorage`.
///
/// Storage can be missing entirely (privacy modes, sandboxed frames); every
/// operation then fails with [`PersistenceError::Unavailable`] and the
/// controller falls back to memory-only operation.
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, PersistenceError> {
        self.storage
            .as_ref()
            .ok_or_else(|| PersistenceError::Unavailable("localStorage is not available".into()))
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for LocalStorageStore {
    fn load(&self, slot: &str) -> Result<Option<String>, PersistenceError> {
        self.storage()?
            .get_item(slot)
            .map_err(|e| PersistenceError::Unavailable(js_message(&e)))
    }

    fn save(&mut self, slot: &str, value: &str) -> Result<(), PersistenceError> {
        self.storage()?
            .set_item(slot, value)
            .map_err(|e| PersistenceError::Unavailable(js_message(&e)))
    }

    fn remove(&mut self, slot: &str) -> Result<(), PersistenceError> {
        self.storage()?
            .remove_item(slot)
            .map_err(|e| PersistenceError::Unavailable(js_message(&e)))
    }
}
