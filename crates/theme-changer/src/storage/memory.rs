use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::PreferenceStore;
use crate::error::PersistenceError;

#[derive(Debug, Default)]
struct Shared {
    values: HashMap<String, String>,
    failing: bool,
    writes: usize,
}

/// In-memory [`PreferenceStore`].
///
/// Clones share the same underlying map, which is how tests simulate a page
/// reload: hand one clone to a controller, drop the controller, and build a
/// fresh one from another clone.
///
/// [`MemoryStore::set_failing`] makes every operation fail with
/// [`PersistenceError::Unavailable`], standing in for a denied or full
/// browser storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    shared: Rc<RefCell<Shared>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent operations fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.shared.borrow_mut().failing = failing;
    }

    /// Reads a slot directly, bypassing the failure switch.
    pub fn peek(&self, slot: &str) -> Option<String> {
        self.shared.borrow().values.get(slot).cloned()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.shared.borrow().writes
    }

    fn check(&self) -> Result<(), PersistenceError> {
        if self.shared.borrow().failing {
            return Err(PersistenceError::Unavailable(
                "storage access denied".to_string(),
            ));
        }
        Ok(())
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, slot: &str) -> Result<Option<String>, PersistenceError> {
        self.check()?;
        Ok(self.peek(slot))
    }

    fn save(&mut self, slot: &str, value: &str) -> Result<(), PersistenceError> {
        self.check()?;
        let mut shared = self.shared.borrow_mut();
        shared.values.insert(slot.to_string(), value.to_string());
        shared.writes += 1;
        Ok(())
    }

    fn remove(&mut self, slot: &str) -> Result<(), PersistenceError> {
        self.check()?;
        self.shared.borrow_mut().values.remove(slot);
        Ok(())
    }
}
