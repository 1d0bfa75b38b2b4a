//! File-backed preference store for native hosts.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::PreferenceStore;
use crate::error::PersistenceError;

/// [`PreferenceStore`] backed by a JSON object file.
///
/// The file holds a flat `{"slot": "value"}` map and is re-read on every
/// load, so several processes pointing at the same file see each other's
/// writes. A missing file reads as an empty store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, PersistenceError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| PersistenceError::Malformed {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), PersistenceError> {
        let content = serde_json::to_string_pretty(map).map_err(|e| PersistenceError::Malformed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        std::fs::write(&self.path, content).map_err(|e| self.io_error(e))
    }

    fn io_error(&self, e: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            message: e.to_string(),
        }
    }
}

impl PreferenceStore for FileStore {
    fn load(&self, slot: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.read_map()?.remove(slot))
    }

    fn save(&mut self, slot: &str, value: &str) -> Result<(), PersistenceError> {
        let mut map = self.read_map()?;
        map.insert(slot.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&mut self, slot: &str) -> Result<(), PersistenceError> {
        let mut map = self.read_map()?;
        if map.remove(slot).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.load("selected_theme").unwrap(), None);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");
        let mut store = FileStore::new(&path);

        store.save("selected_theme", "dark").unwrap();
        assert!(path.exists());

        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.load("selected_theme").unwrap(),
            Some("dark".to_string())
        );
    }

    #[test]
    fn test_save_keeps_other_slots() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("prefs.json"));

        store.save("a", "1").unwrap();
        store.save("b", "2").unwrap();
        store.remove("a").unwrap();

        assert_eq!(store.load("a").unwrap(), None);
        assert_eq!(store.load("b").unwrap(), Some("2".to_string()));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(
            store.load("selected_theme"),
            Err(PersistenceError::Malformed { .. })
        ));
    }

    #[test]
    fn test_directory_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.load("selected_theme"),
            Err(PersistenceError::Io { .. })
        ));
    }
}
