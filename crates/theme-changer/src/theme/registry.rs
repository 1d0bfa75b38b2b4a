//! Theme registry: the fixed catalog a page can choose from.
//!
//! This module provides [`ThemeRegistry`], an ordered lookup structure built
//! once at startup and never mutated afterwards.
//!
//! # Ordering
//!
//! Registration order is display order: the picker lists themes exactly in
//! the order they were registered, and [`ThemeRegistry::list`] yields them
//! the same way every time it is called.
//!
//! # Default Theme
//!
//! The fallback used when nothing valid is persisted is, in priority order:
//!
//! 1. The theme registered through [`ThemeRegistry::register_default`]
//! 2. The first registered theme
//!
//! # Catalog Files
//!
//! Registries can be loaded from YAML or JSON catalogs:
//!
//! ```yaml
//! default: os
//! themes:
//!   - key: os
//!     name: OS-default
//!     css: null
//!   - key: dark
//!     name: Dark
//!     css: [["color-scheme", "dark"], ["--bg", "#111"]]
//! ```
//!
//! # Example
//!
//! ```rust
//! use theme_changer::{Theme, ThemeRegistry};
//!
//! let mut registry = ThemeRegistry::new();
//! registry.register(Theme::os_default("os", "OS-default")).unwrap();
//! registry.register(Theme::new("dark", "Dark").var("color-scheme", "dark")).unwrap();
//!
//! assert_eq!(registry.default_key(), Some("os"));
//! assert!(registry.get("dark").is_ok());
//! assert!(registry.register(Theme::new("dark", "Dark again")).is_err());
//! ```

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::theme::Theme;
use crate::error::ThemeError;

/// Key of the built-in OS-default theme.
pub const OS_THEME_KEY: &str = "os";

static BUILTIN: Lazy<ThemeRegistry> = Lazy::new(|| ThemeRegistry {
    themes: vec![
        Theme::os_default(OS_THEME_KEY, "OS-default"),
        Theme::new("light", "Light")
            .var("color-scheme", "light")
            .var("--color-background", "#f6f6f6")
            .var("--color-surface", "#ffffff")
            .var("--color-text", "#1c1c1c")
            .var("--color-accent", "#2a6fdb"),
        Theme::new("dark", "Dark")
            .var("color-scheme", "dark")
            .var("--color-background", "#151515")
            .var("--color-surface", "#222222")
            .var("--color-text", "#e8e8e8")
            .var("--color-accent", "#6ea2ff"),
    ],
    index: [(OS_THEME_KEY.to_string(), 0), ("light".to_string(), 1), ("dark".to_string(), 2)]
        .into_iter()
        .collect(),
    default: None,
});

/// On-disk shape of a theme catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeCatalog {
    /// Explicit fallback key. The first theme is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Themes in display order.
    pub themes: Vec<Theme>,
}

/// Ordered catalog of selectable themes.
///
/// Keys are unique. Lookups are by key; iteration is in registration order.
///
/// # Thread Safety
///
/// The registry is immutable once built, so sharing it by reference is fine.
/// Mutation (`register`) is only meant to happen during setup.
#[derive(Debug, Clone, Default)]
pub struct ThemeRegistry {
    /// Themes in registration order.
    themes: Vec<Theme>,
    /// Map from key to position in `themes`.
    index: HashMap<String, usize>,
    /// Explicitly designated fallback, if any.
    default: Option<String>,
}

impl ThemeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the built-in `os` / `light` / `dark` catalog.
    ///
    /// The catalog is constructed once per process and cloned out.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Registers a theme at the end of the display order.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::DuplicateKey`] if the key is already present.
    /// The registry is left untouched in that case.
    pub fn register(&mut self, theme: Theme) -> Result<(), ThemeError> {
        if self.index.contains_key(theme.key()) {
            return Err(ThemeError::DuplicateKey {
                key: theme.key().to_string(),
            });
        }
        self.index.insert(theme.key().to_string(), self.themes.len());
        self.themes.push(theme);
        Ok(())
    }

    /// Registers a theme and marks it as the fallback default.
    ///
    /// A later call replaces the previous designation.
    pub fn register_default(&mut self, theme: Theme) -> Result<(), ThemeError> {
        let key = theme.key().to_string();
        self.register(theme)?;
        self.default = Some(key);
        Ok(())
    }

    /// Marks an already registered theme as the fallback default.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::UnknownTheme`] if the key is not registered.
    pub fn set_default(&mut self, key: &str) -> Result<(), ThemeError> {
        if !self.contains(key) {
            return Err(ThemeError::unknown(key));
        }
        self.default = Some(key.to_string());
        Ok(())
    }

    /// Looks up a theme by key.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::UnknownTheme`] if the key is not registered.
    pub fn get(&self, key: &str) -> Result<&Theme, ThemeError> {
        self.index
            .get(key)
            .map(|&pos| &self.themes[pos])
            .ok_or_else(|| ThemeError::unknown(key))
    }

    /// Returns `true` if a theme with this key is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Iterates the themes in registration order.
    ///
    /// The iterator is `Clone`, so a caller can walk it more than once.
    pub fn list(&self) -> std::slice::Iter<'_, Theme> {
        self.themes.iter()
    }

    /// Iterates the keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + Clone {
        self.themes.iter().map(Theme::key)
    }

    /// The fallback key used when no valid selection exists.
    ///
    /// Returns `None` only for an empty registry.
    pub fn default_key(&self) -> Option<&str> {
        self.default
            .as_deref()
            .or_else(|| self.themes.first().map(Theme::key))
    }

    /// Returns the number of registered themes.
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Returns true if no themes are registered.
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Builds a registry from a parsed catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::DuplicateKey`] on repeated keys and
    /// [`ThemeError::UnknownTheme`] if `default` names a missing theme.
    pub fn from_catalog(catalog: ThemeCatalog) -> Result<Self, ThemeError> {
        let mut registry = Self::new();
        for theme in catalog.themes {
            registry.register(theme)?;
        }
        if let Some(default) = catalog.default {
            registry.set_default(&default)?;
        }
        Ok(registry)
    }

    /// Parses a YAML catalog.
    pub fn from_yaml_str(source: &str) -> Result<Self, ThemeError> {
        let catalog: ThemeCatalog =
            serde_yaml::from_str(source).map_err(|e| ThemeError::Catalog {
                message: e.to_string(),
            })?;
        Self::from_catalog(catalog)
    }

    /// Parses a JSON catalog.
    pub fn from_json_str(source: &str) -> Result<Self, ThemeError> {
        let catalog: ThemeCatalog =
            serde_json::from_str(source).map_err(|e| ThemeError::Catalog {
                message: e.to_string(),
            })?;
        Self::from_catalog(catalog)
    }

    /// Reads a catalog file, choosing the format by extension.
    ///
    /// `.json` files are parsed as JSON; anything else as YAML (which also
    /// accepts JSON input).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ThemeError::Catalog {
            message: format!("{}: {}", path.display(), e),
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&source),
            _ => Self::from_yaml_str(&source),
        }
    }

    /// Converts the registry back into its catalog form.
    pub fn to_catalog(&self) -> ThemeCatalog {
        ThemeCatalog {
            default: self.default.clone(),
            themes: self.themes.clone(),
        }
    }
}
