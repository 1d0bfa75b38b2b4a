//! Error types for theme registration, application and persistence.
//!
//! Errors fall into three groups:
//!
//! - **Setup errors** ([`ThemeError::DuplicateKey`], [`ThemeError::Catalog`],
//!   [`ThemeError::EmptyRegistry`]): the catalog is misconfigured. These are
//!   fatal at startup.
//! - **Wiring errors** ([`ThemeError::UnknownTheme`], [`ThemeError::NotConfigured`]):
//!   the page passed a bad key or called things out of order. These are
//!   returned to the caller and never silently ignored.
//! - **Host errors** ([`PersistenceError`], [`DomError`]): the storage or the
//!   document refused an operation. Persistence errors are absorbed by the
//!   controller, which falls back to memory-only operation.

use std::path::PathBuf;

/// Error returned by registry and controller operations.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// A theme with the same key is already registered.
    #[error("theme '{key}' is already registered")]
    DuplicateKey { key: String },

    /// The requested theme key is not in the registry.
    #[error("unknown theme '{key}'")]
    UnknownTheme { key: String },

    /// The registry has no themes, so there is no default to fall back to.
    #[error("theme registry is empty")]
    EmptyRegistry,

    /// `on_load` was called before `configure`.
    #[error("theme controller used before configure()")]
    NotConfigured,

    /// The preference store failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// The document rejected a mutation.
    #[error(transparent)]
    Dom(#[from] DomError),

    /// The picker markup failed to render.
    #[error("failed to render picker: {0}")]
    Render(#[from] minijinja::Error),

    /// A theme catalog could not be parsed.
    #[error("invalid theme catalog: {message}")]
    Catalog { message: String },
}

impl ThemeError {
    pub(crate) fn unknown(key: &str) -> Self {
        ThemeError::UnknownTheme {
            key: key.to_string(),
        }
    }
}

/// Error returned by a [`PreferenceStore`](crate::storage::PreferenceStore).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    /// Storage is not available (disabled, denied, or over quota).
    #[error("preference storage unavailable: {0}")]
    Unavailable(String),

    /// Reading or writing the backing file failed.
    #[error("failed to access preferences at {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    /// The backing file exists but does not hold a preference map.
    #[error("malformed preferences at {}: {message}", path.display())]
    Malformed { path: PathBuf, message: String },
}

/// Error returned by a [`Document`](crate::dom::Document).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The configured picker parent is not attached to the document.
    #[error("picker parent '{0}' is not in the document")]
    MissingParent(String),

    /// A picker subtree is already mounted.
    #[error("a theme picker is already mounted")]
    AlreadyMounted,

    /// A browser API call threw.
    #[error("browser call failed: {0}")]
    Js(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_theme_display() {
        let err = ThemeError::unknown("sepia");
        let msg = err.to_string();
        assert!(msg.contains("sepia"));
        assert!(msg.contains("unknown"));
    }

    #[test]
    fn test_duplicate_key_display() {
        let err = ThemeError::DuplicateKey {
            key: "dark".to_string(),
        };
        assert_eq!(err.to_string(), "theme 'dark' is already registered");
    }

    #[test]
    fn test_persistence_error_is_transparent() {
        let err: ThemeError = PersistenceError::Unavailable("quota exceeded".into()).into();
        assert!(err.to_string().contains("quota exceeded"));
        assert!(matches!(err, ThemeError::Persistence(_)));
    }

    #[test]
    fn test_io_error_display_includes_path() {
        let err = PersistenceError::Io {
            path: PathBuf::from("/tmp/prefs.json"),
            message: "permission denied".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/prefs.json"));
        assert!(msg.contains("permission denied"));
    }
}
