//! # Theme Changer - Page themes with persisted selection
//!
//! `theme-changer` lets a page offer a fixed set of named themes
//! ("OS-default", "Light", "Dark", ...), applies the chosen theme as CSS
//! property overrides on the document root, remembers the choice across
//! reloads and shows a small picker popup anchored to a toggle button.
//!
//! ## Core Concepts
//!
//! - [`Theme`]: A key, a display name and an ordered list of root CSS
//!   overrides, or no list at all to defer to the OS preference
//! - [`ThemeRegistry`]: The ordered catalog of themes; registration order is
//!   picker order, and the first (or designated) theme is the fallback
//! - [`ThemeController`]: Applies, persists and restores the selection and
//!   opens/closes the picker
//! - [`dom::Document`] / [`storage::PreferenceStore`]: The host seams the
//!   controller drives; headless implementations ship for tests and native
//!   tools, `web` has the browser ones
//!
//! ## Quick Start
//!
//! ```rust
//! use theme_changer::dom::{MemoryDocument, MemoryElement};
//! use theme_changer::storage::MemoryStore;
//! use theme_changer::{ThemeController, ThemeControllerOptions, ThemeRegistry};
//!
//! let mut controller = ThemeController::new(
//!     ThemeRegistry::builtin(),
//!     MemoryDocument::with_elements(["main"]),
//!     MemoryStore::new(),
//! );
//! controller.configure(
//!     ThemeControllerOptions::new(MemoryElement::new("main")).use_local(true),
//! );
//! controller.on_load().unwrap();
//! controller.select("dark").unwrap();
//!
//! assert_eq!(controller.current_key(), Some("dark"));
//! ```
//!
//! ## In The Browser
//!
//! Built for `wasm32`, the crate exports `ThemeChanger` and `clockInit`:
//!
//! ```js
//! const themes = new ThemeChanger();
//! themes.configure(document.querySelector("main"), true, "ok");
//! themes.bind_toggle_button("themeToggleBnt");
//! themes.on_load();
//! ```
//!
//! ## Clock Widget
//!
//! [`clock`] contains the small per-second clock display sharing the same
//! page conventions, with a stop handle for its refresh loop.

pub mod clock;
pub mod controller;
pub mod dom;
pub mod error;
pub mod picker;
pub mod storage;
pub mod theme;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use controller::{ThemeController, ThemeControllerOptions};
pub use error::{DomError, PersistenceError, ThemeError};
pub use picker::{PickerEntry, PickerEvent, PickerView};
pub use theme::{
    detect_color_mode, set_theme_detector, ColorMode, CssVar, Theme, ThemeCatalog, ThemeRegistry,
};
