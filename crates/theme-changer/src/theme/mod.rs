//! Theme system: what a theme is and where themes come from.
//!
//! This module provides:
//!
//! - [`Theme`]: A key, a display name and an ordered list of root CSS overrides
//! - [`CssVar`]: One `(property, value)` override
//! - [`ThemeRegistry`]: The ordered, immutable catalog the picker lists
//! - [`ColorMode`]: Light or dark color mode, with OS detection for themes
//!   that defer to the system

mod adaptive;
mod registry;
#[allow(clippy::module_inception)]
mod theme;

pub use adaptive::{detect_color_mode, reset_theme_detector, set_theme_detector, ColorMode};
pub use registry::{ThemeCatalog, ThemeRegistry, OS_THEME_KEY};
pub use theme::{CssVar, Theme};
