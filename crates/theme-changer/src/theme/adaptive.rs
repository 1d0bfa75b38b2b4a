//! Color mode detection for themes that follow the operating system.

use once_cell::sync::Lazy;
use std::sync::{Mutex, PoisonError};

/// The user's preferred color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorMode {
    Light,
    Dark,
}

impl ColorMode {
    /// The `color-scheme` keyword for this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

type ThemeDetector = fn() -> ColorMode;

static THEME_DETECTOR: Lazy<Mutex<ThemeDetector>> = Lazy::new(|| Mutex::new(os_theme_detector));

/// Overrides the detector used to determine whether the user prefers a light or dark theme.
///
/// This is useful for testing or when you want to force a specific color mode.
pub fn set_theme_detector(detector: ThemeDetector) {
    let mut guard = THEME_DETECTOR
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = detector;
}

/// Restores the platform detector.
pub fn reset_theme_detector() {
    set_theme_detector(os_theme_detector);
}

/// Asks the current detector for the preferred color mode.
pub fn detect_color_mode() -> ColorMode {
    let detector = THEME_DETECTOR
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    (*detector)()
}

#[cfg(not(target_arch = "wasm32"))]
fn os_theme_detector() -> ColorMode {
    match dark_light::detect() {
        dark_light::Mode::Dark => ColorMode::Dark,
        _ => ColorMode::Light,
    }
}

#[cfg(target_arch = "wasm32")]
fn os_theme_detector() -> ColorMode {
    let prefers_dark = web_sys::window()
        .and_then(|window| window.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map_or(false, |query| query.matches());
    if prefers_dark {
        ColorMode::Dark
    } else {
        ColorMode::Light
    }
}
