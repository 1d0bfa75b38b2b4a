//! Browser bindings (wasm32 only).
//!
//! - [`WebDocument`]: [`Document`](crate::dom::Document) over `web-sys`
//! - [`LocalStorageStore`]: [`PreferenceStore`](crate::storage::PreferenceStore)
//!   over `window.localStorage`
//! - [`ThemeChanger`]: the controller exported to page scripts
//! - [`clock_init`]: starts a clock widget, returning a stop handle
//!
//! Page wiring mirrors what a plain script would do:
//!
//! ```js
//! const themes = new ThemeChanger();
//! themes.configure(document.querySelector("main"), true, "ok");
//! themes.bind_toggle_button("themeToggleBnt");
//! themes.on_load();
//! ```

mod bindings;
mod clock;
mod document;
mod storage;

pub use bindings::ThemeChanger;
pub use clock::{clock_init, WebClockHandle};
pub use document::{DispatchSlot, WebDocument};
pub use storage::LocalStorageStore;

use wasm_bindgen::JsValue;

/// Best-effort message out of a thrown JS value.
fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
