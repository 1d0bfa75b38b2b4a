//! The theme controller: selection state, application, persistence and the picker.
//!
//! [`ThemeController`] owns everything that changes at runtime:
//!
//! - the active theme key
//! - the set of root properties the last applied theme wrote
//! - whether the picker is open
//! - whether persistence is still usable
//!
//! It drives a [`Document`] and a [`PreferenceStore`] and holds the
//! [`ThemeRegistry`] it selects from. One controller is built per page and
//! shared with the event handlers that call into it.
//!
//! # Lifecycle
//!
//! ```text
//! configure(options) -> on_load() -> toggle_theme_picker() / select(key) ...
//! ```
//!
//! `configure` must come first; `on_load` returns
//! [`ThemeError::NotConfigured`] otherwise. Picker toggles before
//! configuration are ignored with a warning, since they come from user
//! timing rather than page wiring.
//!
//! # Application Order
//!
//! Applying a theme first removes every property the previous theme set and
//! only then writes the new theme's properties. The final root state
//! therefore depends only on the theme being applied, never on what was
//! active before.
//!
//! # Example
//!
//! ```rust
//! use theme_changer::dom::{MemoryDocument, MemoryElement};
//! use theme_changer::storage::{MemoryStore, STORAGE_KEY};
//! use theme_changer::{ThemeController, ThemeControllerOptions, ThemeRegistry};
//!
//! let store = MemoryStore::new();
//! let mut controller = ThemeController::new(
//!     ThemeRegistry::builtin(),
//!     MemoryDocument::with_elements(["main"]),
//!     store.clone(),
//! );
//! controller.configure(
//!     ThemeControllerOptions::new(MemoryElement::new("main"))
//!         .use_local(true)
//!         .selected_theme_css_class("ok"),
//! );
//! controller.on_load().unwrap();
//! assert_eq!(controller.current_key(), Some("os"));
//!
//! controller.toggle_theme_picker();
//! controller.select("dark").unwrap();
//!
//! assert!(!controller.is_picker_open());
//! assert_eq!(controller.document().root_property("color-scheme"), Some("dark"));
//! assert_eq!(store.peek(STORAGE_KEY).as_deref(), Some("dark"));
//! ```

mod options;

pub use options::{ThemeControllerOptions, DEFAULT_SELECTED_CLASS};

use tracing::{debug, warn};

use crate::dom::Document;
use crate::error::{PersistenceError, ThemeError};
use crate::picker::{PickerEvent, PickerView};
use crate::storage::{PreferenceStore, STORAGE_KEY};
use crate::theme::{detect_color_mode, ColorMode, Theme, ThemeRegistry};

/// Page-wide theme state machine.
pub struct ThemeController<D: Document, S: PreferenceStore> {
    registry: ThemeRegistry,
    document: D,
    store: S,
    options: Option<ThemeControllerOptions<D::Element>>,
    /// Key of the active theme. `None` until the first application.
    current: Option<String>,
    /// Root properties written by the active theme, in write order.
    applied: Vec<String>,
    picker_open: bool,
    /// Set after the first storage failure; the store is not touched again.
    persistence_degraded: bool,
}

impl<D: Document, S: PreferenceStore> ThemeController<D, S> {
    /// Creates an unconfigured controller.
    pub fn new(registry: ThemeRegistry, document: D, store: S) -> Self {
        Self {
            registry,
            document,
            store,
            options: None,
            current: None,
            applied: Vec::new(),
            picker_open: false,
            persistence_degraded: false,
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Stores the controller options, replacing any previous ones.
    ///
    /// A picker that is already open stays under its old parent until it
    /// is closed; the next open uses the new parent and class.
    pub fn configure(&mut self, options: ThemeControllerOptions<D::Element>) {
        if self.options.is_some() {
            debug!("theme controller reconfigured");
        }
        self.options = Some(options);
    }

    /// Returns the current options, if configured.
    pub fn options(&self) -> Option<&ThemeControllerOptions<D::Element>> {
        self.options.as_ref()
    }

    // =========================================================================
    // Startup
    // =========================================================================

    /// Restores the persisted selection (or the default) and applies it.
    ///
    /// With `use_local` on, the stored key is used if the registry knows
    /// it; an unknown or missing value falls back to the registry default.
    /// The picker is left closed and the store is not written.
    ///
    /// Calling this again re-resolves and re-applies, ending in the same
    /// state for the same stored value.
    ///
    /// # Errors
    ///
    /// - [`ThemeError::NotConfigured`] if [`configure`](Self::configure) wasn't called
    /// - [`ThemeError::EmptyRegistry`] if there is nothing to apply
    /// - [`ThemeError::Dom`] if the document rejects the root properties
    pub fn on_load(&mut self) -> Result<(), ThemeError> {
        let use_local = match &self.options {
            Some(options) => options.use_local,
            None => return Err(ThemeError::NotConfigured),
        };
        let default = self
            .registry
            .default_key()
            .ok_or(ThemeError::EmptyRegistry)?
            .to_string();

        let restored = if use_local { self.restore() } else { None };
        let key = match restored {
            Some(stored) if self.registry.contains(&stored) => stored,
            Some(stored) => {
                debug!(stored = %stored, "ignoring unknown stored theme");
                default
            }
            None => default,
        };

        self.apply(&key)?;
        debug!(theme = %key, "theme loaded");
        Ok(())
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Applies a theme to the document root and persists the choice.
    ///
    /// The registry lookup happens before anything is touched, so an
    /// unknown key leaves the document, the selection and the store as
    /// they were. Storage failures are logged and switch the controller to
    /// memory-only operation; they are never returned.
    ///
    /// # Errors
    ///
    /// - [`ThemeError::UnknownTheme`] if `key` is not registered
    /// - [`ThemeError::Dom`] if the document rejects a property change
    pub fn apply_theme(&mut self, key: &str) -> Result<(), ThemeError> {
        self.apply(key)?;
        self.persist(key);
        debug!(theme = %key, "theme applied");
        Ok(())
    }

    /// Applies a theme and closes the picker if it is open.
    ///
    /// This is what a picker row does when clicked. On error the picker is
    /// left as it was.
    pub fn select(&mut self, key: &str) -> Result<(), ThemeError> {
        self.apply_theme(key)?;
        if self.picker_open {
            self.close_picker();
        }
        Ok(())
    }

    /// Key of the active theme, `None` before the first application.
    pub fn current_key(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// The active theme, `None` before the first application.
    pub fn current_theme(&self) -> Option<&Theme> {
        self.current
            .as_deref()
            .and_then(|key| self.registry.get(key).ok())
    }

    /// Effective color mode of the page.
    ///
    /// Uses the active theme's `color-scheme` declaration; for the
    /// OS-default theme (or a theme without a declaration) asks the OS.
    /// Returns `None` before the first application.
    pub fn color_mode(&self) -> Option<ColorMode> {
        let theme = self.current_theme()?;
        Some(theme.color_mode().unwrap_or_else(detect_color_mode))
    }

    /// Root properties written by the active theme.
    pub fn applied_properties(&self) -> &[String] {
        &self.applied
    }

    // =========================================================================
    // Picker
    // =========================================================================

    /// Opens the picker if it is closed, closes it if it is open.
    ///
    /// Opening renders one row per registered theme under the configured
    /// parent and attaches the dismiss listener; closing removes both.
    /// Without configuration this logs a warning and does nothing. If the
    /// picker can't be mounted (e.g. the parent is not in the document) it
    /// stays closed.
    pub fn toggle_theme_picker(&mut self) {
        if self.picker_open {
            self.close_picker();
        } else {
            self.open_picker();
        }
    }

    /// Returns `true` while the picker is mounted.
    pub fn is_picker_open(&self) -> bool {
        self.picker_open
    }

    /// The view the picker shows (or would show) right now.
    ///
    /// Returns `None` when the controller is not configured.
    pub fn picker_view(&self) -> Option<PickerView> {
        let options = self.options.as_ref()?;
        Some(PickerView::build(
            &self.registry,
            self.current.as_deref(),
            &options.selected_theme_css_class,
        ))
    }

    /// Routes a picker interaction.
    ///
    /// [`PickerEvent::Select`] behaves like [`select`](Self::select);
    /// dismiss events close the picker if it is open.
    pub fn handle_picker_event(&mut self, event: PickerEvent) -> Result<(), ThemeError> {
        match event {
            PickerEvent::Select(key) => self.select(&key),
            PickerEvent::OutsideClick | PickerEvent::Escape => {
                if self.picker_open {
                    self.close_picker();
                }
                Ok(())
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns `true` once a storage failure has switched persistence off.
    pub fn is_persistence_degraded(&self) -> bool {
        self.persistence_degraded
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn apply(&mut self, key: &str) -> Result<(), ThemeError> {
        let theme = self.registry.get(key)?;

        while let Some(name) = self.applied.pop() {
            if let Err(e) = self.document.remove_root_property(&name) {
                self.applied.push(name);
                return Err(e.into());
            }
        }

        if let Some(vars) = theme.css() {
            for var in vars {
                if !self.applied.iter().any(|name| name == var.name()) {
                    self.applied.push(var.name().to_string());
                }
                self.document.set_root_property(var.name(), var.value())?;
            }
        }

        self.current = Some(key.to_string());
        Ok(())
    }

    fn persist(&mut self, key: &str) {
        let use_local = self.options.as_ref().is_some_and(|o| o.use_local);
        if !use_local || self.persistence_degraded {
            return;
        }
        if let Err(e) = self.store.save(STORAGE_KEY, key) {
            self.degrade(e);
        }
    }

    fn restore(&mut self) -> Option<String> {
        if self.persistence_degraded {
            return None;
        }
        match self.store.load(STORAGE_KEY) {
            Ok(value) => value,
            Err(e) => {
                self.degrade(e);
                None
            }
        }
    }

    fn degrade(&mut self, error: PersistenceError) {
        warn!(error = %error, "theme storage failed, keeping the selection in memory only");
        self.persistence_degraded = true;
    }

    fn open_picker(&mut self) {
        let Some(options) = self.options.as_ref() else {
            warn!("theme picker toggled before configure(), ignoring");
            return;
        };

        let view = PickerView::build(
            &self.registry,
            self.current.as_deref(),
            &options.selected_theme_css_class,
        );
        let markup = match view.render() {
            Ok(markup) => markup,
            Err(e) => {
                warn!(error = %e, "failed to render theme picker");
                return;
            }
        };

        if let Err(e) = self
            .document
            .mount_picker(&options.theme_picker_parent, &markup)
        {
            warn!(error = %e, "failed to mount theme picker");
            return;
        }
        if let Err(e) = self.document.attach_dismiss_listener() {
            warn!(error = %e, "failed to attach theme picker listener");
            if let Err(e) = self.document.unmount_picker() {
                warn!(error = %e, "failed to unmount theme picker");
            }
            return;
        }
        self.picker_open = true;
    }

    fn close_picker(&mut self) {
        if let Err(e) = self.document.detach_dismiss_listener() {
            warn!(error = %e, "failed to detach theme picker listener");
        }
        if let Err(e) = self.document.unmount_picker() {
            warn!(error = %e, "failed to unmount theme picker");
        }
        self.picker_open = false;
    }
}

impl<D, S> std::fmt::Debug for ThemeController<D, S>
where
    D: Document + std::fmt::Debug,
    S: PreferenceStore + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeController")
            .field("current", &self.current)
            .field("applied", &self.applied)
            .field("picker_open", &self.picker_open)
            .field("persistence_degraded", &self.persistence_degraded)
            .field("options", &self.options)
            .field("document", &self.document)
            .field("store", &self.store)
            .finish()
    }
}
