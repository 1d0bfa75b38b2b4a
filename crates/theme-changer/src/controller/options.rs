/// Settings passed to [`ThemeController::configure`](super::ThemeController::configure).
///
/// # Example
///
/// ```rust
/// use theme_changer::ThemeControllerOptions;
/// use theme_changer::dom::MemoryElement;
///
/// let options = ThemeControllerOptions::new(MemoryElement::new("main"))
///     .use_local(true)
///     .selected_theme_css_class("ok");
///
/// assert!(options.use_local);
/// assert_eq!(options.selected_theme_css_class, "ok");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeControllerOptions<E> {
    /// Element the picker popup mounts under.
    pub theme_picker_parent: E,
    /// Persist the selection through the preference store.
    pub use_local: bool,
    /// Class marking the active row inside the picker.
    pub selected_theme_css_class: String,
}

/// Class used for the active picker row when none is configured.
pub const DEFAULT_SELECTED_CLASS: &str = "selected";

impl<E> ThemeControllerOptions<E> {
    /// Options with persistence off and the default selected class.
    pub fn new(theme_picker_parent: E) -> Self {
        Self {
            theme_picker_parent,
            use_local: false,
            selected_theme_css_class: DEFAULT_SELECTED_CLASS.to_string(),
        }
    }

    pub fn use_local(mut self, use_local: bool) -> Self {
        self.use_local = use_local;
        self
    }

    pub fn selected_theme_css_class(mut self, class: impl Into<String>) -> Self {
        self.selected_theme_css_class = class.into();
        self
    }
}
