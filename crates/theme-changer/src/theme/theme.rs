//! Theme struct describing a set of CSS property overrides.

use serde::{Deserialize, Serialize};

use super::adaptive::ColorMode;

/// A single `(property, value)` pair set on the document root.
///
/// Serializes as a two element array, `["--bg", "#111"]`, so catalogs stay
/// compact and keep their declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CssVar(pub String, pub String);

impl CssVar {
    /// Creates a new property assignment.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self(name.into(), value.into())
    }

    /// The property name, e.g. `--bg` or `color-scheme`.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// The property value.
    pub fn value(&self) -> &str {
        &self.1
    }
}

/// A named, selectable theme.
///
/// A theme either carries an ordered list of root properties to set, or no
/// list at all (`css == None`), meaning "remove every override and defer to
/// the operating system preference". The page's own stylesheet is expected
/// to define `prefers-color-scheme` driven defaults for that case.
///
/// # Example
///
/// ```rust
/// use theme_changer::Theme;
///
/// let os = Theme::os_default("os", "OS-default");
/// let dark = Theme::new("dark", "Dark")
///     .var("color-scheme", "dark")
///     .var("--bg", "#111")
///     .var("--fg", "#eee");
///
/// assert!(os.css().is_none());
/// assert_eq!(dark.css().map(|vars| vars.len()), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    key: String,
    name: String,
    css: Option<Vec<CssVar>>,
}

impl Theme {
    /// Creates a theme with an empty override list.
    ///
    /// Add properties with [`Theme::var`].
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            css: Some(Vec::new()),
        }
    }

    /// Creates a theme that removes all overrides and follows the OS preference.
    pub fn os_default(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            css: None,
        }
    }

    /// Adds a root property, returning the updated theme for chaining.
    ///
    /// Calling this on an OS-default theme turns it into a regular theme.
    pub fn var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.css
            .get_or_insert_with(Vec::new)
            .push(CssVar::new(name, value));
        self
    }

    /// The stable identifier stored in the persistence slot.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The human label shown in the picker.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered overrides, or `None` for the OS-default theme.
    pub fn css(&self) -> Option<&[CssVar]> {
        self.css.as_deref()
    }

    /// Returns `true` if this theme defers to the operating system.
    pub fn is_os_default(&self) -> bool {
        self.css.is_none()
    }

    /// Looks up the value this theme assigns to `name`.
    ///
    /// When a property is listed twice the last assignment wins, matching
    /// what the document ends up with after application.
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.css()?
            .iter()
            .rev()
            .find(|var| var.name() == name)
            .map(CssVar::value)
    }

    /// The color mode this theme declares through `color-scheme`.
    ///
    /// Returns `None` for OS-default themes and for themes that don't set
    /// `color-scheme` to exactly `light` or `dark`.
    pub fn color_mode(&self) -> Option<ColorMode> {
        match self.value_of("color-scheme")?.trim() {
            "dark" => Some(ColorMode::Dark),
            "light" => Some(ColorMode::Light),
            _ => None,
        }
    }

    /// Renders the overrides as a `:root { ... }` stylesheet block.
    ///
    /// Returns `None` for OS-default themes, which contribute no rules.
    pub fn stylesheet(&self) -> Option<String> {
        let vars = self.css()?;
        let mut out = String::from(":root {\n");
        for var in vars {
            out.push_str("  ");
            out.push_str(var.name());
            out.push_str(": ");
            out.push_str(var.value());
            out.push_str(";\n");
        }
        out.push('}');
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_new_has_empty_overrides() {
        let theme = Theme::new("plain", "Plain");
        assert_eq!(theme.css(), Some(&[][..]));
        assert!(!theme.is_os_default());
    }

    #[test]
    fn test_theme_os_default_has_no_overrides() {
        let theme = Theme::os_default("os", "OS-default");
        assert!(theme.css().is_none());
        assert!(theme.is_os_default());
        assert!(theme.stylesheet().is_none());
    }

    #[test]
    fn test_theme_var_keeps_order() {
        let theme = Theme::new("dark", "Dark")
            .var("color-scheme", "dark")
            .var("--bg", "#111");

        let names: Vec<&str> = theme.css().unwrap().iter().map(CssVar::name).collect();
        assert_eq!(names, vec!["color-scheme", "--bg"]);
    }

    #[test]
    fn test_theme_var_on_os_default_creates_list() {
        let theme = Theme::os_default("custom", "Custom").var("--bg", "red");
        assert!(!theme.is_os_default());
        assert_eq!(theme.value_of("--bg"), Some("red"));
    }

    #[test]
    fn test_value_of_last_assignment_wins() {
        let theme = Theme::new("t", "T").var("--bg", "red").var("--bg", "blue");
        assert_eq!(theme.value_of("--bg"), Some("blue"));
        assert_eq!(theme.value_of("--fg"), None);
    }

    #[test]
    fn test_color_mode_from_color_scheme() {
        let dark = Theme::new("dark", "Dark").var("color-scheme", "dark");
        let light = Theme::new("light", "Light").var("color-scheme", " light ");
        let both = Theme::new("both", "Both").var("color-scheme", "light dark");

        assert_eq!(dark.color_mode(), Some(ColorMode::Dark));
        assert_eq!(light.color_mode(), Some(ColorMode::Light));
        assert_eq!(both.color_mode(), None);
        assert_eq!(Theme::os_default("os", "OS").color_mode(), None);
    }

    #[test]
    fn test_stylesheet_block() {
        let theme = Theme::new("dark", "Dark")
            .var("color-scheme", "dark")
            .var("--bg", "#111");

        assert_eq!(
            theme.stylesheet().unwrap(),
            ":root {\n  color-scheme: dark;\n  --bg: #111;\n}"
        );
    }

    #[test]
    fn test_theme_serde_shape() {
        let theme = Theme::new("dark", "Dark").var("--bg", "#111");
        let json = serde_json::to_value(&theme).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"key": "dark", "name": "Dark", "css": [["--bg", "#111"]]})
        );

        let os: Theme =
            serde_json::from_str(r#"{"key": "os", "name": "OS", "css": null}"#).unwrap();
        assert!(os.is_os_default());
    }
}
