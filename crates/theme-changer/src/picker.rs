//! Picker view model and markup.
//!
//! The picker is a list with one row per registered theme, in registry
//! order. The row whose key matches the current selection carries the
//! configured selected class. Rows expose their key through a
//! `data-theme-key` attribute so a single delegated click listener can map
//! clicks back to [`PickerEvent::Select`].

use minijinja::Environment;
use serde::Serialize;

use crate::error::ThemeError;
use crate::theme::ThemeRegistry;

/// Root class of the mounted picker subtree.
pub const PICKER_CLASS: &str = "theme-picker";

/// Attribute carrying a row's theme key.
pub const KEY_ATTRIBUTE: &str = "data-theme-key";

const PICKER_TEMPLATE_NAME: &str = "picker.html";

const PICKER_TEMPLATE: &str = r#"<div class="{{ picker_class }}" role="menu">
<ul>
{% for entry in entries -%}
<li role="menuitemradio" data-theme-key="{{ entry.key }}" aria-checked="{{ entry.selected }}"{% if entry.selected %} class="{{ selected_class }}"{% endif %}>{{ entry.name }}</li>
{% endfor -%}
</ul>
</div>"#;

/// One picker row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickerEntry {
    pub key: String,
    pub name: String,
    pub selected: bool,
}

/// Everything needed to render the picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickerView {
    pub picker_class: &'static str,
    pub selected_class: String,
    pub entries: Vec<PickerEntry>,
}

impl PickerView {
    /// Builds the view for `registry`, marking `current` as selected.
    pub fn build(registry: &ThemeRegistry, current: Option<&str>, selected_class: &str) -> Self {
        let entries = registry
            .list()
            .map(|theme| PickerEntry {
                key: theme.key().to_string(),
                name: theme.name().to_string(),
                selected: Some(theme.key()) == current,
            })
            .collect();
        Self {
            picker_class: PICKER_CLASS,
            selected_class: selected_class.to_string(),
            entries,
        }
    }

    /// The selected row, if any.
    pub fn selected(&self) -> Option<&PickerEntry> {
        self.entries.iter().find(|entry| entry.selected)
    }

    /// Renders the picker markup. Names and keys are HTML-escaped.
    pub fn render(&self) -> Result<String, ThemeError> {
        let mut env = Environment::new();
        env.add_template(PICKER_TEMPLATE_NAME, PICKER_TEMPLATE)?;
        let tmpl = env.get_template(PICKER_TEMPLATE_NAME)?;
        Ok(tmpl.render(self)?)
    }
}

/// A user interaction with the open picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    /// A row was clicked.
    Select(String),
    /// A click landed outside the picker.
    OutsideClick,
    /// The Escape key was pressed.
    Escape,
}
