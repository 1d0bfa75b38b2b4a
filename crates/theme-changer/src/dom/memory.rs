//! Headless document used in tests and by the CLI.

use std::collections::{BTreeMap, BTreeSet};

use super::Document;
use crate::error::DomError;

/// Element handle for [`MemoryDocument`], identified by a name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemoryElement(pub String);

impl MemoryElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// A picker subtree currently mounted in a [`MemoryDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedPicker {
    pub parent: MemoryElement,
    pub markup: String,
}

/// In-memory [`Document`].
///
/// Tracks the root style properties, the known elements, the mounted
/// picker and the number of live dismiss listeners, all inspectable.
///
/// # Example
///
/// ```rust
/// use theme_changer::dom::{Document, MemoryDocument, MemoryElement};
///
/// let mut doc = MemoryDocument::with_elements(["main"]);
/// doc.set_root_property("--bg", "#111").unwrap();
/// doc.mount_picker(&MemoryElement::new("main"), "<ul></ul>").unwrap();
///
/// assert_eq!(doc.root_property("--bg"), Some("#111"));
/// assert!(doc.mounted_picker().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    root: BTreeMap<String, String>,
    elements: BTreeSet<MemoryElement>,
    picker: Option<MountedPicker>,
    dismiss_listeners: usize,
    mutations: usize,
}

impl MemoryDocument {
    /// Creates an empty document with no elements.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document containing the named elements.
    pub fn with_elements<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut doc = Self::new();
        for name in names {
            doc.add_element(name);
        }
        doc
    }

    /// Adds an element that pickers can be mounted under.
    pub fn add_element(&mut self, name: impl Into<String>) -> MemoryElement {
        let element = MemoryElement::new(name);
        self.elements.insert(element.clone());
        element
    }

    /// Removes an element from the document.
    pub fn remove_element(&mut self, element: &MemoryElement) {
        self.elements.remove(element);
    }

    /// Returns a root style property.
    pub fn root_property(&self, name: &str) -> Option<&str> {
        self.root.get(name).map(String::as_str)
    }

    /// Returns every root style property, sorted by name.
    pub fn root_properties(&self) -> &BTreeMap<String, String> {
        &self.root
    }

    /// Returns the mounted picker, if any.
    pub fn mounted_picker(&self) -> Option<&MountedPicker> {
        self.picker.as_ref()
    }

    /// Returns the number of attached dismiss listeners.
    pub fn dismiss_listener_count(&self) -> usize {
        self.dismiss_listeners
    }

    /// Returns how many root property writes and removals happened.
    pub fn mutation_count(&self) -> usize {
        self.mutations
    }
}

impl Document for MemoryDocument {
    type Element = MemoryElement;

    fn set_root_property(&mut self, name: &str, value: &str) -> Result<(), DomError> {
        self.mutations += 1;
        self.root.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn remove_root_property(&mut self, name: &str) -> Result<(), DomError> {
        if self.root.remove(name).is_some() {
            self.mutations += 1;
        }
        Ok(())
    }

    fn mount_picker(&mut self, parent: &MemoryElement, markup: &str) -> Result<(), DomError> {
        if !self.elements.contains(parent) {
            return Err(DomError::MissingParent(parent.0.clone()));
        }
        if self.picker.is_some() {
            return Err(DomError::AlreadyMounted);
        }
        self.picker = Some(MountedPicker {
            parent: parent.clone(),
            markup: markup.to_string(),
        });
        Ok(())
    }

    fn unmount_picker(&mut self) -> Result<(), DomError> {
        self.picker = None;
        Ok(())
    }

    fn attach_dismiss_listener(&mut self) -> Result<(), DomError> {
        self.dismiss_listeners += 1;
        Ok(())
    }

    fn detach_dismiss_listener(&mut self) -> Result<(), DomError> {
        self.dismiss_listeners = self.dismiss_listeners.saturating_sub(1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_properties() {
        let mut doc = MemoryDocument::new();
        doc.set_root_property("--bg", "#111").unwrap();
        doc.set_root_property("--bg", "#222").unwrap();
        assert_eq!(doc.root_property("--bg"), Some("#222"));

        doc.remove_root_property("--bg").unwrap();
        doc.remove_root_property("--missing").unwrap();
        assert!(doc.root_properties().is_empty());
        assert_eq!(doc.mutation_count(), 3);
    }

    #[test]
    fn test_mount_requires_parent() {
        let mut doc = MemoryDocument::new();
        let result = doc.mount_picker(&MemoryElement::new("main"), "<ul></ul>");
        assert_eq!(result, Err(DomError::MissingParent("main".into())));
        assert!(doc.mounted_picker().is_none());
    }

    #[test]
    fn test_mount_rejects_second_picker() {
        let mut doc = MemoryDocument::with_elements(["main"]);
        let main = MemoryElement::new("main");

        doc.mount_picker(&main, "first").unwrap();
        assert_eq!(doc.mount_picker(&main, "second"), Err(DomError::AlreadyMounted));
        assert_eq!(doc.mounted_picker().unwrap().markup, "first");

        doc.unmount_picker().unwrap();
        assert!(doc.mounted_picker().is_none());
    }

    #[test]
    fn test_dismiss_listener_count() {
        let mut doc = MemoryDocument::new();
        doc.attach_dismiss_listener().unwrap();
        assert_eq!(doc.dismiss_listener_count(), 1);
        doc.detach_dismiss_listener().unwrap();
        doc.detach_dismiss_listener().unwrap();
        assert_eq!(doc.dismiss_listener_count(), 0);
    }
}
