//! The document seam the controller drives.
//!
//! [`Document`] is the small slice of the DOM the theme controller needs:
//! root style properties, one mount point for the picker, and a
//! document-level listener that dismisses it. The browser implementation
//! lives in `web`; [`MemoryDocument`] is a headless implementation for tests
//! and non-browser hosts.

mod memory;

pub use memory::{MemoryDocument, MemoryElement, MountedPicker};

use crate::error::DomError;

/// Host document operations used by [`ThemeController`](crate::ThemeController).
///
/// All calls are synchronous and complete before returning.
pub trait Document {
    /// Handle to an element the picker can be mounted under.
    type Element: Clone + std::fmt::Debug;

    /// Sets a property on the document root's inline style.
    fn set_root_property(&mut self, name: &str, value: &str) -> Result<(), DomError>;

    /// Removes a property from the document root's inline style.
    ///
    /// Removing a property that isn't set is not an error.
    fn remove_root_property(&mut self, name: &str) -> Result<(), DomError>;

    /// Mounts the picker markup as the last child of `parent`.
    ///
    /// Fails with [`DomError::MissingParent`] if `parent` is not in the
    /// document and [`DomError::AlreadyMounted`] if a picker already exists.
    fn mount_picker(&mut self, parent: &Self::Element, markup: &str) -> Result<(), DomError>;

    /// Removes the mounted picker, if any.
    fn unmount_picker(&mut self) -> Result<(), DomError>;

    /// Starts listening for outside clicks and the Escape key.
    fn attach_dismiss_listener(&mut self) -> Result<(), DomError>;

    /// Stops listening for outside clicks and the Escape key.
    fn detach_dismiss_listener(&mut self) -> Result<(), DomError>;
}
