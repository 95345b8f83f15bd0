//! Errors reported by toolkit operations.
//!
//! Expected outcomes ("event not claimed", "unlock with another lock") are
//! plain booleans. `ToolkitError` covers failed construction, violated
//! preconditions and failures of caller-provided callbacks.

use crate::output::OutputId;
use crate::scene::ElementId;
use novawm_core::error::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolkitError {
    /// The id refers to an element that was destroyed.
    #[error("Element {0:?} does not exist (destroyed or never created)")]
    StaleElement(ElementId),

    /// The id refers to an element of another kind.
    #[error("Element {id:?} is a {found}, expected a {expected}")]
    WrongKind {
        id: ElementId,
        expected: &'static str,
        found: &'static str,
    },

    /// Adding an element that already has a parent.
    #[error("Element {element:?} already belongs to container {parent:?}")]
    AlreadyParented { element: ElementId, parent: ElementId },

    /// Removing an element from a container it is not a child of.
    #[error("Element {element:?} is not a child of container {parent:?}")]
    NotAChild { parent: ElementId, element: ElementId },

    /// Adding a popup that is already one of the popup's nested popups.
    #[error("Popup {0:?} was already added")]
    PopupAlreadyAdded(ElementId),

    /// Adding a menu item that already belongs to a menu.
    #[error("Menu item {item:?} already belongs to menu {menu:?}")]
    ItemAlreadyInMenu { item: ElementId, menu: ElementId },

    /// Removing a menu item from a menu that does not hold it.
    #[error("Menu item {item:?} is not part of menu {menu:?}")]
    ItemNotInMenu { item: ElementId, menu: ElementId },

    /// Attaching a menu that already is the submenu of another item.
    #[error("Menu {menu:?} is already the submenu of item {item:?}")]
    SubmenuAlreadyAttached { menu: ElementId, item: ElementId },

    /// An element cannot contain itself.
    #[error("Element {0:?} cannot be added to itself")]
    SelfParenting(ElementId),

    /// The renderer could not produce a pixel buffer.
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    /// The output tracker's create callback failed.
    #[error("Failed to create tracked state for output {0:?}")]
    OutputCreate(OutputId),

    /// The workspace is not managed by this root.
    #[error("Workspace {0:?} is not part of the root")]
    UnknownWorkspace(ElementId),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Errors from a [`crate::render::Renderer`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Invalid buffer size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },

    #[error("Renderer backend failure: {0}")]
    Backend(String),
}
