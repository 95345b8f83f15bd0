//! The element arena.
//!
//! Every element lives in a [`Scene`] and is addressed by an [`ElementId`],
//! a generational key: once an element is destroyed its id is never valid
//! again, and using it yields [`ToolkitError::StaleElement`]. Parent, menu and
//! lock references between elements are plain ids and never keep an element
//! alive.
//!
//! The scene is single-threaded. All operations, including signal emission,
//! run synchronously to completion.

use crate::element::{ElementKind, ElementType};
use crate::error::ToolkitError;
use crate::render::{MemoryRenderer, Renderer};
use novawm_core::types::Point;
use slotmap::SlotMap;
use std::fmt;
use std::rc::Rc;

slotmap::new_key_type! {
    /// Generational handle of an element in a [`Scene`].
    pub struct ElementId;
}

macro_rules! typed_element_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub(crate) ElementId);

        impl $name {
            /// The untyped element id.
            pub fn element(self) -> ElementId {
                self.0
            }
        }

        impl From<$name> for ElementId {
            fn from(id: $name) -> ElementId {
                id.0
            }
        }
    };
}

typed_element_id!(
    /// Id of a [`crate::boxlayout`] box.
    BoxId
);
typed_element_id!(
    /// Id of a pane.
    PaneId
);
typed_element_id!(
    /// Id of a popup.
    PopupId
);
typed_element_id!(
    /// Id of a menu.
    MenuId
);
typed_element_id!(
    /// Id of a menu item.
    MenuItemId
);
typed_element_id!(
    /// Id of a workspace.
    WorkspaceId
);

/// State shared by every element kind.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ElementBase {
    /// Position in the parent's coordinate space.
    pub(crate) position: Point<i32>,
    pub(crate) visible: bool,
    pub(crate) pointer_inside: bool,
    /// Last pointer position seen, in element-local coordinates.
    pub(crate) pointer_position: Option<Point<f64>>,
    pub(crate) parent: Option<ElementId>,
}

impl Default for ElementBase {
    fn default() -> Self {
        ElementBase {
            position: Point::new(0, 0),
            visible: true,
            pointer_inside: false,
            pointer_position: None,
            parent: None,
        }
    }
}

pub(crate) struct ElementNode {
    pub(crate) base: ElementBase,
    pub(crate) kind: ElementKind,
}

/// Owner of all elements and of the renderer they draw with.
pub struct Scene {
    pub(crate) elements: SlotMap<ElementId, ElementNode>,
    renderer: Rc<dyn Renderer>,
}

impl Scene {
    pub fn new(renderer: Rc<dyn Renderer>) -> Self {
        Scene {
            elements: SlotMap::with_key(),
            renderer,
        }
    }

    pub fn renderer(&self) -> Rc<dyn Renderer> {
        Rc::clone(&self.renderer)
    }

    /// True while `id` refers to a live element.
    pub fn contains(&self, id: impl Into<ElementId>) -> bool {
        self.elements.contains_key(id.into())
    }

    /// Number of live elements, internal parts of composite elements included.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The kind of element `id` refers to.
    pub fn element_type(&self, id: impl Into<ElementId>) -> Result<ElementType, ToolkitError> {
        Ok(self.node(id.into())?.kind.element_type())
    }

    pub(crate) fn insert(&mut self, kind: ElementKind) -> ElementId {
        let name = kind.element_type().name();
        let id = self.elements.insert(ElementNode {
            base: ElementBase::default(),
            kind,
        });
        tracing::trace!("Created {} element {:?}", name, id);
        id
    }

    pub(crate) fn node(&self, id: ElementId) -> Result<&ElementNode, ToolkitError> {
        self.elements.get(id).ok_or(ToolkitError::StaleElement(id))
    }

    pub(crate) fn node_mut(&mut self, id: ElementId) -> Result<&mut ElementNode, ToolkitError> {
        self.elements.get_mut(id).ok_or(ToolkitError::StaleElement(id))
    }

    pub(crate) fn wrong_kind(&self, id: ElementId, expected: &'static str) -> ToolkitError {
        match self.elements.get(id) {
            Some(node) => ToolkitError::WrongKind {
                id,
                expected,
                found: node.kind.element_type().name(),
            },
            None => ToolkitError::StaleElement(id),
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Scene::new(Rc::new(MemoryRenderer))
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("elements", &self.elements.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use novawm_core::types::{Color, Size};

    #[test]
    fn test_destroyed_id_is_stale() {
        let mut scene = Scene::default();
        let rect = scene.create_rectangle(Size::new(4, 4), Color::BLACK);
        assert!(scene.contains(rect));
        scene.destroy(rect).unwrap();
        assert!(!scene.contains(rect));
        assert!(matches!(scene.position(rect), Err(ToolkitError::StaleElement(id)) if id == rect));
    }

    #[test]
    fn test_reused_slot_does_not_revive_old_id() {
        let mut scene = Scene::default();
        let first = scene.create_container();
        scene.destroy(first).unwrap();
        let second = scene.create_container();
        assert_ne!(first, second);
        assert!(!scene.contains(first));
        assert!(scene.contains(second));
    }

    #[test]
    fn test_wrong_kind_reports_both_kinds() {
        let mut scene = Scene::default();
        let rect = scene.create_rectangle(Size::new(1, 1), Color::BLACK);
        let err = scene.children(rect).unwrap_err();
        assert!(matches!(
            err,
            ToolkitError::WrongKind { expected: "container", found: "rectangle", .. }
        ));
    }
}
