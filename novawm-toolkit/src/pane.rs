//! Panes: an anchor element with popups stacked above it.
//!
//! The pane does not own its anchor or its popups. Destroying a pane detaches
//! them; whoever created them stays responsible for destroying them.

use crate::container::ContainerData;
use crate::element::{ElementKind, ElementType};
use crate::error::ToolkitError;
use crate::scene::{ElementId, PaneId, Scene};

pub(crate) struct PaneData {
    pub(crate) container: ContainerData,
    pub(crate) anchor: Option<ElementId>,
    pub(crate) popup_container: ElementId,
}

impl PaneData {
    pub(crate) fn new(popup_container: ElementId) -> Self {
        PaneData {
            container: ContainerData::default(),
            anchor: None,
            popup_container,
        }
    }
}

impl Scene {
    /// Creates a pane around `anchor`, which must not have a parent.
    pub fn create_pane(&mut self, anchor: impl Into<ElementId>) -> Result<PaneId, ToolkitError> {
        let anchor = anchor.into();
        self.check_unparented(anchor)?;
        let popup_container = self.create_container();
        let id = self.insert(ElementKind::Pane(PaneData::new(popup_container)));
        self.attach_pane_parts(id, Some(anchor))?;
        Ok(PaneId(id))
    }

    /// The anchor, unless it was detached or destroyed.
    pub fn pane_anchor(&self, id: impl Into<ElementId>) -> Result<Option<ElementId>, ToolkitError> {
        Ok(self.pane_data(id.into())?.anchor)
    }

    /// Stacks `popup` on top of all existing popups.
    pub fn pane_add_popup(
        &mut self,
        id: impl Into<ElementId>,
        popup: impl Into<ElementId>,
    ) -> Result<(), ToolkitError> {
        let popup_container = self.pane_data(id.into())?.popup_container;
        self.container_insert_raw(popup_container, popup.into(), true)
    }

    pub fn pane_remove_popup(
        &mut self,
        id: impl Into<ElementId>,
        popup: impl Into<ElementId>,
    ) -> Result<(), ToolkitError> {
        let popup_container = self.pane_data(id.into())?.popup_container;
        self.container_remove_raw(popup_container, popup.into())
    }

    /// Popups, topmost first.
    pub fn pane_popups(&self, id: impl Into<ElementId>) -> Result<&[ElementId], ToolkitError> {
        let popup_container = self.pane_data(id.into())?.popup_container;
        self.children(popup_container)
    }

    pub(crate) fn check_unparented(&self, element: ElementId) -> Result<(), ToolkitError> {
        match self.node(element)?.base.parent {
            Some(parent) => Err(ToolkitError::AlreadyParented { element, parent }),
            None => Ok(()),
        }
    }

    /// Links the popup container above the anchor.
    pub(crate) fn attach_pane_parts(&mut self, id: ElementId, anchor: Option<ElementId>) -> Result<(), ToolkitError> {
        let popup_container = self.pane_data(id)?.popup_container;
        self.container_insert_raw(id, popup_container, true)?;
        if let Some(anchor) = anchor {
            self.container_insert_raw(id, anchor, false)?;
            self.pane_data_mut(id)?.anchor = Some(anchor);
        }
        Ok(())
    }

    /// Detaches anchor and popups, then drops the popup container.
    pub(crate) fn pane_teardown(&mut self, id: ElementId) -> Result<(), ToolkitError> {
        let is_popup = self.node(id)?.kind.element_type() == ElementType::Popup;
        let (anchor, popup_container) = {
            let data = self.pane_data(id)?;
            (data.anchor, data.popup_container)
        };

        let popups = self.container_data(popup_container)?.children.clone();
        if is_popup && !popups.is_empty() {
            tracing::warn!(
                "Popup {:?} destroyed with {} nested popups still attached; detaching them",
                id,
                popups.len()
            );
        }
        for popup in popups {
            self.container_remove_raw(popup_container, popup)?;
        }
        if let Some(anchor) = anchor {
            self.container_remove_raw(id, anchor)?;
        }
        self.container_remove_raw(id, popup_container)?;
        self.destroy(popup_container)
    }

    pub(crate) fn pane_data(&self, id: ElementId) -> Result<&PaneData, ToolkitError> {
        match self.node(id)?.kind.pane() {
            Some(data) => Ok(data),
            None => Err(self.wrong_kind(id, "pane")),
        }
    }

    pub(crate) fn pane_data_mut(&mut self, id: ElementId) -> Result<&mut PaneData, ToolkitError> {
        if self.node(id)?.kind.pane().is_none() {
            return Err(self.wrong_kind(id, "pane"));
        }
        match self.node_mut(id)?.kind.pane_mut() {
            Some(data) => Ok(data),
            None => Err(ToolkitError::StaleElement(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use novawm_core::types::{Color, Point, Rect, Size};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_popups_stack_above_anchor() {
        let mut scene = Scene::default();
        let anchor = scene.create_rectangle(Size::new(50, 50), Color::BLACK);
        let pane = scene.create_pane(anchor).unwrap();
        let first = scene.create_rectangle(Size::new(10, 10), Color::WHITE);
        let second = scene.create_rectangle(Size::new(10, 10), Color::WHITE);
        scene.pane_add_popup(pane, first).unwrap();
        scene.pane_add_popup(pane, second).unwrap();

        assert_eq!(scene.pane_popups(pane).unwrap(), &[second, first]);
        assert!(scene.pointer_motion(pane, Point::new(5.0, 5.0), 0).unwrap());
        assert!(scene.pointer_inside(second).unwrap());
        assert!(!scene.pointer_inside(anchor).unwrap());

        scene.pointer_motion(pane, Point::new(30.0, 30.0), 1).unwrap();
        assert!(scene.pointer_inside(anchor).unwrap());
    }

    #[test]
    fn test_dimensions_ignore_popups() {
        let mut scene = Scene::default();
        let anchor = scene.create_rectangle(Size::new(20, 10), Color::BLACK);
        let pane = scene.create_pane(anchor).unwrap();
        let popup = scene.create_rectangle(Size::new(100, 100), Color::WHITE);
        scene.pane_add_popup(pane, popup).unwrap();
        assert_eq!(scene.dimensions(pane).unwrap(), Rect::from_coords(0, 0, 20, 10));
    }

    #[test]
    fn test_destroy_detaches_without_destroying() {
        let mut scene = Scene::default();
        let anchor = scene.create_rectangle(Size::new(20, 10), Color::BLACK);
        let pane = scene.create_pane(anchor).unwrap();
        let popup = scene.create_rectangle(Size::new(5, 5), Color::WHITE);
        scene.pane_add_popup(pane, popup).unwrap();

        scene.destroy(pane).unwrap();
        assert!(!scene.contains(pane));
        assert_eq!(scene.parent(anchor).unwrap(), None);
        assert_eq!(scene.parent(popup).unwrap(), None);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_parented_anchor_is_rejected() {
        let mut scene = Scene::default();
        let container = scene.create_container();
        let anchor = scene.create_rectangle(Size::new(1, 1), Color::BLACK);
        scene.add_element(container, anchor).unwrap();
        assert!(matches!(
            scene.create_pane(anchor),
            Err(ToolkitError::AlreadyParented { .. })
        ));
    }

    #[test]
    fn test_remove_popup_that_was_never_added() {
        let mut scene = Scene::default();
        let anchor = scene.create_rectangle(Size::new(1, 1), Color::BLACK);
        let pane = scene.create_pane(anchor).unwrap();
        let stray = scene.create_rectangle(Size::new(1, 1), Color::BLACK);
        assert!(matches!(
            scene.pane_remove_popup(pane, stray),
            Err(ToolkitError::NotAChild { .. })
        ));
    }
}
