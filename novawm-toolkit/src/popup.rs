//! Popups: pane-like elements that chain nested popups (submenus).
//!
//! Unlike a pane, a popup refuses to take the same nested popup twice and
//! reports it with [`ToolkitError::PopupAlreadyAdded`].

use crate::element::ElementKind;
use crate::error::ToolkitError;
use crate::pane::PaneData;
use crate::scene::{ElementId, PopupId, Scene};

pub(crate) struct PopupData {
    pub(crate) pane: PaneData,
}

impl Scene {
    pub fn create_popup(&mut self, anchor: impl Into<ElementId>) -> Result<PopupId, ToolkitError> {
        let anchor = anchor.into();
        self.check_unparented(anchor)?;
        let popup_container = self.create_container();
        let id = self.insert(ElementKind::Popup(PopupData {
            pane: PaneData::new(popup_container),
        }));
        self.attach_pane_parts(id, Some(anchor))?;
        Ok(PopupId(id))
    }

    /// Stacks `nested` on top of this popup's other nested popups.
    pub fn popup_add_popup(&mut self, id: PopupId, nested: impl Into<ElementId>) -> Result<(), ToolkitError> {
        let nested = nested.into();
        let popup_container = self.pane_data(id.0)?.popup_container;
        if self.node(nested)?.base.parent == Some(popup_container) {
            tracing::warn!("Popup {:?} already holds nested popup {:?}", id, nested);
            return Err(ToolkitError::PopupAlreadyAdded(nested));
        }
        self.container_insert_raw(popup_container, nested, true)
    }

    pub fn popup_remove_popup(&mut self, id: PopupId, nested: impl Into<ElementId>) -> Result<(), ToolkitError> {
        self.pane_remove_popup(id, nested)
    }

    pub fn popup_anchor(&self, id: PopupId) -> Result<Option<ElementId>, ToolkitError> {
        self.pane_anchor(id)
    }

    /// Nested popups, topmost first.
    pub fn popup_popups(&self, id: PopupId) -> Result<&[ElementId], ToolkitError> {
        self.pane_popups(id)
    }
}
