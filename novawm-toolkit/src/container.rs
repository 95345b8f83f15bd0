//! Generic containers: ordered children, hit-testing and input routing.
//!
//! Children are kept front to back: index 0 is the topmost child. Pointer
//! motion is offered to visible children in that order and the first one to
//! claim it becomes the container's pointer-focus child. Buttons and scroll
//! events go to the pointer-focus child, keyboard events to the
//! keyboard-focus child.

use crate::element::{ElementKind, ElementType};
use crate::error::ToolkitError;
use crate::event::{AxisEvent, ButtonEvent, KeyboardEvent};
use crate::scene::{ElementId, Scene};
use novawm_core::types::{Point, Rect};

/// Child bookkeeping shared by every container-like element.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ContainerData {
    pub(crate) children: Vec<ElementId>,
    pub(crate) pointer_focus: Option<ElementId>,
    pub(crate) keyboard_focus: Option<ElementId>,
}

impl Scene {
    /// Creates an empty generic container.
    pub fn create_container(&mut self) -> ElementId {
        self.insert(ElementKind::Container(ContainerData::default()))
    }

    /// Adds `element` as the topmost child of `container`.
    ///
    /// # Errors
    ///
    /// [`ToolkitError::AlreadyParented`] if `element` has a parent,
    /// [`ToolkitError::WrongKind`] if `container` is not a generic container
    /// or workspace. Boxes, panes and menus have their own insertion
    /// operations.
    pub fn add_element(
        &mut self,
        container: impl Into<ElementId>,
        element: impl Into<ElementId>,
    ) -> Result<(), ToolkitError> {
        let container = container.into();
        self.check_generic_container(container)?;
        self.container_insert_raw(container, element.into(), true)?;
        self.update_layout(container)
    }

    /// Adds `element` as the bottommost child of `container`.
    pub fn add_element_back(
        &mut self,
        container: impl Into<ElementId>,
        element: impl Into<ElementId>,
    ) -> Result<(), ToolkitError> {
        let container = container.into();
        self.check_generic_container(container)?;
        self.container_insert_raw(container, element.into(), false)?;
        self.update_layout(container)
    }

    /// Removes `element` from `container`, clearing its parent and any focus
    /// the container held on it. The element stays alive.
    pub fn remove_element(
        &mut self,
        container: impl Into<ElementId>,
        element: impl Into<ElementId>,
    ) -> Result<(), ToolkitError> {
        let container = container.into();
        self.check_generic_container(container)?;
        self.container_remove_raw(container, element.into())?;
        self.update_layout(container)
    }

    /// Children of any container-like element, front to back.
    pub fn children(&self, container: impl Into<ElementId>) -> Result<&[ElementId], ToolkitError> {
        Ok(&self.container_data(container.into())?.children)
    }

    pub fn pointer_focus(&self, container: impl Into<ElementId>) -> Result<Option<ElementId>, ToolkitError> {
        Ok(self.container_data(container.into())?.pointer_focus)
    }

    pub fn keyboard_focus(&self, container: impl Into<ElementId>) -> Result<Option<ElementId>, ToolkitError> {
        Ok(self.container_data(container.into())?.keyboard_focus)
    }

    /// Routes keyboard events of `container` to `child`, or nowhere.
    pub fn set_keyboard_focus(
        &mut self,
        container: impl Into<ElementId>,
        child: Option<ElementId>,
    ) -> Result<(), ToolkitError> {
        let container = container.into();
        if let Some(child) = child {
            if self.node(child)?.base.parent != Some(container) {
                return Err(ToolkitError::NotAChild {
                    parent: container,
                    element: child,
                });
            }
        }
        self.container_data_mut(container)?.keyboard_focus = child;
        Ok(())
    }

    pub(crate) fn container_data(&self, id: ElementId) -> Result<&ContainerData, ToolkitError> {
        match self.node(id)?.kind.container() {
            Some(container) => Ok(container),
            None => Err(self.wrong_kind(id, "container")),
        }
    }

    pub(crate) fn container_data_mut(&mut self, id: ElementId) -> Result<&mut ContainerData, ToolkitError> {
        if self.node(id)?.kind.container().is_none() {
            return Err(self.wrong_kind(id, "container"));
        }
        match self.node_mut(id)?.kind.container_mut() {
            Some(container) => Ok(container),
            None => Err(ToolkitError::StaleElement(id)),
        }
    }

    fn check_generic_container(&self, id: ElementId) -> Result<(), ToolkitError> {
        match self.node(id)?.kind.element_type() {
            ElementType::Container | ElementType::Workspace => Ok(()),
            _ => Err(self.wrong_kind(id, "container")),
        }
    }

    /// Links `element` under `container` without triggering layout.
    pub(crate) fn container_insert_raw(
        &mut self,
        container: ElementId,
        element: ElementId,
        front: bool,
    ) -> Result<(), ToolkitError> {
        if container == element {
            return Err(ToolkitError::SelfParenting(element));
        }
        if let Some(parent) = self.node(element)?.base.parent {
            tracing::warn!("Refusing to add {:?}: already a child of {:?}", element, parent);
            return Err(ToolkitError::AlreadyParented { element, parent });
        }
        self.container_data(container)?;

        // Adding an ancestor would close a cycle.
        let mut ancestor = self.node(container)?.base.parent;
        while let Some(current) = ancestor {
            if current == element {
                return Err(ToolkitError::SelfParenting(element));
            }
            ancestor = self.node(current)?.base.parent;
        }

        let data = self.container_data_mut(container)?;
        if front {
            data.children.insert(0, element);
        } else {
            data.children.push(element);
        }
        self.node_mut(element)?.base.parent = Some(container);
        Ok(())
    }

    /// Unlinks `element` from `container` without triggering layout.
    pub(crate) fn container_remove_raw(
        &mut self,
        container: ElementId,
        element: ElementId,
    ) -> Result<(), ToolkitError> {
        let node = self.node_mut(container)?;
        let data = match node.kind.container_mut() {
            Some(data) => data,
            None => return Err(self.wrong_kind(container, "container")),
        };
        let index = match data.children.iter().position(|child| *child == element) {
            Some(index) => index,
            None => {
                tracing::warn!("{:?} is not a child of {:?}", element, container);
                return Err(ToolkitError::NotAChild {
                    parent: container,
                    element,
                });
            }
        };
        data.children.remove(index);
        let had_pointer_focus = data.pointer_focus == Some(element);
        if had_pointer_focus {
            data.pointer_focus = None;
        }
        if data.keyboard_focus == Some(element) {
            data.keyboard_focus = None;
        }
        if let Some(pane) = node.kind.pane_mut() {
            if pane.anchor == Some(element) {
                pane.anchor = None;
            }
        }

        if let Some(child) = self.elements.get_mut(element) {
            child.base.parent = None;
        }
        if had_pointer_focus {
            self.pointer_leave(element)?;
        }
        Ok(())
    }

    /// Unlinks every remaining child of a container being destroyed.
    pub(crate) fn detach_children(&mut self, container: ElementId) -> Result<(), ToolkitError> {
        let children = match self.node_mut(container)?.kind.container_mut() {
            Some(data) => std::mem::take(&mut data.children),
            None => return Ok(()),
        };
        for child in children {
            tracing::warn!("Container {:?} destroyed with child {:?} still attached; detaching it", container, child);
            if let Some(node) = self.elements.get_mut(child) {
                node.base.parent = None;
            }
        }
        Ok(())
    }

    pub(crate) fn container_dimensions(&self, id: ElementId) -> Result<Rect<i32>, ToolkitError> {
        let children = self.container_data(id)?.children.clone();
        self.union_of_extents(children.into_iter())
    }

    pub(crate) fn container_pointer_motion(
        &mut self,
        id: ElementId,
        position: Point<f64>,
        time_msec: u32,
    ) -> Result<bool, ToolkitError> {
        let children = self.container_data(id)?.children.clone();
        let mut claimed_by = None;
        for child in children {
            let base = &self.node(child)?.base;
            if !base.visible {
                continue;
            }
            let local = Point::new(
                position.x - f64::from(base.position.x),
                position.y - f64::from(base.position.y),
            );
            if self.pointer_motion(child, local, time_msec)? {
                claimed_by = Some(child);
                break;
            }
        }

        let previous = std::mem::replace(&mut self.container_data_mut(id)?.pointer_focus, claimed_by);
        if let Some(previous) = previous {
            if Some(previous) != claimed_by && self.contains(previous) {
                self.pointer_leave(previous)?;
            }
        }
        Ok(claimed_by.is_some())
    }

    pub(crate) fn container_pointer_button(&mut self, id: ElementId, event: &ButtonEvent) -> Result<bool, ToolkitError> {
        match self.container_data(id)?.pointer_focus {
            Some(focus) => self.pointer_button(focus, event),
            None => Ok(false),
        }
    }

    pub(crate) fn container_pointer_axis(&mut self, id: ElementId, event: &AxisEvent) -> Result<bool, ToolkitError> {
        match self.container_data(id)?.pointer_focus {
            Some(focus) => self.pointer_axis(focus, event),
            None => Ok(false),
        }
    }

    pub(crate) fn container_keyboard_event(
        &mut self,
        id: ElementId,
        event: &KeyboardEvent,
    ) -> Result<bool, ToolkitError> {
        match self.container_data(id)?.keyboard_focus {
            Some(focus) => self.keyboard_event(focus, event),
            None => Ok(false),
        }
    }
}
