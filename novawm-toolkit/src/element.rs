//! Element kinds and the operations every element supports.
//!
//! Built-in kinds are variants of [`ElementKind`] and are dispatched by an
//! explicit `match` on [`ElementType`]. Container-like kinds embed a
//! [`ContainerData`] and fall back to the generic container behaviour where
//! they do not override it. Application-defined leaf elements implement
//! [`ElementHandler`], whose methods all have default implementations.
//!
//! Coordinates passed to an element are local to it: the container
//! translates pointer positions by the child's position before dispatching.

use crate::boxlayout::BoxData;
use crate::buffer::BufferData;
use crate::container::ContainerData;
use crate::error::ToolkitError;
use crate::event::{AxisEvent, ButtonEvent, KeyboardEvent};
use crate::menu::MenuData;
use crate::menu_item::MenuItemData;
use crate::pane::PaneData;
use crate::popup::PopupData;
use crate::rectangle::RectangleData;
use crate::scene::{BoxId, ElementId, MenuId, MenuItemId, Scene, WorkspaceId};
use crate::workspace::WorkspaceData;
use novawm_core::types::{Point, Rect};

/// Behaviour of an application-defined leaf element.
///
/// Only [`ElementHandler::dimensions`] is required. The default
/// `pointer_motion` claims the pointer whenever it is inside the dimensions;
/// every other default ignores the event.
pub trait ElementHandler {
    /// Extents in element-local coordinates.
    fn dimensions(&self) -> Rect<i32>;

    fn pointer_motion(&mut self, position: Point<f64>, _time_msec: u32) -> bool {
        self.dimensions().to_f64().contains_point(&position)
    }

    /// The pointer started being inside the element.
    fn pointer_enter(&mut self) {}

    /// The pointer left the element, or the element lost pointer focus.
    fn pointer_leave(&mut self) {}

    fn pointer_button(&mut self, _event: &ButtonEvent) -> bool {
        false
    }

    fn pointer_axis(&mut self, _event: &AxisEvent) -> bool {
        false
    }

    fn keyboard_event(&mut self, _event: &KeyboardEvent) -> bool {
        false
    }

    /// Called once, right before the element is removed from the scene.
    fn destroy(&mut self) {}
}

/// Kind tag of an element, as reported by [`Scene::element_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Container,
    Box,
    Buffer,
    Rectangle,
    Pane,
    Popup,
    Menu,
    MenuItem,
    Workspace,
    Custom,
}

impl ElementType {
    pub fn name(self) -> &'static str {
        match self {
            ElementType::Container => "container",
            ElementType::Box => "box",
            ElementType::Buffer => "buffer",
            ElementType::Rectangle => "rectangle",
            ElementType::Pane => "pane",
            ElementType::Popup => "popup",
            ElementType::Menu => "menu",
            ElementType::MenuItem => "menu item",
            ElementType::Workspace => "workspace",
            ElementType::Custom => "custom element",
        }
    }

    /// True for kinds that hold children.
    pub fn is_container(self) -> bool {
        !matches!(
            self,
            ElementType::Buffer | ElementType::Rectangle | ElementType::MenuItem | ElementType::Custom
        )
    }
}

pub(crate) enum ElementKind {
    Container(ContainerData),
    Box(BoxData),
    Buffer(BufferData),
    Rectangle(RectangleData),
    Pane(PaneData),
    Popup(PopupData),
    Menu(MenuData),
    MenuItem(MenuItemData),
    Workspace(WorkspaceData),
    Custom(Box<dyn ElementHandler>),
}

impl ElementKind {
    pub(crate) fn element_type(&self) -> ElementType {
        match self {
            ElementKind::Container(_) => ElementType::Container,
            ElementKind::Box(_) => ElementType::Box,
            ElementKind::Buffer(_) => ElementType::Buffer,
            ElementKind::Rectangle(_) => ElementType::Rectangle,
            ElementKind::Pane(_) => ElementType::Pane,
            ElementKind::Popup(_) => ElementType::Popup,
            ElementKind::Menu(_) => ElementType::Menu,
            ElementKind::MenuItem(_) => ElementType::MenuItem,
            ElementKind::Workspace(_) => ElementType::Workspace,
            ElementKind::Custom(_) => ElementType::Custom,
        }
    }

    pub(crate) fn container(&self) -> Option<&ContainerData> {
        match self {
            ElementKind::Container(c) => Some(c),
            ElementKind::Box(b) => Some(&b.container),
            ElementKind::Pane(p) => Some(&p.container),
            ElementKind::Popup(p) => Some(&p.pane.container),
            ElementKind::Menu(m) => Some(&m.pane.container),
            ElementKind::Workspace(w) => Some(&w.container),
            _ => None,
        }
    }

    pub(crate) fn container_mut(&mut self) -> Option<&mut ContainerData> {
        match self {
            ElementKind::Container(c) => Some(c),
            ElementKind::Box(b) => Some(&mut b.container),
            ElementKind::Pane(p) => Some(&mut p.container),
            ElementKind::Popup(p) => Some(&mut p.pane.container),
            ElementKind::Menu(m) => Some(&mut m.pane.container),
            ElementKind::Workspace(w) => Some(&mut w.container),
            _ => None,
        }
    }

    /// The pane part of panes, popups and menus.
    pub(crate) fn pane(&self) -> Option<&PaneData> {
        match self {
            ElementKind::Pane(p) => Some(p),
            ElementKind::Popup(p) => Some(&p.pane),
            ElementKind::Menu(m) => Some(&m.pane),
            _ => None,
        }
    }

    pub(crate) fn pane_mut(&mut self) -> Option<&mut PaneData> {
        match self {
            ElementKind::Pane(p) => Some(p),
            ElementKind::Popup(p) => Some(&mut p.pane),
            ElementKind::Menu(m) => Some(&mut m.pane),
            _ => None,
        }
    }
}

impl Scene {
    /// Adds an application-defined leaf element.
    pub fn create_custom(&mut self, handler: impl ElementHandler + 'static) -> ElementId {
        self.insert(ElementKind::Custom(Box::new(handler)))
    }

    pub fn position(&self, id: impl Into<ElementId>) -> Result<Point<i32>, ToolkitError> {
        Ok(self.node(id.into())?.base.position)
    }

    /// Moves the element within its parent and relayouts the ancestors.
    pub fn set_position(
        &mut self,
        id: impl Into<ElementId>,
        position: Point<i32>,
    ) -> Result<(), ToolkitError> {
        let id = id.into();
        let node = self.node_mut(id)?;
        if node.base.position == position {
            return Ok(());
        }
        node.base.position = position;
        if let Some(parent) = node.base.parent {
            self.update_layout(parent)?;
        }
        Ok(())
    }

    pub fn is_visible(&self, id: impl Into<ElementId>) -> Result<bool, ToolkitError> {
        Ok(self.node(id.into())?.base.visible)
    }

    /// Shows or hides the element.
    ///
    /// Hiding an element ends any pointer focus it or its descendants hold.
    /// Hidden elements receive no pointer motion and do not contribute to
    /// their parent's dimensions. For menus this opens or closes the menu,
    /// see [`Scene::menu_set_open`].
    pub fn set_visible(&mut self, id: impl Into<ElementId>, visible: bool) -> Result<(), ToolkitError> {
        let id = id.into();
        match self.node(id)?.kind.element_type() {
            ElementType::Menu => self.menu_set_open(MenuId(id), visible),
            _ => self.set_visible_raw(id, visible),
        }
    }

    pub(crate) fn set_visible_raw(&mut self, id: ElementId, visible: bool) -> Result<(), ToolkitError> {
        let node = self.node_mut(id)?;
        if node.base.visible == visible {
            return Ok(());
        }
        node.base.visible = visible;
        let parent = node.base.parent;
        if !visible {
            self.pointer_leave(id)?;
            if let Some(parent) = parent {
                if let Some(container) = self.node_mut(parent)?.kind.container_mut() {
                    if container.pointer_focus == Some(id) {
                        container.pointer_focus = None;
                    }
                }
            }
        }
        if let Some(parent) = parent {
            self.update_layout(parent)?;
        }
        Ok(())
    }

    pub fn pointer_inside(&self, id: impl Into<ElementId>) -> Result<bool, ToolkitError> {
        Ok(self.node(id.into())?.base.pointer_inside)
    }

    /// Last pointer position the element saw, in its own coordinates.
    pub fn pointer_position(&self, id: impl Into<ElementId>) -> Result<Option<Point<f64>>, ToolkitError> {
        Ok(self.node(id.into())?.base.pointer_position)
    }

    pub fn parent(&self, id: impl Into<ElementId>) -> Result<Option<ElementId>, ToolkitError> {
        Ok(self.node(id.into())?.base.parent)
    }

    /// Extents of the element in its own coordinates.
    ///
    /// Containers report the union of their visible children. Panes, popups
    /// and menus report only their anchor (and a menu its border), so open
    /// popups never grow them.
    pub fn dimensions(&self, id: impl Into<ElementId>) -> Result<Rect<i32>, ToolkitError> {
        let id = id.into();
        let node = self.node(id)?;
        match &node.kind {
            ElementKind::Container(_) | ElementKind::Box(_) => self.container_dimensions(id),
            ElementKind::Workspace(w) => Ok(w.extents),
            ElementKind::Pane(p) => self.union_of_extents(p.anchor.into_iter()),
            ElementKind::Popup(p) => self.union_of_extents(p.pane.anchor.into_iter()),
            ElementKind::Menu(m) => {
                self.union_of_extents(m.pane.anchor.into_iter().chain(std::iter::once(m.border)))
            }
            ElementKind::Buffer(b) => Ok(b.dimensions()),
            ElementKind::Rectangle(r) => Ok(Rect::new(Point::new(0, 0), r.size)),
            ElementKind::MenuItem(item) => Ok(Rect::from_coords(0, 0, item.style.width, item.style.height)),
            ElementKind::Custom(handler) => Ok(handler.dimensions()),
        }
    }

    /// Extents of a visible child in its parent's coordinates.
    pub(crate) fn child_extent(&self, child: ElementId) -> Result<Option<Rect<i32>>, ToolkitError> {
        let node = match self.elements.get(child) {
            Some(node) => node,
            None => return Ok(None),
        };
        if !node.base.visible {
            return Ok(None);
        }
        let position = node.base.position;
        Ok(Some(self.dimensions(child)?.translated(&position)))
    }

    pub(crate) fn union_of_extents(
        &self,
        children: impl Iterator<Item = ElementId>,
    ) -> Result<Rect<i32>, ToolkitError> {
        let mut extents: Option<Rect<i32>> = None;
        for child in children {
            if let Some(child_extents) = self.child_extent(child)? {
                extents = Some(match extents {
                    Some(current) => current.union(&child_extents),
                    None => child_extents,
                });
            }
        }
        Ok(extents.unwrap_or_default())
    }

    /// Position of `id` in the coordinates of its ancestor `ancestor`.
    pub fn position_in(
        &self,
        id: impl Into<ElementId>,
        ancestor: impl Into<ElementId>,
    ) -> Result<Point<i32>, ToolkitError> {
        let (id, ancestor) = (id.into(), ancestor.into());
        let mut position = Point::new(0, 0);
        let mut current = id;
        while current != ancestor {
            let node = self.node(current)?;
            position = position + node.base.position;
            current = node.base.parent.ok_or(ToolkitError::NotAChild {
                parent: ancestor,
                element: id,
            })?;
        }
        Ok(position)
    }

    /// Feeds a pointer position (element-local) to the element.
    ///
    /// Returns whether the element claimed the pointer. Crossing into or out
    /// of a claiming state runs the element's enter and leave behaviour.
    pub fn pointer_motion(
        &mut self,
        id: impl Into<ElementId>,
        position: Point<f64>,
        time_msec: u32,
    ) -> Result<bool, ToolkitError> {
        let id = id.into();
        let node = self.node_mut(id)?;
        if !node.base.visible {
            self.pointer_leave(id)?;
            return Ok(false);
        }
        node.base.pointer_position = Some(position);
        let element_type = node.kind.element_type();

        let claimed = match element_type {
            ElementType::Container
            | ElementType::Box
            | ElementType::Pane
            | ElementType::Popup
            | ElementType::Menu => self.container_pointer_motion(id, position, time_msec)?,
            ElementType::Workspace => {
                if self.workspace_data(id)?.enabled {
                    self.container_pointer_motion(id, position, time_msec)?
                } else {
                    false
                }
            }
            ElementType::Custom => match &mut self.node_mut(id)?.kind {
                ElementKind::Custom(handler) => handler.pointer_motion(position, time_msec),
                _ => false,
            },
            ElementType::Buffer | ElementType::Rectangle | ElementType::MenuItem => {
                self.dimensions(id)?.to_f64().contains_point(&position)
            }
        };

        let was_inside = self.node(id)?.base.pointer_inside;
        if claimed && !was_inside {
            self.node_mut(id)?.base.pointer_inside = true;
            self.pointer_enter_hook(id, element_type)?;
        } else if !claimed && was_inside {
            self.pointer_leave(id)?;
        }
        Ok(claimed)
    }

    fn pointer_enter_hook(&mut self, id: ElementId, element_type: ElementType) -> Result<(), ToolkitError> {
        match element_type {
            ElementType::MenuItem => self.menu_item_pointer_enter(MenuItemId(id)),
            ElementType::Custom => {
                if let ElementKind::Custom(handler) = &mut self.node_mut(id)?.kind {
                    handler.pointer_enter();
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Ends pointer focus on the element and, for containers, on the child
    /// holding it. Does nothing if the pointer is not inside.
    pub fn pointer_leave(&mut self, id: impl Into<ElementId>) -> Result<(), ToolkitError> {
        let id = id.into();
        let node = self.node_mut(id)?;
        if !node.base.pointer_inside {
            return Ok(());
        }
        node.base.pointer_inside = false;
        node.base.pointer_position = None;
        let element_type = node.kind.element_type();
        let focus = node.kind.container_mut().and_then(|c| c.pointer_focus.take());
        if let Some(focus) = focus {
            if self.contains(focus) {
                self.pointer_leave(focus)?;
            }
        }

        match element_type {
            ElementType::MenuItem => self.menu_item_pointer_leave(MenuItemId(id))?,
            ElementType::Custom => {
                if let ElementKind::Custom(handler) = &mut self.node_mut(id)?.kind {
                    handler.pointer_leave();
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Dispatches a translated button event. Returns whether it was claimed.
    pub fn pointer_button(&mut self, id: impl Into<ElementId>, event: &ButtonEvent) -> Result<bool, ToolkitError> {
        let id = id.into();
        match self.node(id)?.kind.element_type() {
            ElementType::Menu => self.menu_pointer_button(MenuId(id), event),
            ElementType::MenuItem => self.menu_item_pointer_button(MenuItemId(id), event),
            ElementType::Workspace if !self.workspace_data(id)?.enabled => Ok(false),
            ElementType::Custom => match &mut self.node_mut(id)?.kind {
                ElementKind::Custom(handler) => Ok(handler.pointer_button(event)),
                _ => Ok(false),
            },
            t if t.is_container() => self.container_pointer_button(id, event),
            _ => Ok(false),
        }
    }

    pub fn pointer_axis(&mut self, id: impl Into<ElementId>, event: &AxisEvent) -> Result<bool, ToolkitError> {
        let id = id.into();
        match self.node(id)?.kind.element_type() {
            ElementType::Workspace if !self.workspace_data(id)?.enabled => Ok(false),
            ElementType::Custom => match &mut self.node_mut(id)?.kind {
                ElementKind::Custom(handler) => Ok(handler.pointer_axis(event)),
                _ => Ok(false),
            },
            t if t.is_container() => self.container_pointer_axis(id, event),
            _ => Ok(false),
        }
    }

    pub fn keyboard_event(&mut self, id: impl Into<ElementId>, event: &KeyboardEvent) -> Result<bool, ToolkitError> {
        let id = id.into();
        match self.node(id)?.kind.element_type() {
            ElementType::Workspace if !self.workspace_data(id)?.enabled => Ok(false),
            ElementType::Custom => match &mut self.node_mut(id)?.kind {
                ElementKind::Custom(handler) => Ok(handler.keyboard_event(event)),
                _ => Ok(false),
            },
            t if t.is_container() => self.container_keyboard_event(id, event),
            _ => Ok(false),
        }
    }

    /// Destroys the element.
    ///
    /// Boxes, menus and workspaces destroy what they own first. Panes and
    /// popups detach their anchor and popups; generic containers detach any
    /// remaining children. The element is then removed from its parent.
    pub fn destroy(&mut self, id: impl Into<ElementId>) -> Result<(), ToolkitError> {
        let id = id.into();
        let element_type = self.node(id)?.kind.element_type();
        match element_type {
            ElementType::MenuItem => self.menu_item_teardown(MenuItemId(id))?,
            ElementType::Menu => self.menu_teardown(MenuId(id))?,
            ElementType::Box => self.box_teardown(BoxId(id))?,
            ElementType::Pane | ElementType::Popup => self.pane_teardown(id)?,
            ElementType::Workspace => self.workspace_teardown(WorkspaceId(id))?,
            ElementType::Custom => {
                // The hook is the last thing a handler sees.
                self.detach_from_parent(id)?;
                self.pointer_leave(id)?;
                if let ElementKind::Custom(handler) = &mut self.node_mut(id)?.kind {
                    handler.destroy();
                }
            }
            ElementType::Container | ElementType::Buffer | ElementType::Rectangle => {}
        }

        self.detach_children(id)?;
        self.detach_from_parent(id)?;
        self.elements.remove(id);
        tracing::debug!("Destroyed {} {:?}", element_type.name(), id);
        Ok(())
    }

    fn detach_from_parent(&mut self, id: ElementId) -> Result<(), ToolkitError> {
        let parent = self.node(id)?.base.parent;
        if let Some(parent) = parent {
            self.container_remove_raw(parent, id)?;
            self.update_layout(parent)?;
        }
        Ok(())
    }

    /// Recomputes layout from `id` up to the top of its tree.
    pub(crate) fn update_layout(&mut self, id: ElementId) -> Result<(), ToolkitError> {
        let mut current = Some(id);
        while let Some(element) = current {
            match self.node(element)?.kind.element_type() {
                ElementType::Box => self.box_relayout(BoxId(element))?,
                ElementType::Menu => self.menu_layout(MenuId(element))?,
                _ => {}
            }
            current = self.node(element)?.base.parent;
        }
        Ok(())
    }
}
