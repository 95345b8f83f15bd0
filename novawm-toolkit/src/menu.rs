//! Menus: a vertical box of items inside a bordered pane.
//!
//! The menu arbitrates highlighting among its items, so at most one item is
//! highlighted at a time. Submenus of its items are placed in the menu's
//! popup container. A menu is open while it is visible; new menus start open.
//!
//! In [`MenuMode::RightClick`] items trigger on right button release and the
//! menu asks to be closed whenever it receives a right button release.

use crate::element::ElementKind;
use crate::error::ToolkitError;
use crate::event::{ButtonEvent, ButtonKind, BTN_RIGHT};
use crate::menu_item::MenuItemState;
use crate::pane::PaneData;
use crate::scene::{BoxId, ElementId, MenuId, MenuItemId, Scene};
use crate::signal::Signal;
use novawm_core::types::{MenuStyle, Orientation, Point, Size};

/// How a menu reacts to buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuMode {
    /// Items trigger on a left click.
    #[default]
    Normal,
    /// Items trigger on right button release; left clicks never trigger.
    RightClick,
}

pub(crate) struct MenuData {
    pub(crate) pane: PaneData,
    pub(crate) box_id: BoxId,
    pub(crate) border: ElementId,
    pub(crate) items: Vec<MenuItemId>,
    pub(crate) highlighted: Option<MenuItemId>,
    pub(crate) mode: MenuMode,
    pub(crate) style: MenuStyle,
    pub(crate) open_changed: Signal<bool>,
    pub(crate) request_close: Signal<()>,
    pub(crate) parent_item: Option<MenuItemId>,
}

impl Scene {
    /// Creates an empty, open menu.
    pub fn create_menu(&mut self, style: &MenuStyle) -> Result<MenuId, ToolkitError> {
        let box_id = self.create_box(Orientation::Vertical, &style.margin);
        let border = self.create_rectangle(Size::new(0, 0), style.border.color);
        let popup_container = self.create_container();
        let id = self.insert(ElementKind::Menu(MenuData {
            pane: PaneData::new(popup_container),
            box_id,
            border,
            items: Vec::new(),
            highlighted: None,
            mode: MenuMode::Normal,
            style: style.clone(),
            open_changed: Signal::new(),
            request_close: Signal::new(),
            parent_item: None,
        }));
        self.attach_pane_parts(id, Some(box_id.0))?;
        self.container_insert_raw(id, border, false)?;
        self.menu_layout(MenuId(id))?;
        tracing::debug!("Created menu {:?}", id);
        Ok(MenuId(id))
    }

    /// Appends `item` to the menu. Its submenu, if any, becomes a popup of
    /// this menu and takes over the menu's mode. An item that arrives
    /// highlighted becomes the menu's highlighted item.
    ///
    /// # Errors
    ///
    /// [`ToolkitError::ItemAlreadyInMenu`] if the item belongs to a menu.
    pub fn menu_add_item(&mut self, id: MenuId, item: MenuItemId) -> Result<(), ToolkitError> {
        if let Some(menu) = self.menu_item_data(item)?.menu {
            tracing::warn!("Menu item {:?} already belongs to menu {:?}", item, menu);
            return Err(ToolkitError::ItemAlreadyInMenu {
                item: item.0,
                menu: menu.0,
            });
        }
        let (box_id, mode) = {
            let data = self.menu_data(id)?;
            (data.box_id, data.mode)
        };
        self.box_add_element_back(box_id, item)?;
        self.menu_data_mut(id)?.items.push(item);
        self.menu_item_data_mut(item)?.menu = Some(id);

        let submenu = self.menu_item_data(item)?.submenu;
        if let Some(submenu) = submenu {
            self.pane_add_popup(id, submenu)?;
            self.menu_set_mode(submenu, mode)?;
        }

        if self.menu_item_data(item)?.state == MenuItemState::Highlighted {
            let previous = self.menu_data_mut(id)?.highlighted.replace(item);
            if let Some(previous) = previous {
                self.menu_item_apply_highlight(previous, false)?;
            }
            if let Some(submenu) = submenu {
                let anchor = self.submenu_anchor(item)?;
                self.set_position(submenu, anchor)?;
            }
        }
        Ok(())
    }

    /// Removes `item` from the menu without destroying it.
    pub fn menu_remove_item(&mut self, id: MenuId, item: MenuItemId) -> Result<(), ToolkitError> {
        let data = self.menu_data(id)?;
        let index = data
            .items
            .iter()
            .position(|i| *i == item)
            .ok_or(ToolkitError::ItemNotInMenu {
                item: item.0,
                menu: id.0,
            })?;
        let (box_id, highlighted, popup_container) = (data.box_id, data.highlighted, data.pane.popup_container);

        if highlighted == Some(item) {
            self.menu_request_item_highlight(id, None)?;
        }
        self.menu_data_mut(id)?.items.remove(index);
        self.menu_item_data_mut(item)?.menu = None;
        self.box_remove_element(box_id, item)?;

        let submenu = self.menu_item_data(item)?.submenu;
        if let Some(submenu) = submenu {
            if self.node(submenu.0)?.base.parent == Some(popup_container) {
                self.pane_remove_popup(id, submenu)?;
            }
        }
        Ok(())
    }

    /// Items in display order.
    pub fn menu_items(&self, id: MenuId) -> Result<&[MenuItemId], ToolkitError> {
        Ok(&self.menu_data(id)?.items)
    }

    pub fn menu_highlighted_item(&self, id: MenuId) -> Result<Option<MenuItemId>, ToolkitError> {
        Ok(self.menu_data(id)?.highlighted)
    }

    pub fn menu_style(&self, id: MenuId) -> Result<&MenuStyle, ToolkitError> {
        Ok(&self.menu_data(id)?.style)
    }

    /// The item this menu is the submenu of.
    pub fn menu_parent_item(&self, id: MenuId) -> Result<Option<MenuItemId>, ToolkitError> {
        Ok(self.menu_data(id)?.parent_item)
    }

    /// The box holding the items.
    pub fn menu_box(&self, id: MenuId) -> Result<BoxId, ToolkitError> {
        Ok(self.menu_data(id)?.box_id)
    }

    /// Emitted with the new state whenever the menu opens or closes.
    pub fn menu_open_changed(&self, id: MenuId) -> Result<Signal<bool>, ToolkitError> {
        Ok(self.menu_data(id)?.open_changed.clone())
    }

    /// Emitted when the menu asks its owner to close it.
    pub fn menu_request_close(&self, id: MenuId) -> Result<Signal<()>, ToolkitError> {
        Ok(self.menu_data(id)?.request_close.clone())
    }

    /// Highlights `item`, or nothing for `None`, un-highlighting the
    /// previously highlighted item.
    ///
    /// Returns `true` if `item` is now the highlighted item (or `None` was
    /// requested), `false` if `item` is disabled. In the latter case no item
    /// remains highlighted.
    pub fn menu_request_item_highlight(&mut self, id: MenuId, item: Option<MenuItemId>) -> Result<bool, ToolkitError> {
        let data = self.menu_data(id)?;
        let current = data.highlighted;
        if current == item {
            return Ok(true);
        }
        if let Some(item) = item {
            if !data.items.contains(&item) {
                return Err(ToolkitError::ItemNotInMenu {
                    item: item.0,
                    menu: id.0,
                });
            }
        }

        self.menu_data_mut(id)?.highlighted = None;
        if let Some(previous) = current {
            self.menu_item_apply_highlight(previous, false)?;
        }
        let item = match item {
            Some(item) => item,
            None => return Ok(true),
        };
        if self.menu_item_apply_highlight(item, true)? {
            self.menu_data_mut(id)?.highlighted = Some(item);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn menu_is_open(&self, id: MenuId) -> Result<bool, ToolkitError> {
        self.is_visible(id)
    }

    /// Opens or closes the menu.
    ///
    /// Closing un-highlights the highlighted item, which closes any open
    /// submenus below it. `open_changed` is emitted only on change.
    pub fn menu_set_open(&mut self, id: MenuId, open: bool) -> Result<(), ToolkitError> {
        if self.is_visible(id)? == open {
            return Ok(());
        }
        if !open {
            self.menu_request_item_highlight(id, None)?;
        }
        self.set_visible_raw(id.0, open)?;
        let (open_changed, parent_item) = {
            let data = self.menu_data(id)?;
            (data.open_changed.clone(), data.parent_item)
        };
        tracing::debug!("Menu {:?} {}", id, if open { "opened" } else { "closed" });
        open_changed.emit(&open);

        if !open {
            if let Some(parent_item) = parent_item {
                self.menu_item_submenu_closed(parent_item)?;
            }
        }
        Ok(())
    }

    pub fn menu_mode(&self, id: MenuId) -> Result<MenuMode, ToolkitError> {
        Ok(self.menu_data(id)?.mode)
    }

    /// Sets the mode of this menu and of all its submenus.
    pub fn menu_set_mode(&mut self, id: MenuId, mode: MenuMode) -> Result<(), ToolkitError> {
        self.menu_data_mut(id)?.mode = mode;
        let items = self.menu_data(id)?.items.clone();
        for item in items {
            let submenu = self.menu_item_data(item)?.submenu;
            if let Some(submenu) = submenu {
                self.menu_set_mode(submenu, mode)?;
            }
        }
        Ok(())
    }

    pub(crate) fn menu_pointer_button(&mut self, id: MenuId, event: &ButtonEvent) -> Result<bool, ToolkitError> {
        let claimed = self.container_pointer_button(id.0, event)?;
        let data = self.menu_data(id)?;
        if data.mode == MenuMode::RightClick && event.button == BTN_RIGHT && event.kind == ButtonKind::Up {
            let request_close = data.request_close.clone();
            tracing::debug!("Right-click menu {:?} requests close", id);
            request_close.emit(&());
        }
        Ok(claimed)
    }

    /// Places the box inside the border and sizes the border around it.
    pub(crate) fn menu_layout(&mut self, id: MenuId) -> Result<(), ToolkitError> {
        let (box_id, border, border_width) = {
            let data = self.menu_data(id)?;
            (data.box_id, data.border, data.style.border.width)
        };
        if !self.contains(box_id) || !self.contains(border) {
            return Ok(());
        }
        let dims = self.dimensions(box_id)?;
        self.node_mut(box_id.0)?.base.position =
            Point::new(border_width - dims.left(), border_width - dims.top());
        self.rectangle_set_size_raw(
            border,
            Size::new(dims.width() + 2 * border_width, dims.height() + 2 * border_width),
        )?;
        Ok(())
    }

    /// Destroys the items (and with them their submenus), then the menu's
    /// internal parts.
    pub(crate) fn menu_teardown(&mut self, id: MenuId) -> Result<(), ToolkitError> {
        let parent_item = self.menu_data_mut(id)?.parent_item.take();
        if let Some(parent_item) = parent_item {
            if let Ok(data) = self.menu_item_data_mut(parent_item) {
                if data.submenu == Some(id) {
                    data.submenu = None;
                }
            }
        }

        let items = self.menu_data(id)?.items.clone();
        for item in items {
            self.destroy(item)?;
        }

        let (box_id, border, popup_container) = {
            let data = self.menu_data(id)?;
            (data.box_id, data.border, data.pane.popup_container)
        };
        for part in [popup_container, box_id.0, border] {
            self.container_remove_raw(id.0, part)?;
            self.destroy(part)?;
        }
        Ok(())
    }

    pub(crate) fn menu_data(&self, id: MenuId) -> Result<&MenuData, ToolkitError> {
        match &self.node(id.0)?.kind {
            ElementKind::Menu(data) => Ok(data),
            _ => Err(self.wrong_kind(id.0, "menu")),
        }
    }

    pub(crate) fn menu_data_mut(&mut self, id: MenuId) -> Result<&mut MenuData, ToolkitError> {
        if !matches!(self.node(id.0)?.kind, ElementKind::Menu(_)) {
            return Err(self.wrong_kind(id.0, "menu"));
        }
        match &mut self.node_mut(id.0)?.kind {
            ElementKind::Menu(data) => Ok(data),
            _ => Err(ToolkitError::StaleElement(id.0)),
        }
    }

    /// Number of highlighted items; at most one while the menu is consistent.
    pub fn menu_highlighted_count(&self, id: MenuId) -> Result<usize, ToolkitError> {
        let mut count = 0;
        for item in &self.menu_data(id)?.items {
            if self.menu_item_data(*item)?.state == MenuItemState::Highlighted {
                count += 1;
            }
        }
        Ok(count)
    }
}
