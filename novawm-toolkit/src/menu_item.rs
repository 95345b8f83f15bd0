//! Menu items and their highlight state machine.
//!
//! An item is `Enabled`, `Highlighted` or `Disabled`. A disabled item never
//! becomes highlighted. While an item sits in a menu, highlight changes go
//! through the menu so that at most one item is highlighted at a time.
//!
//! Each item pre-renders one buffer per state whenever its text or style
//! changes; a state change only swaps the displayed buffer.
//!
//! An item may own a submenu. The submenu is shown as a popup of the item's
//! menu, anchored at the item's top-right corner, for as long as the item is
//! highlighted.

use crate::element::ElementKind;
use crate::error::{RenderError, ToolkitError};
use crate::event::{ButtonEvent, ButtonKind, BTN_LEFT, BTN_RIGHT};
use crate::menu::MenuMode;
use crate::render::{MenuItemFace, PixelBuffer, Renderer};
use crate::scene::{MenuId, MenuItemId, Scene};
use crate::signal::Signal;
use novawm_core::types::{MenuItemStyle, Point, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuItemState {
    #[default]
    Enabled,
    Highlighted,
    Disabled,
}

#[derive(Debug, Clone)]
struct ItemBuffers {
    enabled: PixelBuffer,
    highlighted: PixelBuffer,
    disabled: PixelBuffer,
}

impl ItemBuffers {
    fn render(renderer: &dyn Renderer, text: &str, style: &MenuItemStyle) -> Result<Self, RenderError> {
        let size = Size::new(style.width, style.height);
        let face = |fill, text_color| MenuItemFace {
            fill,
            text,
            font: &style.font,
            text_color,
            bezel_width: style.bezel_width,
        };
        Ok(ItemBuffers {
            enabled: renderer.render_menu_item(size, &face(&style.fill, style.enabled_text_color))?,
            highlighted: renderer
                .render_menu_item(size, &face(&style.highlighted_fill, style.highlighted_text_color))?,
            disabled: renderer.render_menu_item(size, &face(&style.fill, style.disabled_text_color))?,
        })
    }

    fn for_state(&self, state: MenuItemState) -> &PixelBuffer {
        match state {
            MenuItemState::Enabled => &self.enabled,
            MenuItemState::Highlighted => &self.highlighted,
            MenuItemState::Disabled => &self.disabled,
        }
    }
}

pub(crate) struct MenuItemData {
    pub(crate) menu: Option<MenuId>,
    pub(crate) submenu: Option<MenuId>,
    pub(crate) state: MenuItemState,
    pub(crate) text: String,
    pub(crate) style: MenuItemStyle,
    buffers: ItemBuffers,
    triggered: Signal<MenuItemId>,
    destroyed: Signal<MenuItemId>,
}

impl Scene {
    /// Creates a menu item and renders its three faces.
    ///
    /// # Errors
    ///
    /// [`ToolkitError::Render`] if the renderer fails; nothing is added to
    /// the scene in that case.
    pub fn create_menu_item(&mut self, text: &str, style: &MenuItemStyle) -> Result<MenuItemId, ToolkitError> {
        let renderer = self.renderer();
        let buffers = ItemBuffers::render(renderer.as_ref(), text, style).map_err(|e| {
            tracing::error!("Failed to render menu item '{}': {}", text, e);
            e
        })?;
        let id = self.insert(ElementKind::MenuItem(MenuItemData {
            menu: None,
            submenu: None,
            state: MenuItemState::Enabled,
            text: text.to_string(),
            style: style.clone(),
            buffers,
            triggered: Signal::new(),
            destroyed: Signal::new(),
        }));
        Ok(MenuItemId(id))
    }

    pub fn menu_item_state(&self, id: MenuItemId) -> Result<MenuItemState, ToolkitError> {
        Ok(self.menu_item_data(id)?.state)
    }

    pub fn menu_item_text(&self, id: MenuItemId) -> Result<&str, ToolkitError> {
        Ok(&self.menu_item_data(id)?.text)
    }

    pub fn menu_item_style(&self, id: MenuItemId) -> Result<&MenuItemStyle, ToolkitError> {
        Ok(&self.menu_item_data(id)?.style)
    }

    /// The menu holding this item, if any.
    pub fn menu_item_menu(&self, id: MenuItemId) -> Result<Option<MenuId>, ToolkitError> {
        Ok(self.menu_item_data(id)?.menu)
    }

    pub fn menu_item_submenu(&self, id: MenuItemId) -> Result<Option<MenuId>, ToolkitError> {
        Ok(self.menu_item_data(id)?.submenu)
    }

    /// The buffer matching the item's current state.
    pub fn menu_item_buffer(&self, id: MenuItemId) -> Result<PixelBuffer, ToolkitError> {
        let data = self.menu_item_data(id)?;
        Ok(data.buffers.for_state(data.state).clone())
    }

    /// Emitted with the item id when the item is activated.
    pub fn menu_item_triggered(&self, id: MenuItemId) -> Result<Signal<MenuItemId>, ToolkitError> {
        Ok(self.menu_item_data(id)?.triggered.clone())
    }

    /// Emitted with the item id right before the item is destroyed.
    pub fn menu_item_destroyed(&self, id: MenuItemId) -> Result<Signal<MenuItemId>, ToolkitError> {
        Ok(self.menu_item_data(id)?.destroyed.clone())
    }

    /// Replaces the text and re-renders. On render failure the item keeps
    /// its previous text and buffers.
    pub fn menu_item_set_text(&mut self, id: MenuItemId, text: &str) -> Result<(), ToolkitError> {
        let style = self.menu_item_data(id)?.style.clone();
        self.menu_item_redraw(id, text, &style)
    }

    /// Replaces the style and re-renders, relayouting the ancestors since the
    /// item size may change.
    pub fn menu_item_set_style(&mut self, id: MenuItemId, style: &MenuItemStyle) -> Result<(), ToolkitError> {
        let text = self.menu_item_data(id)?.text.clone();
        self.menu_item_redraw(id, &text, style)?;
        let parent = self.node(id.0)?.base.parent;
        if let Some(parent) = parent {
            self.update_layout(parent)?;
        }
        Ok(())
    }

    fn menu_item_redraw(&mut self, id: MenuItemId, text: &str, style: &MenuItemStyle) -> Result<(), ToolkitError> {
        let renderer = self.renderer();
        let buffers = ItemBuffers::render(renderer.as_ref(), text, style)?;
        let data = self.menu_item_data_mut(id)?;
        data.text = text.to_string();
        data.style = style.clone();
        data.buffers = buffers;
        Ok(())
    }

    /// Enables or disables the item.
    ///
    /// Disabling un-highlights the item first. Enabling an item that has the
    /// pointer inside highlights it right away.
    pub fn menu_item_set_enabled(&mut self, id: MenuItemId, enabled: bool) -> Result<(), ToolkitError> {
        let state = self.menu_item_data(id)?.state;
        if enabled {
            if state != MenuItemState::Disabled {
                return Ok(());
            }
            self.menu_item_data_mut(id)?.state = MenuItemState::Enabled;
            tracing::debug!("Menu item {:?} enabled", id);
            if self.node(id.0)?.base.pointer_inside {
                self.menu_item_set_highlighted(id, true)?;
            }
        } else {
            if state == MenuItemState::Disabled {
                return Ok(());
            }
            if state == MenuItemState::Highlighted {
                self.menu_item_set_highlighted(id, false)?;
            }
            self.menu_item_data_mut(id)?.state = MenuItemState::Disabled;
            tracing::debug!("Menu item {:?} disabled", id);
        }
        Ok(())
    }

    /// Requests a highlight change.
    ///
    /// Items in a menu go through the menu's arbitration, so highlighting one
    /// item un-highlights the previous one. Returns `false` if the item is
    /// disabled.
    pub fn menu_item_set_highlighted(&mut self, id: MenuItemId, highlighted: bool) -> Result<bool, ToolkitError> {
        let data = self.menu_item_data(id)?;
        match (data.menu, highlighted) {
            (Some(menu), true) => self.menu_request_item_highlight(menu, Some(id)),
            (Some(menu), false) => {
                if self.menu_data(menu)?.highlighted == Some(id) {
                    self.menu_request_item_highlight(menu, None)
                } else {
                    self.menu_item_apply_highlight(id, false)
                }
            }
            (None, _) => self.menu_item_apply_highlight(id, highlighted),
        }
    }

    /// Applies a highlight change to the item alone and opens or closes its
    /// submenu to match.
    pub(crate) fn menu_item_apply_highlight(&mut self, id: MenuItemId, highlighted: bool) -> Result<bool, ToolkitError> {
        let data = self.menu_item_data_mut(id)?;
        if data.state == MenuItemState::Disabled {
            tracing::debug!("Menu item {:?} is disabled and cannot be highlighted", id);
            return Ok(false);
        }
        let state = if highlighted {
            MenuItemState::Highlighted
        } else {
            MenuItemState::Enabled
        };
        if data.state == state {
            return Ok(true);
        }
        data.state = state;
        let submenu = data.submenu;
        tracing::debug!("Menu item {:?} is now {:?}", id, state);

        if let Some(submenu) = submenu {
            if highlighted {
                let anchor = self.submenu_anchor(id)?;
                self.set_position(submenu, anchor)?;
                self.menu_set_open(submenu, true)?;
            } else {
                self.menu_set_open(submenu, false)?;
            }
        }
        Ok(true)
    }

    /// Top-right corner of the item, in its menu's coordinates.
    pub(crate) fn submenu_anchor(&self, id: MenuItemId) -> Result<Point<i32>, ToolkitError> {
        let dims = self.dimensions(id)?;
        let origin = match self.menu_item_data(id)?.menu {
            Some(menu) => self.position_in(id, menu)?,
            None => Point::new(0, 0),
        };
        Ok(Point::new(origin.x + dims.right(), origin.y + dims.top()))
    }

    /// Attaches `submenu` to the item, destroying any previous submenu.
    /// `None` just destroys the current one.
    ///
    /// # Errors
    ///
    /// [`ToolkitError::SubmenuAlreadyAttached`] if `submenu` belongs to
    /// another item, [`ToolkitError::AlreadyParented`] if it is placed
    /// somewhere in the scene.
    pub fn menu_item_set_submenu(&mut self, id: MenuItemId, submenu: Option<MenuId>) -> Result<(), ToolkitError> {
        let current = self.menu_item_data(id)?.submenu;
        if current.is_some() && current == submenu {
            return Ok(());
        }
        if let Some(submenu) = submenu {
            if let Some(owner) = self.menu_data(submenu)?.parent_item {
                return Err(ToolkitError::SubmenuAlreadyAttached {
                    menu: submenu.0,
                    item: owner.0,
                });
            }
            self.check_unparented(submenu.0)?;
        }

        if let Some(old) = current {
            self.menu_item_data_mut(id)?.submenu = None;
            self.menu_data_mut(old)?.parent_item = None;
            self.destroy(old)?;
        }

        let submenu = match submenu {
            Some(submenu) => submenu,
            None => return Ok(()),
        };
        self.menu_set_open(submenu, false)?;
        self.menu_data_mut(submenu)?.parent_item = Some(id);
        let data = self.menu_item_data_mut(id)?;
        data.submenu = Some(submenu);
        let (menu, state) = (data.menu, data.state);
        if let Some(menu) = menu {
            self.pane_add_popup(menu, submenu)?;
            let mode = self.menu_data(menu)?.mode;
            self.menu_set_mode(submenu, mode)?;
        }
        if state == MenuItemState::Highlighted {
            let anchor = self.submenu_anchor(id)?;
            self.set_position(submenu, anchor)?;
            self.menu_set_open(submenu, true)?;
        }
        Ok(())
    }

    pub(crate) fn menu_item_pointer_enter(&mut self, id: MenuItemId) -> Result<(), ToolkitError> {
        if self.menu_item_data(id)?.state != MenuItemState::Disabled {
            self.menu_item_set_highlighted(id, true)?;
        }
        Ok(())
    }

    /// Un-highlights on leave, except while the item's submenu is open so the
    /// pointer can travel into the submenu.
    pub(crate) fn menu_item_pointer_leave(&mut self, id: MenuItemId) -> Result<(), ToolkitError> {
        let data = self.menu_item_data(id)?;
        let (state, menu, submenu) = (data.state, data.menu, data.submenu);
        let enabled = state != MenuItemState::Disabled;
        let submenu_open = match submenu {
            Some(submenu) => self.menu_is_open(submenu)?,
            None => false,
        };
        if enabled && state == MenuItemState::Highlighted && menu.is_some() && (submenu.is_none() || !submenu_open) {
            if let Some(menu) = menu {
                self.menu_request_item_highlight(menu, None)?;
            }
        }
        Ok(())
    }

    /// The item's submenu was closed.
    pub(crate) fn menu_item_submenu_closed(&mut self, id: MenuItemId) -> Result<(), ToolkitError> {
        let data = self.menu_item_data(id)?;
        let (state, menu) = (data.state, data.menu);
        if state != MenuItemState::Highlighted || self.node(id.0)?.base.pointer_inside {
            return Ok(());
        }
        if let Some(menu) = menu {
            self.menu_request_item_highlight(menu, None)?;
        }
        Ok(())
    }

    /// Normal mode triggers on a left click; right-click mode on a right
    /// button release. Any button event with the pointer inside is claimed.
    pub(crate) fn menu_item_pointer_button(&mut self, id: MenuItemId, event: &ButtonEvent) -> Result<bool, ToolkitError> {
        if !self.node(id.0)?.base.pointer_inside {
            return Ok(false);
        }
        let data = self.menu_item_data(id)?;
        let mode = match data.menu {
            Some(menu) => self.menu_data(menu)?.mode,
            None => MenuMode::Normal,
        };
        let enabled = data.state != MenuItemState::Disabled;
        let triggers = enabled
            && match mode {
                MenuMode::Normal => event.button == BTN_LEFT && event.kind == ButtonKind::Click,
                MenuMode::RightClick => event.button == BTN_RIGHT && event.kind == ButtonKind::Up,
            };
        if triggers {
            let triggered = data.triggered.clone();
            tracing::debug!("Menu item {:?} ('{}') triggered", id, data.text);
            triggered.emit(&id);
        }
        Ok(true)
    }

    pub(crate) fn menu_item_teardown(&mut self, id: MenuItemId) -> Result<(), ToolkitError> {
        let destroyed = self.menu_item_data(id)?.destroyed.clone();
        destroyed.emit(&id);

        let menu = self.menu_item_data(id)?.menu;
        if let Some(menu) = menu {
            self.menu_remove_item(menu, id)?;
        }
        let submenu = self.menu_item_data_mut(id)?.submenu.take();
        if let Some(submenu) = submenu {
            self.menu_data_mut(submenu)?.parent_item = None;
            self.destroy(submenu)?;
        }
        Ok(())
    }

    pub(crate) fn menu_item_data(&self, id: MenuItemId) -> Result<&MenuItemData, ToolkitError> {
        match &self.node(id.0)?.kind {
            ElementKind::MenuItem(data) => Ok(data),
            _ => Err(self.wrong_kind(id.0, "menu item")),
        }
    }

    pub(crate) fn menu_item_data_mut(&mut self, id: MenuItemId) -> Result<&mut MenuItemData, ToolkitError> {
        if !matches!(self.node(id.0)?.kind, ElementKind::MenuItem(_)) {
            return Err(self.wrong_kind(id.0, "menu item"));
        }
        match &mut self.node_mut(id.0)?.kind {
            ElementKind::MenuItem(data) => Ok(data),
            _ => Err(ToolkitError::StaleElement(id.0)),
        }
    }
}
