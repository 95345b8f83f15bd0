//! Widget toolkit for the NovaWM compositor.
//!
//! All elements live in a [`Scene`] arena and are addressed by generational
//! ids. Containers, boxes, panes, popups and menus build the element tree;
//! [`Root`] sits on top of it, routes input and handles workspaces and the
//! session lock. [`OutputTracker`] keeps per-output state in sync with the
//! output layout.
//!
//! ```
//! use novawm_core::types::MenuStyle;
//! use novawm_toolkit::{Scene, ToolkitError};
//!
//! fn build() -> Result<(), ToolkitError> {
//!     let mut scene = Scene::default();
//!     let style = MenuStyle::default();
//!     let menu = scene.create_menu(&style)?;
//!     let quit = scene.create_menu_item("Quit", &style.item)?;
//!     scene.menu_add_item(menu, quit)?;
//!     assert_eq!(scene.menu_items(menu)?, &[quit]);
//!     Ok(())
//! }
//! build().unwrap();
//! ```

pub mod boxlayout;
pub mod buffer;
pub mod container;
pub mod element;
pub mod error;
pub mod event;
pub mod menu;
pub mod menu_item;
pub mod output;
pub mod output_tracker;
pub mod pane;
pub mod popup;
pub mod rectangle;
pub mod render;
pub mod root;
pub mod scene;
pub mod signal;
pub mod workspace;

pub use element::{ElementHandler, ElementType};
pub use error::{RenderError, ToolkitError};
pub use event::{
    AxisEvent, AxisSource, ButtonEvent, ButtonKind, ButtonState, KeyState, KeyboardEvent, Modifiers,
    RawButtonEvent, BTN_LEFT, BTN_MIDDLE, BTN_RIGHT,
};
pub use menu::MenuMode;
pub use menu_item::MenuItemState;
pub use output::{Output, OutputId, OutputLayout};
pub use output_tracker::OutputTracker;
pub use render::{MemoryRenderer, MenuItemFace, PixelBuffer, Renderer};
pub use root::{Lock, LockId, Root};
pub use scene::{BoxId, ElementId, MenuId, MenuItemId, PaneId, PopupId, Scene, WorkspaceId};
pub use signal::{Listener, Signal};
