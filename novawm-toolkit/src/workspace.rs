//! Workspaces: containers of mapped windows.
//!
//! A workspace covers fixed extents regardless of its windows. A disabled
//! workspace ignores all input; the root disables workspaces that are not
//! current and the current one while the session is locked.

use crate::container::ContainerData;
use crate::element::ElementKind;
use crate::error::ToolkitError;
use crate::scene::{ElementId, Scene, WorkspaceId};
use novawm_core::types::Rect;

pub(crate) struct WorkspaceData {
    pub(crate) container: ContainerData,
    pub(crate) name: String,
    pub(crate) enabled: bool,
    pub(crate) extents: Rect<i32>,
}

impl Scene {
    /// Creates an enabled workspace with empty extents.
    pub fn create_workspace(&mut self, name: &str) -> WorkspaceId {
        let id = self.insert(ElementKind::Workspace(WorkspaceData {
            container: ContainerData::default(),
            name: name.to_string(),
            enabled: true,
            extents: Rect::default(),
        }));
        tracing::debug!("Created workspace '{}' ({:?})", name, id);
        WorkspaceId(id)
    }

    pub fn workspace_name(&self, id: WorkspaceId) -> Result<&str, ToolkitError> {
        Ok(&self.workspace_data(id.0)?.name)
    }

    pub fn workspace_is_enabled(&self, id: WorkspaceId) -> Result<bool, ToolkitError> {
        Ok(self.workspace_data(id.0)?.enabled)
    }

    /// Enables or disables input. Disabling ends the pointer focus of the
    /// workspace's windows.
    pub fn workspace_set_enabled(&mut self, id: WorkspaceId, enabled: bool) -> Result<(), ToolkitError> {
        let data = self.workspace_data_mut(id.0)?;
        if data.enabled == enabled {
            return Ok(());
        }
        data.enabled = enabled;
        if !enabled {
            self.pointer_leave(id)?;
        }
        Ok(())
    }

    pub fn workspace_extents(&self, id: WorkspaceId) -> Result<Rect<i32>, ToolkitError> {
        Ok(self.workspace_data(id.0)?.extents)
    }

    pub fn workspace_set_extents(&mut self, id: WorkspaceId, extents: Rect<i32>) -> Result<(), ToolkitError> {
        self.workspace_data_mut(id.0)?.extents = extents;
        let parent = self.node(id.0)?.base.parent;
        if let Some(parent) = parent {
            self.update_layout(parent)?;
        }
        Ok(())
    }

    /// Puts `window` on top of the workspace and gives it keyboard focus.
    pub fn workspace_map_window(&mut self, id: WorkspaceId, window: impl Into<ElementId>) -> Result<(), ToolkitError> {
        let window = window.into();
        self.add_element(id, window)?;
        self.set_keyboard_focus(id, Some(window))?;
        tracing::debug!("Mapped window {:?} on workspace {:?}", window, id);
        Ok(())
    }

    /// Takes `window` off the workspace. Keyboard focus moves to the next
    /// topmost window.
    pub fn workspace_unmap_window(&mut self, id: WorkspaceId, window: impl Into<ElementId>) -> Result<(), ToolkitError> {
        let window = window.into();
        self.remove_element(id, window)?;
        if self.keyboard_focus(id)?.is_none() {
            let next = self.children(id)?.first().copied();
            self.set_keyboard_focus(id, next)?;
        }
        tracing::debug!("Unmapped window {:?} from workspace {:?}", window, id);
        Ok(())
    }

    /// Windows, topmost first.
    pub fn workspace_windows(&self, id: WorkspaceId) -> Result<&[ElementId], ToolkitError> {
        self.children(id)
    }

    /// Destroys the windows still mapped.
    pub(crate) fn workspace_teardown(&mut self, id: WorkspaceId) -> Result<(), ToolkitError> {
        let windows = self.workspace_data(id.0)?.container.children.clone();
        for window in windows {
            self.destroy(window)?;
        }
        Ok(())
    }

    pub(crate) fn workspace_data(&self, id: ElementId) -> Result<&WorkspaceData, ToolkitError> {
        match &self.node(id)?.kind {
            ElementKind::Workspace(data) => Ok(data),
            _ => Err(self.wrong_kind(id, "workspace")),
        }
    }

    fn workspace_data_mut(&mut self, id: ElementId) -> Result<&mut WorkspaceData, ToolkitError> {
        if !matches!(self.node(id)?.kind, ElementKind::Workspace(_)) {
            return Err(self.wrong_kind(id, "workspace"));
        }
        match &mut self.node_mut(id)?.kind {
            ElementKind::Workspace(data) => Ok(data),
            _ => Err(ToolkitError::StaleElement(id)),
        }
    }
}
