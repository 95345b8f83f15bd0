//! The top of the element tree.
//!
//! [`Root`] owns the [`Scene`] and is the single entry point for input. Its
//! container holds, front to back, the lock element (while one is attached),
//! the curtain and the workspaces. Exactly one workspace is current, or none
//! when there are no workspaces.
//!
//! While the session is locked every input event goes to the lock element
//! and nowhere else. Events are dropped when no lock element is attached,
//! which happens after [`Root::lock_unreference`]: the session then stays
//! locked behind the curtain until a new lock takes over and unlocks.
//!
//! A followed [`OutputLayout`] updates the output tracker as soon as it
//! changes. The new extents reach the scene on the next input event, lock
//! or workspace call, or on [`Root::sync_outputs`].

use crate::error::ToolkitError;
use crate::event::{AxisEvent, ButtonEvent, ButtonKind, ButtonState, KeyboardEvent, RawButtonEvent};
use crate::output::OutputLayout;
use crate::output_tracker::OutputTracker;
use crate::scene::{ElementId, Scene, WorkspaceId};
use crate::signal::{Listener, Signal};
use novawm_core::config::CoreConfig;
use novawm_core::types::{Color, Point, Rect, Size};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_LOCK_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a lock. Only the lock that locked the session can unlock it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockId(u64);

impl LockId {
    pub fn new_unique() -> Self {
        LockId(NEXT_LOCK_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A session lock: an identity plus the element shown while locked.
///
/// The root only references the element. Whoever created the lock destroys
/// the element once it is done with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lock {
    id: LockId,
    element: ElementId,
}

impl Lock {
    pub fn new(element: impl Into<ElementId>) -> Self {
        Lock {
            id: LockId::new_unique(),
            element: element.into(),
        }
    }

    pub fn id(&self) -> LockId {
        self.id
    }

    pub fn element(&self) -> ElementId {
        self.element
    }
}

pub struct Root {
    scene: Scene,
    container: ElementId,
    curtain: ElementId,
    workspaces: Vec<WorkspaceId>,
    current: Option<usize>,
    lock: Option<Lock>,
    locked: bool,
    extents: Rect<i32>,
    outputs: Rc<RefCell<OutputTracker<Rect<i32>>>>,
    outputs_dirty: Rc<Cell<bool>>,
    output_listeners: Vec<Listener>,
    workspace_changed: Signal<Option<WorkspaceId>>,
    unlock_event: Signal<()>,
    window_mapped: Signal<ElementId>,
    window_unmapped: Signal<ElementId>,
    unclaimed_button_event: Signal<ButtonEvent>,
}

impl Root {
    /// Creates a root with no workspaces and a hidden curtain.
    pub fn new(mut scene: Scene, curtain_color: Color) -> Result<Self, ToolkitError> {
        let container = scene.create_container();
        let curtain = scene.create_rectangle(Size::new(0, 0), curtain_color);
        scene.set_visible(curtain, false)?;
        scene.add_element(container, curtain)?;

        let outputs = OutputTracker::new(
            |output| Some(output.geometry),
            |output, geometry| *geometry = output.geometry,
            |_, _| {},
        );
        Ok(Root {
            scene,
            container,
            curtain,
            workspaces: Vec::new(),
            current: None,
            lock: None,
            locked: false,
            extents: Rect::default(),
            outputs: Rc::new(RefCell::new(outputs)),
            outputs_dirty: Rc::new(Cell::new(false)),
            output_listeners: Vec::new(),
            workspace_changed: Signal::new(),
            unlock_event: Signal::new(),
            window_mapped: Signal::new(),
            window_unmapped: Signal::new(),
            unclaimed_button_event: Signal::new(),
        })
    }

    /// Creates a root with the configured curtain colour and workspaces.
    pub fn from_config(scene: Scene, config: &CoreConfig) -> Result<Self, ToolkitError> {
        let mut root = Root::new(scene, config.theme.curtain_color)?;
        for name in &config.workspaces.names {
            root.add_workspace(name)?;
        }
        tracing::info!("Root created with {} workspaces", root.workspaces.len());
        Ok(root)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The root container.
    pub fn container(&self) -> ElementId {
        self.container
    }

    pub fn curtain(&self) -> ElementId {
        self.curtain
    }

    /// Union of all output geometries as of the last output layout change.
    pub fn extents(&self) -> Rect<i32> {
        self.extents
    }

    // Input

    /// Feeds a pointer position in layout coordinates.
    pub fn pointer_motion(&mut self, position: Point<f64>, time_msec: u32) -> Result<bool, ToolkitError> {
        self.sync_outputs()?;
        if !self.locked {
            return self.scene.pointer_motion(self.container, position, time_msec);
        }
        match self.lock_element() {
            Some(element) => {
                let origin = self.scene.position(element)?;
                let local = Point::new(
                    position.x - f64::from(origin.x),
                    position.y - f64::from(origin.y),
                );
                self.scene.pointer_motion(element, local, time_msec)
            }
            None => Ok(false),
        }
    }

    /// Translates and dispatches a raw button event.
    ///
    /// A press is dispatched as `Down`. A release is dispatched as `Up`,
    /// whose result is ignored, and then as `Click`, whose result decides
    /// whether the event was claimed. Unclaimed events are re-emitted on
    /// [`Root::unclaimed_button_event`] unless the session is locked.
    pub fn pointer_button(&mut self, raw: &RawButtonEvent) -> Result<bool, ToolkitError> {
        self.sync_outputs()?;
        let event = match raw.state {
            ButtonState::Pressed => ButtonEvent::new(raw.button, ButtonKind::Down, raw.time_msec),
            ButtonState::Released => {
                let up = ButtonEvent::new(raw.button, ButtonKind::Up, raw.time_msec);
                self.dispatch_button(&up)?;
                ButtonEvent::new(raw.button, ButtonKind::Click, raw.time_msec)
            }
        };
        let claimed = self.dispatch_button(&event)?;
        if !claimed && !self.locked {
            tracing::trace!("Unclaimed button event {:?}", event);
            self.unclaimed_button_event.emit(&event);
        }
        Ok(claimed)
    }

    fn dispatch_button(&mut self, event: &ButtonEvent) -> Result<bool, ToolkitError> {
        match self.input_target() {
            Some(target) => self.scene.pointer_button(target, event),
            None => Ok(false),
        }
    }

    pub fn pointer_axis(&mut self, event: &AxisEvent) -> Result<bool, ToolkitError> {
        self.sync_outputs()?;
        match self.input_target() {
            Some(target) => self.scene.pointer_axis(target, event),
            None => Ok(false),
        }
    }

    pub fn keyboard_event(&mut self, event: &KeyboardEvent) -> Result<bool, ToolkitError> {
        self.sync_outputs()?;
        match self.input_target() {
            Some(target) => self.scene.keyboard_event(target, event),
            None => Ok(false),
        }
    }

    /// Where input goes: the root container, or the lock element while
    /// locked.
    fn input_target(&self) -> Option<ElementId> {
        if self.locked {
            self.lock_element()
        } else {
            Some(self.container)
        }
    }

    fn lock_element(&self) -> Option<ElementId> {
        self.lock
            .map(|lock| lock.element)
            .filter(|element| self.scene.contains(*element))
    }

    // Locking

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// The lock currently referenced, if any.
    pub fn current_lock(&self) -> Option<LockId> {
        self.lock.map(|lock| lock.id)
    }

    /// Locks the session with `lock`.
    ///
    /// Returns `false` if another lock is referenced. Locking again after
    /// [`Root::lock_unreference`] is allowed and attaches the new element.
    ///
    /// # Errors
    ///
    /// [`ToolkitError::AlreadyParented`] if the lock element is placed
    /// elsewhere in the scene.
    pub fn lock(&mut self, lock: &Lock) -> Result<bool, ToolkitError> {
        if let Some(current) = self.lock {
            tracing::warn!("Refusing lock {:?}: session already locked by {:?}", lock.id, current.id);
            return Ok(false);
        }
        self.scene.check_unparented(lock.element)?;
        self.sync_outputs()?;

        if !self.locked {
            if let Some(workspace) = self.current_workspace() {
                self.scene.workspace_set_enabled(workspace, false)?;
            }
            self.place_curtain()?;
            self.scene.set_visible(self.curtain, true)?;
            self.locked = true;
        }
        self.scene.add_element(self.container, lock.element)?;
        self.scene.set_position(lock.element, self.extents.origin)?;
        self.scene.pointer_leave(self.container)?;
        self.lock = Some(*lock);
        tracing::info!("Session locked by {:?}", lock.id);
        Ok(true)
    }

    /// Unlocks the session. Returns `false` unless `lock` is the referenced
    /// lock.
    pub fn unlock(&mut self, lock: &Lock) -> Result<bool, ToolkitError> {
        if !self.detach_lock(lock)? {
            tracing::warn!("Ignoring unlock by {:?}: not the current lock", lock.id);
            return Ok(false);
        }
        self.locked = false;
        self.scene.set_visible(self.curtain, false)?;
        if let Some(workspace) = self.current_workspace() {
            self.scene.workspace_set_enabled(workspace, true)?;
        }
        tracing::info!("Session unlocked by {:?}", lock.id);
        self.unlock_event.emit(&());
        Ok(true)
    }

    /// Drops the reference to `lock` and detaches its element, keeping the
    /// session locked. Returns `false` unless `lock` is the referenced lock.
    pub fn lock_unreference(&mut self, lock: &Lock) -> Result<bool, ToolkitError> {
        let detached = self.detach_lock(lock)?;
        if detached {
            tracing::warn!("Lock {:?} went away; session stays locked", lock.id);
        }
        Ok(detached)
    }

    fn detach_lock(&mut self, lock: &Lock) -> Result<bool, ToolkitError> {
        match self.lock {
            Some(current) if current.id == lock.id => {}
            _ => return Ok(false),
        }
        self.lock = None;
        if self.scene.contains(lock.element) && self.scene.parent(lock.element)? == Some(self.container) {
            // Locked motion bypasses the container's focus tracking.
            self.scene.pointer_leave(lock.element)?;
            self.scene.remove_element(self.container, lock.element)?;
        }
        Ok(true)
    }

    fn place_curtain(&mut self) -> Result<(), ToolkitError> {
        self.scene.rectangle_set_size(self.curtain, self.extents.size)?;
        self.scene.set_position(self.curtain, self.extents.origin)
    }

    // Workspaces

    /// Workspaces in switching order.
    pub fn workspaces(&self) -> &[WorkspaceId] {
        &self.workspaces
    }

    pub fn current_workspace(&self) -> Option<WorkspaceId> {
        self.current.and_then(|index| self.workspaces.get(index).copied())
    }

    /// Appends a workspace covering the current extents. The first workspace
    /// becomes current.
    pub fn add_workspace(&mut self, name: &str) -> Result<WorkspaceId, ToolkitError> {
        self.sync_outputs()?;
        let workspace = self.scene.create_workspace(name);
        self.scene.workspace_set_extents(workspace, self.extents)?;
        self.scene.add_element_back(self.container, workspace)?;
        self.workspaces.push(workspace);

        if self.current.is_none() {
            self.activate(self.workspaces.len() - 1)?;
            self.workspace_changed.emit(&Some(workspace));
        } else {
            self.scene.set_visible(workspace, false)?;
            self.scene.workspace_set_enabled(workspace, false)?;
        }
        Ok(workspace)
    }

    /// Destroys a workspace and its windows. If it was current, the next
    /// workspace becomes current.
    pub fn remove_workspace(&mut self, workspace: WorkspaceId) -> Result<(), ToolkitError> {
        let index = self.workspace_index(workspace)?;
        self.workspaces.remove(index);
        let was_current = self.current == Some(index);
        self.scene.destroy(workspace)?;

        match self.current {
            Some(current) if current > index => self.current = Some(current - 1),
            _ if was_current => {
                self.current = None;
                if self.workspaces.is_empty() {
                    self.workspace_changed.emit(&None);
                } else {
                    let next = index % self.workspaces.len();
                    self.activate(next)?;
                    self.workspace_changed.emit(&self.current_workspace());
                }
            }
            _ => {}
        }
        Ok(())
    }

    pub fn switch_to_workspace(&mut self, workspace: WorkspaceId) -> Result<(), ToolkitError> {
        let index = self.workspace_index(workspace)?;
        self.switch_to_index(index)
    }

    /// Switches to the next workspace, wrapping around after the last one.
    pub fn switch_to_next_workspace(&mut self) -> Result<(), ToolkitError> {
        match self.current {
            Some(current) => self.switch_to_index((current + 1) % self.workspaces.len()),
            None => Ok(()),
        }
    }

    /// Switches to the previous workspace, wrapping around before the first
    /// one.
    pub fn switch_to_previous_workspace(&mut self) -> Result<(), ToolkitError> {
        match self.current {
            Some(current) => {
                let count = self.workspaces.len();
                self.switch_to_index((current + count - 1) % count)
            }
            None => Ok(()),
        }
    }

    fn switch_to_index(&mut self, index: usize) -> Result<(), ToolkitError> {
        if self.current == Some(index) {
            return Ok(());
        }
        if let Some(previous) = self.current_workspace() {
            self.scene.set_visible(previous, false)?;
            self.scene.workspace_set_enabled(previous, false)?;
        }
        self.activate(index)?;
        let current = self.current_workspace();
        tracing::debug!("Switched to workspace {:?}", current);
        self.workspace_changed.emit(&current);
        Ok(())
    }

    /// Shows the workspace at `index` and routes keyboard input to it. It
    /// stays disabled while the session is locked.
    fn activate(&mut self, index: usize) -> Result<(), ToolkitError> {
        let workspace = self.workspaces[index];
        self.current = Some(index);
        self.scene.set_visible(workspace, true)?;
        self.scene.workspace_set_enabled(workspace, !self.locked)?;
        self.scene.set_keyboard_focus(self.container, Some(workspace.element()))
    }

    fn workspace_index(&self, workspace: WorkspaceId) -> Result<usize, ToolkitError> {
        self.workspaces
            .iter()
            .position(|w| *w == workspace)
            .ok_or(ToolkitError::UnknownWorkspace(workspace.element()))
    }

    // Windows

    /// Maps `window` on top of `workspace` and emits `window_mapped`.
    pub fn map_window(&mut self, workspace: WorkspaceId, window: impl Into<ElementId>) -> Result<(), ToolkitError> {
        let window = window.into();
        self.workspace_index(workspace)?;
        self.scene.workspace_map_window(workspace, window)?;
        self.window_mapped.emit(&window);
        Ok(())
    }

    /// Unmaps `window` from whichever workspace holds it and emits
    /// `window_unmapped`. The window stays alive.
    pub fn unmap_window(&mut self, window: impl Into<ElementId>) -> Result<(), ToolkitError> {
        let window = window.into();
        let parent = self.scene.parent(window)?.unwrap_or(window);
        let workspace = self
            .workspaces
            .iter()
            .copied()
            .find(|w| w.element() == parent)
            .ok_or(ToolkitError::UnknownWorkspace(parent))?;
        self.scene.workspace_unmap_window(workspace, window)?;
        self.window_unmapped.emit(&window);
        Ok(())
    }

    // Outputs

    /// Tracks `layout` from now on: syncs with it right away, then runs a
    /// tracker pass on every change it announces. Replaces any layout
    /// followed before.
    pub fn follow_output_layout(&mut self, layout: &OutputLayout) -> Result<(), ToolkitError> {
        self.output_listeners.clear();
        self.handle_output_layout_change(layout)?;
        let dirty = Rc::clone(&self.outputs_dirty);
        self.output_listeners = vec![
            OutputTracker::follow(&self.outputs, layout),
            layout.change().connect(move |_| dirty.set(true)),
        ];
        Ok(())
    }

    /// Applies output changes announced by the followed layout since the
    /// last sync. Returns whether there were any.
    pub fn sync_outputs(&mut self) -> Result<bool, ToolkitError> {
        if !self.outputs_dirty.replace(false) {
            return Ok(false);
        }
        self.apply_output_extents()?;
        Ok(true)
    }

    /// Re-syncs with the output layout and resizes the curtain and the
    /// workspaces to the union of all outputs.
    pub fn handle_output_layout_change(&mut self, layout: &OutputLayout) -> Result<(), ToolkitError> {
        self.outputs.borrow_mut().handle_layout_change(layout)?;
        self.outputs_dirty.set(false);
        self.apply_output_extents()
    }

    /// Number of outputs currently tracked.
    pub fn output_count(&self) -> usize {
        self.outputs.borrow().len()
    }

    fn apply_output_extents(&mut self) -> Result<(), ToolkitError> {
        let extents = self
            .outputs
            .borrow()
            .iter()
            .map(|(_, geometry)| *geometry)
            .reduce(|acc, geometry| acc.union(&geometry))
            .unwrap_or_default();
        if extents == self.extents {
            return Ok(());
        }
        self.extents = extents;
        tracing::debug!("Root extents now {:?}", extents);

        for workspace in self.workspaces.clone() {
            self.scene.workspace_set_extents(workspace, extents)?;
        }
        self.place_curtain()?;
        if let Some(element) = self.lock_element() {
            self.scene.set_position(element, extents.origin)?;
        }
        Ok(())
    }

    // Signals

    /// Emitted with the new current workspace after every switch.
    pub fn workspace_changed(&self) -> Signal<Option<WorkspaceId>> {
        self.workspace_changed.clone()
    }

    pub fn unlock_event(&self) -> Signal<()> {
        self.unlock_event.clone()
    }

    pub fn window_mapped(&self) -> Signal<ElementId> {
        self.window_mapped.clone()
    }

    pub fn window_unmapped(&self) -> Signal<ElementId> {
        self.window_unmapped.clone()
    }

    /// Emitted with the translated event when no element claimed a button.
    pub fn unclaimed_button_event(&self) -> Signal<ButtonEvent> {
        self.unclaimed_button_event.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Output;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn root_with(names: &[&str]) -> Root {
        let mut root = Root::new(Scene::default(), Color::BLACK).unwrap();
        for name in names {
            root.add_workspace(name).unwrap();
        }
        root
    }

    #[test]
    fn test_first_workspace_is_current() {
        let root = root_with(&["one", "two"]);
        let ws = root.workspaces().to_vec();
        assert_eq!(root.current_workspace(), Some(ws[0]));
        assert!(root.scene().is_visible(ws[0]).unwrap());
        assert!(!root.scene().is_visible(ws[1]).unwrap());
        assert!(!root.scene().workspace_is_enabled(ws[1]).unwrap());
    }

    #[test]
    fn test_remove_current_workspace_moves_on() {
        let mut root = root_with(&["one", "two", "three"]);
        let ws = root.workspaces().to_vec();
        root.switch_to_workspace(ws[1]).unwrap();
        root.remove_workspace(ws[1]).unwrap();
        assert_eq!(root.current_workspace(), Some(ws[2]));
        assert!(!root.scene().contains(ws[1]));

        root.remove_workspace(ws[0]).unwrap();
        assert_eq!(root.current_workspace(), Some(ws[2]));
        root.remove_workspace(ws[2]).unwrap();
        assert_eq!(root.current_workspace(), None);
        root.switch_to_next_workspace().unwrap();
    }

    #[test]
    fn test_button_release_is_up_then_click() {
        let mut root = root_with(&["main"]);
        let unclaimed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&unclaimed);
        let _listener = root
            .unclaimed_button_event()
            .connect(move |event: &ButtonEvent| sink.borrow_mut().push(event.kind));

        root.pointer_button(&RawButtonEvent::pressed(crate::event::BTN_LEFT, 0)).unwrap();
        root.pointer_button(&RawButtonEvent::released(crate::event::BTN_LEFT, 1)).unwrap();
        assert_eq!(*unclaimed.borrow(), vec![ButtonKind::Down, ButtonKind::Click]);
    }

    #[test]
    fn test_output_change_resizes_curtain_and_workspaces() {
        let mut root = root_with(&["main"]);
        let mut layout = OutputLayout::new();
        layout.add_output(Output::new("DP-1", Rect::from_coords(0, 0, 800, 600)));
        layout.add_output(Output::new("DP-2", Rect::from_coords(800, 0, 1024, 768)));
        root.handle_output_layout_change(&layout).unwrap();

        let expected = Rect::from_coords(0, 0, 1824, 768);
        assert_eq!(root.extents(), expected);
        let ws = root.workspaces()[0];
        assert_eq!(root.scene().workspace_extents(ws).unwrap(), expected);
        assert_eq!(root.scene().rectangle_size(root.curtain()).unwrap(), Size::new(1824, 768));
    }

    #[test]
    fn test_lock_after_unreference_is_allowed() {
        let mut root = root_with(&["main"]);
        let first_element = root.scene_mut().create_rectangle(Size::new(10, 10), Color::WHITE);
        let first = Lock::new(first_element);
        assert!(root.lock(&first).unwrap());
        assert!(root.lock_unreference(&first).unwrap());
        assert!(root.is_locked());
        assert_eq!(root.scene().parent(first_element).unwrap(), None);

        let second_element = root.scene_mut().create_rectangle(Size::new(10, 10), Color::WHITE);
        let second = Lock::new(second_element);
        assert!(root.lock(&second).unwrap());
        assert!(!root.unlock(&first).unwrap());
        assert!(root.unlock(&second).unwrap());
        assert!(!root.is_locked());
    }

    #[test]
    fn test_unlock_clears_pointer_on_lock_element() {
        let mut root = root_with(&["main"]);
        let element = root.scene_mut().create_rectangle(Size::new(10, 10), Color::WHITE);
        let lock = Lock::new(element);
        root.lock(&lock).unwrap();
        root.pointer_motion(Point::new(5.0, 5.0), 0).unwrap();
        assert!(root.scene().pointer_inside(element).unwrap());

        root.unlock(&lock).unwrap();
        assert!(!root.scene().pointer_inside(element).unwrap());
        assert_eq!(root.scene().pointer_position(element).unwrap(), None);
    }
}
