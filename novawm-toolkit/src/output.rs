//! Snapshots of the output layout.
//!
//! The compositor backend owns the real output devices. It mirrors their
//! arrangement into an [`OutputLayout`] and calls
//! [`OutputLayout::notify_change`] whenever something changed that the
//! collection itself cannot see, such as a mode switch. Every change is
//! announced on [`OutputLayout::change`] with a snapshot of all outputs.

use crate::signal::Signal;
use novawm_core::types::Rect;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_OUTPUT_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of an output device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutputId(u64);

impl OutputId {
    /// An id that was never handed out before in this process.
    pub fn new_unique() -> Self {
        OutputId(NEXT_OUTPUT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// One output as seen at the time of the last layout change.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    pub id: OutputId,
    pub name: String,
    /// Position and size in layout coordinates.
    pub geometry: Rect<i32>,
    pub scale: f64,
}

impl Output {
    pub fn new(name: impl Into<String>, geometry: Rect<i32>) -> Self {
        Output {
            id: OutputId::new_unique(),
            name: name.into(),
            geometry,
            scale: 1.0,
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

/// The set of outputs currently arranged in the layout.
#[derive(Debug, Default)]
pub struct OutputLayout {
    outputs: BTreeMap<OutputId, Output>,
    change: Signal<Vec<Output>>,
}

impl OutputLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an output and emits `change`.
    pub fn add_output(&mut self, output: Output) -> OutputId {
        let id = output.id;
        tracing::debug!("Output {} ({:?}) added at {:?}", output.name, id, output.geometry);
        self.outputs.insert(id, output);
        self.emit_change();
        id
    }

    /// Removes an output and emits `change`. Returns the removed snapshot.
    pub fn remove_output(&mut self, id: OutputId) -> Option<Output> {
        let removed = self.outputs.remove(&id);
        if let Some(output) = &removed {
            tracing::debug!("Output {} ({:?}) removed", output.name, id);
            self.emit_change();
        }
        removed
    }

    /// Moves or resizes an output and emits `change`. Returns `false` for
    /// unknown ids.
    pub fn update_output(&mut self, id: OutputId, geometry: Rect<i32>) -> bool {
        match self.outputs.get_mut(&id) {
            Some(output) => {
                output.geometry = geometry;
                self.emit_change();
                true
            }
            None => false,
        }
    }

    /// Emits `change` without modifying the layout.
    pub fn notify_change(&self) {
        self.emit_change();
    }

    fn emit_change(&self) {
        let snapshot: Vec<Output> = self.outputs.values().cloned().collect();
        self.change.emit(&snapshot);
    }

    /// Outputs ordered by id.
    pub fn outputs(&self) -> impl Iterator<Item = &Output> {
        self.outputs.values()
    }

    pub fn get(&self, id: OutputId) -> Option<&Output> {
        self.outputs.get(&id)
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Union of all output geometries; empty when there are no outputs.
    pub fn extents(&self) -> Rect<i32> {
        self.outputs
            .values()
            .map(|output| output.geometry)
            .reduce(|acc, geometry| acc.union(&geometry))
            .unwrap_or_default()
    }

    /// Emitted after every change to the layout, with the outputs ordered
    /// by id.
    pub fn change(&self) -> Signal<Vec<Output>> {
        self.change.clone()
    }
}
