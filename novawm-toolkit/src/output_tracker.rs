//! Keeps one caller-defined object per output in sync with an
//! [`OutputLayout`].
//!
//! Every call to [`OutputTracker::handle_layout_change`] is one diffing pass:
//! outputs new to the layout are created, outputs still present are updated
//! and outputs gone from the layout are destroyed, each exactly once. A pass
//! whose create callback fails is rolled back, so the tracked set always
//! matches the layout of the last successful pass.
//!
//! [`OutputTracker::follow`] runs a pass on every change the layout
//! announces, for a tracker shared behind `Rc<RefCell<_>>`.

use crate::error::ToolkitError;
use crate::output::{Output, OutputId, OutputLayout};
use crate::signal::Listener;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

type CreateFn<T> = Box<dyn FnMut(&Output) -> Option<T>>;
type UpdateFn<T> = Box<dyn FnMut(&Output, &mut T)>;
type DestroyFn<T> = Box<dyn FnMut(&Output, T)>;

struct Tracked<T> {
    output: Output,
    handle: T,
}

pub struct OutputTracker<T> {
    tracked: BTreeMap<OutputId, Tracked<T>>,
    create_fn: CreateFn<T>,
    update_fn: UpdateFn<T>,
    destroy_fn: DestroyFn<T>,
}

impl<T> OutputTracker<T> {
    /// Creates a tracker with nothing tracked yet.
    ///
    /// `create` returns `None` when it cannot set up an output; that aborts
    /// the pass.
    pub fn new(
        create: impl FnMut(&Output) -> Option<T> + 'static,
        update: impl FnMut(&Output, &mut T) + 'static,
        destroy: impl FnMut(&Output, T) + 'static,
    ) -> Self {
        OutputTracker {
            tracked: BTreeMap::new(),
            create_fn: Box::new(create),
            update_fn: Box::new(update),
            destroy_fn: Box::new(destroy),
        }
    }

    /// Creates a tracker and runs a first pass over `layout`.
    pub fn with_layout(
        layout: &OutputLayout,
        create: impl FnMut(&Output) -> Option<T> + 'static,
        update: impl FnMut(&Output, &mut T) + 'static,
        destroy: impl FnMut(&Output, T) + 'static,
    ) -> Result<Self, ToolkitError> {
        let mut tracker = Self::new(create, update, destroy);
        tracker.handle_layout_change(layout)?;
        Ok(tracker)
    }

    /// Runs one diffing pass against `layout`.
    ///
    /// # Errors
    ///
    /// [`ToolkitError::OutputCreate`] if the create callback fails. Outputs
    /// created earlier in the same pass are destroyed again and the outputs
    /// that were tracked before stay tracked.
    pub fn handle_layout_change(&mut self, layout: &OutputLayout) -> Result<(), ToolkitError> {
        let outputs: Vec<Output> = layout.outputs().cloned().collect();
        self.handle_outputs(&outputs)
    }

    /// Runs one diffing pass against a snapshot of the layout's outputs.
    pub fn handle_outputs(&mut self, outputs: &[Output]) -> Result<(), ToolkitError> {
        let mut former = std::mem::take(&mut self.tracked);
        let mut current = BTreeMap::new();
        let mut created = Vec::new();

        for output in outputs {
            match former.remove(&output.id) {
                Some(mut tracked) => {
                    tracked.output = output.clone();
                    (self.update_fn)(&tracked.output, &mut tracked.handle);
                    current.insert(output.id, tracked);
                }
                None => match (self.create_fn)(output) {
                    Some(handle) => {
                        tracing::debug!("Tracking output {} ({:?})", output.name, output.id);
                        created.push(output.id);
                        current.insert(
                            output.id,
                            Tracked {
                                output: output.clone(),
                                handle,
                            },
                        );
                    }
                    None => {
                        tracing::error!("Failed to create state for output {} ({:?})", output.name, output.id);
                        for (id, tracked) in current {
                            if created.contains(&id) {
                                (self.destroy_fn)(&tracked.output, tracked.handle);
                            } else {
                                former.insert(id, tracked);
                            }
                        }
                        self.tracked = former;
                        return Err(ToolkitError::OutputCreate(output.id));
                    }
                },
            }
        }

        for (id, tracked) in former {
            tracing::debug!("Output {} ({:?}) is gone", tracked.output.name, id);
            (self.destroy_fn)(&tracked.output, tracked.handle);
        }
        self.tracked = current;
        Ok(())
    }

    pub fn get(&self, id: OutputId) -> Option<&T> {
        self.tracked.get(&id).map(|tracked| &tracked.handle)
    }

    pub fn get_mut(&mut self, id: OutputId) -> Option<&mut T> {
        self.tracked.get_mut(&id).map(|tracked| &mut tracked.handle)
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    /// Tracked output ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = OutputId> + '_ {
        self.tracked.keys().copied()
    }

    /// Tracked outputs, as of the last pass, with their objects.
    pub fn iter(&self) -> impl Iterator<Item = (&Output, &T)> {
        self.tracked.values().map(|tracked| (&tracked.output, &tracked.handle))
    }
}

impl<T: 'static> OutputTracker<T> {
    /// Runs a pass on `tracker` for every change of `layout` until the
    /// returned listener is dropped. Failed passes are logged and rolled
    /// back as usual.
    pub fn follow(tracker: &Rc<RefCell<Self>>, layout: &OutputLayout) -> Listener {
        let tracker = Rc::downgrade(tracker);
        layout.change().connect(move |outputs: &Vec<Output>| {
            let tracker = match tracker.upgrade() {
                Some(tracker) => tracker,
                None => return,
            };
            let result = match tracker.try_borrow_mut() {
                Ok(mut tracker) => tracker.handle_outputs(outputs),
                Err(_) => {
                    tracing::warn!("Output tracker is busy; skipping layout change");
                    return;
                }
            };
            if let Err(e) = result {
                tracing::error!("Output layout pass failed: {}", e);
            }
        })
    }
}

impl<T> Drop for OutputTracker<T> {
    fn drop(&mut self) {
        for (_, tracked) in std::mem::take(&mut self.tracked) {
            (self.destroy_fn)(&tracked.output, tracked.handle);
        }
    }
}

impl<T> fmt::Debug for OutputTracker<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputTracker")
            .field("outputs", &self.tracked.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use novawm_core::types::Rect;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default, Clone, Copy, PartialEq)]
    struct Counts {
        create: usize,
        update: usize,
        destroy: usize,
    }

    fn counting_tracker(counts: &Rc<RefCell<Counts>>) -> OutputTracker<String> {
        let (c, u, d) = (Rc::clone(counts), Rc::clone(counts), Rc::clone(counts));
        OutputTracker::new(
            move |output| {
                c.borrow_mut().create += 1;
                Some(output.name.clone())
            },
            move |_, _| u.borrow_mut().update += 1,
            move |_, _| d.borrow_mut().destroy += 1,
        )
    }

    fn output(name: &str, x: i32) -> Output {
        Output::new(name, Rect::from_coords(x, 0, 100, 100))
    }

    #[test]
    fn test_callback_counts_across_passes() {
        let counts = Rc::new(RefCell::new(Counts::default()));
        let mut layout = OutputLayout::new();
        let mut tracker = counting_tracker(&counts);

        let first = layout.add_output(output("A", 0));
        layout.add_output(output("B", 100));
        tracker.handle_layout_change(&layout).unwrap();
        assert_eq!(*counts.borrow(), Counts { create: 2, update: 0, destroy: 0 });

        layout.add_output(output("C", 200));
        tracker.handle_layout_change(&layout).unwrap();
        assert_eq!(*counts.borrow(), Counts { create: 3, update: 2, destroy: 0 });

        tracker.handle_layout_change(&layout).unwrap();
        assert_eq!(*counts.borrow(), Counts { create: 3, update: 5, destroy: 0 });

        layout.remove_output(first);
        tracker.handle_layout_change(&layout).unwrap();
        assert_eq!(*counts.borrow(), Counts { create: 3, update: 7, destroy: 1 });
        assert_eq!(tracker.ids().collect::<Vec<_>>(), layout.outputs().map(|o| o.id).collect::<Vec<_>>());

        drop(tracker);
        assert_eq!(counts.borrow().destroy, 3);
    }

    #[test]
    fn test_failed_create_rolls_back() {
        let destroyed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&destroyed);
        let mut layout = OutputLayout::new();
        let kept = layout.add_output(output("kept", 0));

        let mut tracker = OutputTracker::new(
            |output: &Output| (output.name != "broken").then(|| output.name.clone()),
            |_, _| {},
            move |output, _| sink.borrow_mut().push(output.name.clone()),
        );
        tracker.handle_layout_change(&layout).unwrap();

        layout.add_output(output("fresh", 100));
        let broken = layout.add_output(output("broken", 200));
        let result = tracker.handle_layout_change(&layout);

        assert!(matches!(result, Err(ToolkitError::OutputCreate(id)) if id == broken));
        assert_eq!(tracker.ids().collect::<Vec<_>>(), vec![kept]);
        assert_eq!(*destroyed.borrow(), vec!["fresh".to_string()]);
        assert_eq!(tracker.get(kept).map(String::as_str), Some("kept"));
    }

    #[test]
    fn test_follow_runs_a_pass_per_change() {
        let counts = Rc::new(RefCell::new(Counts::default()));
        let mut layout = OutputLayout::new();
        let tracker = Rc::new(RefCell::new(counting_tracker(&counts)));
        let listener = OutputTracker::follow(&tracker, &layout);

        let first = layout.add_output(output("A", 0));
        assert_eq!(*counts.borrow(), Counts { create: 1, update: 0, destroy: 0 });
        let second = layout.add_output(output("B", 100));
        assert_eq!(*counts.borrow(), Counts { create: 2, update: 1, destroy: 0 });
        layout.remove_output(first);
        assert_eq!(*counts.borrow(), Counts { create: 2, update: 2, destroy: 1 });
        assert_eq!(tracker.borrow().ids().collect::<Vec<_>>(), vec![second]);

        drop(listener);
        layout.add_output(output("C", 200));
        assert_eq!(tracker.borrow().len(), 1);
    }
}
