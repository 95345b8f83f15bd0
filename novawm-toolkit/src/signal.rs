//! Typed signals with RAII listener handles.
//!
//! A [`Signal`] fans a value out to every connected listener, synchronously
//! and in connection order, before [`Signal::emit`] returns. `connect`
//! returns a [`Listener`]; dropping it disconnects the closure, so a listener
//! can never outlive the object that registered it.
//!
//! Listeners receive the payload only, never the scene. Code that needs to
//! react by mutating the scene records what happened and acts after the
//! emitting call has returned.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Slot<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct SignalInner<T> {
    next_id: u64,
    slots: Vec<(u64, Slot<T>)>,
}

/// A synchronous multi-listener signal.
///
/// Cloning a `Signal` yields another handle to the same listener list.
pub struct Signal<T> {
    inner: Rc<RefCell<SignalInner<T>>>,
}

impl<T: 'static> Signal<T> {
    pub fn new() -> Self {
        Signal {
            inner: Rc::new(RefCell::new(SignalInner {
                next_id: 0,
                slots: Vec::new(),
            })),
        }
    }

    /// Connects `f`. The returned handle disconnects it when dropped.
    #[must_use = "dropping the Listener disconnects it immediately"]
    pub fn connect<F>(&self, f: F) -> Listener
    where
        F: FnMut(&T) + 'static,
    {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.slots.push((id, Rc::new(RefCell::new(f))));
            id
        };
        let weak: Weak<RefCell<SignalInner<T>>> = Rc::downgrade(&self.inner);
        Listener {
            disconnect: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().slots.retain(|(slot_id, _)| *slot_id != id);
                }
            })),
        }
    }

    /// Calls every listener with `value`.
    ///
    /// Listeners connected or disconnected during emission take effect from
    /// the next emission on. A listener that re-emits the same signal from
    /// inside itself is skipped for the nested emission.
    pub fn emit(&self, value: &T) {
        let slots: Vec<Slot<T>> = self
            .inner
            .borrow()
            .slots
            .iter()
            .map(|(_, slot)| Rc::clone(slot))
            .collect();
        for slot in slots {
            match slot.try_borrow_mut() {
                Ok(mut f) => f(value),
                Err(_) => tracing::warn!("Skipping re-entrant signal listener"),
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().slots.len()
    }
}

impl<T: 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Signal {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.inner.borrow().slots.len())
            .finish()
    }
}

/// Connection handle returned by [`Signal::connect`].
pub struct Listener {
    disconnect: Option<Box<dyn FnOnce()>>,
}

impl Listener {
    /// Disconnects now. Equivalent to dropping the handle.
    pub fn disconnect(mut self) {
        if let Some(disconnect) = self.disconnect.take() {
            disconnect();
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Some(disconnect) = self.disconnect.take() {
            disconnect();
        }
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("connected", &self.disconnect.is_some())
            .finish()
    }
}
