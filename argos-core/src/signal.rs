//! Single-threaded signal/slot primitive used by the widget models.
//!
//! Widgets expose their notifications (an entry was activated, the value
//! changed, editing finished) as [`Signal`]s. Editors connect slots to them
//! and must disconnect those slots in `finalize` so that no callback runs
//! against an editor that is being torn down.
//!
//! Emission takes a snapshot of the connected slots before invoking them, so
//! a slot may connect or disconnect (itself included) while the signal is
//! being emitted.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Identifier of a signal-slot connection, returned by [`Signal::connect`].
    pub struct ConnectionId;
}

type Slot<Args> = Rc<dyn Fn(&Args)>;

/// A signal that invokes its connected slots synchronously on emit.
pub struct Signal<Args> {
    slots: RefCell<SlotMap<ConnectionId, Slot<Args>>>,
}

impl<Args> Default for Signal<Args> {
    fn default() -> Self {
        Self {
            slots: RefCell::new(SlotMap::with_key()),
        }
    }
}

impl<Args> fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connection_count())
            .finish()
    }
}

impl<Args> Signal<Args> {
    /// Creates a signal without connections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Connects a slot and returns the id needed to disconnect it.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + 'static,
    {
        self.slots.borrow_mut().insert(Rc::new(slot))
    }

    /// Disconnects a slot. Returns `false` if the id was not connected.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.slots.borrow_mut().remove(id).is_some()
    }

    /// Returns the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.slots.borrow().len()
    }

    /// Invokes every connected slot with `args`.
    pub fn emit(&self, args: &Args) {
        let slots: Vec<Slot<Args>> = self.slots.borrow().values().cloned().collect();
        for slot in slots {
            slot(args);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_emit_reaches_connected_slots() {
        let signal = Signal::<i32>::new();
        let received = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&received);
        let id = signal.connect(move |v| sink.borrow_mut().push(*v));
        signal.emit(&1);
        signal.emit(&2);
        assert_eq!(*received.borrow(), vec![1, 2]);

        assert!(signal.disconnect(id));
        signal.emit(&3);
        assert_eq!(*received.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_double_disconnect_returns_false() {
        let signal = Signal::<()>::new();
        let id = signal.connect(|_| {});
        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_slot_may_disconnect_during_emit() {
        let signal = Rc::new(Signal::<()>::new());
        let id_cell: Rc<Cell<Option<ConnectionId>>> = Rc::new(Cell::new(None));

        let weak = Rc::downgrade(&signal);
        let ids = Rc::clone(&id_cell);
        let id = signal.connect(move |_| {
            if let (Some(signal), Some(id)) = (weak.upgrade(), ids.get()) {
                signal.disconnect(id);
            }
        });
        id_cell.set(Some(id));

        signal.emit(&());
        assert_eq!(signal.connection_count(), 0);
    }
}
