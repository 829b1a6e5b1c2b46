//! Subscriber registry and selector handles.
//!
//! Listeners are kept in subscription order and invoked synchronously after
//! every snapshot replacement. Handles unsubscribe on drop.

use super::Snapshot;
use std::cell::{Cell, Ref, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

pub(crate) type Listener = Box<dyn FnMut(&Snapshot)>;

struct Entry {
    active: Rc<Cell<bool>>,
    listener: Listener,
}

/// Ordered set of listeners owned by a store.
///
#[derive(Default)]
pub(crate) struct Registry {
    next_id: u64,
    entries: BTreeMap<u64, Entry>,
}

impl Registry {
    /// Register a listener, returning its id and its liveness flag.
    ///
    fn add(&mut self, listener: Listener) -> (u64, Rc<Cell<bool>>) {
        let id = self.next_id;
        self.next_id += 1;
        let active = Rc::new(Cell::new(true));
        self.entries.insert(
            id,
            Entry {
                active: Rc::clone(&active),
                listener,
            },
        );
        (id, active)
    }

    /// Number of listeners still subscribed.
    ///
    pub(crate) fn active_count(&self) -> usize {
        self.entries.values().filter(|e| e.active.get()).count()
    }
}

/// Register a listener on the shared registry and hand back its handle.
///
pub(crate) fn subscribe(registry: &Rc<RefCell<Registry>>, listener: Listener) -> Subscription {
    let (id, active) = registry.borrow_mut().add(listener);
    Subscription {
        id,
        active,
        registry: Rc::downgrade(registry),
    }
}

/// Deliver a snapshot to every active listener in subscription order.
///
pub(crate) fn notify(registry: &RefCell<Registry>, snapshot: &Snapshot) {
    let mut registry = registry.borrow_mut();
    registry.entries.retain(|_, entry| entry.active.get());
    for entry in registry.entries.values_mut() {
        // A listener may have been cancelled earlier in this round
        if entry.active.get() {
            (entry.listener)(snapshot);
        }
    }
}

/// Handle to a registered listener.
///
pub struct Subscription {
    id: u64,
    active: Rc<Cell<bool>>,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Stop receiving notifications. Safe to call any number of times.
    ///
    pub fn unsubscribe(&self) {
        if !self.active.replace(false) {
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            // While a notification round holds the registry the flag alone
            // suppresses delivery and the entry is pruned on the next round.
            if let Ok(mut registry) = registry.try_borrow_mut() {
                registry.entries.remove(&self.id);
            }
        }
    }

    /// Whether the listener still receives notifications.
    ///
    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

/// Live projection of the store state.
///
/// The held value is recomputed on every store notification and replaced
/// only when it differs from the previous one, in which case `revision`
/// is incremented.
pub struct Selected<T> {
    value: Rc<RefCell<T>>,
    revision: Rc<Cell<u64>>,
    subscription: Subscription,
}

impl<T: PartialEq + 'static> Selected<T> {
    pub(crate) fn new<F>(registry: &Rc<RefCell<Registry>>, snapshot: &Snapshot, selector: F) -> Self
    where
        F: Fn(&Snapshot) -> T + 'static,
    {
        let value = Rc::new(RefCell::new(selector(snapshot)));
        let revision = Rc::new(Cell::new(0));
        let held = Rc::clone(&value);
        let counter = Rc::clone(&revision);
        let subscription = subscribe(
            registry,
            Box::new(move |snapshot: &Snapshot| {
                let next = selector(snapshot);
                let mut current = held.borrow_mut();
                if *current != next {
                    *current = next;
                    counter.set(counter.get() + 1);
                }
            }),
        );
        Selected {
            value,
            revision,
            subscription,
        }
    }
}

impl<T> Selected<T> {
    /// Borrow the current projected value.
    ///
    /// The borrow must be released before the store is mutated again.
    pub fn get(&self) -> Ref<'_, T> {
        self.value.borrow()
    }

    /// Number of times the projected value has changed.
    ///
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    pub fn unsubscribe(&self) {
        self.subscription.unsubscribe();
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_active()
    }
}

impl<T: Clone> Selected<T> {
    /// Return a copy of the current projected value.
    ///
    pub fn cloned(&self) -> T {
        self.value.borrow().clone()
    }
}
