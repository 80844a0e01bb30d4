//! Relinkable market-data handles.
//!
//! A [`Handle`] is a small indirection cell whose target can be swapped at
//! runtime. The cell is shared: cloning a handle aliases the same cell, so
//! every component holding a clone sees a relink immediately. Rebinding a
//! handle triggers the same notification path as mutating the target
//! itself, which is what keeps lazily cached values honest when market
//! data is rebound after construction.
//!
//! Components interested in "this input changed, whatever the reason"
//! subscribe once to the handle's observable id; the handle internally
//! re-subscribes itself to each target's own observable (when the target
//! has one, e.g. a quote) and forwards those notifications.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::observability::{ObservableId, ObserverId, SharedGraph};

struct Target<V> {
    value: Rc<V>,
    observable: Option<ObservableId>,
}

struct HandleCell<V> {
    graph: SharedGraph,
    observable: ObservableId,
    observer: ObserverId,
    target: RefCell<Option<Target<V>>>,
}

impl<V> Drop for HandleCell<V> {
    fn drop(&mut self) {
        let mut graph = self.graph.borrow_mut();
        graph.unregister_observer(self.observer);
        graph.unregister_observable(self.observable);
    }
}

/// Shared relinkable indirection to a market-data object.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::Handle;
/// use pricer_core::observability::NotificationGraph;
/// use std::rc::Rc;
///
/// let graph = NotificationGraph::new_shared();
/// let handle: Handle<f64> = Handle::empty(&graph);
/// assert!(!handle.linked());
///
/// handle.link_to(Rc::new(0.05));
/// assert_eq!(*handle.value().unwrap(), 0.05);
///
/// // Clones alias the same cell.
/// let alias = handle.clone();
/// handle.link_to(Rc::new(0.06));
/// assert_eq!(*alias.value().unwrap(), 0.06);
/// ```
pub struct Handle<V> {
    cell: Rc<HandleCell<V>>,
}

impl<V> Handle<V> {
    /// Creates an empty handle registered with the notification graph.
    pub fn empty(graph: &SharedGraph) -> Self {
        let (observable, observer) = {
            let mut g = graph.borrow_mut();
            let observable = g.register_observable();
            // The handle does not cache anything itself; its observer
            // exists only to forward target notifications onward.
            let observer = g.register_observer(Rc::new(Cell::new(false)));
            g.link(observer, observable);
            (observable, observer)
        };
        Handle {
            cell: Rc::new(HandleCell {
                graph: graph.clone(),
                observable,
                observer,
                target: RefCell::new(None),
            }),
        }
    }

    /// Creates a handle already linked to a passive target (no observable
    /// of its own, e.g. an immutable curve).
    pub fn new(graph: &SharedGraph, value: Rc<V>) -> Self {
        let handle = Self::empty(graph);
        handle.link_to(value);
        handle
    }

    /// Creates a handle linked to an observable target such as a quote;
    /// mutations of the target reach this handle's subscribers.
    pub fn with_observable(graph: &SharedGraph, value: Rc<V>, observable: ObservableId) -> Self {
        let handle = Self::empty(graph);
        handle.link_to_observable(value, observable);
        handle
    }

    /// Rebinds the handle to a passive target and notifies subscribers.
    pub fn link_to(&self, value: Rc<V>) {
        self.relink(Some(Target {
            value,
            observable: None,
        }));
    }

    /// Rebinds the handle to an observable target and notifies subscribers.
    pub fn link_to_observable(&self, value: Rc<V>, observable: ObservableId) {
        self.relink(Some(Target {
            value,
            observable: Some(observable),
        }));
    }

    /// Unlinks the target, leaving the handle empty, and notifies
    /// subscribers.
    pub fn unlink(&self) {
        self.relink(None);
    }

    fn relink(&self, new_target: Option<Target<V>>) {
        let old_observable = self
            .cell
            .target
            .borrow()
            .as_ref()
            .and_then(|t| t.observable);

        let mut graph = self.cell.graph.borrow_mut();
        if let Some(old) = old_observable {
            graph.unsubscribe(old, self.cell.observer);
        }
        if let Some(target) = &new_target {
            if let Some(obs) = target.observable {
                graph.subscribe(obs, self.cell.observer);
            }
        }
        *self.cell.target.borrow_mut() = new_target;
        graph.notify(self.cell.observable);
    }

    /// Returns true if the handle currently has a target.
    pub fn linked(&self) -> bool {
        self.cell.target.borrow().is_some()
    }

    /// Returns the current target, or `None` for an empty handle.
    pub fn value(&self) -> Option<Rc<V>> {
        self.cell.target.borrow().as_ref().map(|t| t.value.clone())
    }

    /// Returns the id components subscribe to in order to hear both
    /// relinks and target mutations.
    pub fn observable_id(&self) -> ObservableId {
        self.cell.observable
    }
}

impl<V> Clone for Handle<V> {
    /// Clones the handle; the clone aliases the same indirection cell.
    fn clone(&self) -> Self {
        Handle {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<V> fmt::Debug for Handle<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("linked", &self.linked())
            .field("observable", &self.cell.observable)
            .finish()
    }
}
