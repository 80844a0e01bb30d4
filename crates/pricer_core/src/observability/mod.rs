//! Notification graph for dependency-driven cache invalidation.
//!
//! Market-data objects are *observables*; components that cache values
//! derived from them are *observers*. When an observable changes, every
//! subscribed observer has its dirty flag raised so the next read
//! recomputes. Observers may themselves be observable (a pricer observed
//! by its cash flows), in which case notifications cascade.
//!
//! # Design
//!
//! Relations live in one owning registry keyed by copyable ids rather than
//! in bidirectional links between the objects themselves, so teardown in
//! any order never leaves a dangling subscription. The registry is pure
//! bookkeeping: no operation here can fail.
//!
//! # Contract
//!
//! - `subscribe` is idempotent; `unsubscribe` of an absent relation is a
//!   no-op.
//! - `notify` synchronously raises the dirty flag of every currently
//!   subscribed observer, in unspecified order; no observer's correctness
//!   may depend on notification order.
//! - Diamond-shaped graphs are safe: one `notify` call visits each
//!   downstream observable at most once.
//!
//! # Example
//!
//! ```
//! use pricer_core::observability::{DirtyFlag, NotificationGraph};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let mut graph = NotificationGraph::new();
//! let curve = graph.register_observable();
//!
//! let flag: DirtyFlag = Rc::new(Cell::new(false));
//! let observer = graph.register_observer(flag.clone());
//! graph.subscribe(curve, observer);
//!
//! graph.notify(curve);
//! assert!(flag.get());
//! ```

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::rc::Rc;

/// Identifier of a market-data object that can be observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObservableId(u64);

/// Identifier of a component that caches values derived from observables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(u64);

/// Shared needs-recompute flag raised by notifications.
///
/// Observers keep one end and hand the other to the registry; raising the
/// flag is the entire side effect of a notification, so recomputation
/// stays lazy even for diamond-shaped dependency graphs.
pub type DirtyFlag = Rc<Cell<bool>>;

/// Single-threaded shared handle to a [`NotificationGraph`].
pub type SharedGraph = Rc<RefCell<NotificationGraph>>;

/// Owning registry of observable/observer relations.
#[derive(Debug, Default)]
pub struct NotificationGraph {
    next_id: u64,
    subscribers: HashMap<ObservableId, BTreeSet<ObserverId>>,
    flags: HashMap<ObserverId, DirtyFlag>,
    // Chained invalidation: an observer that is itself observable
    // forwards incoming notifications to its own observable id.
    forwards: HashMap<ObserverId, ObservableId>,
}

impl NotificationGraph {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry behind the shared single-threaded handle.
    pub fn new_shared() -> SharedGraph {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Registers a new observable and returns its id.
    pub fn register_observable(&mut self) -> ObservableId {
        self.next_id += 1;
        ObservableId(self.next_id)
    }

    /// Registers a new observer with its dirty flag and returns its id.
    pub fn register_observer(&mut self, flag: DirtyFlag) -> ObserverId {
        self.next_id += 1;
        let id = ObserverId(self.next_id);
        self.flags.insert(id, flag);
        id
    }

    /// Chains an observer to an observable it also represents.
    ///
    /// Every notification delivered to `observer` then cascades onward to
    /// the subscribers of `observable`.
    pub fn link(&mut self, observer: ObserverId, observable: ObservableId) {
        self.forwards.insert(observer, observable);
    }

    /// Creates a subscription. Subscribing twice is idempotent.
    pub fn subscribe(&mut self, observable: ObservableId, observer: ObserverId) {
        self.subscribers.entry(observable).or_default().insert(observer);
    }

    /// Removes a subscription. Removing an absent relation is a no-op.
    pub fn unsubscribe(&mut self, observable: ObservableId, observer: ObserverId) {
        if let Some(set) = self.subscribers.get_mut(&observable) {
            set.remove(&observer);
            if set.is_empty() {
                self.subscribers.remove(&observable);
            }
        }
    }

    /// Returns true if the relation currently exists.
    pub fn is_subscribed(&self, observable: ObservableId, observer: ObserverId) -> bool {
        self.subscribers
            .get(&observable)
            .is_some_and(|set| set.contains(&observer))
    }

    /// Returns the number of observers currently subscribed to `observable`.
    pub fn subscriber_count(&self, observable: ObservableId) -> usize {
        self.subscribers.get(&observable).map_or(0, BTreeSet::len)
    }

    /// Raises the dirty flag of every observer reachable from `observable`.
    ///
    /// Cascades through chained observers; each downstream observable is
    /// visited at most once per call, so diamonds do not re-notify and
    /// accidental cycles terminate.
    pub fn notify(&mut self, observable: ObservableId) {
        let mut visited: HashSet<ObservableId> = HashSet::new();
        let mut worklist = vec![observable];

        while let Some(current) = worklist.pop() {
            if !visited.insert(current) {
                continue;
            }
            let Some(observers) = self.subscribers.get(&current) else {
                continue;
            };
            for observer in observers {
                if let Some(flag) = self.flags.get(observer) {
                    flag.set(true);
                }
                if let Some(next) = self.forwards.get(observer) {
                    worklist.push(*next);
                }
            }
        }
    }

    /// Removes an observer, its flag, its chain link, and every
    /// subscription pointing at it.
    pub fn unregister_observer(&mut self, observer: ObserverId) {
        self.flags.remove(&observer);
        self.forwards.remove(&observer);
        self.subscribers.retain(|_, set| {
            set.remove(&observer);
            !set.is_empty()
        });
    }

    /// Removes an observable and all of its subscriptions.
    pub fn unregister_observable(&mut self, observable: ObservableId) {
        self.subscribers.remove(&observable);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag() -> DirtyFlag {
        Rc::new(Cell::new(false))
    }

    // ========================================
    // Subscription Tests
    // ========================================

    #[test]
    fn test_subscribe_and_notify() {
        let mut graph = NotificationGraph::new();
        let obs = graph.register_observable();
        let f = flag();
        let id = graph.register_observer(f.clone());

        graph.subscribe(obs, id);
        assert!(!f.get());
        graph.notify(obs);
        assert!(f.get());
    }

    #[test]
    fn test_subscribe_is_idempotent() {
        let mut graph = NotificationGraph::new();
        let obs = graph.register_observable();
        let id = graph.register_observer(flag());

        graph.subscribe(obs, id);
        graph.subscribe(obs, id);
        assert_eq!(graph.subscriber_count(obs), 1);
    }

    #[test]
    fn test_unsubscribe_absent_is_noop() {
        let mut graph = NotificationGraph::new();
        let obs = graph.register_observable();
        let id = graph.register_observer(flag());

        graph.unsubscribe(obs, id);
        assert_eq!(graph.subscriber_count(obs), 0);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut graph = NotificationGraph::new();
        let obs = graph.register_observable();
        let f = flag();
        let id = graph.register_observer(f.clone());

        graph.subscribe(obs, id);
        graph.unsubscribe(obs, id);
        graph.notify(obs);
        assert!(!f.get());
    }

    #[test]
    fn test_notify_reaches_all_subscribers() {
        let mut graph = NotificationGraph::new();
        let obs = graph.register_observable();
        let flags: Vec<DirtyFlag> = (0..5).map(|_| flag()).collect();
        for f in &flags {
            let id = graph.register_observer(f.clone());
            graph.subscribe(obs, id);
        }

        graph.notify(obs);
        assert!(flags.iter().all(|f| f.get()));
    }

    #[test]
    fn test_notify_without_subscribers() {
        let mut graph = NotificationGraph::new();
        let obs = graph.register_observable();
        graph.notify(obs); // nothing to do, must not panic
    }

    // ========================================
    // Chained Invalidation Tests
    // ========================================

    #[test]
    fn test_chained_cascade() {
        // quote -> pricer (observer + observable) -> cash flow
        let mut graph = NotificationGraph::new();
        let quote = graph.register_observable();

        let pricer_flag = flag();
        let pricer_observer = graph.register_observer(pricer_flag.clone());
        let pricer_observable = graph.register_observable();
        graph.link(pricer_observer, pricer_observable);
        graph.subscribe(quote, pricer_observer);

        let cf_flag = flag();
        let cf_observer = graph.register_observer(cf_flag.clone());
        graph.subscribe(pricer_observable, cf_observer);

        graph.notify(quote);
        assert!(pricer_flag.get());
        assert!(cf_flag.get());
    }

    #[test]
    fn test_diamond_notifies_once_per_call() {
        // source feeds two intermediates that both feed one sink; the sink's
        // observable is visited once, not twice.
        let mut graph = NotificationGraph::new();
        let source = graph.register_observable();

        let sink_observable = graph.register_observable();
        for _ in 0..2 {
            let mid_observer = graph.register_observer(flag());
            graph.link(mid_observer, sink_observable);
            graph.subscribe(source, mid_observer);
        }

        let sink_flag = flag();
        let sink_observer = graph.register_observer(sink_flag.clone());
        graph.subscribe(sink_observable, sink_observer);

        graph.notify(source);
        assert!(sink_flag.get());
    }

    #[test]
    fn test_cycle_terminates() {
        let mut graph = NotificationGraph::new();
        let a = graph.register_observable();
        let b = graph.register_observable();

        let ab = graph.register_observer(flag());
        graph.link(ab, b);
        graph.subscribe(a, ab);

        let ba = graph.register_observer(flag());
        graph.link(ba, a);
        graph.subscribe(b, ba);

        graph.notify(a); // must terminate
    }

    // ========================================
    // Teardown Tests
    // ========================================

    #[test]
    fn test_unregister_observer_removes_subscriptions() {
        let mut graph = NotificationGraph::new();
        let obs = graph.register_observable();
        let f = flag();
        let id = graph.register_observer(f.clone());
        graph.subscribe(obs, id);

        graph.unregister_observer(id);
        assert_eq!(graph.subscriber_count(obs), 0);
        graph.notify(obs);
        assert!(!f.get());
    }

    #[test]
    fn test_unregister_observable_removes_subscriptions() {
        let mut graph = NotificationGraph::new();
        let obs = graph.register_observable();
        let id = graph.register_observer(flag());
        graph.subscribe(obs, id);

        graph.unregister_observable(obs);
        assert!(!graph.is_subscribed(obs, id));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut graph = NotificationGraph::new();
        let a = graph.register_observable();
        let b = graph.register_observable();
        assert_ne!(a, b);
    }

    // ========================================
    // Property Tests
    // ========================================

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_subscribe_unsubscribe_sequence_keeps_counts_consistent(
                ops in prop::collection::vec((0usize..4, 0usize..4, prop::bool::ANY), 0..64),
            ) {
                let mut graph = NotificationGraph::new();
                let observables: Vec<_> =
                    (0..4).map(|_| graph.register_observable()).collect();
                let observers: Vec<_> =
                    (0..4).map(|_| graph.register_observer(flag())).collect();
                let mut model: std::collections::HashSet<(usize, usize)> =
                    std::collections::HashSet::new();

                for (o, s, add) in ops {
                    if add {
                        graph.subscribe(observables[o], observers[s]);
                        model.insert((o, s));
                    } else {
                        graph.unsubscribe(observables[o], observers[s]);
                        model.remove(&(o, s));
                    }
                }

                for o in 0..4 {
                    let expected = model.iter().filter(|(mo, _)| *mo == o).count();
                    prop_assert_eq!(graph.subscriber_count(observables[o]), expected);
                }
            }
        }
    }
}
