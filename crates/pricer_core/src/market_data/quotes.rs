//! Observable scalar quotes.
//!
//! A [`SimpleQuote`] is a mutable market value (a correlation, a spot
//! level) that notifies the graph when it changes. Components never poll
//! for changes; they read the current value lazily and rely on the
//! notification to invalidate whatever they cached.

use std::cell::Cell;
use std::rc::Rc;

use num_traits::Float;

use crate::observability::{ObservableId, SharedGraph};

use super::handle::Handle;

/// Observable mutable scalar value.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::SimpleQuote;
/// use pricer_core::observability::NotificationGraph;
///
/// let graph = NotificationGraph::new_shared();
/// let quote = SimpleQuote::new(&graph, 0.25_f64);
/// assert_eq!(quote.value(), 0.25);
///
/// quote.set_value(0.30);
/// assert_eq!(quote.value(), 0.30);
/// ```
pub struct SimpleQuote<T: Float> {
    graph: SharedGraph,
    observable: ObservableId,
    value: Cell<T>,
}

impl<T: Float> SimpleQuote<T> {
    /// Creates a quote registered with the notification graph.
    ///
    /// Returned as `Rc` because quotes are shared between handles,
    /// pricers, and instruments.
    pub fn new(graph: &SharedGraph, value: T) -> Rc<Self> {
        let observable = graph.borrow_mut().register_observable();
        Rc::new(SimpleQuote {
            graph: graph.clone(),
            observable,
            value: Cell::new(value),
        })
    }

    /// Returns the current value.
    #[inline]
    pub fn value(&self) -> T {
        self.value.get()
    }

    /// Sets a new value, notifying observers only when it actually changed.
    pub fn set_value(&self, value: T) {
        if value != self.value.get() {
            self.value.set(value);
            self.graph.borrow_mut().notify(self.observable);
        }
    }

    /// Returns the id notified when the value changes.
    #[inline]
    pub fn observable_id(&self) -> ObservableId {
        self.observable
    }
}

impl<T: Float> Drop for SimpleQuote<T> {
    fn drop(&mut self) {
        self.graph
            .borrow_mut()
            .unregister_observable(self.observable);
    }
}

impl<T: Float + std::fmt::Debug> std::fmt::Debug for SimpleQuote<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleQuote")
            .field("value", &self.value.get())
            .field("observable", &self.observable)
            .finish()
    }
}

impl<T: Float> Handle<SimpleQuote<T>> {
    /// Creates a handle to a quote, wired so that both relinking the
    /// handle and mutating the quote notify the handle's subscribers.
    pub fn for_quote(graph: &SharedGraph, quote: Rc<SimpleQuote<T>>) -> Self {
        let observable = quote.observable_id();
        Handle::with_observable(graph, quote, observable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::{DirtyFlag, NotificationGraph};

    fn subscribed_flag(graph: &SharedGraph, observable: ObservableId) -> DirtyFlag {
        let flag: DirtyFlag = Rc::new(Cell::new(false));
        let mut g = graph.borrow_mut();
        let observer = g.register_observer(flag.clone());
        g.subscribe(observable, observer);
        flag
    }

    #[test]
    fn test_value_roundtrip() {
        let graph = NotificationGraph::new_shared();
        let quote = SimpleQuote::new(&graph, 0.25_f64);
        assert_eq!(quote.value(), 0.25);
        quote.set_value(-0.30);
        assert_eq!(quote.value(), -0.30);
    }

    #[test]
    fn test_set_value_notifies() {
        let graph = NotificationGraph::new_shared();
        let quote = SimpleQuote::new(&graph, 0.25_f64);
        let flag = subscribed_flag(&graph, quote.observable_id());

        quote.set_value(0.30);
        assert!(flag.get());
    }

    #[test]
    fn test_unchanged_value_does_not_notify() {
        let graph = NotificationGraph::new_shared();
        let quote = SimpleQuote::new(&graph, 0.25_f64);
        let flag = subscribed_flag(&graph, quote.observable_id());

        quote.set_value(0.25);
        assert!(!flag.get());
    }

    #[test]
    fn test_quote_handle_forwards_mutation() {
        let graph = NotificationGraph::new_shared();
        let quote = SimpleQuote::new(&graph, 1.0_f64);
        let handle = Handle::for_quote(&graph, quote.clone());
        let flag = subscribed_flag(&graph, handle.observable_id());

        quote.set_value(2.0);
        assert!(flag.get());
        assert_eq!(handle.value().unwrap().value(), 2.0);
    }

    #[test]
    fn test_quote_handle_relink_switches_source() {
        let graph = NotificationGraph::new_shared();
        let first = SimpleQuote::new(&graph, 1.0_f64);
        let second = SimpleQuote::new(&graph, 10.0_f64);
        let handle = Handle::for_quote(&graph, first.clone());
        let flag = subscribed_flag(&graph, handle.observable_id());

        handle.link_to_observable(second.clone(), second.observable_id());
        assert!(flag.get());
        flag.set(false);

        // The replaced quote no longer reaches the handle's subscribers.
        first.set_value(5.0);
        assert!(!flag.get());

        second.set_value(20.0);
        assert!(flag.get());
    }
}
