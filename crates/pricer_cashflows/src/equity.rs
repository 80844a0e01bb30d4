//! Equity cash flow with lazy caching and pluggable pricer.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pricer_core::observability::{DirtyFlag, ObserverId, SharedGraph};
use pricer_core::types::Date;
use tracing::{debug, trace};

use crate::error::CashFlowError;
use crate::indexed::IndexedCashFlow;
use crate::indexes::{EquityIndex, IndexRef};
use crate::pricer::EquityCashFlowPricer;

/// Equity-linked cash flow.
///
/// Wraps an [`IndexedCashFlow`] with lazy amount caching and an optional
/// valuation strategy. With no pricer attached, the amount comes from the
/// indexed default computation; with one attached, every read
/// re-initializes the pricer against this cash flow and multiplies the
/// returned dimensionless multiplier by the notional.
///
/// The cash flow is an observer: attaching a pricer subscribes it to the
/// pricer's invalidations, which the pricer in turn receives from its
/// market data, so a quote or curve change anywhere upstream clears the
/// cached amount before the next read.
pub struct EquityCashFlow {
    inner: IndexedCashFlow,
    graph: SharedGraph,
    observer: ObserverId,
    dirty: DirtyFlag,
    pricer: RefCell<Option<Rc<EquityCashFlowPricer>>>,
    cache: Cell<Option<f64>>,
}

impl EquityCashFlow {
    /// Creates an equity cash flow with no pricer attached.
    ///
    /// # Arguments
    ///
    /// * `graph` - Notification graph the cash flow registers with
    /// * `notional` - Payment notional
    /// * `index` - Shared equity index
    /// * `base_date` - Denominator observation date
    /// * `fixing_date` - Numerator observation date
    /// * `payment_date` - Payment date
    /// * `growth_only` - Growth-only payoff shape when true
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        graph: &SharedGraph,
        notional: f64,
        index: Rc<EquityIndex>,
        base_date: Date,
        fixing_date: Date,
        payment_date: Date,
        growth_only: bool,
    ) -> Self {
        let dirty: DirtyFlag = Rc::new(Cell::new(false));
        let observer = {
            let mut g = graph.borrow_mut();
            let observer = g.register_observer(dirty.clone());
            // The cash flow observes its index: any change to the curves
            // or spot behind the default computation clears the cache.
            g.subscribe(index.interest_rate_curve().observable_id(), observer);
            g.subscribe(index.dividend_curve().observable_id(), observer);
            g.subscribe(index.spot().observable_id(), observer);
            observer
        };
        Self {
            inner: IndexedCashFlow::new(
                notional,
                index,
                base_date,
                fixing_date,
                payment_date,
                growth_only,
            ),
            graph: graph.clone(),
            observer,
            dirty,
            pricer: RefCell::new(None),
            cache: Cell::new(None),
        }
    }

    /// Returns the notional.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.inner.notional()
    }

    /// Returns the observed index.
    #[inline]
    pub fn index(&self) -> &IndexRef {
        self.inner.index()
    }

    /// Returns the base observation date.
    #[inline]
    pub fn base_date(&self) -> Date {
        self.inner.base_date()
    }

    /// Returns the fixing observation date.
    #[inline]
    pub fn fixing_date(&self) -> Date {
        self.inner.fixing_date()
    }

    /// Returns the payment date.
    #[inline]
    pub fn payment_date(&self) -> Date {
        self.inner.payment_date()
    }

    /// Returns true for a growth-only payoff.
    #[inline]
    pub fn growth_only(&self) -> bool {
        self.inner.growth_only()
    }

    /// Returns the currently attached pricer, if any.
    pub fn pricer(&self) -> Option<Rc<EquityCashFlowPricer>> {
        self.pricer.borrow().clone()
    }

    /// Attaches, replaces, or detaches (with `None`) the pricer.
    ///
    /// Replacing unsubscribes from the previous pricer first, so its
    /// market data can no longer send stale notifications here. The
    /// cached amount is always invalidated, even when the new pricer
    /// would produce the same number; detaching reverts to the indexed
    /// default computation.
    pub fn set_pricer(&self, pricer: Option<Rc<EquityCashFlowPricer>>) {
        {
            let mut graph = self.graph.borrow_mut();
            if let Some(old) = self.pricer.borrow().as_ref() {
                graph.unsubscribe(old.observable_id(), self.observer);
            }
            if let Some(new) = &pricer {
                graph.subscribe(new.observable_id(), self.observer);
            }
        }
        debug!(
            index = self.inner.index().name(),
            attached = pricer.is_some(),
            "equity cash flow pricer changed"
        );
        *self.pricer.borrow_mut() = pricer;
        self.dirty.set(true);
    }

    /// Returns the payment amount, recomputing only when a market-data
    /// notification arrived since the last read.
    pub fn amount(&self) -> Result<f64, CashFlowError> {
        if self.dirty.replace(false) {
            self.cache.set(None);
        }
        if let Some(cached) = self.cache.get() {
            return Ok(cached);
        }

        let value = match self.pricer.borrow().as_ref() {
            None => self.inner.amount()?,
            Some(pricer) => {
                pricer.initialize(self)?;
                self.inner.notional() * pricer.price()?
            }
        };
        trace!(
            index = self.inner.index().name(),
            value,
            "equity cash flow amount recomputed"
        );
        self.cache.set(Some(value));
        Ok(value)
    }
}

impl Drop for EquityCashFlow {
    fn drop(&mut self) {
        self.graph.borrow_mut().unregister_observer(self.observer);
    }
}

impl std::fmt::Debug for EquityCashFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EquityCashFlow")
            .field("index", &self.inner.index().name())
            .field("notional", &self.inner.notional())
            .field("fixing_date", &self.inner.fixing_date())
            .field("has_pricer", &self.pricer.borrow().is_some())
            .finish()
    }
}
