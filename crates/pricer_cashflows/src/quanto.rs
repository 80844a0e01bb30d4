//! Quanto equity cash flow pricer.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pricer_core::market_data::curves::{CurveEnum, FlatCurve, QuantoCurve, YieldCurve};
use pricer_core::market_data::surfaces::VolatilitySurface;
use pricer_core::market_data::{CurveHandle, Handle, QuoteHandle, VolHandle};
use pricer_core::observability::{DirtyFlag, ObservableId, ObserverId, SharedGraph};
use pricer_core::types::Date;
use tracing::trace;

use crate::equity::EquityCashFlow;
use crate::error::CashFlowError;
use crate::indexes::EquityIndex;

struct BoundCashFlow {
    index: Rc<EquityIndex>,
    base_date: Date,
    fixing_date: Date,
    growth_only: bool,
}

/// Prices an equity-linked payoff settled in another currency by
/// applying the standard quanto drift adjustment.
///
/// Holds four shared market-data handles: the settlement (quanto)
/// currency discount curve, the equity and FX volatility surfaces, and
/// the equity/FX correlation quote. The pricer subscribes to all four at
/// construction and is itself observable, so cash flows it is attached
/// to hear about any upstream change.
///
/// `initialize` must run against a cash flow before `price`; the bound
/// state is fully refreshed on every `initialize`, never carried across
/// cash flows. The correlation is read from the quote inside `price`, so
/// a live correlation change is reflected on the next query without
/// re-initializing.
pub struct EquityQuantoPricer {
    graph: SharedGraph,
    observer: ObserverId,
    observable: ObservableId,
    quanto_currency: CurveHandle<f64>,
    equity_vol: VolHandle<f64>,
    fx_vol: VolHandle<f64>,
    correlation: QuoteHandle<f64>,
    bound: RefCell<Option<BoundCashFlow>>,
}

impl EquityQuantoPricer {
    /// Creates the pricer and subscribes it to its four market-data
    /// handles.
    ///
    /// # Arguments
    ///
    /// * `graph` - Notification graph
    /// * `quanto_currency` - Settlement-currency discount curve
    /// * `equity_vol` - Equity volatility surface
    /// * `fx_vol` - FX volatility surface
    /// * `correlation` - Equity/FX correlation quote
    pub fn new(
        graph: &SharedGraph,
        quanto_currency: CurveHandle<f64>,
        equity_vol: VolHandle<f64>,
        fx_vol: VolHandle<f64>,
        correlation: QuoteHandle<f64>,
    ) -> Self {
        let (observer, observable) = {
            let mut g = graph.borrow_mut();
            // The pricer has no cache of its own; its observer exists to
            // relay market-data invalidations to attached cash flows.
            let flag: DirtyFlag = Rc::new(Cell::new(false));
            let observer = g.register_observer(flag);
            let observable = g.register_observable();
            g.link(observer, observable);
            g.subscribe(quanto_currency.observable_id(), observer);
            g.subscribe(equity_vol.observable_id(), observer);
            g.subscribe(fx_vol.observable_id(), observer);
            g.subscribe(correlation.observable_id(), observer);
            (observer, observable)
        };
        Self {
            graph: graph.clone(),
            observer,
            observable,
            quanto_currency,
            equity_vol,
            fx_vol,
            correlation,
            bound: RefCell::new(None),
        }
    }

    /// Returns the id cash flows subscribe to for chained invalidation.
    #[inline]
    pub fn observable_id(&self) -> ObservableId {
        self.observable
    }

    /// Binds the pricer to `cash_flow`, validating its identity fields
    /// and the market-data handles.
    ///
    /// Fails fast when: the cash flow's index is not an equity index, the
    /// fixing date precedes the base date, any of the four handles is
    /// unbound, or the quanto-currency curve and the two volatility
    /// surfaces disagree on the reference date.
    pub fn initialize(&self, cash_flow: &EquityCashFlow) -> Result<(), CashFlowError> {
        let index = cash_flow
            .index()
            .as_equity()
            .ok_or(CashFlowError::IndexKindMismatch {
                expected: "equity",
                found: cash_flow.index().kind(),
            })?
            .clone();

        let base_date = cash_flow.base_date();
        let fixing_date = cash_flow.fixing_date();
        if fixing_date < base_date {
            return Err(CashFlowError::FixingBeforeBase {
                fixing: fixing_date,
                base: base_date,
            });
        }

        let quanto_currency =
            self.quanto_currency
                .value()
                .ok_or(CashFlowError::UnboundMarketData {
                    handle: "quanto currency curve",
                })?;
        let equity_vol = self
            .equity_vol
            .value()
            .ok_or(CashFlowError::UnboundMarketData {
                handle: "equity volatility surface",
            })?;
        let fx_vol = self.fx_vol.value().ok_or(CashFlowError::UnboundMarketData {
            handle: "FX volatility surface",
        })?;
        if !self.correlation.linked() {
            return Err(CashFlowError::UnboundMarketData {
                handle: "correlation quote",
            });
        }

        if quanto_currency.reference_date() != equity_vol.reference_date() {
            return Err(CashFlowError::ReferenceDateMismatch {
                left: "quanto currency curve",
                left_date: quanto_currency.reference_date(),
                right: "equity volatility surface",
                right_date: equity_vol.reference_date(),
            });
        }
        if equity_vol.reference_date() != fx_vol.reference_date() {
            return Err(CashFlowError::ReferenceDateMismatch {
                left: "equity volatility surface",
                left_date: equity_vol.reference_date(),
                right: "FX volatility surface",
                right_date: fx_vol.reference_date(),
            });
        }

        *self.bound.borrow_mut() = Some(BoundCashFlow {
            index,
            base_date,
            fixing_date,
            growth_only: cash_flow.growth_only(),
        });
        Ok(())
    }

    /// Returns the quanto-adjusted index ratio for the bound cash flow.
    ///
    /// The raw index level at the fixing date serves as the volatility
    /// strike; the payoff itself is read from a clone of the index whose
    /// interest curve is the quanto-currency curve and whose growth curve
    /// is the quanto drift-adjusted composition. Division by a zero base
    /// fixing is a data precondition and is not guarded here.
    pub fn price(&self) -> Result<f64, CashFlowError> {
        let bound = self.bound.borrow();
        let bound = bound.as_ref().ok_or(CashFlowError::NotInitialized)?;

        let strike = bound.index.fixing(bound.fixing_date)?;

        let quanto_currency =
            self.quanto_currency
                .value()
                .ok_or(CashFlowError::UnboundMarketData {
                    handle: "quanto currency curve",
                })?;
        let dividend = if bound.index.dividend_curve().linked() {
            bound.index.dividend_curve().clone()
        } else {
            // No dividend data bound: substitute a flat zero-rate curve
            // anchored at the valuation date so the composition below
            // needs no special case.
            Handle::new(
                &self.graph,
                Rc::new(CurveEnum::Flat(FlatCurve::new(
                    quanto_currency.reference_date(),
                    0.0,
                ))),
            )
        };

        let correlation = self
            .correlation
            .value()
            .ok_or(CashFlowError::UnboundMarketData {
                handle: "correlation quote",
            })?
            .value();

        let quanto_growth = QuantoCurve::new(
            dividend,
            self.quanto_currency.clone(),
            bound.index.interest_rate_curve().clone(),
            self.equity_vol.clone(),
            strike,
            self.fx_vol.clone(),
            1.0,
            correlation,
        )?;
        let growth_handle = Handle::new(
            &self.graph,
            Rc::new(CurveEnum::Quanto(quanto_growth)),
        );

        let quanto_index = bound.index.clone_with(
            self.quanto_currency.clone(),
            growth_handle,
            bound.index.spot().clone(),
        );

        let base_level = quanto_index.fixing(bound.base_date)?;
        let fixing_level = quanto_index.fixing(bound.fixing_date)?;
        trace!(
            index = quanto_index.name(),
            base_level,
            fixing_level,
            correlation,
            "quanto price computed"
        );

        if bound.growth_only {
            Ok(fixing_level / base_level - 1.0)
        } else {
            Ok(fixing_level / base_level)
        }
    }
}

impl Drop for EquityQuantoPricer {
    fn drop(&mut self) {
        let mut graph = self.graph.borrow_mut();
        graph.unregister_observer(self.observer);
        graph.unregister_observable(self.observable);
    }
}

impl std::fmt::Debug for EquityQuantoPricer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EquityQuantoPricer")
            .field("initialized", &self.bound.borrow().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::surfaces::VolSurfaceEnum;
    use pricer_core::market_data::SimpleQuote;
    use pricer_core::observability::NotificationGraph;
    use pricer_core::types::{CalendarEnum, Currency};

    fn reference() -> Date {
        Date::from_ymd(2025, 1, 1).unwrap()
    }

    fn curve(graph: &SharedGraph, rate: f64) -> CurveHandle<f64> {
        Handle::new(graph, Rc::new(CurveEnum::flat(reference(), rate)))
    }

    fn vol(graph: &SharedGraph, v: f64) -> VolHandle<f64> {
        Handle::new(graph, Rc::new(VolSurfaceEnum::flat(reference(), v)))
    }

    fn sample_index(graph: &SharedGraph) -> Rc<EquityIndex> {
        let index = EquityIndex::new(
            "EQX",
            Currency::EUR,
            CalendarEnum::null(),
            curve(graph, 0.0),
            Handle::empty(graph),
            Handle::for_quote(graph, SimpleQuote::new(graph, 110.0)),
        );
        index.add_fixing(reference(), 100.0).unwrap();
        Rc::new(index)
    }

    fn sample_cash_flow(graph: &SharedGraph, growth_only: bool) -> EquityCashFlow {
        EquityCashFlow::new(
            graph,
            1.0,
            sample_index(graph),
            reference(),
            Date::from_ymd(2026, 1, 1).unwrap(),
            Date::from_ymd(2026, 1, 3).unwrap(),
            growth_only,
        )
    }

    fn sample_pricer(graph: &SharedGraph, correlation: f64, fx_vol: f64) -> EquityQuantoPricer {
        EquityQuantoPricer::new(
            graph,
            curve(graph, 0.0),
            vol(graph, 0.20),
            vol(graph, fx_vol),
            Handle::for_quote(graph, SimpleQuote::new(graph, correlation)),
        )
    }

    #[test]
    fn test_price_before_initialize_fails() {
        let graph = NotificationGraph::new_shared();
        let pricer = sample_pricer(&graph, -0.3, 0.15);
        assert!(matches!(
            pricer.price(),
            Err(CashFlowError::NotInitialized)
        ));
    }

    #[test]
    fn test_initialize_validates_date_ordering() {
        let graph = NotificationGraph::new_shared();
        let pricer = sample_pricer(&graph, -0.3, 0.15);
        let cf = EquityCashFlow::new(
            &graph,
            1.0,
            sample_index(&graph),
            Date::from_ymd(2026, 1, 1).unwrap(),
            reference(),
            Date::from_ymd(2026, 1, 3).unwrap(),
            false,
        );
        assert!(matches!(
            pricer.initialize(&cf),
            Err(CashFlowError::FixingBeforeBase { .. })
        ));
    }

    #[test]
    fn test_initialize_requires_bound_handles() {
        let graph = NotificationGraph::new_shared();
        let pricer = EquityQuantoPricer::new(
            &graph,
            Handle::empty(&graph),
            vol(&graph, 0.20),
            vol(&graph, 0.15),
            Handle::for_quote(&graph, SimpleQuote::new(&graph, -0.3)),
        );
        let cf = sample_cash_flow(&graph, false);
        assert!(matches!(
            pricer.initialize(&cf),
            Err(CashFlowError::UnboundMarketData {
                handle: "quanto currency curve"
            })
        ));
    }

    #[test]
    fn test_initialize_requires_consistent_reference_dates() {
        let graph = NotificationGraph::new_shared();
        let shifted = Date::from_ymd(2025, 1, 2).unwrap();
        let pricer = EquityQuantoPricer::new(
            &graph,
            curve(&graph, 0.0),
            Handle::new(&graph, Rc::new(VolSurfaceEnum::flat(shifted, 0.20))),
            vol(&graph, 0.15),
            Handle::for_quote(&graph, SimpleQuote::new(&graph, -0.3)),
        );
        let cf = sample_cash_flow(&graph, false);
        assert!(matches!(
            pricer.initialize(&cf),
            Err(CashFlowError::ReferenceDateMismatch { .. })
        ));
    }

    #[test]
    fn test_zero_correlation_zero_fx_vol_collapses_to_plain_ratio() {
        let graph = NotificationGraph::new_shared();
        let pricer = sample_pricer(&graph, 0.0, 0.0);
        let cf = sample_cash_flow(&graph, false);
        pricer.initialize(&cf).unwrap();
        // With no adjustment the quanto path reproduces the raw ratio.
        assert_relative_eq!(pricer.price().unwrap(), 1.1, epsilon = 1e-12);
    }

    #[test]
    fn test_growth_only_differs_by_one() {
        let graph = NotificationGraph::new_shared();
        let pricer = sample_pricer(&graph, -0.3, 0.15);

        let plain = sample_cash_flow(&graph, false);
        pricer.initialize(&plain).unwrap();
        let ratio = pricer.price().unwrap();

        let growth = sample_cash_flow(&graph, true);
        pricer.initialize(&growth).unwrap();
        let growth_value = pricer.price().unwrap();

        assert_relative_eq!(growth_value, ratio - 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_quanto_drift_scenario() {
        // Flat zero curves, sigma_eq 0.20, sigma_fx 0.15, rho -0.3, one
        // year to fixing (ACT/365): the adjusted ratio picks up a drift
        // of exp(-rho * sig_eq * sig_fx * tau) over the raw 1.1.
        let graph = NotificationGraph::new_shared();
        let pricer = sample_pricer(&graph, -0.3, 0.15);
        let cf = sample_cash_flow(&graph, true);
        pricer.initialize(&cf).unwrap();

        let tau = 1.0;
        let expected = 1.1 * (0.3_f64 * 0.20 * 0.15 * tau).exp() - 1.0;
        assert_relative_eq!(pricer.price().unwrap(), expected, epsilon = 1e-14);
    }

    #[test]
    fn test_price_is_idempotent() {
        let graph = NotificationGraph::new_shared();
        let pricer = sample_pricer(&graph, -0.3, 0.15);
        let cf = sample_cash_flow(&graph, false);
        pricer.initialize(&cf).unwrap();
        assert_eq!(pricer.price().unwrap(), pricer.price().unwrap());
    }

    #[test]
    fn test_reference_date_check_runs_at_initialize_only() {
        let graph = NotificationGraph::new_shared();
        let quanto_currency = curve(&graph, 0.0);
        let pricer = EquityQuantoPricer::new(
            &graph,
            quanto_currency.clone(),
            vol(&graph, 0.0),
            vol(&graph, 0.0),
            Handle::for_quote(&graph, SimpleQuote::new(&graph, 0.0)),
        );
        let cf = sample_cash_flow(&graph, false);
        pricer.initialize(&cf).unwrap();

        // Rebinding to a differently anchored curve after initialization
        // does not re-run the consistency check; the next price() query
        // simply consumes the new curve.
        let shifted = Date::from_ymd(2025, 1, 2).unwrap();
        quanto_currency.link_to(Rc::new(CurveEnum::flat(shifted, 0.0)));
        assert!(pricer.price().is_ok());

        // A fresh initialize sees the disagreement and fails fast.
        assert!(matches!(
            pricer.initialize(&cf),
            Err(CashFlowError::ReferenceDateMismatch { .. })
        ));
    }

    #[test]
    fn test_correlation_read_live_without_reinitialize() {
        let graph = NotificationGraph::new_shared();
        let correlation = SimpleQuote::new(&graph, 0.0);
        let pricer = EquityQuantoPricer::new(
            &graph,
            curve(&graph, 0.0),
            vol(&graph, 0.20),
            vol(&graph, 0.15),
            Handle::for_quote(&graph, correlation.clone()),
        );
        let cf = sample_cash_flow(&graph, false);
        pricer.initialize(&cf).unwrap();
        let unadjusted = pricer.price().unwrap();

        correlation.set_value(-0.3);
        let adjusted = pricer.price().unwrap();
        assert_relative_eq!(
            adjusted,
            unadjusted * (0.3_f64 * 0.20 * 0.15).exp(),
            epsilon = 1e-12
        );
    }
}
