//! Integration tests verifying that public modules and types are
//! correctly exported and accessible via absolute paths.

use std::rc::Rc;

/// Types module exports.
#[test]
fn test_types_module_exports() {
    use pricer_core::types::calendar::{Calendar, CalendarEnum};
    use pricer_core::types::time::{Date, DayCountConvention, Period};
    use pricer_core::types::Currency;

    let start = Date::from_ymd(2025, 1, 1).unwrap();
    let end = start + Period::Years(1);
    let yf = DayCountConvention::Act365Fixed.year_fraction(start, end);
    assert!((yf - 1.0).abs() < 1e-12);

    assert_eq!(Currency::USD.code(), "USD");
    assert!(CalendarEnum::null().is_business_day(start));
}

/// Observability module exports.
#[test]
fn test_observability_module_exports() {
    use pricer_core::observability::{DirtyFlag, NotificationGraph};
    use std::cell::Cell;

    let mut graph = NotificationGraph::new();
    let observable = graph.register_observable();
    let flag: DirtyFlag = Rc::new(Cell::new(false));
    let observer = graph.register_observer(flag.clone());
    graph.subscribe(observable, observer);
    graph.notify(observable);
    assert!(flag.get());
}

/// Market data module exports, including the handle aliases.
#[test]
fn test_market_data_module_exports() {
    use pricer_core::market_data::curves::{CurveEnum, YieldCurve};
    use pricer_core::market_data::surfaces::{VolSurfaceEnum, VolatilitySurface};
    use pricer_core::market_data::{CurveHandle, Handle, QuoteHandle, SimpleQuote, VolHandle};
    use pricer_core::observability::NotificationGraph;
    use pricer_core::types::Date;

    let graph = NotificationGraph::new_shared();
    let reference = Date::from_ymd(2025, 1, 1).unwrap();

    let curve: CurveHandle<f64> = Handle::new(&graph, Rc::new(CurveEnum::flat(reference, 0.05)));
    assert!(curve.value().unwrap().discount(1.0).is_ok());

    let vol: VolHandle<f64> = Handle::new(&graph, Rc::new(VolSurfaceEnum::flat(reference, 0.2)));
    assert!(vol.value().unwrap().volatility(100.0, 1.0).is_ok());

    let quote: QuoteHandle<f64> = Handle::for_quote(&graph, SimpleQuote::new(&graph, 0.25));
    assert_eq!(quote.value().unwrap().value(), 0.25);
}
