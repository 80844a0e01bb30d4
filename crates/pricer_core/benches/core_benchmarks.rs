//! Criterion benchmarks for the foundation layer.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::cell::Cell;
use std::rc::Rc;

use pricer_core::market_data::curves::{CurveEnum, QuantoCurve, YieldCurve};
use pricer_core::market_data::surfaces::VolSurfaceEnum;
use pricer_core::market_data::Handle;
use pricer_core::observability::NotificationGraph;
use pricer_core::types::Date;

fn bench_notify_fanout(c: &mut Criterion) {
    let mut graph = NotificationGraph::new();
    let observable = graph.register_observable();
    for _ in 0..100 {
        let observer = graph.register_observer(Rc::new(Cell::new(false)));
        graph.subscribe(observable, observer);
    }

    c.bench_function("notify_100_observers", |b| {
        b.iter(|| graph.notify(black_box(observable)))
    });
}

fn bench_quanto_discount(c: &mut Criterion) {
    let graph = NotificationGraph::new_shared();
    let reference = Date::from_ymd(2025, 1, 1).unwrap();
    let curve = |rate: f64| Handle::new(&graph, Rc::new(CurveEnum::flat(reference, rate)));
    let vol = |v: f64| Handle::new(&graph, Rc::new(VolSurfaceEnum::flat(reference, v)));

    let quanto = QuantoCurve::new(
        curve(0.01),
        curve(0.03),
        curve(0.02),
        vol(0.20),
        100.0,
        vol(0.15),
        1.0,
        -0.3,
    )
    .unwrap();

    c.bench_function("quanto_discount", |b| {
        b.iter(|| quanto.discount(black_box(1.5)).unwrap())
    });
}

criterion_group!(benches, bench_notify_fanout, bench_quanto_discount);
criterion_main!(benches);
