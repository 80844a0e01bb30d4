//! Market data structures for the valuation engine.
//!
//! Yield curves, volatility surfaces, observable quotes, and the
//! relinkable handles that tie them into the notification graph.
//!
//! # Architecture
//!
//! All curve and surface types are generic over `T: Float` so the same
//! code serves standard floating-point types and automatic-differentiation
//! types. Every curve and surface is anchored at a reference (valuation)
//! date; consumers that combine several inputs check the anchors agree
//! before computing.
//!
//! Shared, rebindable market data is held through [`Handle`]s: small
//! relinkable indirection cells registered with the notification graph, so
//! both relinking a handle and mutating an observable target (a
//! [`SimpleQuote`]) invalidate downstream caches through the same path.
//!
//! # Components
//!
//! - [`curves`]: Yield curve trait and implementations
//! - [`surfaces`]: Volatility surface trait and implementations
//! - [`quotes`]: Observable mutable scalars
//! - [`handle`]: Relinkable indirection cells
//! - [`error`]: Market data error types
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::curves::{CurveEnum, YieldCurve};
//! use pricer_core::market_data::{CurveHandle, Handle};
//! use pricer_core::observability::NotificationGraph;
//! use pricer_core::types::time::Date;
//! use std::rc::Rc;
//!
//! let graph = NotificationGraph::new_shared();
//! let reference = Date::from_ymd(2025, 1, 1).unwrap();
//!
//! let handle: CurveHandle<f64> =
//!     Handle::new(&graph, Rc::new(CurveEnum::flat(reference, 0.05)));
//! let df = handle.value().unwrap().discount(1.0).unwrap();
//! assert!((df - 0.951229).abs() < 1e-5);
//! ```

pub mod curves;
pub mod error;
pub mod handle;
pub mod quotes;
pub mod surfaces;

// Re-export commonly used types
pub use curves::{CurveEnum, FlatCurve, InterpolatedCurve, QuantoCurve, YieldCurve};
pub use error::MarketDataError;
pub use handle::Handle;
pub use quotes::SimpleQuote;
pub use surfaces::{FlatVol, TermVol, VolSurfaceEnum, VolatilitySurface};

/// Relinkable handle to a yield curve.
pub type CurveHandle<T> = Handle<CurveEnum<T>>;

/// Relinkable handle to a volatility surface.
pub type VolHandle<T> = Handle<VolSurfaceEnum<T>>;

/// Relinkable handle to an observable quote.
pub type QuoteHandle<T> = Handle<SimpleQuote<T>>;
