//! # pricer_core: Foundation for the Lazy Cash-Flow Valuation Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the two-layer architecture,
//! providing:
//! - Notification graph for dependency-driven cache invalidation
//!   (`observability`)
//! - Relinkable market-data handles and observable quotes
//!   (`market_data::handle`, `market_data::quotes`)
//! - Yield curves, including the quanto drift-adjusted composition
//!   (`market_data::curves`)
//! - Volatility surfaces (`market_data::surfaces`)
//! - Time types: `Date`, `Period`, `DayCountConvention` (`types::time`)
//! - Currency and calendar types (`types::currency`, `types::calendar`)
//!
//! ## Minimal Dependency Principle
//!
//! Layer 1 depends on no other workspace crate and on few external ones:
//! - num-traits: generic numerical computation (`T: Float` throughout the
//!   market-data types, for AD compatibility)
//! - chrono: date arithmetic
//! - thiserror: structured error types
//! - serde: serialisation support (optional)
//!
//! ## Execution Model
//!
//! Single-threaded, synchronous, call-and-return: market data is shared
//! via `Rc`, mutability is interior, and invalidation is a synchronous
//! flag-raising walk over the notification graph. Laziness means cached
//! values recomputed on next read, never deferred work.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::market_data::curves::{CurveEnum, YieldCurve};
//! use pricer_core::market_data::Handle;
//! use pricer_core::observability::NotificationGraph;
//! use pricer_core::types::{Date, Period};
//! use std::rc::Rc;
//!
//! let graph = NotificationGraph::new_shared();
//! let reference = Date::from_ymd(2025, 1, 1).unwrap();
//!
//! // A relinkable discount curve handle.
//! let discount = Handle::new(&graph, Rc::new(CurveEnum::flat(reference, 0.03_f64)));
//!
//! // Rebinding the handle notifies every subscribed observer.
//! discount.link_to(Rc::new(CurveEnum::flat(reference, 0.04)));
//! let rate = discount.value().unwrap().zero_rate(1.0).unwrap();
//! assert!((rate - 0.04).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `Date`, `Period`, `Currency`,
//!   `DayCountConvention`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod observability;
pub mod types;
