//! # pricer_cashflows: Indexed Cash Flows and Lazy Valuation Strategies
//!
//! ## Layer 2 (Entities) Role
//!
//! Builds on `pricer_core` to provide the cash-flow entities of the
//! valuation engine:
//! - [`IndexedCashFlow`]: a payment driven by the ratio of two index
//!   observations
//! - [`EquityCashFlow`]: lazy caching plus a pluggable valuation strategy
//! - [`EquityCashFlowPricer`] / [`EquityQuantoPricer`]: the strategy
//!   contract and its cross-currency (quanto) implementation
//! - [`ZeroInflationCashFlow`]: lag-and-interpolate CPI payoff
//! - [`CashFlow`] / [`Leg`]: the closed payoff variant and leg-level
//!   operations such as [`set_equity_pricer`]
//!
//! ## Laziness and Invalidation
//!
//! Valuation is pull-based: nothing computes until `amount()` is read,
//! and the result is cached. Every market-data object a valuation
//! depends on participates in the notification graph, so mutating a
//! quote or relinking a curve handle invalidates exactly the cached
//! amounts downstream of it; the next read recomputes.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_cashflows::{CpiInterpolation, ZeroInflationCashFlow, ZeroInflationIndex};
//! use pricer_core::types::{Currency, Date, Period};
//! use std::rc::Rc;
//!
//! let index = ZeroInflationIndex::new("CPI", Currency::GBP);
//! index.add_fixing(Date::from_ymd(2024, 10, 1).unwrap(), 100.0);
//! index.add_fixing(Date::from_ymd(2025, 10, 1).unwrap(), 105.0);
//!
//! let cash_flow = ZeroInflationCashFlow::new(
//!     10_000.0,
//!     Rc::new(index),
//!     CpiInterpolation::Flat,
//!     Date::from_ymd(2025, 1, 1).unwrap(),
//!     Date::from_ymd(2026, 1, 1).unwrap(),
//!     Period::Months(3),
//!     Date::from_ymd(2026, 1, 5).unwrap(),
//!     false,
//! );
//! assert!((cash_flow.amount().unwrap() - 10_500.0).abs() < 1e-8);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for the plain data types (forwards to
//!   `pricer_core/serde`)

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod cashflow;
pub mod equity;
pub mod error;
pub mod indexed;
pub mod indexes;
pub mod inflation;
pub mod pricer;
pub mod quanto;

// Re-export the primary types at crate level
pub use cashflow::{set_equity_pricer, CashFlow, Leg};
pub use equity::EquityCashFlow;
pub use error::CashFlowError;
pub use indexed::IndexedCashFlow;
pub use indexes::{
    inflation_period, lagged_fixing, CpiInterpolation, EquityIndex, IndexRef, ZeroInflationIndex,
};
pub use inflation::ZeroInflationCashFlow;
pub use pricer::EquityCashFlowPricer;
pub use quanto::EquityQuantoPricer;
