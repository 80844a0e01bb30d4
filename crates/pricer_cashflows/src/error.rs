//! Cash-flow and pricer error types.
//!
//! Every variant is a precondition or contract violation raised
//! synchronously at the point of detection and propagated unmodified to
//! the caller. There are no retries and no partial results: a failed
//! valuation aborts the valuation of the containing instrument rather
//! than silently returning zero or a stale value.

use pricer_core::market_data::MarketDataError;
use pricer_core::types::Date;
use thiserror::Error;

/// Cash-flow valuation errors.
///
/// # Examples
///
/// ```
/// use pricer_cashflows::CashFlowError;
///
/// let err = CashFlowError::UnboundMarketData { handle: "correlation quote" };
/// assert!(format!("{}", err).contains("correlation quote"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CashFlowError {
    /// A required market-data handle is empty; the message names the
    /// handle so the failing input is identifiable.
    #[error("{handle} handle must be bound before valuation")]
    UnboundMarketData {
        /// Role of the unbound handle
        handle: &'static str,
    },

    /// Market-data sources disagree on the valuation date.
    #[error("reference date mismatch: {left} is anchored at {left_date}, {right} at {right_date}")]
    ReferenceDateMismatch {
        /// First source's role
        left: &'static str,
        /// First source's reference date
        left_date: Date,
        /// Second source's role
        right: &'static str,
        /// Second source's reference date
        right_date: Date,
    },

    /// Fixing date falls before the base date.
    #[error("fixing date {fixing} cannot fall before base date {base}")]
    FixingBeforeBase {
        /// The offending fixing date
        fixing: Date,
        /// The base date
        base: Date,
    },

    /// The cash flow's index is not the specialization the pricer needs.
    #[error("expected {expected} index, found {found} index")]
    IndexKindMismatch {
        /// Required index kind
        expected: &'static str,
        /// Actual index kind
        found: &'static str,
    },

    /// `price()` was queried before any `initialize()`.
    #[error("pricer queried before initialization")]
    NotInitialized,

    /// No fixing is recorded for the requested date.
    #[error("no fixing recorded for {index} on {date}")]
    MissingFixing {
        /// Index name
        index: String,
        /// Requested fixing date
        date: Date,
    },

    /// The date is not a valid fixing date for the index's calendar.
    #[error("{date} is not a valid fixing date for {index}")]
    InvalidFixingDate {
        /// Index name
        index: String,
        /// Rejected date
        date: Date,
    },

    /// Underlying market-data failure, propagated unmodified.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),
}
