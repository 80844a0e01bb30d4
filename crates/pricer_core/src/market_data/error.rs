//! Market data error types.
//!
//! Structured error handling for yield curve, volatility surface, and
//! handle operations. All variants are precondition violations raised at
//! the point of detection and propagated unmodified.

use thiserror::Error;

/// Market data operation errors.
///
/// # Variants
///
/// - `InvalidMaturity`: Negative (or, for rates, non-positive) time
/// - `InvalidStrike`: Non-positive strike price
/// - `InvalidExpiry`: Non-positive time to expiry
/// - `OutOfBounds`: Query outside the pillar span
/// - `InsufficientData`: Not enough points for construction
/// - `UnsortedPillars`: Pillar dates not strictly increasing
/// - `UnlinkedHandle`: A required handle is not linked to any target
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::UnlinkedHandle { handle: "equity volatility" };
/// assert!(format!("{}", err).contains("equity volatility"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Invalid maturity (negative time).
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The invalid maturity value
        t: f64,
    },

    /// Invalid strike price (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid expiry (non-positive).
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Query point outside valid domain.
    #[error("Out of bounds: {x} not in [{min}, {max}]")]
    OutOfBounds {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Insufficient data for construction.
    #[error("Insufficient data: got {got}, need {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Pillar dates must be strictly increasing and after the reference date.
    #[error("Pillar dates must be strictly increasing after the reference date")]
    UnsortedPillars,

    /// A required market-data handle has no target.
    #[error("{handle} handle is not linked to any market data")]
    UnlinkedHandle {
        /// Role of the handle in the failing computation
        handle: &'static str,
    },
}
