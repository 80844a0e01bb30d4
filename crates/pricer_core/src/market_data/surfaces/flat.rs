//! Flat volatility surface implementation.

use num_traits::Float;

use crate::market_data::error::MarketDataError;
use crate::types::time::{Date, DayCountConvention};

use super::VolatilitySurface;

/// Flat Black volatility surface: the same vol at every strike and expiry.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{FlatVol, VolatilitySurface};
/// use pricer_core::types::time::Date;
///
/// let reference = Date::from_ymd(2025, 1, 1).unwrap();
/// let surface = FlatVol::new(reference, 0.20_f64);
/// assert_eq!(surface.volatility(80.0, 0.5).unwrap(), 0.20);
/// assert_eq!(surface.volatility(120.0, 2.0).unwrap(), 0.20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatVol<T: Float> {
    reference_date: Date,
    vol: T,
    day_count: DayCountConvention,
}

impl<T: Float> FlatVol<T> {
    /// Constructs a flat surface anchored at `reference_date`, using the
    /// ACT/365 day count for date-keyed queries.
    #[inline]
    pub fn new(reference_date: Date, vol: T) -> Self {
        Self {
            reference_date,
            vol,
            day_count: DayCountConvention::Act365Fixed,
        }
    }

    /// Returns the constant volatility.
    #[inline]
    pub fn vol(&self) -> T {
        self.vol
    }
}

impl<T: Float> VolatilitySurface<T> for FlatVol<T> {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Returns the constant vol for any valid (strike, expiry).
    fn volatility(&self, strike: T, expiry: T) -> Result<T, MarketDataError> {
        if strike <= T::zero() {
            return Err(MarketDataError::InvalidStrike {
                strike: strike.to_f64().unwrap_or(0.0),
            });
        }
        if expiry <= T::zero() {
            return Err(MarketDataError::InvalidExpiry {
                expiry: expiry.to_f64().unwrap_or(0.0),
            });
        }
        Ok(self.vol)
    }
}
