//! Strike-independent volatility term structure.

use num_traits::Float;

use crate::market_data::error::MarketDataError;
use crate::types::time::{Date, DayCountConvention};

use super::VolatilitySurface;

/// Volatility term structure: vol depends on expiry only, linear between
/// pillar expiries and flat-extrapolated outside them.
///
/// Suitable for FX volatility inputs where the valuation only ever reads
/// one level per expiry.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{TermVol, VolatilitySurface};
/// use pricer_core::types::time::{Date, Period};
///
/// let reference = Date::from_ymd(2025, 1, 1).unwrap();
/// let surface = TermVol::new(
///     reference,
///     &[
///         (reference + Period::Years(1), 0.10_f64),
///         (reference + Period::Years(2), 0.20),
///     ],
/// )
/// .unwrap();
///
/// // Flat before the first pillar, linear in between.
/// assert_eq!(surface.volatility(100.0, 0.5).unwrap(), 0.10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TermVol<T: Float> {
    reference_date: Date,
    day_count: DayCountConvention,
    times: Vec<T>,
    vols: Vec<T>,
}

impl<T: Float> TermVol<T> {
    /// Constructs a term structure from (expiry date, vol) pillars, using
    /// ACT/365 for the date-to-time conversion.
    ///
    /// # Returns
    ///
    /// * `Err(MarketDataError::InsufficientData)` - No pillars
    /// * `Err(MarketDataError::UnsortedPillars)` - Dates not strictly
    ///   increasing or not after the reference date
    pub fn new(reference_date: Date, pillars: &[(Date, T)]) -> Result<Self, MarketDataError> {
        if pillars.is_empty() {
            return Err(MarketDataError::InsufficientData { got: 0, need: 1 });
        }

        let day_count = DayCountConvention::Act365Fixed;
        let mut times = Vec::with_capacity(pillars.len());
        let mut vols = Vec::with_capacity(pillars.len());
        let mut previous = reference_date;
        for (date, vol) in pillars {
            if *date <= previous {
                return Err(MarketDataError::UnsortedPillars);
            }
            previous = *date;
            let yf = day_count.year_fraction(reference_date, *date);
            let t = T::from(yf).ok_or(MarketDataError::InvalidExpiry { expiry: yf })?;
            times.push(t);
            vols.push(*vol);
        }

        Ok(Self {
            reference_date,
            day_count,
            times,
            vols,
        })
    }
}

impl<T: Float> VolatilitySurface<T> for TermVol<T> {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Returns the interpolated vol at `expiry`; the strike is ignored
    /// (validated only for sign).
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

        let first = self.times[0];
        let last = self.times[self.times.len() - 1];
        if expiry <= first {
            return Ok(self.vols[0]);
        }
        if expiry >= last {
            return Ok(self.vols[self.vols.len() - 1]);
        }

        let idx = self
            .times
            .windows(2)
            .position(|w| expiry <= w[1])
            .unwrap_or(self.times.len() - 2);
        let (t0, t1) = (self.times[idx], self.times[idx + 1]);
        let (v0, v1) = (self.vols[idx], self.vols[idx + 1]);
        let weight = (expiry - t0) / (t1 - t0);
        Ok(v0 + weight * (v1 - v0))
    }
}
