//! Pillar-based interpolated yield curve.

use num_traits::Float;

use crate::market_data::error::MarketDataError;
use crate::types::time::{Date, DayCountConvention};

use super::YieldCurve;

/// Yield curve defined by zero rates at pillar dates, linear in the year
/// fraction between pillars.
///
/// Queries outside the pillar span fail with `OutOfBounds`; this curve
/// holds already-built data and does not extrapolate. Bootstrapping the
/// pillar rates from instruments happens outside this library.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{InterpolatedCurve, YieldCurve};
/// use pricer_core::types::time::{Date, Period};
///
/// let reference = Date::from_ymd(2025, 1, 1).unwrap();
/// let pillars = [
///     (reference + Period::Months(6), 0.02_f64),
///     (reference + Period::Years(1), 0.03),
///     (reference + Period::Years(2), 0.04),
/// ];
/// let curve = InterpolatedCurve::new(reference, &pillars).unwrap();
///
/// let rate = curve.zero_rate(1.0).unwrap();
/// assert!((rate - 0.03).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedCurve<T: Float> {
    reference_date: Date,
    day_count: DayCountConvention,
    times: Vec<T>,
    rates: Vec<T>,
}

impl<T: Float> InterpolatedCurve<T> {
    /// Constructs a curve from zero-rate pillars, using ACT/365 for the
    /// date-to-time conversion.
    ///
    /// # Arguments
    ///
    /// * `reference_date` - Valuation date the curve is anchored at
    /// * `pillars` - (date, zero rate) pairs, strictly increasing dates
    ///   after the reference date
    ///
    /// # Returns
    ///
    /// * `Err(MarketDataError::InsufficientData)` - Fewer than two pillars
    /// * `Err(MarketDataError::UnsortedPillars)` - Dates not strictly
    ///   increasing or not after the reference date
    pub fn new(reference_date: Date, pillars: &[(Date, T)]) -> Result<Self, MarketDataError> {
        Self::with_day_count(reference_date, pillars, DayCountConvention::Act365Fixed)
    }

    /// Constructs a curve with an explicit day count convention.
    pub fn with_day_count(
        reference_date: Date,
        pillars: &[(Date, T)],
        day_count: DayCountConvention,
    ) -> Result<Self, MarketDataError> {
        if pillars.len() < 2 {
            return Err(MarketDataError::InsufficientData {
                got: pillars.len(),
                need: 2,
            });
        }

        let mut times = Vec::with_capacity(pillars.len());
        let mut rates = Vec::with_capacity(pillars.len());
        let mut previous = reference_date;
        for (date, rate) in pillars {
            if *date <= previous {
                return Err(MarketDataError::UnsortedPillars);
            }
            previous = *date;
            let yf = day_count.year_fraction(reference_date, *date);
            let t = T::from(yf).ok_or(MarketDataError::InvalidMaturity { t: yf })?;
            times.push(t);
            rates.push(*rate);
        }

        Ok(Self {
            reference_date,
            day_count,
            times,
            rates,
        })
    }

    /// Returns the number of pillars.
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns true if the curve has no pillars (never, by construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    fn interpolated_rate(&self, t: T) -> Result<T, MarketDataError> {
        let first = self.times[0];
        let last = self.times[self.times.len() - 1];
        if t < first || t > last {
            return Err(MarketDataError::OutOfBounds {
                x: t.to_f64().unwrap_or(0.0),
                min: first.to_f64().unwrap_or(0.0),
                max: last.to_f64().unwrap_or(0.0),
            });
        }

        let idx = self
            .times
            .windows(2)
            .position(|w| t <= w[1])
            .unwrap_or(self.times.len() - 2);
        let (t0, t1) = (self.times[idx], self.times[idx + 1]);
        let (r0, r1) = (self.rates[idx], self.rates[idx + 1]);
        let weight = (t - t0) / (t1 - t0);
        Ok(r0 + weight * (r1 - r0))
    }
}

impl<T: Float> YieldCurve<T> for InterpolatedCurve<T> {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Returns `exp(-r(t) * t)` with `r` linearly interpolated.
    ///
    /// `discount(0)` is 1 by definition; other maturities below the first
    /// pillar are out of bounds.
    fn discount(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        if t == T::zero() {
            return Ok(T::one());
        }
        let rate = self.interpolated_rate(t)?;
        Ok((-rate * t).exp())
    }

    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        self.interpolated_rate(t)
    }
}
