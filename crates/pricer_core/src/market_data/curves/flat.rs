//! Flat yield curve implementation.

use num_traits::Float;

use crate::market_data::error::MarketDataError;
use crate::types::time::{Date, DayCountConvention};

use super::YieldCurve;

/// Flat yield curve with a constant continuously compounded rate.
///
/// The same rate applies to every maturity. Besides prototyping and
/// testing, this is the curve synthesized when a dividend handle is left
/// unbound: a zero-rate flat curve anchored at the valuation date.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{FlatCurve, YieldCurve};
/// use pricer_core::types::time::Date;
///
/// let reference = Date::from_ymd(2025, 1, 1).unwrap();
/// let curve = FlatCurve::new(reference, 0.05_f64);
///
/// let df = curve.discount(1.0).unwrap();
/// assert!((df - 0.951229).abs() < 1e-5);
/// assert_eq!(curve.zero_rate(5.0).unwrap(), 0.05);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatCurve<T: Float> {
    reference_date: Date,
    rate: T,
    day_count: DayCountConvention,
}

impl<T: Float> FlatCurve<T> {
    /// Constructs a flat curve anchored at `reference_date`, using the
    /// ACT/365 day count for date-keyed queries.
    ///
    /// # Arguments
    ///
    /// * `reference_date` - Valuation date the curve is anchored at
    /// * `rate` - Constant continuously compounded rate
    #[inline]
    pub fn new(reference_date: Date, rate: T) -> Self {
        Self {
            reference_date,
            rate,
            day_count: DayCountConvention::Act365Fixed,
        }
    }

    /// Constructs a flat curve with an explicit day count convention.
    #[inline]
    pub fn with_day_count(reference_date: Date, rate: T, day_count: DayCountConvention) -> Self {
        Self {
            reference_date,
            rate,
            day_count,
        }
    }

    /// Returns the constant rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }
}

impl<T: Float> YieldCurve<T> for FlatCurve<T> {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Returns `exp(-r * t)`, failing for negative maturities.
    fn discount(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        Ok((-self.rate * t).exp())
    }

    /// Returns the constant rate for any positive maturity.
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        Ok(self.rate)
    }

    /// Returns the constant rate for any valid period.
    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        if t2 <= t1 {
            return Err(MarketDataError::InvalidMaturity {
                t: (t2 - t1).to_f64().unwrap_or(0.0),
            });
        }
        Ok(self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference() -> Date {
        Date::from_ymd(2025, 1, 1).unwrap()
    }

    // ========================================
    // Construction Tests
    // ========================================

    #[test]
    fn test_new() {
        let curve = FlatCurve::new(reference(), 0.05_f64);
        assert_eq!(curve.rate(), 0.05);
        assert_eq!(curve.reference_date(), reference());
        assert_eq!(curve.day_count(), DayCountConvention::Act365Fixed);
    }

    #[test]
    fn test_with_day_count() {
        let curve = FlatCurve::with_day_count(reference(), 0.05_f64, DayCountConvention::Act360);
        assert_eq!(curve.day_count(), DayCountConvention::Act360);
    }

    #[test]
    fn test_negative_rate_is_valid() {
        let curve = FlatCurve::new(reference(), -0.01_f64);
        assert_eq!(curve.rate(), -0.01);
        let df = curve.discount(1.0).unwrap();
        assert_relative_eq!(df, 0.01_f64.exp(), epsilon = 1e-12);
    }

    // ========================================
    // Discount Factor Tests
    // ========================================

    #[test]
    fn test_discount_at_zero() {
        let curve = FlatCurve::new(reference(), 0.05_f64);
        assert_relative_eq!(curve.discount(0.0).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_discount_at_multiple_maturities() {
        let curve = FlatCurve::new(reference(), 0.05_f64);
        for t in [0.5, 1.0, 2.0, 5.0, 10.0] {
            let df = curve.discount(t).unwrap();
            assert_relative_eq!(df, (-0.05 * t).exp(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_discount_negative_maturity() {
        let curve = FlatCurve::new(reference(), 0.05_f64);
        assert!(matches!(
            curve.discount(-1.0),
            Err(MarketDataError::InvalidMaturity { t }) if t == -1.0
        ));
    }

    #[test]
    fn test_discount_with_zero_rate() {
        let curve = FlatCurve::new(reference(), 0.0_f64);
        assert_relative_eq!(curve.discount(5.0).unwrap(), 1.0, epsilon = 1e-12);
    }

    // ========================================
    // Rate Tests
    // ========================================

    #[test]
    fn test_zero_rate_constant() {
        let curve = FlatCurve::new(reference(), 0.03_f64);
        for t in [0.25, 0.5, 1.0, 2.0, 10.0] {
            assert_relative_eq!(curve.zero_rate(t).unwrap(), 0.03, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_zero_rate_invalid_maturity() {
        let curve = FlatCurve::new(reference(), 0.05_f64);
        assert!(curve.zero_rate(0.0).is_err());
        assert!(curve.zero_rate(-1.0).is_err());
    }

    #[test]
    fn test_forward_rate_constant() {
        let curve = FlatCurve::new(reference(), 0.04_f64);
        for (t1, t2) in [(0.0, 1.0), (1.0, 2.0), (0.5, 1.5)] {
            assert_relative_eq!(curve.forward_rate(t1, t2).unwrap(), 0.04, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_forward_rate_invalid() {
        let curve = FlatCurve::new(reference(), 0.05_f64);
        assert!(curve.forward_rate(2.0, 1.0).is_err());
        assert!(curve.forward_rate(1.0, 1.0).is_err());
    }

    // ========================================
    // Date-Keyed Tests
    // ========================================

    #[test]
    fn test_discount_on_date() {
        let curve = FlatCurve::new(reference(), 0.05_f64);
        let one_year_out = Date::from_ymd(2026, 1, 1).unwrap();
        let df = curve.discount_on(one_year_out).unwrap();
        assert_relative_eq!(df, (-0.05_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_with_f32() {
        let curve = FlatCurve::new(reference(), 0.05_f32);
        let df = curve.discount(1.0_f32).unwrap();
        assert!((df - (-0.05_f32).exp()).abs() < 1e-6);
    }
}
