//! Yield curve trait definition.

use num_traits::Float;

use crate::market_data::error::MarketDataError;
use crate::types::time::{Date, DayCountConvention};

/// Generic, date-anchored yield curve for discount factor and rate queries.
///
/// All implementations are generic over `T: Float` so the same curve code
/// serves standard floating-point types and automatic-differentiation
/// types. Every curve is anchored at a reference (valuation) date and
/// carries the day count used to turn dates into year fractions.
///
/// # Contract
///
/// - `discount(t)` returns the discount factor D(t) for maturity t
/// - `zero_rate(t)` returns the continuously compounded zero rate r(t)
/// - `forward_rate(t1, t2)` returns the forward rate between t1 and t2
/// - `discount_on(date)` keys the lookup by calendar date
///
/// # Invariants
///
/// - D(0) = 1
/// - D(t) > 0 for all valid t
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
///
/// let rate = curve.zero_rate(1.0).unwrap();
/// assert!((rate - 0.05).abs() < 1e-10);
/// ```
pub trait YieldCurve<T: Float> {
    /// Returns the curve's reference (valuation) date.
    fn reference_date(&self) -> Date;

    /// Returns the day count convention used for date-keyed queries.
    fn day_count(&self) -> DayCountConvention;

    /// Returns the discount factor for maturity `t` in years.
    ///
    /// # Returns
    ///
    /// * `Ok(D(t))` - Discount factor at time t
    /// * `Err(MarketDataError::InvalidMaturity)` - If t < 0
    fn discount(&self, t: T) -> Result<T, MarketDataError>;

    /// Returns the continuously compounded zero rate for maturity `t`.
    ///
    /// # Default Implementation
    ///
    /// ```text
    /// r(t) = -ln(D(t)) / t
    /// ```
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        let df = self.discount(t)?;
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        Ok(-df.ln() / t)
    }

    /// Returns the forward rate between `t1` and `t2`.
    ///
    /// # Default Implementation
    ///
    /// ```text
    /// f(t1, t2) = -ln(D(t2) / D(t1)) / (t2 - t1)
    /// ```
    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        let df1 = self.discount(t1)?;
        let df2 = self.discount(t2)?;
        let dt = t2 - t1;
        if dt <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: dt.to_f64().unwrap_or(0.0),
            });
        }
        Ok(-(df2 / df1).ln() / dt)
    }

    /// Returns the discount factor for a calendar date.
    ///
    /// The date is converted to a year fraction from the reference date
    /// with the curve's day count; dates before the reference date fail
    /// with `InvalidMaturity`.
    fn discount_on(&self, date: Date) -> Result<T, MarketDataError> {
        let yf = self.day_count().year_fraction(self.reference_date(), date);
        let t = T::from(yf).ok_or(MarketDataError::InvalidMaturity { t: yf })?;
        self.discount(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Mock implementation exercising the default methods
    struct MockCurve {
        reference: Date,
        rate: f64,
    }

    impl YieldCurve<f64> for MockCurve {
        fn reference_date(&self) -> Date {
            self.reference
        }

        fn day_count(&self) -> DayCountConvention {
            DayCountConvention::Act365Fixed
        }

        fn discount(&self, t: f64) -> Result<f64, MarketDataError> {
            if t < 0.0 {
                return Err(MarketDataError::InvalidMaturity { t });
            }
            Ok((-self.rate * t).exp())
        }
    }

    fn mock() -> MockCurve {
        MockCurve {
            reference: Date::from_ymd(2025, 1, 1).unwrap(),
            rate: 0.05,
        }
    }

    #[test]
    fn test_default_zero_rate() {
        let r = mock().zero_rate(1.0).unwrap();
        assert!((r - 0.05).abs() < 1e-10);
    }

    #[test]
    fn test_default_zero_rate_invalid_maturity() {
        let result = mock().zero_rate(0.0);
        assert!(matches!(
            result,
            Err(MarketDataError::InvalidMaturity { .. })
        ));
    }

    #[test]
    fn test_default_forward_rate() {
        let f = mock().forward_rate(1.0, 2.0).unwrap();
        assert!((f - 0.05).abs() < 1e-10);
    }

    #[test]
    fn test_default_forward_rate_invalid() {
        assert!(mock().forward_rate(2.0, 1.0).is_err());
    }

    #[test]
    fn test_discount_on_date() {
        let curve = mock();
        let date = Date::from_ymd(2026, 1, 1).unwrap(); // 365 days out
        let df = curve.discount_on(date).unwrap();
        assert!((df - (-0.05_f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_discount_on_date_before_reference() {
        let curve = mock();
        let date = Date::from_ymd(2024, 12, 1).unwrap();
        assert!(curve.discount_on(date).is_err());
    }
}
