//! Volatility surface trait definition.

use num_traits::Float;

use crate::market_data::error::MarketDataError;
use crate::types::time::{Date, DayCountConvention};

/// Generic, date-anchored Black volatility surface.
///
/// All implementations are generic over `T: Float` for AD compatibility.
/// Surfaces are anchored at a reference (valuation) date so consumers can
/// check that every market-data input to a valuation shares the same
/// anchor.
///
/// # Contract
///
/// - `volatility(strike, expiry)` returns the implied volatility σ(K, T)
/// - `volatility_on(strike, date)` keys the expiry by calendar date
///
/// # Invariants
///
/// - σ >= 0 for all valid (strike, expiry) pairs
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{FlatVol, VolatilitySurface};
/// use pricer_core::types::time::Date;
///
/// let reference = Date::from_ymd(2025, 1, 1).unwrap();
/// let surface = FlatVol::new(reference, 0.20_f64);
/// assert_eq!(surface.volatility(100.0, 1.0).unwrap(), 0.20);
/// ```
pub trait VolatilitySurface<T: Float> {
    /// Returns the surface's reference (valuation) date.
    fn reference_date(&self) -> Date;

    /// Returns the day count convention used for date-keyed queries.
    fn day_count(&self) -> DayCountConvention;

    /// Returns the implied volatility for a strike and an expiry in years.
    ///
    /// # Returns
    ///
    /// * `Ok(sigma)` - Implied volatility
    /// * `Err(MarketDataError::InvalidStrike)` - If strike <= 0
    /// * `Err(MarketDataError::InvalidExpiry)` - If expiry <= 0
    fn volatility(&self, strike: T, expiry: T) -> Result<T, MarketDataError>;

    /// Returns the implied volatility with the expiry keyed by date.
    fn volatility_on(&self, strike: T, date: Date) -> Result<T, MarketDataError> {
        let yf = self.day_count().year_fraction(self.reference_date(), date);
        let expiry = T::from(yf).ok_or(MarketDataError::InvalidExpiry { expiry: yf })?;
        self.volatility(strike, expiry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockSurface {
        reference: Date,
        sigma: f64,
    }

    impl VolatilitySurface<f64> for MockSurface {
        fn reference_date(&self) -> Date {
            self.reference
        }

        fn day_count(&self) -> DayCountConvention {
            DayCountConvention::Act365Fixed
        }

        fn volatility(&self, strike: f64, expiry: f64) -> Result<f64, MarketDataError> {
            if strike <= 0.0 {
                return Err(MarketDataError::InvalidStrike { strike });
            }
            if expiry <= 0.0 {
                return Err(MarketDataError::InvalidExpiry { expiry });
            }
            Ok(self.sigma)
        }
    }

    fn mock() -> MockSurface {
        MockSurface {
            reference: Date::from_ymd(2025, 1, 1).unwrap(),
            sigma: 0.25,
        }
    }

    #[test]
    fn test_mock_volatility() {
        assert_eq!(mock().volatility(100.0, 1.0).unwrap(), 0.25);
    }

    #[test]
    fn test_mock_invalid_inputs() {
        assert!(mock().volatility(0.0, 1.0).is_err());
        assert!(mock().volatility(100.0, 0.0).is_err());
    }

    #[test]
    fn test_volatility_on_date() {
        let surface = mock();
        let date = Date::from_ymd(2026, 1, 1).unwrap();
        assert_eq!(surface.volatility_on(100.0, date).unwrap(), 0.25);
    }

    #[test]
    fn test_volatility_on_date_before_reference() {
        let surface = mock();
        let date = Date::from_ymd(2024, 1, 1).unwrap();
        assert!(surface.volatility_on(100.0, date).is_err());
    }
}
