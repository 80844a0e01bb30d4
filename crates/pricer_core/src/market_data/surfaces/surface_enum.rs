//! Static dispatch enum over volatility surface implementations.

use num_traits::Float;

use crate::market_data::error::MarketDataError;
use crate::types::time::{Date, DayCountConvention};

use super::{FlatVol, TermVol, VolatilitySurface};

/// Static dispatch enum wrapping the concrete volatility surfaces.
///
/// # Variants
///
/// - `Flat`: Constant vol
/// - `Term`: Strike-independent vol term structure
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{FlatVol, VolSurfaceEnum, VolatilitySurface};
/// use pricer_core::types::time::Date;
///
/// let reference = Date::from_ymd(2025, 1, 1).unwrap();
/// let surface = VolSurfaceEnum::Flat(FlatVol::new(reference, 0.20_f64));
/// assert_eq!(surface.volatility(100.0, 1.0).unwrap(), 0.20);
/// ```
#[derive(Debug, Clone)]
pub enum VolSurfaceEnum<T: Float> {
    /// Flat (constant) volatility
    Flat(FlatVol<T>),
    /// Vol term structure, linear in expiry
    Term(TermVol<T>),
}

impl<T: Float> VolSurfaceEnum<T> {
    /// Creates a flat surface variant anchored at `reference_date`.
    #[inline]
    pub fn flat(reference_date: Date, vol: T) -> Self {
        VolSurfaceEnum::Flat(FlatVol::new(reference_date, vol))
    }
}

impl<T: Float> VolatilitySurface<T> for VolSurfaceEnum<T> {
    fn reference_date(&self) -> Date {
        match self {
            VolSurfaceEnum::Flat(surface) => surface.reference_date(),
            VolSurfaceEnum::Term(surface) => surface.reference_date(),
        }
    }

    fn day_count(&self) -> DayCountConvention {
        match self {
            VolSurfaceEnum::Flat(surface) => surface.day_count(),
            VolSurfaceEnum::Term(surface) => surface.day_count(),
        }
    }

    fn volatility(&self, strike: T, expiry: T) -> Result<T, MarketDataError> {
        match self {
            VolSurfaceEnum::Flat(surface) => surface.volatility(strike, expiry),
            VolSurfaceEnum::Term(surface) => surface.volatility(strike, expiry),
        }
    }
}

impl<T: Float> From<FlatVol<T>> for VolSurfaceEnum<T> {
    fn from(surface: FlatVol<T>) -> Self {
        VolSurfaceEnum::Flat(surface)
    }
}

impl<T: Float> From<TermVol<T>> for VolSurfaceEnum<T> {
    fn from(surface: TermVol<T>) -> Self {
        VolSurfaceEnum::Term(surface)
    }
}
