//! Static dispatch enum over yield curve implementations.

use num_traits::Float;

use crate::market_data::error::MarketDataError;
use crate::types::time::{Date, DayCountConvention};

use super::{FlatCurve, InterpolatedCurve, QuantoCurve, YieldCurve};

/// Static dispatch enum wrapping the concrete yield curves.
///
/// This is the closed set of curve shapes the valuation core composes;
/// handles point at this enum rather than at trait objects, keeping
/// dispatch static and the generic `T: Float` parameter intact.
///
/// # Variants
///
/// - `Flat`: Constant-rate curve
/// - `Interpolated`: Pillar-based zero curve
/// - `Quanto`: Quanto drift-adjusted growth curve
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{CurveEnum, YieldCurve};
/// use pricer_core::types::time::Date;
///
/// let reference = Date::from_ymd(2025, 1, 1).unwrap();
/// let curve = CurveEnum::flat(reference, 0.05_f64);
/// let df = curve.discount(1.0).unwrap();
/// assert!((df - 0.951229).abs() < 1e-5);
/// ```
#[derive(Debug, Clone)]
pub enum CurveEnum<T: Float> {
    /// Flat (constant rate) yield curve
    Flat(FlatCurve<T>),
    /// Interpolated yield curve with pillar points
    Interpolated(InterpolatedCurve<T>),
    /// Quanto drift-adjusted composition
    Quanto(QuantoCurve<T>),
}

impl<T: Float> CurveEnum<T> {
    /// Creates a flat curve variant anchored at `reference_date`.
    #[inline]
    pub fn flat(reference_date: Date, rate: T) -> Self {
        CurveEnum::Flat(FlatCurve::new(reference_date, rate))
    }
}

impl<T: Float> YieldCurve<T> for CurveEnum<T> {
    fn reference_date(&self) -> Date {
        match self {
            CurveEnum::Flat(curve) => curve.reference_date(),
            CurveEnum::Interpolated(curve) => curve.reference_date(),
            CurveEnum::Quanto(curve) => curve.reference_date(),
        }
    }

    fn day_count(&self) -> DayCountConvention {
        match self {
            CurveEnum::Flat(curve) => curve.day_count(),
            CurveEnum::Interpolated(curve) => curve.day_count(),
            CurveEnum::Quanto(curve) => curve.day_count(),
        }
    }

    fn discount(&self, t: T) -> Result<T, MarketDataError> {
        match self {
            CurveEnum::Flat(curve) => curve.discount(t),
            CurveEnum::Interpolated(curve) => curve.discount(t),
            CurveEnum::Quanto(curve) => curve.discount(t),
        }
    }

    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        match self {
            CurveEnum::Flat(curve) => curve.zero_rate(t),
            CurveEnum::Interpolated(curve) => curve.zero_rate(t),
            CurveEnum::Quanto(curve) => curve.zero_rate(t),
        }
    }

    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        match self {
            CurveEnum::Flat(curve) => curve.forward_rate(t1, t2),
            CurveEnum::Interpolated(curve) => curve.forward_rate(t1, t2),
            CurveEnum::Quanto(curve) => curve.forward_rate(t1, t2),
        }
    }
}

impl<T: Float> From<FlatCurve<T>> for CurveEnum<T> {
    fn from(curve: FlatCurve<T>) -> Self {
        CurveEnum::Flat(curve)
    }
}

impl<T: Float> From<InterpolatedCurve<T>> for CurveEnum<T> {
    fn from(curve: InterpolatedCurve<T>) -> Self {
        CurveEnum::Interpolated(curve)
    }
}

impl<T: Float> From<QuantoCurve<T>> for CurveEnum<T> {
    fn from(curve: QuantoCurve<T>) -> Self {
        CurveEnum::Quanto(curve)
    }
}
