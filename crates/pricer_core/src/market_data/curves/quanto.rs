//! Quanto-adjusted yield curve composition.

use std::rc::Rc;

use num_traits::Float;

use crate::market_data::error::MarketDataError;
use crate::market_data::handle::Handle;
use crate::market_data::surfaces::{VolSurfaceEnum, VolatilitySurface};
use crate::types::time::{Date, DayCountConvention};

use super::curve_enum::CurveEnum;
use super::YieldCurve;

/// Growth curve implementing the standard quanto drift adjustment.
///
/// Composes a dividend curve, the settlement-currency discount curve, the
/// underlying's own interest-rate curve, an equity volatility surface
/// evaluated at a fixed strike, an FX volatility surface evaluated at a
/// fixed ATM level, and an equity/FX correlation:
///
/// ```text
/// z(t) = z_div(t) + z_dom(t) - z_for(t) + rho * sigma_eq(K, t) * sigma_fx(atm, t)
/// ```
///
/// Substituted as the dividend (growth) curve of an equity index whose
/// interest curve is replaced by the settlement-currency curve, this
/// shifts the index forward growth by the equity/FX covariance term, so
/// the payoff can be valued as if the index were denominated directly in
/// the settlement currency.
///
/// Handles are resolved at every query, so relinking an input curve is
/// seen by the next lookup without rebuilding the composition. The
/// correlation is a plain value: callers that want a live correlation
/// rebuild the (cheap) composition per valuation.
#[derive(Debug, Clone)]
pub struct QuantoCurve<T: Float> {
    dividend: Handle<CurveEnum<T>>,
    domestic: Handle<CurveEnum<T>>,
    foreign: Handle<CurveEnum<T>>,
    equity_vol: Handle<VolSurfaceEnum<T>>,
    strike: T,
    fx_vol: Handle<VolSurfaceEnum<T>>,
    fx_atm: T,
    correlation: T,
    reference_date: Date,
    day_count: DayCountConvention,
}

impl<T: Float> QuantoCurve<T> {
    /// Composes the quanto-adjusted curve.
    ///
    /// All five handles must be bound; the reference date and day count
    /// are inherited from the dividend curve.
    ///
    /// # Arguments
    ///
    /// * `dividend` - Underlying's dividend curve
    /// * `domestic` - Settlement (quanto) currency discount curve
    /// * `foreign` - Underlying's own interest-rate curve
    /// * `equity_vol` - Equity volatility surface
    /// * `strike` - Strike the equity volatility is read at
    /// * `fx_vol` - FX volatility surface
    /// * `fx_atm` - ATM level the FX volatility is read at
    /// * `correlation` - Equity/FX correlation
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        dividend: Handle<CurveEnum<T>>,
        domestic: Handle<CurveEnum<T>>,
        foreign: Handle<CurveEnum<T>>,
        equity_vol: Handle<VolSurfaceEnum<T>>,
        strike: T,
        fx_vol: Handle<VolSurfaceEnum<T>>,
        fx_atm: T,
        correlation: T,
    ) -> Result<Self, MarketDataError> {
        let dividend_curve = resolve_curve(&dividend, "dividend curve")?;
        resolve_curve(&domestic, "quanto currency curve")?;
        resolve_curve(&foreign, "equity interest rate curve")?;
        resolve_surface(&equity_vol, "equity volatility")?;
        resolve_surface(&fx_vol, "FX volatility")?;

        let reference_date = dividend_curve.reference_date();
        let day_count = dividend_curve.day_count();

        Ok(Self {
            dividend,
            domestic,
            foreign,
            equity_vol,
            strike,
            fx_vol,
            fx_atm,
            correlation,
            reference_date,
            day_count,
        })
    }

    /// Returns the correlation baked into this composition.
    #[inline]
    pub fn correlation(&self) -> T {
        self.correlation
    }

    /// Returns the strike the equity volatility is read at.
    #[inline]
    pub fn strike(&self) -> T {
        self.strike
    }
}

fn resolve_curve<T: Float>(
    handle: &Handle<CurveEnum<T>>,
    role: &'static str,
) -> Result<Rc<CurveEnum<T>>, MarketDataError> {
    handle
        .value()
        .ok_or(MarketDataError::UnlinkedHandle { handle: role })
}

fn resolve_surface<T: Float>(
    handle: &Handle<VolSurfaceEnum<T>>,
    role: &'static str,
) -> Result<Rc<VolSurfaceEnum<T>>, MarketDataError> {
    handle
        .value()
        .ok_or(MarketDataError::UnlinkedHandle { handle: role })
}

impl<T: Float> YieldCurve<T> for QuantoCurve<T> {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Returns `exp(-z(t) * t)` with the quanto-adjusted zero rate.
    fn discount(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        if t == T::zero() {
            return Ok(T::one());
        }
        let rate = self.zero_rate(t)?;
        Ok((-rate * t).exp())
    }

    /// Returns the quanto-adjusted zero rate at `t`.
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }

        let dividend = resolve_curve(&self.dividend, "dividend curve")?.zero_rate(t)?;
        let domestic = resolve_curve(&self.domestic, "quanto currency curve")?.zero_rate(t)?;
        let foreign = resolve_curve(&self.foreign, "equity interest rate curve")?.zero_rate(t)?;
        let sigma_equity =
            resolve_surface(&self.equity_vol, "equity volatility")?.volatility(self.strike, t)?;
        let sigma_fx =
            resolve_surface(&self.fx_vol, "FX volatility")?.volatility(self.fx_atm, t)?;

        Ok(dividend + domestic - foreign + self.correlation * sigma_equity * sigma_fx)
    }
}
