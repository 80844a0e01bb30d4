//! Zero inflation cash flow with lagged, interpolated fixings.

use std::rc::Rc;

use pricer_core::types::{Date, Period};

use crate::error::CashFlowError;
use crate::indexed::IndexedCashFlow;
use crate::indexes::{lagged_fixing, CpiInterpolation, IndexRef, ZeroInflationIndex};

/// Inflation-linked cash flow paying the ratio of two lagged CPI
/// observations.
///
/// Constructed from the contractual (unlagged) start and end dates plus
/// an observation lag; the inner indexed cash flow's base and fixing
/// dates are derived as `start - lag` and `end - lag` for bookkeeping.
/// The fixings themselves are read through [`lagged_fixing`] applied to
/// the *unlagged* start/end dates with the stored lag and interpolation,
/// so the lag is applied twice at the lookup layer by construction. Both
/// legs of the ratio use the same lag and interpolation, keeping the two
/// observations mutually consistent.
#[derive(Debug)]
pub struct ZeroInflationCashFlow {
    inner: IndexedCashFlow,
    index: Rc<ZeroInflationIndex>,
    interpolation: CpiInterpolation,
    start_date: Date,
    end_date: Date,
    observation_lag: Period,
}

impl ZeroInflationCashFlow {
    /// Creates a zero inflation cash flow.
    ///
    /// # Arguments
    ///
    /// * `notional` - Payment notional
    /// * `index` - Shared monthly inflation index
    /// * `interpolation` - Reading mode for both fixings
    /// * `start_date` - Contractual (unlagged) start date
    /// * `end_date` - Contractual (unlagged) end date
    /// * `observation_lag` - Publication lag of the index
    /// * `payment_date` - Payment date
    /// * `growth_only` - Growth-only payoff shape when true
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        notional: f64,
        index: Rc<ZeroInflationIndex>,
        interpolation: CpiInterpolation,
        start_date: Date,
        end_date: Date,
        observation_lag: Period,
        payment_date: Date,
        growth_only: bool,
    ) -> Self {
        let base_date = start_date - observation_lag;
        let fixing_date = end_date - observation_lag;
        Self {
            inner: IndexedCashFlow::new(
                notional,
                index.clone(),
                base_date,
                fixing_date,
                payment_date,
                growth_only,
            ),
            index,
            interpolation,
            start_date,
            end_date,
            observation_lag,
        }
    }

    /// Returns the notional.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.inner.notional()
    }

    /// Returns the observed index as the generic reference.
    #[inline]
    pub fn index(&self) -> &IndexRef {
        self.inner.index()
    }

    /// Returns the inflation index.
    #[inline]
    pub fn zero_inflation_index(&self) -> &Rc<ZeroInflationIndex> {
        &self.index
    }

    /// Returns the interpolation mode used for both fixings.
    #[inline]
    pub fn observation_interpolation(&self) -> CpiInterpolation {
        self.interpolation
    }

    /// Returns the contractual start date.
    #[inline]
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// Returns the contractual end date.
    #[inline]
    pub fn end_date(&self) -> Date {
        self.end_date
    }

    /// Returns the observation lag.
    #[inline]
    pub fn observation_lag(&self) -> Period {
        self.observation_lag
    }

    /// Returns the lag-derived base date (`start - lag`).
    #[inline]
    pub fn base_date(&self) -> Date {
        self.inner.base_date()
    }

    /// Returns the lag-derived fixing date (`end - lag`).
    #[inline]
    pub fn fixing_date(&self) -> Date {
        self.inner.fixing_date()
    }

    /// Returns the payment date.
    #[inline]
    pub fn payment_date(&self) -> Date {
        self.inner.payment_date()
    }

    /// Returns true for a growth-only payoff.
    #[inline]
    pub fn growth_only(&self) -> bool {
        self.inner.growth_only()
    }

    /// Returns the lagged, interpolated fixing for the start date.
    pub fn base_fixing(&self) -> Result<f64, CashFlowError> {
        lagged_fixing(
            &self.index,
            self.start_date,
            self.observation_lag,
            self.interpolation,
        )
    }

    /// Returns the lagged, interpolated fixing for the end date.
    pub fn index_fixing(&self) -> Result<f64, CashFlowError> {
        lagged_fixing(
            &self.index,
            self.end_date,
            self.observation_lag,
            self.interpolation,
        )
    }

    /// Computes the payment amount from the two lagged fixings.
    pub fn amount(&self) -> Result<f64, CashFlowError> {
        let adjustment = if self.growth_only() { 1.0 } else { 0.0 };
        Ok(self.notional() * (self.index_fixing()? / self.base_fixing()? - adjustment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::Currency;

    fn sample_index() -> Rc<ZeroInflationIndex> {
        let index = ZeroInflationIndex::new("CPI", Currency::GBP);
        // Observation months for a 3M lag on 2025-01-01 / 2026-01-01.
        index.add_fixing(Date::from_ymd(2024, 10, 1).unwrap(), 100.0);
        index.add_fixing(Date::from_ymd(2024, 11, 1).unwrap(), 100.4);
        index.add_fixing(Date::from_ymd(2025, 10, 1).unwrap(), 105.0);
        index.add_fixing(Date::from_ymd(2025, 11, 1).unwrap(), 105.6);
        Rc::new(index)
    }

    fn sample_cash_flow(interpolation: CpiInterpolation, growth_only: bool) -> ZeroInflationCashFlow {
        ZeroInflationCashFlow::new(
            10_000.0,
            sample_index(),
            interpolation,
            Date::from_ymd(2025, 1, 1).unwrap(),
            Date::from_ymd(2026, 1, 1).unwrap(),
            Period::Months(3),
            Date::from_ymd(2026, 1, 5).unwrap(),
            growth_only,
        )
    }

    #[test]
    fn test_derived_dates_shift_by_lag() {
        let cf = sample_cash_flow(CpiInterpolation::Linear, false);
        assert_eq!(cf.base_date(), Date::from_ymd(2024, 10, 1).unwrap());
        assert_eq!(cf.fixing_date(), Date::from_ymd(2025, 10, 1).unwrap());
        assert_eq!(cf.start_date(), Date::from_ymd(2025, 1, 1).unwrap());
        assert_eq!(cf.end_date(), Date::from_ymd(2026, 1, 1).unwrap());
    }

    #[test]
    fn test_amount_linear_interpolation_year_apart() {
        // Start/end on the first of the month: linear weight 0, so the
        // fixings are exactly the lagged months' values 100 and 105.
        let cf = sample_cash_flow(CpiInterpolation::Linear, false);
        assert_eq!(cf.base_fixing().unwrap(), 100.0);
        assert_eq!(cf.index_fixing().unwrap(), 105.0);
        assert_relative_eq!(cf.amount().unwrap(), 10_000.0 * 1.05, epsilon = 1e-12);
    }

    #[test]
    fn test_amount_growth_only() {
        let cf = sample_cash_flow(CpiInterpolation::Linear, true);
        assert_relative_eq!(cf.amount().unwrap(), 10_000.0 * 0.05, epsilon = 1e-10);
    }

    #[test]
    fn test_flat_interpolation() {
        let cf = sample_cash_flow(CpiInterpolation::Flat, false);
        assert_eq!(cf.base_fixing().unwrap(), 100.0);
        assert_eq!(cf.index_fixing().unwrap(), 105.0);
    }

    #[test]
    fn test_lag_applied_inside_lookup_not_to_derived_dates() {
        // Regression pin: the lookup starts from the unlagged start/end
        // dates. Reading the index at the already-shifted base/fixing
        // dates directly would double-shift to 2024-07/2025-07, which
        // hold no fixings; the correct observations are 2024-10/2025-10.
        let cf = sample_cash_flow(CpiInterpolation::Flat, false);
        assert!(cf.zero_inflation_index().fixing(cf.base_date()).is_ok());
        assert!(cf
            .zero_inflation_index()
            .fixing(cf.base_date() - Period::Months(3))
            .is_err());
        assert_eq!(cf.base_fixing().unwrap(), 100.0);
    }

    #[test]
    fn test_mid_month_linear_weighting() {
        let cf = ZeroInflationCashFlow::new(
            1.0,
            sample_index(),
            CpiInterpolation::Linear,
            Date::from_ymd(2025, 1, 16).unwrap(),
            Date::from_ymd(2026, 1, 1).unwrap(),
            Period::Months(3),
            Date::from_ymd(2026, 1, 5).unwrap(),
            false,
        );
        // Day 15 of a 31-day January: weight 15/31 between 100.0 and 100.4.
        let expected = 100.0 + 15.0 / 31.0 * 0.4;
        assert_relative_eq!(cf.base_fixing().unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_observation_month_propagates() {
        let index = Rc::new(ZeroInflationIndex::new("CPI", Currency::GBP));
        let cf = ZeroInflationCashFlow::new(
            1.0,
            index,
            CpiInterpolation::Flat,
            Date::from_ymd(2025, 1, 1).unwrap(),
            Date::from_ymd(2026, 1, 1).unwrap(),
            Period::Months(3),
            Date::from_ymd(2026, 1, 5).unwrap(),
            false,
        );
        assert!(matches!(
            cf.amount(),
            Err(CashFlowError::MissingFixing { .. })
        ));
    }
}
